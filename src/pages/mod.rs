//! Page lifecycle.
//!
//! A page view names at most one backend request. [`load`] performs it and
//! folds the outcome into a [`PageState`]; [`render_document`] turns the
//! state into a complete HTML document. Every page goes through the same two
//! functions, so the pending and error presentations are identical
//! everywhere.

pub mod diff;
pub mod footprint;
pub mod groups;
pub mod home;
pub mod stats;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{ApiRequest, Fetch, fetch_json};
use crate::render::{Html, Site, document};

pub use diff::{DiffPage, DiffRow, resolve_diff};
pub use footprint::FootprintPage;
pub use groups::{GroupPage, GroupsPage};
pub use home::{IndexPage, WorkspacePage};
pub use stats::{StatPage, StatsPage};

/// Outcome of a page's data load.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    /// Nothing has been fetched (or there is nothing to fetch yet).
    Pending,
    Loaded(T),
    /// The fetch failed; holds the message shown to the user.
    Errored(String),
}

/// One kind of page.
pub trait Page {
    /// Decoded response body.
    type Response: DeserializeOwned;

    /// Page title; the document title appends the application name.
    fn title(&self, site: &Site) -> String;

    /// The request backing this page, or `None` when it has nothing to load.
    fn request(&self, site: &Site) -> Option<ApiRequest>;

    /// Markup shown whatever the state: navigation, heading and forms.
    fn render_scaffold(&self, site: &Site) -> Html {
        Html::element("h1", Html::text(&self.title(site)))
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html;
}

/// Issue the page's request, if any, and capture the outcome.
pub fn load<P, F>(fetcher: &F, site: &Site, page: &P) -> PageState<P::Response>
where
    P: Page,
    F: Fetch + ?Sized,
{
    let Some(request) = page.request(site) else {
        return PageState::Pending;
    };
    match fetch_json(fetcher, &request) {
        Ok(response) => PageState::Loaded(response),
        Err(e) => {
            debug!(path = %request.path, error = ?e, "page load failed");
            PageState::Errored(e.to_string())
        }
    }
}

/// The line shown in place of the response view when loading failed.
pub fn error_line(message: &str) -> Html {
    Html::element("p", Html::text(&format!("Some error occured: {message}")))
}

/// Page body for `state`, scaffold included.
pub fn render_body<P: Page>(site: &Site, page: &P, state: &PageState<P::Response>) -> Html {
    let mut body = page.render_scaffold(site);
    match state {
        PageState::Pending => {}
        PageState::Loaded(response) => body.push(page.render_response(site, response)),
        PageState::Errored(message) => body.push(error_line(message)),
    }
    body
}

pub fn render_document<P: Page>(site: &Site, page: &P, state: &PageState<P::Response>) -> String {
    document(site, &page.title(site), render_body(site, page, state))
}

/// `<h2>` section heading.
pub(crate) fn section(title: &str, content: Html) -> Html {
    let mut out = Html::element("h2", Html::text(title));
    out.push(content);
    out
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use crate::api::{ApiError, ApiRequest, Fetch};

    /// Answers every request with the same canned result and records the
    /// requested URLs.
    pub struct StubFetch {
        pub reply: Result<String, fn() -> ApiError>,
        pub seen: RefCell<Vec<String>>,
    }

    impl StubFetch {
        pub fn ok(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                seen: RefCell::new(Vec::new()),
            }
        }

        pub fn failing(err: fn() -> ApiError) -> Self {
            Self {
                reply: Err(err),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetch for StubFetch {
        fn fetch(&self, request: &ApiRequest) -> Result<String, ApiError> {
            self.seen.borrow_mut().push(request.url("http://api"));
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(make) => Err(make()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StubFetch;
    use super::*;
    use crate::api::ApiError;

    struct Echo(Option<&'static str>);

    impl Page for Echo {
        type Response = serde_json::Value;

        fn title(&self, _site: &Site) -> String {
            "Echo".to_string()
        }

        fn request(&self, _site: &Site) -> Option<ApiRequest> {
            self.0.map(ApiRequest::new)
        }

        fn render_response(&self, _site: &Site, response: &Self::Response) -> Html {
            Html::text(&response.to_string())
        }
    }

    #[test]
    fn no_request_means_pending_and_no_fetch() {
        let fetcher = StubFetch::ok("{}");
        let state = load(&fetcher, &Site::default(), &Echo(None));
        assert_eq!(state, PageState::Pending);
        assert!(fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn one_fetch_per_load() {
        let fetcher = StubFetch::ok("{\"a\":1}");
        let state = load(&fetcher, &Site::default(), &Echo(Some("w/groups")));
        assert_eq!(state, PageState::Loaded(serde_json::json!({"a": 1})));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://api/w/groups".to_string()]);
    }

    #[test]
    fn errors_collapse_to_message() {
        let fetcher = StubFetch::failing(|| ApiError::Status {
            status: 500,
            body: String::new(),
        });
        let state = load(&fetcher, &Site::default(), &Echo(Some("w/groups")));
        assert_eq!(
            state,
            PageState::Errored("Request failed with status code 500".to_string())
        );
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let fetcher = StubFetch::ok("not json");
        let state = load(&fetcher, &Site::default(), &Echo(Some("w/groups")));
        assert!(matches!(state, PageState::Errored(m) if m.starts_with("Invalid response body")));
    }

    #[test]
    fn errored_state_renders_only_the_error_line() {
        let site = Site::default();
        let body = render_body(&site, &Echo(None), &PageState::Errored("Network Error".into()));
        assert_eq!(
            body.as_str(),
            "<h1>Echo</h1><p>Some error occured: Network Error</p>"
        );
    }

    #[test]
    fn pending_state_renders_the_scaffold() {
        let site = Site::default();
        let body = render_body(&site, &Echo(None), &PageState::Pending);
        assert_eq!(body.as_str(), "<h1>Echo</h1>");
    }
}
