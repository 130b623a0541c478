//! The front-end HTTP server.
//!
//! A sync `tiny_http` server: every browser navigation is routed, loads its
//! page with one backend request, and is answered with a complete HTML
//! document. Requests are handled one after another.

pub mod routes;

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{info, warn};

use crate::api::Fetch;
use crate::api::endpoints::{DiffSelection, StatsFilter};
use crate::pages::{
    DiffPage, FootprintPage, GroupPage, GroupsPage, IndexPage, Page, StatPage, StatsPage,
    WorkspacePage, load, render_document,
};
use crate::query::QueryMap;
use crate::render::Site;

pub use routes::Route;

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A response before it is handed to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub location: Option<String>,
    pub body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            location: None,
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            location: None,
            body: body.to_string(),
        }
    }

    /// `303 See Other` to `location`.
    fn redirect(location: String) -> Self {
        Self {
            location: Some(location),
            ..Self::text(303, "")
        }
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes("Content-Type", self.content_type) {
            response.add_header(header);
        }
        if let Some(location) = self.location
            && let Ok(header) = Header::from_bytes("Location", location.as_bytes())
        {
            response.add_header(header);
        }
        response
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Routes front-end URLs to pages and renders them.
pub struct Frontend<F> {
    fetcher: F,
    site: Site,
}

impl<F: Fetch> Frontend<F> {
    pub fn new(fetcher: F, site: Site) -> Self {
        Self { fetcher, site }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Answer one request. `url` is the request target, query included.
    pub fn dispatch(&self, method: &Method, url: &str) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return Reply::text(405, "method not allowed");
        }

        let (path, raw_query) = url.split_once('?').unwrap_or((url, ""));
        let query = QueryMap::parse(raw_query);

        match Route::parse(path) {
            Route::Index => self.page(&IndexPage),
            Route::Workspace { workspace } => self.page(&WorkspacePage { workspace }),
            Route::Groups { workspace } => self.page(&GroupsPage { workspace }),
            Route::Group {
                workspace,
                group_name,
            } => self.page(&GroupPage {
                workspace,
                group_name,
            }),
            Route::Stats {
                workspace,
                group_name,
            } => {
                if let Some(reply) = redirect_if_blank(path, &query) {
                    return reply;
                }
                self.page(&StatsPage {
                    workspace,
                    group_name,
                    filter: StatsFilter::from_query(&query),
                })
            }
            Route::Stat {
                workspace,
                group_name,
                path,
            } => self.page(&StatPage {
                workspace,
                group_name,
                path,
            }),
            Route::Footprint { workspace, digest } => {
                self.page(&FootprintPage { workspace, digest })
            }
            Route::Diff { workspace } => {
                if query.contains_key("up") {
                    let up = DiffSelection::from_query(&query).up();
                    let target = format!("{path}{}", up.to_query().reject_empty().to_query_string());
                    return Reply::redirect(target);
                }
                if let Some(reply) = redirect_if_blank(path, &query) {
                    return reply;
                }
                self.page(&DiffPage {
                    workspace,
                    selection: DiffSelection::from_query(&query),
                })
            }
            Route::NotFound => Reply::text(404, "not found"),
        }
    }

    fn page<P: Page>(&self, page: &P) -> Reply {
        let state = load(&self.fetcher, &self.site, page);
        Reply::html(render_document(&self.site, page, &state))
    }
}

/// Form submissions carry every field; send the browser to the same path
/// with the blank ones removed.
fn redirect_if_blank(path: &str, query: &QueryMap) -> Option<Reply> {
    let sanitized = query.reject_empty();
    (sanitized.len() != query.len())
        .then(|| Reply::redirect(format!("{path}{}", sanitized.to_query_string())))
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

/// Bind `addr` and serve until the process is stopped.
pub fn serve<F: Fetch>(addr: &str, frontend: &Frontend<F>) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;
    info!("front-end listening on http://{addr}");
    run(&server, frontend);
    Ok(())
}

/// Handle requests from `server` sequentially.
pub fn run<F: Fetch>(server: &Server, frontend: &Frontend<F>) {
    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let started = Instant::now();

        let reply = frontend.dispatch(&method, &url);
        let status = reply.status;
        if let Err(e) = request.respond(reply.into_response()) {
            warn!(%method, %url, error = %e, "failed to send response");
        }

        info!(
            %method,
            %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::StubFetch;

    fn frontend(body: &str) -> Frontend<StubFetch> {
        Frontend::new(StubFetch::ok(body), Site::default())
    }

    #[test]
    fn non_get_methods_are_rejected() {
        let reply = frontend("{}").dispatch(&Method::Post, "/main");
        assert_eq!(reply.status, 405);
    }

    #[test]
    fn favicon_is_not_found_without_fetching() {
        let f = frontend("{}");
        assert_eq!(f.dispatch(&Method::Get, "/favicon.ico").status, 404);
        assert!(f.fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn blank_stats_filters_redirect() {
        let f = frontend("{}");
        let reply = f.dispatch(&Method::Get, "/main/stats/default?path_prefix=&status=enabled&limit=");
        assert_eq!(reply.status, 303);
        assert_eq!(reply.location.as_deref(), Some("/main/stats/default?status=enabled"));
        assert!(f.fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn diff_up_trims_both_prefixes() {
        let f = frontend("{}");
        let reply = f.dispatch(
            &Method::Get,
            "/main/diff?group_name1=a&path_prefix1=x%2Fy&group_name2=b&path_prefix2=z&up=1",
        );
        assert_eq!(reply.status, 303);
        assert_eq!(
            reply.location.as_deref(),
            Some("/main/diff?group_name1=a&path_prefix1=x&group_name2=b")
        );
    }

    #[test]
    fn pages_render_as_html() {
        let f = frontend(r#"{"groups":[]}"#);
        let reply = f.dispatch(&Method::Head, "/main/groups");
        assert_eq!(reply.status, 200);
        assert!(reply.content_type.starts_with("text/html"));
        assert!(reply.body.contains("<title>Groups - ichnome</title>"));
    }

    #[test]
    fn redirect_carries_location_header() {
        let response = Reply::redirect("/main/diff".to_string()).into_response();
        assert_eq!(response.status_code(), StatusCode(303));
        assert!(
            response
                .headers()
                .iter()
                .any(|h| h.field.equiv("Location") && h.value.as_str() == "/main/diff")
        );
    }
}
