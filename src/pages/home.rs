use crate::api::types::GetGroupsResponse;
use crate::api::{ApiRequest, endpoints};
use crate::query::QueryMap;
use crate::render::html::anchor;
use crate::render::links::{self, GroupFamily};
use crate::render::{Html, Site};

use super::{Page, section};

/// `/`: nothing to load.
#[derive(Debug, Clone, Default)]
pub struct IndexPage;

impl Page for IndexPage {
    type Response = serde_json::Value;

    fn title(&self, _site: &Site) -> String {
        "Home".to_string()
    }

    fn request(&self, _site: &Site) -> Option<ApiRequest> {
        None
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let mut out = Html::element("h1", Html::text(&site.application_name));
        out.push(Html::element(
            "p",
            Html::text("Open /{workspace} to browse a workspace."),
        ));
        out
    }

    fn render_response(&self, _site: &Site, _response: &Self::Response) -> Html {
        Html::new()
    }
}

/// `/{ws}`: the workspace's groups, each linking to its stats.
#[derive(Debug, Clone)]
pub struct WorkspacePage {
    pub workspace: String,
}

impl Page for WorkspacePage {
    type Response = GetGroupsResponse;

    fn title(&self, _site: &Site) -> String {
        self.workspace.clone()
    }

    fn request(&self, site: &Site) -> Option<ApiRequest> {
        Some(endpoints::groups(site.vocabulary, &self.workspace))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        Html::element(
            "h1",
            Html::text(&format!("{} - {}", self.workspace, site.application_name)),
        )
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let vocabulary = site.vocabulary;
        let items: Html = response
            .groups
            .iter()
            .map(|g| {
                Html::element(
                    "li",
                    links::group_link(vocabulary, &self.workspace, &g.name, GroupFamily::Stats),
                )
            })
            .collect();
        let mut out = section(vocabulary.groups_label(), Html::element("ul", items));
        out.push(Html::element(
            "p",
            links::groups_link(vocabulary, &self.workspace, Html::text("List")),
        ));
        out.push(Html::element(
            "p",
            anchor(
                &links::diff_href(&self.workspace, &QueryMap::new()),
                Html::text("Diff"),
            ),
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::StubFetch;
    use crate::pages::{PageState, load, render_body};

    const GROUPS: &str = r#"{"groups":[
        {"id":1,"name":"default","url":"file:///srv","type":0,
         "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"},
        {"id":2,"name":"mirror","url":"ssh://host/srv","type":1,
         "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"}]}"#;

    #[test]
    fn index_never_fetches() {
        let fetcher = StubFetch::ok("{}");
        let state = load(&fetcher, &Site::default(), &IndexPage);
        assert_eq!(state, PageState::Pending);
        let body = render_body(&Site::default(), &IndexPage, &state);
        assert!(body.as_str().starts_with("<h1>ichnome</h1>"));
    }

    #[test]
    fn workspace_lists_group_stats_links() {
        let site = Site::default();
        let page = WorkspacePage {
            workspace: "main".to_string(),
        };
        let fetcher = StubFetch::ok(GROUPS);
        let state = load(&fetcher, &site, &page);
        let body = render_body(&site, &page, &state);
        let s = body.as_str();
        assert!(s.contains("<h1>main - ichnome</h1>"));
        assert!(s.contains("<li><a href=\"/main/stats/default\">default</a></li>"));
        assert!(s.contains("<li><a href=\"/main/stats/mirror\">mirror</a></li>"));
        assert!(s.contains("<a href=\"/main/groups\">List</a>"));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://api/main/groups".to_string()]);
    }
}
