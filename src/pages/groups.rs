use crate::api::types::{GetGroupResponse, GetGroupsResponse, META_GROUP_NAME};
use crate::api::{ApiRequest, endpoints};
use crate::render::components::{self, Scope};
use crate::render::{Html, Site};

use super::{Page, section};

/// `/{ws}/groups`: every group definition of a workspace.
#[derive(Debug, Clone)]
pub struct GroupsPage {
    pub workspace: String,
}

impl Page for GroupsPage {
    type Response = GetGroupsResponse;

    fn title(&self, site: &Site) -> String {
        site.vocabulary.groups_label().to_string()
    }

    fn request(&self, site: &Site) -> Option<ApiRequest> {
        Some(endpoints::groups(site.vocabulary, &self.workspace))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let mut out = components::global_nav(Scope::new(site.vocabulary, &self.workspace), None);
        out.push(Html::element("h1", Html::text(&self.title(site))));
        out
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        response
            .groups
            .iter()
            .map(|g| components::group(scope, g))
            .collect()
    }
}

/// `/{ws}/groups/{name}`: one group's definition.
///
/// The definition itself is tracked as a stat of the meta group, so the
/// stat, history and footprint views link into that group.
#[derive(Debug, Clone)]
pub struct GroupPage {
    pub workspace: String,
    pub group_name: String,
}

impl Page for GroupPage {
    type Response = GetGroupResponse;

    fn title(&self, site: &Site) -> String {
        format!(
            "{} Definition: {}",
            site.vocabulary.group_label(),
            self.group_name
        )
    }

    fn request(&self, site: &Site) -> Option<ApiRequest> {
        Some(endpoints::group(
            site.vocabulary,
            &self.workspace,
            &self.group_name,
        ))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let mut out = components::global_nav(scope, Some(&self.group_name));
        out.push(Html::element("h1", Html::text(&self.title(site))));
        out
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let footprints = response.footprints.as_ref();

        let mut out = section(
            site.vocabulary.group_label(),
            components::group(scope, &response.group),
        );
        out.push(section(
            "Stat",
            match &response.stat {
                Some(stat) => components::stat(scope, META_GROUP_NAME, stat, footprints),
                None => Html::text("Nothing"),
            },
        ));
        if let Some(histories) = &response.histories {
            out.push(section(
                "Histories",
                components::history_group(scope, META_GROUP_NAME, histories, footprints),
            ));
        }
        if let Some(footprint) = response.current_footprint() {
            out.push(section(
                site.vocabulary.footprint_label(),
                components::footprint(scope, footprint),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::StubFetch;
    use crate::pages::{load, render_body};
    use crate::vocabulary::Vocabulary;

    const GROUP: &str = r#"{
        "group":{"id":1,"name":"default","url":"file:///srv","type":0,
            "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-02T00:00:00"},
        "stat":{"id":9,"path":"default","version":1,"status":1,"footprint_id":4,"size":12,
            "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-02T00:00:00"},
        "histories":[{"id":3,"path":"default","version":1,"status":1,"footprint_id":4,
            "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"}],
        "footprints":{"4":{"id":4,"digest":"feedfacecafe","size":12}}
    }"#;

    #[test]
    fn group_definition_links_into_meta_group() {
        let site = Site::default();
        let page = GroupPage {
            workspace: "w".to_string(),
            group_name: "default".to_string(),
        };
        let fetcher = StubFetch::ok(GROUP);
        let body = render_body(&site, &page, &load(&fetcher, &site, &page));
        let s = body.as_str();
        assert!(s.contains("<h1>Group Definition: default</h1>"));
        assert!(s.contains("<a href=\"/w/stats/__meta/default\">default</a>"));
        assert!(s.contains("<h2>Histories</h2>"));
        assert!(s.contains("<h2>Footprint</h2>"));
        assert!(s.contains("/w/footprints/feedfacecafe"));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://api/w/groups/default".to_string()]);
    }

    #[test]
    fn missing_definition_stat_shows_nothing() {
        let site = Site::default();
        let page = GroupPage {
            workspace: "w".to_string(),
            group_name: "default".to_string(),
        };
        let fetcher = StubFetch::ok(
            r#"{"group":{"id":1,"name":"default","url":"u","type":0,
                "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"}}"#,
        );
        let body = render_body(&site, &page, &load(&fetcher, &site, &page));
        assert!(body.as_str().contains("<h2>Stat</h2>Nothing"));
        assert!(!body.as_str().contains("<h2>Histories</h2>"));
    }

    #[test]
    fn namespace_vocabulary_changes_labels_and_endpoint() {
        let site = Site {
            vocabulary: Vocabulary::Namespace,
            ..Site::default()
        };
        let page = GroupsPage {
            workspace: "w".to_string(),
        };
        let fetcher = StubFetch::ok(r#"{"namespaces":[]}"#);
        let body = render_body(&site, &page, &load(&fetcher, &site, &page));
        assert!(body.as_str().contains("<h1>Namespaces</h1>"));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://api/w/namespaces".to_string()]);
    }
}
