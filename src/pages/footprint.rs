use crate::api::types::GetFootprintResponse;
use crate::api::{ApiRequest, endpoints};
use crate::render::components::{self, SHORT_DIGEST, Scope, StatGroupMode};
use crate::render::{Html, Site};

use super::{Page, section};

/// `/{ws}/footprints/{digest}`: one content record and where it appears.
#[derive(Debug, Clone)]
pub struct FootprintPage {
    pub workspace: String,
    pub digest: String,
}

impl Page for FootprintPage {
    type Response = GetFootprintResponse;

    fn title(&self, site: &Site) -> String {
        let short = self.digest.get(..SHORT_DIGEST).unwrap_or(&self.digest);
        format!("{}: {short}", site.vocabulary.footprint_label())
    }

    fn request(&self, site: &Site) -> Option<ApiRequest> {
        Some(endpoints::footprint(
            site.vocabulary,
            &self.workspace,
            &self.digest,
        ))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let mut out = components::global_nav(Scope::new(site.vocabulary, &self.workspace), None);
        out.push(Html::element("h1", Html::text(&self.title(site))));
        out
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        // Records without a group of their own fall back to this; an empty
        // name leaves their paths unlinked.
        let group_name = response.group_name.as_deref().unwrap_or_default();

        let mut out = section(
            site.vocabulary.footprint_label(),
            components::footprint(scope, &response.footprint),
        );
        if let Some(stats) = &response.stats {
            let stats: Vec<_> = stats.iter().collect();
            out.push(section(
                "Stats",
                components::stat_group(scope, group_name, &stats, StatGroupMode::Full, None),
            ));
        }
        if let Some(histories) = &response.histories {
            out.push(section(
                "Histories",
                components::history_group(scope, group_name, histories, None),
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

    #[test]
    fn title_uses_short_digest() {
        let page = FootprintPage {
            workspace: "w".to_string(),
            digest: "0123456789abcdef".to_string(),
        };
        assert_eq!(page.title(&Site::default()), "Footprint: 01234567");
        let site = Site {
            vocabulary: Vocabulary::Namespace,
            ..Site::default()
        };
        assert_eq!(page.title(&site), "Object: 01234567");
    }

    #[test]
    fn lists_referencing_stats() {
        let site = Site::default();
        let page = FootprintPage {
            workspace: "w".to_string(),
            digest: "abcdef".to_string(),
        };
        let fetcher = StubFetch::ok(
            r#"{"footprint":{"id":2,"digest":"abcdef","size":5,"git_object_id":"9f9f"},
                "stats":[{"id":8,"group_name":"g","path":"x/y","version":1,"status":1,
                    "digest":"abcdef","created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"}]}"#,
        );
        let body = render_body(&site, &page, &load(&fetcher, &site, &page));
        let s = body.as_str();
        assert!(s.contains("Git Object ID: <code class=\"digest\">9f9f</code>"));
        assert!(s.contains("<a href=\"/w/stats/g/x/y\">x/y</a>"));
        assert!(!s.contains("<h2>Histories</h2>"));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://api/w/footprints/abcdef".to_string()]);
    }

    #[test]
    fn stats_without_group_are_not_linked() {
        let site = Site::default();
        let page = FootprintPage {
            workspace: "w".to_string(),
            digest: "abcdef".to_string(),
        };
        let fetcher = StubFetch::ok(
            r#"{"footprint":{"id":2,"digest":"abcdef","size":5},
                "stats":[{"id":8,"path":"x/y","version":1,"status":1,
                    "created_at":"2020-01-01T00:00:00","updated_at":"2020-01-01T00:00:00"}]}"#,
        );
        let body = render_body(&site, &page, &load(&fetcher, &site, &page));
        let s = body.as_str();
        assert!(!s.contains("/w/stats/"), "{s}");
        assert!(s.contains(" / Nothing / x/y / 1 / Nothing"), "{s}");
    }
}
