use crate::api::endpoints::{self, StatsFilter};
use crate::api::types::{GetStatResponse, GetStatsResponse};
use crate::api::ApiRequest;
use crate::query::QueryMap;
use crate::render::components::{self, Scope, StatGroupMode};
use crate::render::forms;
use crate::render::links::{self, GroupFamily};
use crate::render::{Html, Site};

use super::{Page, section};

/// `/{ws}/stats/{name}`: a filtered listing of a group's stats.
#[derive(Debug, Clone)]
pub struct StatsPage {
    pub workspace: String,
    pub group_name: String,
    pub filter: StatsFilter,
}

impl Page for StatsPage {
    type Response = GetStatsResponse;

    fn title(&self, _site: &Site) -> String {
        format!("Stats of {}", self.group_name)
    }

    fn request(&self, _site: &Site) -> Option<ApiRequest> {
        Some(endpoints::stats(&self.workspace, &self.group_name, &self.filter))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let action = links::group_href(
            site.vocabulary,
            &self.workspace,
            &self.group_name,
            GroupFamily::Stats,
            &QueryMap::new(),
        );
        let mut out = components::global_nav(scope, Some(&self.group_name));
        out.push(Html::element("h1", Html::text(&self.title(site))));
        out.push(forms::stats_filter_form(&action, &self.filter));
        out
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let stats: Vec<_> = response.stats.iter().collect();

        let mut listing = Html::new();
        if let Some(count) = response.stats_count {
            listing.push(Html::element(
                "p",
                Html::text(&format!("Showing {} of {} stats", stats.len(), count)),
            ));
        }
        listing.push(components::stat_group(
            scope,
            &self.group_name,
            &stats,
            StatGroupMode::Full,
            None,
        ));

        let mut out = section("Stats", listing);
        out.push(section(
            site.vocabulary.group_label(),
            components::group(scope, &response.group),
        ));
        out
    }
}

/// `/{ws}/stats/{name}/{path...}`: one stat, its history and the stats
/// sharing its content.
#[derive(Debug, Clone)]
pub struct StatPage {
    pub workspace: String,
    pub group_name: String,
    pub path: String,
}

impl Page for StatPage {
    type Response = GetStatResponse;

    fn title(&self, _site: &Site) -> String {
        format!("{}/{}", self.group_name, self.path)
    }

    fn request(&self, _site: &Site) -> Option<ApiRequest> {
        Some(endpoints::stat(&self.workspace, &self.group_name, &self.path))
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
        let stat = &response.stat;

        let mut out = section(
            "Stat",
            components::stat(scope, &self.group_name, stat, footprints),
        );
        if let Some(histories) = &response.histories {
            out.push(section(
                "Histories",
                components::history_group(scope, &self.group_name, histories, footprints),
            ));
        }
        if let Some(footprint) = response.current_footprint() {
            out.push(section(
                site.vocabulary.footprint_label(),
                components::footprint(scope, footprint),
            ));
        }
        if let Some(eq_stats) = &response.eq_stats {
            let eq_stats: Vec<_> = eq_stats.iter().collect();
            out.push(section(
                "Same Stats",
                components::stat_group(
                    scope,
                    &self.group_name,
                    &eq_stats,
                    StatGroupMode::Full,
                    Some((self.group_name.as_str(), stat.path.as_str())),
                ),
            ));
        }
        out
    }
}
