//! Side-by-side comparison of two `(group, path prefix)` selections.
//!
//! The backend answers with a map from footprint key to a pair of stat-id
//! lists (source side, destination side). Rendering turns that map into one
//! table row per footprint.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::api::endpoints::{self, DiffSelection};
use crate::api::types::{Footprint, GetDiffResponse, Stat};
use crate::api::ApiRequest;
use crate::render::components::{self, SHORT_DIGEST, Scope, StatGroupMode};
use crate::render::links::{self, digest};
use crate::render::{Html, Site, forms};

use super::{Page, section};

/// One resolved row of the diff table.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow<'a> {
    pub key: &'a str,
    pub footprint: Option<&'a Footprint>,
    pub source: Vec<&'a Stat>,
    pub destination: Vec<&'a Stat>,
}

/// Resolve the diff map against the stat and footprint tables.
///
/// Rows are ordered by key: integer-like keys ascending, then the rest
/// lexicographically. Stat ids missing from the table are dropped; the
/// remaining stats keep the order the backend listed them in.
pub fn resolve_diff(response: &GetDiffResponse) -> Vec<DiffRow<'_>> {
    let mut rows: Vec<DiffRow<'_>> = response
        .diff
        .iter()
        .map(|(key, (source, destination))| DiffRow {
            key: key.as_str(),
            footprint: response.footprints.get(key),
            source: lookup(&response.stats, source),
            destination: lookup(&response.stats, destination),
        })
        .collect();
    rows.sort_by(|a, b| key_order(a.key, b.key));
    rows
}

fn lookup<'a>(stats: &'a BTreeMap<String, Stat>, ids: &[i64]) -> Vec<&'a Stat> {
    ids.iter()
        .filter_map(|id| stats.get(&id.to_string()))
        .collect()
}

fn key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// `/{ws}/diff`: selection form plus the diff table once both groups are set.
#[derive(Debug, Clone)]
pub struct DiffPage {
    pub workspace: String,
    pub selection: DiffSelection,
}

impl Page for DiffPage {
    type Response = GetDiffResponse;

    fn title(&self, _site: &Site) -> String {
        "Diff".to_string()
    }

    fn request(&self, _site: &Site) -> Option<ApiRequest> {
        self.selection
            .is_ready()
            .then(|| endpoints::diff(&self.workspace, &self.selection))
    }

    fn render_scaffold(&self, site: &Site) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let action = links::diff_href(&self.workspace, &Default::default());
        let mut out = components::global_nav(scope, None);
        out.push(Html::element("h1", Html::text(&self.title(site))));
        out.push(forms::diff_form(&action, &self.selection));
        out
    }

    fn render_response(&self, site: &Site, response: &Self::Response) -> Html {
        let scope = Scope::new(site.vocabulary, &self.workspace);
        let mut table = Html::raw(
            "<table><thead><tr><th>Digest</th><th>Source</th><th>Destination</th></tr></thead><tbody>",
        );
        for row in resolve_diff(response) {
            let digest_cell = match row.footprint {
                Some(f) => links::footprint_link(
                    site.vocabulary,
                    &self.workspace,
                    &f.digest,
                    Some(SHORT_DIGEST),
                ),
                None => digest(row.key, None),
            };
            let side = |group_name: &str, stats: &[&Stat]| {
                components::stat_group(scope, group_name, stats, StatGroupMode::Diff, None)
            };
            table.push_raw("<tr>");
            table.push(Html::element("td", digest_cell));
            table.push(Html::element("td", side(&response.group1.name, row.source.as_slice())));
            table.push(Html::element(
                "td",
                side(&response.group2.name, row.destination.as_slice()),
            ));
            table.push_raw("</tr>");
        }
        table.push_raw("</tbody></table>");
        section("Diff Table", table)
    }
}
