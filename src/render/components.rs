//! Record views: one function per kind of record or list.

use crate::api::types::{Footprint, FootprintRef, FootprintTable, Group, History, Stat};
use crate::vocabulary::Vocabulary;

use super::html::Html;
use super::links::{self, GroupFamily};
use super::{format_time, or_nothing};

/// Length of the shortened digests in lists.
pub const SHORT_DIGEST: usize = 8;

/// Workspace and naming every link in a view is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub vocabulary: Vocabulary,
    pub workspace: &'a str,
}

impl<'a> Scope<'a> {
    pub fn new(vocabulary: Vocabulary, workspace: &'a str) -> Self {
        Self {
            vocabulary,
            workspace,
        }
    }

    fn group_link(&self, group_name: &str, family: GroupFamily) -> Html {
        links::group_link(self.vocabulary, self.workspace, group_name, family)
    }

    fn footprint_link(&self, digest: &str, length: Option<usize>) -> Html {
        links::footprint_link(self.vocabulary, self.workspace, digest, length)
    }

    /// Link to the group's stats, or `Nothing` when the group is unknown.
    fn group_cell(&self, group_name: Option<&str>) -> Html {
        match group_name {
            Some(group_name) => self.group_link(group_name, GroupFamily::Stats),
            None => Html::text("Nothing"),
        }
    }

    /// Stat link, or the bare path when the group is unknown.
    fn path_cell(&self, group_name: Option<&str>, path: &str) -> Html {
        match group_name {
            Some(group_name) => links::stat_link(self.workspace, group_name, path),
            None => Html::text(path),
        }
    }
}

/// The record's own group, else `fallback`; empty names count as unknown.
fn record_group<'g>(own: Option<&'g str>, fallback: &'g str) -> Option<&'g str> {
    own.filter(|g| !g.is_empty())
        .or(Some(fallback))
        .filter(|g| !g.is_empty())
}

/// How a stat list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroupMode {
    /// Digest, times, group, path, version and size.
    Full,
    /// Path, version, mtime and size; the digest is shown by the caller.
    Diff,
}

fn li(inner: Html) -> Html {
    Html::element("li", inner)
}

fn labelled(label: &str, value: Html) -> Html {
    let mut inner = Html::text(&format!("{label}: "));
    inner.push(value);
    li(inner)
}

fn joined(parts: Vec<Html>) -> Html {
    let mut out = Html::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push_raw(" / ");
        }
        out.push(part);
    }
    out
}

/// Definition of one group.
pub fn group(scope: Scope<'_>, group: &Group) -> Html {
    let label = scope.vocabulary.group_label();
    let mut items = Html::new();

    let mut id = Html::text("ID: ");
    id.push(scope.group_link(&group.name, GroupFamily::Groups));
    id.push_text(" (Stats: ");
    id.push(scope.group_link(&group.name, GroupFamily::Stats));
    id.push_text(")");
    items.push(li(id));

    items.push(labelled("Type", Html::text(&group.group_type.to_string())));
    items.push(labelled("URL", Html::text(&group.url)));
    if let Some(version) = group.version {
        items.push(labelled("Version", Html::text(&version.to_string())));
    }
    if let Some(status) = group.status {
        items.push(labelled("Status", Html::text(&status.to_string())));
    }
    if let Some(digest) = group.digest() {
        items.push(labelled("Digest", scope.footprint_link(digest, None)));
    }
    items.push(labelled(
        &format!("{label} Created At"),
        Html::text(&format_time(&group.created_at)),
    ));
    items.push(labelled(
        &format!("{label} Updated At"),
        Html::text(&format_time(&group.updated_at)),
    ));

    Html::element("ul", items)
}

/// Detailed view of one stat.
///
/// `group_name` is used when the record does not name its own group.
pub fn stat(
    scope: Scope<'_>,
    group_name: &str,
    stat: &Stat,
    footprints: Option<&FootprintTable>,
) -> Html {
    let group_name = record_group(stat.group_name.as_deref(), group_name);
    let mut items = Html::new();

    items.push(labelled(
        scope.vocabulary.group_label(),
        scope.group_cell(group_name),
    ));
    items.push(labelled("Path", scope.path_cell(group_name, &stat.path)));
    items.push(labelled("Version", Html::text(&stat.version.to_string())));
    items.push(labelled("Status", Html::text(&stat.status.to_string())));
    if let Some(mtime) = &stat.mtime {
        items.push(labelled("File Modified At", Html::text(&format_time(mtime))));
    }
    if let Some(digest) = stat.resolve_digest(footprints) {
        items.push(labelled("Digest", scope.footprint_link(digest, None)));
    }
    if let Some(size) = stat.size {
        items.push(labelled("Size", Html::text(&size.to_string())));
    }
    items.push(labelled("Stat Created At", Html::text(&format_time(&stat.created_at))));
    items.push(labelled("Stat Updated At", Html::text(&format_time(&stat.updated_at))));

    Html::element("ul", items)
}

/// List of stats, one line each.
///
/// With `diff_source`, every line also links to the diff between that
/// `(group, path)` and the listed stat.
pub fn stat_group(
    scope: Scope<'_>,
    group_name: &str,
    stats: &[&Stat],
    mode: StatGroupMode,
    diff_source: Option<(&str, &str)>,
) -> Html {
    let items: Html = stats
        .iter()
        .map(|stat| li(stat_group_item(scope, group_name, stat, mode, diff_source)))
        .collect();
    Html::element("ul", items)
}

fn stat_group_item(
    scope: Scope<'_>,
    group_name: &str,
    stat: &Stat,
    mode: StatGroupMode,
    diff_source: Option<(&str, &str)>,
) -> Html {
    let group_name = record_group(stat.group_name.as_deref(), group_name);
    let mtime = stat.mtime.as_ref().map(format_time);

    let mut parts = match mode {
        StatGroupMode::Full => vec![
            stat.digest
                .as_deref()
                .map(|d| scope.footprint_link(d, Some(SHORT_DIGEST)))
                .unwrap_or_default(),
            or_nothing(mtime),
            Html::text(&format_time(&stat.updated_at)),
            scope.group_cell(group_name),
            scope.path_cell(group_name, &stat.path),
            Html::text(&stat.version.to_string()),
            or_nothing(stat.size),
        ],
        StatGroupMode::Diff => vec![
            scope.path_cell(group_name, &stat.path),
            Html::text(&stat.version.to_string()),
            or_nothing(mtime),
            or_nothing(stat.size),
        ],
    };

    if let Some(source) = diff_source
        && let Some(group_name) = group_name
    {
        parts.push(links::diff_link(
            scope.workspace,
            source,
            (group_name, stat.path.as_str()),
        ));
    }

    joined(parts)
}

/// Chronological list of a path's snapshots.
pub fn history_group(
    scope: Scope<'_>,
    group_name: &str,
    histories: &[History],
    footprints: Option<&FootprintTable>,
) -> Html {
    let items: Html = histories
        .iter()
        .map(|history| {
            let group_name = record_group(history.group_name.as_deref(), group_name);
            li(joined(vec![
                history
                    .resolve_digest(footprints)
                    .map(|d| scope.footprint_link(d, Some(SHORT_DIGEST)))
                    .unwrap_or_default(),
                or_nothing(history.mtime.as_ref().map(format_time)),
                Html::text(&format_time(&history.updated_at)),
                scope.group_cell(group_name),
                scope.path_cell(group_name, &history.path),
                Html::text(&history.version.to_string()),
            ]))
        })
        .collect();
    Html::element("ul", items)
}

/// One content record.
pub fn footprint(scope: Scope<'_>, footprint: &Footprint) -> Html {
    let mut items = Html::new();
    items.push(labelled("Digest", scope.footprint_link(&footprint.digest, None)));
    items.push(labelled("Size", Html::text(&footprint.size.to_string())));
    if let Some(oid) = &footprint.git_object_id {
        items.push(labelled("Git Object ID", links::digest(oid, None)));
    }
    Html::element("ul", items)
}

/// Breadcrumb navigation at the top of workspace pages.
pub fn global_nav(scope: Scope<'_>, group_name: Option<&str>) -> Html {
    let mut inner = Html::text("Workspace: ");
    inner.push(links::workspace_link(scope.workspace));
    if let Some(group_name) = group_name {
        inner.push_raw(" / ");
        inner.push_text(&format!("{}: ", scope.vocabulary.group_label()));
        inner.push(scope.group_link(group_name, GroupFamily::Stats));
    }
    Html::element("nav", inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Status;
    use chrono::NaiveDateTime;

    fn time(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn sample_stat(id: i64, path: &str) -> Stat {
        Stat {
            id,
            workspace_name: None,
            group_name: None,
            group_id: None,
            path: path.to_string(),
            history_id: None,
            version: 2,
            status: Status::Enabled,
            mtime: None,
            footprint_id: None,
            digest: Some("0123456789abcdef".to_string()),
            size: Some(42),
            created_at: time("2020-01-01T00:00:00"),
            updated_at: time("2020-01-02T00:00:00"),
        }
    }

    #[test]
    fn stat_group_full_line() {
        let scope = Scope::new(Vocabulary::Group, "w");
        let s = sample_stat(1, "data/a.txt");
        let html = stat_group(scope, "g", &[&s], StatGroupMode::Full, None);
        assert_eq!(
            html.as_str(),
            concat!(
                "<ul><li><a href=\"/w/footprints/0123456789abcdef\"><code class=\"digest\">01234567</code></a>",
                " / Nothing / 2020-01-02T00:00:00 / <a href=\"/w/stats/g\">g</a>",
                " / <a href=\"/w/stats/g/data/a.txt\">data/a.txt</a> / 2 / 42</li></ul>",
            )
        );
    }

    #[test]
    fn stat_group_prefers_record_group_name() {
        let scope = Scope::new(Vocabulary::Group, "w");
        let mut s = sample_stat(1, "p");
        s.group_name = Some("other".to_string());
        let html = stat_group(scope, "g", &[&s], StatGroupMode::Diff, None);
        assert!(html.as_str().contains("/w/stats/other/p"));
    }

    #[test]
    fn unknown_group_leaves_path_unlinked() {
        let scope = Scope::new(Vocabulary::Group, "w");
        let s = sample_stat(1, "data/a.txt");
        let html = stat_group(scope, "", &[&s], StatGroupMode::Full, Some(("g", "b.txt")));
        let out = html.as_str();
        assert!(!out.contains("/w/stats/"), "{out}");
        assert!(!out.contains("/w/diff"), "{out}");
        assert!(out.contains(" / Nothing / data/a.txt / 2 / 42"), "{out}");

        let detail = stat(scope, "", &s, None);
        assert!(detail.as_str().contains("<li>Path: data/a.txt</li>"));
    }

    #[test]
    fn stat_group_adds_diff_links() {
        let scope = Scope::new(Vocabulary::Group, "w");
        let s = sample_stat(1, "copy/a.txt");
        let html = stat_group(scope, "g2", &[&s], StatGroupMode::Diff, Some(("g1", "orig/a.txt")));
        assert!(html.as_str().contains(
            "/w/diff?group_name1=g1&amp;path_prefix1=orig%2Fa.txt&amp;group_name2=g2&amp;path_prefix2=copy%2Fa.txt"
        ));
    }

    #[test]
    fn stat_view_escapes_text() {
        let scope = Scope::new(Vocabulary::Group, "w");
        let s = sample_stat(1, "<script>");
        let html = stat(scope, "g", &s, None);
        assert!(html.as_str().contains("&lt;script&gt;"));
        assert!(!html.as_str().contains("<script>"));
    }

    #[test]
    fn group_view_uses_vocabulary_labels() {
        let g = Group {
            id: 1,
            name: "default".to_string(),
            url: "file:///srv".to_string(),
            group_type: crate::api::types::GroupType::Local,
            history_id: None,
            version: None,
            status: None,
            mtime: None,
            footprint_id: None,
            digest: None,
            size: None,
            created_at: time("2020-01-01T00:00:00"),
            updated_at: time("2020-01-01T00:00:00"),
        };
        let html = group(Scope::new(Vocabulary::Namespace, "w"), &g);
        assert!(html.as_str().contains("Namespace Created At: 2020-01-01T00:00:00"));
        assert!(html.as_str().contains("<a href=\"/w/namespaces/default\">default</a>"));
        assert!(html.as_str().contains("Type: local"));
    }

    #[test]
    fn global_nav_with_group() {
        let html = global_nav(Scope::new(Vocabulary::Group, "w"), Some("g"));
        assert_eq!(
            html.as_str(),
            "<nav>Workspace: <a href=\"/w\">w</a> / Group: <a href=\"/w/stats/g\">g</a></nav>"
        );
    }
}
