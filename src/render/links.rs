//! Links between front-end pages.

use crate::query::QueryMap;
use crate::uri;
use crate::uri::PathSegments;
use crate::vocabulary::Vocabulary;

use super::html::{Html, anchor};

/// Which page a group link leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupFamily {
    /// The group's stat listing.
    Stats,
    /// The group's definition page.
    Groups,
}

/// A digest in monospace, optionally cut to its first `length` characters.
pub fn digest(digest: &str, length: Option<usize>) -> Html {
    let shown = match length {
        Some(n) => digest.get(..n).unwrap_or(digest),
        None => digest,
    };
    Html::raw(format!("<code class=\"digest\">{}</code>", super::escape(shown)))
}

pub fn workspace_href(workspace: &str) -> String {
    uri!("/" { workspace })
}

pub fn workspace_link(workspace: &str) -> Html {
    anchor(&workspace_href(workspace), Html::text(workspace))
}

pub fn groups_href(vocabulary: Vocabulary, workspace: &str) -> String {
    uri!("/" { workspace } "/" { vocabulary.groups_segment() })
}

pub fn groups_link(vocabulary: Vocabulary, workspace: &str, label: Html) -> Html {
    anchor(&groups_href(vocabulary, workspace), label)
}

pub fn group_href(
    vocabulary: Vocabulary,
    workspace: &str,
    group_name: &str,
    family: GroupFamily,
    query: &QueryMap,
) -> String {
    let path = match family {
        GroupFamily::Groups => {
            uri!("/" { workspace } "/" { vocabulary.groups_segment() } "/" { group_name })
        }
        GroupFamily::Stats => uri!("/" { workspace } "/stats/" { group_name }),
    };
    format!("{path}{}", query.to_query_string())
}

pub fn group_link(
    vocabulary: Vocabulary,
    workspace: &str,
    group_name: &str,
    family: GroupFamily,
) -> Html {
    anchor(
        &group_href(vocabulary, workspace, group_name, family, &QueryMap::new()),
        Html::text(group_name),
    )
}

/// Link to one stat. The path keeps its slashes; each segment is encoded.
pub fn stat_href(workspace: &str, group_name: &str, path: &str) -> String {
    uri!("/" { workspace } "/stats/" { group_name } "/" { PathSegments(path) })
}

pub fn stat_link(workspace: &str, group_name: &str, path: &str) -> Html {
    anchor(&stat_href(workspace, group_name, path), Html::text(path))
}

pub fn footprint_href(vocabulary: Vocabulary, workspace: &str, digest: &str) -> String {
    uri!("/" { workspace } "/" { vocabulary.footprints_segment() } "/" { digest })
}

pub fn footprint_link(
    vocabulary: Vocabulary,
    workspace: &str,
    digest_value: &str,
    length: Option<usize>,
) -> Html {
    anchor(
        &footprint_href(vocabulary, workspace, digest_value),
        digest(digest_value, length),
    )
}

pub fn diff_href(workspace: &str, query: &QueryMap) -> String {
    format!("{}{}", uri!("/" { workspace } "/diff"), query.to_query_string())
}

/// Link to the diff of two `(group, path prefix)` pairs.
pub fn diff_link(
    workspace: &str,
    (group_name1, path_prefix1): (&str, &str),
    (group_name2, path_prefix2): (&str, &str),
) -> Html {
    let query = QueryMap::new()
        .with("group_name1", Some(group_name1))
        .with("path_prefix1", Some(path_prefix1))
        .with("group_name2", Some(group_name2))
        .with("path_prefix2", Some(path_prefix2));
    anchor(&diff_href(workspace, &query), Html::text("Diff"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_shortened_when_asked() {
        assert_eq!(
            digest("0123456789abcdef", Some(8)).as_str(),
            "<code class=\"digest\">01234567</code>"
        );
        assert_eq!(digest("0123", Some(8)).as_str(), "<code class=\"digest\">0123</code>");
    }

    #[test]
    fn group_links_by_family() {
        let q = QueryMap::new().with("path_prefix", Some("data/x"));
        assert_eq!(
            group_href(Vocabulary::Group, "w s", "g", GroupFamily::Stats, &q),
            "/w%20s/stats/g?path_prefix=data%2Fx"
        );
        assert_eq!(
            group_href(Vocabulary::Namespace, "w", "g", GroupFamily::Groups, &QueryMap::new()),
            "/w/namespaces/g"
        );
    }

    #[test]
    fn stat_href_encodes_segments_not_separators() {
        assert_eq!(
            stat_href("w", "g/1", "data/a b.txt"),
            "/w/stats/g%2F1/data/a%20b.txt"
        );
    }

    #[test]
    fn diff_link_carries_both_sides() {
        let link = diff_link("w", ("a", "x/y"), ("b", ""));
        assert_eq!(
            link.as_str(),
            "<a href=\"/w/diff?group_name1=a&amp;path_prefix1=x%2Fy&amp;group_name2=b&amp;path_prefix2=\">Diff</a>"
        );
    }

    #[test]
    fn footprint_link_uses_vocabulary() {
        let link = footprint_link(Vocabulary::Namespace, "w", "abcdef", Some(4));
        assert_eq!(
            link.as_str(),
            "<a href=\"/w/objects/abcdef\"><code class=\"digest\">abcd</code></a>"
        );
    }
}
