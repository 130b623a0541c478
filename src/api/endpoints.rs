//! Request constructors for every endpoint the front-end consumes.
//!
//! Paths are relative to the API base URL and always start with the
//! workspace name.

use crate::query::QueryMap;
use crate::uri::PathSegments;
use crate::uria;
use crate::vocabulary::Vocabulary;

use super::ApiRequest;

/// Filters accepted by the stats listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsFilter {
    pub path_prefix: Option<String>,
    pub path_partial: Option<String>,
    pub status: Option<String>,
    pub mtime_after: Option<String>,
    pub mtime_before: Option<String>,
    pub updated_at_after: Option<String>,
    pub updated_at_before: Option<String>,
    pub limit: Option<String>,
}

impl StatsFilter {
    /// Pick the known filter keys out of a page query. Others are ignored.
    pub fn from_query(query: &QueryMap) -> Self {
        let get = |key: &str| query.get(key).map(str::to_string);
        Self {
            path_prefix: get("path_prefix"),
            path_partial: get("path_partial"),
            status: get("status"),
            mtime_after: get("mtime_after"),
            mtime_before: get("mtime_before"),
            updated_at_after: get("updated_at_after"),
            updated_at_before: get("updated_at_before"),
            limit: get("limit"),
        }
    }

    /// All filter fields in form order, blanks included.
    pub fn to_query(&self) -> QueryMap {
        QueryMap::new()
            .with("path_prefix", self.path_prefix.clone())
            .with("path_partial", self.path_partial.clone())
            .with("status", self.status.clone())
            .with("mtime_after", self.mtime_after.clone())
            .with("mtime_before", self.mtime_before.clone())
            .with("updated_at_after", self.updated_at_after.clone())
            .with("updated_at_before", self.updated_at_before.clone())
            .with("limit", self.limit.clone())
    }
}

/// The two `(group, path prefix)` sides of a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSelection {
    pub group_name1: Option<String>,
    pub path_prefix1: Option<String>,
    pub group_name2: Option<String>,
    pub path_prefix2: Option<String>,
}

impl DiffSelection {
    pub fn from_query(query: &QueryMap) -> Self {
        let get = |key: &str| query.get(key).map(str::to_string);
        Self {
            group_name1: get("group_name1"),
            path_prefix1: get("path_prefix1"),
            group_name2: get("group_name2"),
            path_prefix2: get("path_prefix2"),
        }
    }

    pub fn to_query(&self) -> QueryMap {
        QueryMap::new()
            .with("group_name1", self.group_name1.clone())
            .with("path_prefix1", self.path_prefix1.clone())
            .with("group_name2", self.group_name2.clone())
            .with("path_prefix2", self.path_prefix2.clone())
    }

    /// Both group names are known. A missing prefix means the whole group.
    pub fn is_ready(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.group_name1) && filled(&self.group_name2)
    }

    /// Move both prefixes one directory up.
    pub fn up(&self) -> Self {
        Self {
            group_name1: self.group_name1.clone(),
            path_prefix1: self.path_prefix1.as_deref().map(parent_prefix),
            group_name2: self.group_name2.clone(),
            path_prefix2: self.path_prefix2.as_deref().map(parent_prefix),
        }
    }
}

/// Drop the last `/`-separated segment: `a/b/c` → `a/b`, `a` → ``.
pub fn parent_prefix(prefix: &str) -> String {
    match prefix.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// `GET {ws}/groups`
pub fn groups(vocabulary: Vocabulary, workspace: &str) -> ApiRequest {
    ApiRequest::new(uria!({ workspace } "/" { vocabulary.groups_segment() }))
}

/// `GET {ws}/groups/{name}`
pub fn group(vocabulary: Vocabulary, workspace: &str, group_name: &str) -> ApiRequest {
    ApiRequest::new(uria!({ workspace } "/" { vocabulary.groups_segment() } "/" { group_name }))
}

/// `GET {ws}/stats/{name}?...`; blank filter values are not sent.
pub fn stats(workspace: &str, group_name: &str, filter: &StatsFilter) -> ApiRequest {
    ApiRequest::new(uria!({ workspace } "/stats/" { group_name }))
        .with_query(filter.to_query().reject_empty())
}

/// `GET {ws}/stats/{name}/{path...}`, path encoded segment by segment.
pub fn stat(workspace: &str, group_name: &str, path: &str) -> ApiRequest {
    ApiRequest::new(uria!({ workspace } "/stats/" { group_name } "/" { PathSegments(path) }))
}

/// `GET {ws}/footprints/{digest}`
pub fn footprint(vocabulary: Vocabulary, workspace: &str, digest: &str) -> ApiRequest {
    ApiRequest::new(uria!({ workspace } "/" { vocabulary.footprints_segment() } "/" { digest }))
}

/// `GET {ws}/diff?group_name1&path_prefix1&group_name2&path_prefix2`
///
/// All four parameters are always sent; a missing prefix is sent empty.
pub fn diff(workspace: &str, selection: &DiffSelection) -> ApiRequest {
    let or_empty = |v: &Option<String>| Some(v.clone().unwrap_or_default());
    let query = QueryMap::new()
        .with("group_name1", or_empty(&selection.group_name1))
        .with("path_prefix1", or_empty(&selection.path_prefix1))
        .with("group_name2", or_empty(&selection.group_name2))
        .with("path_prefix2", or_empty(&selection.path_prefix2));
    ApiRequest::new(uria!({ workspace } "/diff")).with_query(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_paths_follow_vocabulary() {
        assert_eq!(groups(Vocabulary::Group, "main").path, "main/groups");
        assert_eq!(groups(Vocabulary::Namespace, "main").path, "main/namespaces");
        assert_eq!(
            group(Vocabulary::Group, "main", "a/b").path,
            "main/groups/a%2Fb"
        );
        assert_eq!(
            footprint(Vocabulary::Namespace, "main", "abc").path,
            "main/objects/abc"
        );
    }

    #[test]
    fn stat_path_is_encoded_per_segment() {
        let req = stat("main", "default", "data/my file.txt");
        assert_eq!(req.path, "main/stats/default/data/my%20file.txt");
    }

    #[test]
    fn stats_request_drops_blank_filters() {
        let filter = StatsFilter {
            path_prefix: Some("data/archives".to_string()),
            status: Some(String::new()),
            ..Default::default()
        };
        let req = stats("main", "default", &filter);
        assert_eq!(req.query.to_query_string(), "?path_prefix=data%2Farchives");
    }

    #[test]
    fn diff_request_sends_all_parameters() {
        let selection = DiffSelection {
            group_name1: Some("a".to_string()),
            group_name2: Some("b".to_string()),
            path_prefix2: Some("x/y".to_string()),
            ..Default::default()
        };
        let req = diff("main", &selection);
        assert_eq!(req.path, "main/diff");
        assert_eq!(
            req.query.to_query_string(),
            "?group_name1=a&path_prefix1=&group_name2=b&path_prefix2=x%2Fy"
        );
    }

    #[test]
    fn parent_prefix_drops_last_segment() {
        assert_eq!(parent_prefix("data/archives/2020"), "data/archives");
        assert_eq!(parent_prefix("data"), "");
        assert_eq!(parent_prefix(""), "");
        assert_eq!(parent_prefix("data/"), "data");
    }

    #[test]
    fn diff_selection_readiness() {
        let mut selection = DiffSelection::default();
        assert!(!selection.is_ready());
        selection.group_name1 = Some("a".to_string());
        selection.group_name2 = Some("b".to_string());
        assert!(selection.is_ready());
    }

    #[test]
    fn up_keeps_missing_prefixes_missing() {
        let selection = DiffSelection {
            group_name1: Some("a".to_string()),
            path_prefix1: Some("x/y".to_string()),
            ..Default::default()
        };
        let up = selection.up();
        assert_eq!(up.path_prefix1.as_deref(), Some("x"));
        assert_eq!(up.path_prefix2, None);
    }
}
