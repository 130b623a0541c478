//! Front-end URL routing.
//!
//! Patterns match the raw (still encoded) path so that an encoded `/` inside
//! a workspace or group name cannot split a segment. Captured segments are
//! decoded afterwards, one at a time.

use std::sync::LazyLock;

use regex::Regex;

use crate::uri::decode_component;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static WORKSPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/?$").expect("workspace route must compile"));

static GROUPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([^/]+)/(?:groups|namespaces)/?$").expect("groups route must compile")
});

static GROUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([^/]+)/(?:groups|namespaces)/([^/]+)/?$").expect("group route must compile")
});

static STATS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/stats/([^/]+)/?$").expect("stats route must compile"));

static STAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/stats/([^/]+)/(.+)$").expect("stat route must compile"));

static FOOTPRINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([^/]+)/(?:footprints|objects)/([^/]+)/?$")
        .expect("footprint route must compile")
});

static DIFF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([^/]+)/diff/?$").expect("diff route must compile"));

/// A front-end page address with its path parameters decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Workspace {
        workspace: String,
    },
    Groups {
        workspace: String,
    },
    Group {
        workspace: String,
        group_name: String,
    },
    Stats {
        workspace: String,
        group_name: String,
    },
    Stat {
        workspace: String,
        group_name: String,
        path: String,
    },
    Footprint {
        workspace: String,
        digest: String,
    },
    Diff {
        workspace: String,
    },
    NotFound,
}

impl Route {
    /// Route a request path (without the query string).
    pub fn parse(path: &str) -> Self {
        if path == "/" {
            return Self::Index;
        }
        if path == "/favicon.ico" {
            return Self::NotFound;
        }

        let segment = |caps: &regex::Captures<'_>, i: usize| decode_component(&caps[i]);

        if let Some(caps) = WORKSPACE_RE.captures(path) {
            Self::Workspace {
                workspace: segment(&caps, 1),
            }
        } else if let Some(caps) = GROUPS_RE.captures(path) {
            Self::Groups {
                workspace: segment(&caps, 1),
            }
        } else if let Some(caps) = GROUP_RE.captures(path) {
            Self::Group {
                workspace: segment(&caps, 1),
                group_name: segment(&caps, 2),
            }
        } else if let Some(caps) = STATS_RE.captures(path) {
            Self::Stats {
                workspace: segment(&caps, 1),
                group_name: segment(&caps, 2),
            }
        } else if let Some(caps) = STAT_RE.captures(path) {
            Self::Stat {
                workspace: segment(&caps, 1),
                group_name: segment(&caps, 2),
                path: decode_path(&caps[3]),
            }
        } else if let Some(caps) = FOOTPRINT_RE.captures(path) {
            Self::Footprint {
                workspace: segment(&caps, 1),
                digest: segment(&caps, 2),
            }
        } else if let Some(caps) = DIFF_RE.captures(path) {
            Self::Diff {
                workspace: segment(&caps, 1),
            }
        } else {
            Self::NotFound
        }
    }
}

fn decode_path(raw: &str) -> String {
    raw.split('/')
        .map(decode_component)
        .collect::<Vec<_>>()
        .join("/")
}
