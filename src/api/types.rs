//! Typed view models for the ichnome REST API.
//!
//! Bodies are decoded into these structs at the API boundary; a body that
//! does not fit is reported as [`ApiError::Decode`](super::ApiError::Decode)
//! instead of surfacing later as a rendering glitch.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// Name of the group whose stats describe the other groups' definitions.
pub const META_GROUP_NAME: &str = "__meta";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Tracking status of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum Status {
    Disabled,
    Enabled,
    Other(i64),
}

impl From<i64> for Status {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::Disabled,
            1 => Self::Enabled,
            n => Self::Other(n),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Enabled => write!(f, "enabled"),
            Self::Other(n) => write!(f, "{n}"),
        }
    }
}

/// Where a group's files live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum GroupType {
    Local,
    Remote,
    Other(i64),
}

impl From<i64> for GroupType {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::Local,
            1 => Self::Remote,
            n => Self::Other(n),
        }
    }
}

impl std::fmt::Display for GroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
            Self::Other(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// A named, tracked collection of paths.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    #[serde(default)]
    pub history_id: Option<i64>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub mtime: Option<NaiveDateTime>,
    #[serde(default)]
    pub footprint_id: Option<i64>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<u64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The latest known state of one path within a group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stat {
    pub id: i64,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_id: Option<i64>,
    pub path: String,
    #[serde(default)]
    pub history_id: Option<i64>,
    pub version: i64,
    pub status: Status,
    #[serde(default)]
    pub mtime: Option<NaiveDateTime>,
    #[serde(default)]
    pub footprint_id: Option<i64>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<u64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One versioned snapshot of a stat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct History {
    pub id: i64,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_id: Option<i64>,
    pub path: String,
    pub version: i64,
    pub status: Status,
    #[serde(default)]
    pub mtime: Option<NaiveDateTime>,
    #[serde(default)]
    pub footprint_id: Option<i64>,
    #[serde(default)]
    pub digest: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A content-addressed, deduplicated blob record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Footprint {
    pub id: i64,
    pub digest: String,
    #[serde(deserialize_with = "lenient_size_required")]
    pub size: u64,
    #[serde(default)]
    pub git_object_id: Option<String>,
}

/// Lookup table keyed by the decimal id string.
pub type FootprintTable = BTreeMap<String, Footprint>;

/// Something that may point at a footprint.
pub trait FootprintRef {
    fn footprint_id(&self) -> Option<i64>;
    fn digest(&self) -> Option<&str>;

    /// The record's digest, or the digest of its footprint in `table`.
    fn resolve_digest<'a>(&'a self, table: Option<&'a FootprintTable>) -> Option<&'a str> {
        self.digest().or_else(|| {
            let id = self.footprint_id()?;
            table?.get(&id.to_string()).map(|f| f.digest.as_str())
        })
    }
}

impl FootprintRef for Group {
    fn footprint_id(&self) -> Option<i64> {
        self.footprint_id
    }
    fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl FootprintRef for Stat {
    fn footprint_id(&self) -> Option<i64> {
        self.footprint_id
    }
    fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl FootprintRef for History {
    fn footprint_id(&self) -> Option<i64> {
        self.footprint_id
    }
    fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `GET {ws}/groups`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetGroupsResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    #[serde(alias = "namespaces")]
    pub groups: Vec<Group>,
}

/// `GET {ws}/groups/{name}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetGroupResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    #[serde(alias = "namespace")]
    pub group: Group,
    #[serde(default)]
    pub stat: Option<Stat>,
    #[serde(default)]
    pub histories: Option<Vec<History>>,
    #[serde(default, alias = "objects")]
    pub footprints: Option<FootprintTable>,
}

/// `GET {ws}/stats/{name}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetStatsResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    #[serde(alias = "namespace")]
    pub group: Group,
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub stats_count: Option<i64>,
}

/// `GET {ws}/stats/{name}/{path...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetStatResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    #[serde(alias = "namespace")]
    pub group: Group,
    pub stat: Stat,
    #[serde(default)]
    pub histories: Option<Vec<History>>,
    #[serde(default, alias = "objects")]
    pub footprints: Option<FootprintTable>,
    #[serde(default)]
    pub eq_stats: Option<Vec<Stat>>,
}

impl GetStatResponse {
    /// The stat's current footprint, when the table carries it.
    pub fn current_footprint(&self) -> Option<&Footprint> {
        let id = self.stat.footprint_id?;
        self.footprints.as_ref()?.get(&id.to_string())
    }
}

impl GetGroupResponse {
    /// Footprint of the group definition's stat, when present.
    pub fn current_footprint(&self) -> Option<&Footprint> {
        let id = self.stat.as_ref()?.footprint_id?;
        self.footprints.as_ref()?.get(&id.to_string())
    }
}

/// `GET {ws}/footprints/{digest}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetFootprintResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    #[serde(alias = "object")]
    pub footprint: Footprint,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub stats: Option<Vec<Stat>>,
    #[serde(default)]
    pub histories: Option<Vec<History>>,
}

/// `GET {ws}/diff`
///
/// `diff` maps a footprint key to the ids of the source and destination
/// stats holding that content; `stats` and `footprints` resolve those ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetDiffResponse {
    #[serde(default)]
    pub workspace: Option<Workspace>,
    pub group1: Group,
    pub group2: Group,
    pub diff: BTreeMap<String, (Vec<i64>, Vec<i64>)>,
    pub stats: BTreeMap<String, Stat>,
    pub footprints: FootprintTable,
}

// ---------------------------------------------------------------------------
// Lenient number decoding
// ---------------------------------------------------------------------------

/// The backend emits sizes either as numbers or as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid size: {s:?}"))),
        }
    }
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_u64)
        .transpose()
}

fn lenient_size_required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    NumberOrString::deserialize(deserializer)?.into_u64()
}
