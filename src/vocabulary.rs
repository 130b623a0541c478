//! Naming of the tracked entities.
//!
//! The backend has gone by two vocabularies for the same entities: groups
//! with footprints, and the earlier namespaces with objects. The data model
//! is identical; only labels and URL family segments differ.

use serde::{Deserialize, Serialize};

/// Which set of names to present and to request from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Vocabulary {
    /// `groups` / `footprints`.
    #[default]
    Group,
    /// `namespaces` / `objects`.
    Namespace,
}

impl TryFrom<String> for Vocabulary {
    type Error = String;

    fn try_from(val: String) -> Result<Self, Self::Error> {
        Self::parse(&val).ok_or_else(|| format!("unknown vocabulary '{val}', expected group or namespace"))
    }
}

impl Vocabulary {
    pub fn parse(val: &str) -> Option<Self> {
        match val.to_ascii_lowercase().as_str() {
            "group" | "groups" => Some(Self::Group),
            "namespace" | "namespaces" => Some(Self::Namespace),
            _ => None,
        }
    }

    /// URL segment of the collection endpoints.
    pub fn groups_segment(self) -> &'static str {
        match self {
            Self::Group => "groups",
            Self::Namespace => "namespaces",
        }
    }

    /// URL segment of the content-record endpoints.
    pub fn footprints_segment(self) -> &'static str {
        match self {
            Self::Group => "footprints",
            Self::Namespace => "objects",
        }
    }

    pub fn group_label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Namespace => "Namespace",
        }
    }

    pub fn groups_label(self) -> &'static str {
        match self {
            Self::Group => "Groups",
            Self::Namespace => "Namespaces",
        }
    }

    pub fn footprint_label(self) -> &'static str {
        match self {
            Self::Group => "Footprint",
            Self::Namespace => "Object",
        }
    }
}

impl std::fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Namespace => write!(f, "namespace"),
        }
    }
}
