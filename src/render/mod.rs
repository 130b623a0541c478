//! Presentational building blocks.
//!
//! Everything here is a pure function from records to markup. Nothing in
//! this module talks to the backend.

pub mod components;
pub mod forms;
pub mod html;
pub mod links;

use chrono::NaiveDateTime;

use crate::config::FrontConfig;
use crate::vocabulary::Vocabulary;

pub use html::{Html, escape};

/// Presentation settings shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub application_name: String,
    pub vocabulary: Vocabulary,
}

impl Site {
    pub fn from_config(config: &FrontConfig) -> Self {
        Self {
            application_name: config.general.application_name.clone(),
            vocabulary: config.general.vocabulary,
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::from_config(&FrontConfig::default())
    }
}

const STYLE: &str = "body { font-family: sans-serif; margin: 1rem 2rem; } \
code.digest { font-size: 0.9rem; } \
table { border-collapse: collapse; } \
td, th { border: 1px solid #ccc; padding: 0.25rem 0.5rem; vertical-align: top; }";

/// Wrap a page body into a complete HTML document.
pub fn document(site: &Site, title: &str, body: Html) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{} - {}</title>\n<style>{}</style>\n</head>\n<body>\n<div class=\"container\">\n{}\n</div>\n</body>\n</html>\n",
        escape(title),
        escape(&site.application_name),
        STYLE,
        body
    )
}

/// Timestamps are shown the way the API sends them, without fractions.
pub fn format_time(time: &NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// `text`, or `Nothing` when absent.
pub fn or_nothing<T: ToString>(value: Option<T>) -> Html {
    match value {
        Some(v) => Html::text(&v.to_string()),
        None => Html::text("Nothing"),
    }
}
