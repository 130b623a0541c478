//! Server-rendered web front-end for the ichnome file tracking service.
//!
//! Each browser navigation is routed to a page, the page issues one `GET`
//! against the ichnome REST API, and the decoded response is rendered to
//! HTML. See [`web::Frontend`] for the entry point.

pub mod uri;

pub mod api;
pub mod cli;
pub mod config;
pub mod pages;
pub mod query;
pub mod render;
pub mod vocabulary;
pub mod web;
