//! docintel: client library for an asynchronous document-analysis service.
//!
//! The [`application::jobs::JobController`] submits a document and follows the
//! analysis job; [`application::render`] and [`application::export`] turn the
//! result into a Markdown report or a paginated PDF.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
