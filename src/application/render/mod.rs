//! Report rendering.
//!
//! A succeeded payload is projected once into a [`Document`]; sinks such as
//! the Markdown writer here and the PDF exporter walk that document and never
//! look at raw JSON.

mod markdown;
mod markup;
mod project;
mod types;

pub use markdown::to_markdown;
pub use markup::parse_inline;
pub use project::{
    ANALYSIS_HEADING, BUDGET_CONCLUSION_HEADING, RESUME_TITLE, SCORE_HEADING, SOLUTION_HEADING,
    STRENGTHS_HEADING, SUMMARY_HEADING, WEAKNESSES_HEADING, project,
};
pub use types::{Block, Document, RichText, Section, Span};
