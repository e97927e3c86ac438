//! Application services: job lifecycle, rendering and export.

pub mod catalog;
pub mod error;
pub mod export;
pub mod jobs;
pub mod render;
