pub mod app;
pub mod cli;

mod format;
mod plan;
mod report;
mod summary;
