// Pedantic lint configuration for the crate.
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Only static regex construction can panic
// - items_after_statements: Output structs are clearer near their usage
// - module_name_repetitions: Names read better qualified (`report::Summary`)
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod symbols;
