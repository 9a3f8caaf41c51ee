//! # md2kg
//!
//! A Rust library for extracting a knowledge graph from Markdown documents
//! that reference each other with `[[Title]]` WikiLinks, and exporting it as
//! CSV node/edge tables suitable for Neo4j, DuckDB, and similar bulk-import
//! pipelines.
//!
//! ## Overview
//!
//! Each document becomes a node; each WikiLink becomes a directed `LINK`
//! edge. References may point at documents that have not been ingested yet
//! (or never will be): those targets exist as *placeholder* nodes until the
//! real document arrives, at which point every placeholder registered under
//! that title is promoted to the real node. The merge outcome is independent
//! of ingestion order as long as exactly one real document claims a title.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2kg::{builder::GraphBuilder, export::CsvExporter};
//! use std::path::Path;
//!
//! fn main() -> Result<(), md2kg::Md2kgError> {
//!     let mut builder = GraphBuilder::new();
//!     builder.add_directory("./notes", md2kg::builder::DEFAULT_PATTERN)?;
//!
//!     let (nodes, edges) = builder.get_graph();
//!     println!("Found {} nodes and {} edges", nodes.len(), edges.len());
//!
//!     let output = CsvExporter::new().export(&nodes, &edges, Path::new("./kg_output"))?;
//!     println!("Exported nodes to {}", output.nodes_csv.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Guide
//!
//! - [`builder`]: [`GraphBuilder`](builder::GraphBuilder) — ingestion,
//!   duplicate resolution, placeholder promotion (start here)
//! - [`parser`]: pure document parsing (front matter, title, WikiLinks)
//! - [`model`]: [`Node`](model::Node), [`Edge`](model::Edge), and the
//!   SHA-256 identity function
//! - [`export`]: [`CsvExporter`](export::CsvExporter) — RFC 4180 tables
//!
//! Ingestion is sequential by design: a `GraphBuilder` is an owned aggregate
//! mutated in place, and one ingestion pass completes before
//! [`get_graph`](builder::GraphBuilder::get_graph) is read. Recoverable
//! per-file errors (unreadable files, malformed front matter) are reported
//! through `tracing` and never abort a run.

pub mod builder;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

pub use error::*;
