// src/lib.rs

//! Cloudsmith command-line client
//!
//! Lists packages, repositories and distributions from a Cloudsmith-style
//! package service and renders them either as human-readable tables or as
//! machine-readable JSON documents.
//!
//! # Architecture
//!
//! - `query`: search query terms and their wire encoding
//! - `pagination`: page requests, pagination headers and result summaries
//! - `api`: the [`api::Fetcher`] seam and its HTTP implementation
//! - `render`: output modes, tables and the structured JSON document
//! - `failure`: failure reports, hints and their presentation
//! - `commands`: the listing commands tying the above together

pub mod api;
pub mod commands;
pub mod config;
mod error;
pub mod failure;
pub mod models;
pub mod pagination;
pub mod progress;
pub mod query;
pub mod render;

pub use error::{Error, Result};
pub use failure::{FailureContext, FailurePolicy, FailureReport};
pub use models::Entity;
pub use query::QueryTerm;
pub use render::{Console, OutputMode};
