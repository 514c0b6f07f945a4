//! Core library for the harvest-tools command line applications.
//!
//! Two batch transforms over spreadsheet order exports share this crate:
//! `listify-orders` turns free-text order cells into a purchase list, and
//! `split-customers` writes one worksheet per customer. Readers and writers
//! live under [`harvest::tools::io`], the order parsing and aggregation in
//! [`harvest::tools::listify`], the per-customer grouping in
//! [`harvest::tools::split`], and the run orchestration in
//! [`harvest::tools::pipeline`].

pub mod harvest;

pub use harvest::tools::{
    Result, ToolError, config, error, io, listify, logging, model, pipeline, split,
};
