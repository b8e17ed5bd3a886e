//! Client code for casefetch.
//!
//! This crate provides the case data source and the court document
//! downloader shared by the server and CLI.

pub mod document;
pub mod source;

pub use document::{Document, DocumentClient, DocumentConfig, sanitize_filename};
pub use source::{MockCourtSource, NOT_FOUND_CASE_NUMBER, UNAVAILABLE_CASE_NUMBER};
