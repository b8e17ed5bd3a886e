//! Case data sources.
//!
//! The only source shipped today is [`MockCourtSource`], which stands in for
//! a court website scraper behind the [`casefetch_core::CaseSource`] trait.

pub mod mock;

pub use mock::{MockCourtSource, NOT_FOUND_CASE_NUMBER, UNAVAILABLE_CASE_NUMBER};
