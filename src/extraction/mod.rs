//! Solution extraction: route to segments, totals and solver info.

mod extractor;

pub use extractor::{extract, SearchMetadata, STRATEGY};
