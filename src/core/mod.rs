// Core modules: order records, envelope parsing, averaging, and error modeling.
pub mod average;
pub mod error;
pub mod item;
pub(crate) mod json;
pub mod order;
pub mod parse;
