//! Purpose: Library crate behind the `ordervalue` CLI.
//! Exports: `api` (stable surface) and `core` (records, parsing, averaging, errors).
//! Role: Fetch an orders payload, parse it leniently, and compute the average order value.
//! Invariants: Only the envelope shape is fatal; malformed orders and items are skipped.
//! Invariants: Core modules are pure; all I/O lives behind `api::OrdersSource`.
pub mod api;
pub mod core;
