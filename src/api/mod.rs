//! Purpose: Define the public Rust API boundary for ordervalue.
//! Exports: Core order types, parsing and averaging, payload sources, and reporting.
//! Role: Public surface used by the CLI and tests; hides module layout.
//! Invariants: Transport types (ureq) never appear in public signatures.

mod endpoint;
mod remote;
mod report;
mod source;

pub use crate::core::average::average_order_value;
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::item::{Item, parse_item};
pub use crate::core::order::{Order, parse_order};
pub use crate::core::parse::parse_orders;
pub use endpoint::{
    DEFAULT_ORDERS_URL, TOKEN_ENV, URL_ENV, resolve_endpoint_url, resolve_token,
};
pub use remote::RemoteClient;
pub use report::{Report, format_amount, report_json};
pub use source::{ApiResult, FileSource, OrdersSource, fetch_orders};
