//! Purpose: Define where order payloads come from and how they become orders.
//! Exports: `OrdersSource`, `FileSource`, `fetch_orders`.
//! Role: Seam between transport (remote or local) and the parsing core.
//! Invariants: Sources only yield decoded JSON; envelope checks happen in `parse_orders`.
#![allow(clippy::result_large_err)]

use crate::core::error::{Error, ErrorKind};
use crate::core::order::Order;
use crate::core::parse::parse_orders;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

pub type ApiResult<T> = Result<T, Error>;

/// Anything that can produce a raw orders payload.
pub trait OrdersSource {
    fn fetch_orders_payload(&self) -> ApiResult<Value>;
}

impl<S: OrdersSource + ?Sized> OrdersSource for &S {
    fn fetch_orders_payload(&self) -> ApiResult<Value> {
        (**self).fetch_orders_payload()
    }
}

/// Payload read from a local file, or stdin when the path is `-`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    fn read_to_string(&self) -> ApiResult<String> {
        if self.is_stdin() {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read payload from stdin")
                    .with_source(err)
            })?;
            return Ok(text);
        }
        std::fs::read_to_string(&self.path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!(
                    "failed to read payload file {}",
                    self.path.display()
                ))
                .with_source(err)
        })
    }
}

impl OrdersSource for FileSource {
    fn fetch_orders_payload(&self) -> ApiResult<Value> {
        let text = self.read_to_string()?;
        serde_json::from_str(&text).map_err(|err| {
            Error::new(ErrorKind::InvalidFormat)
                .with_message("payload is not valid json")
                .with_source(err)
        })
    }
}

/// Fetches a payload from `source` and parses it into orders.
pub fn fetch_orders(source: &impl OrdersSource) -> ApiResult<Vec<Order>> {
    let payload = source.fetch_orders_payload()?;
    parse_orders(&payload)
}
