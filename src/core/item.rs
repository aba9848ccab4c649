// Line items decoded from loosely typed order JSON.
// Price is the only required field; name and sku pass through when they are strings.
use crate::core::error::{Error, ErrorKind};
use crate::core::json::json_type;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    name: Option<String>,
    price: f64,
    sku: Option<String>,
}

impl Item {
    /// Builds an item, rejecting prices that are not finite.
    pub fn new(name: Option<String>, price: f64, sku: Option<String>) -> Result<Self, Error> {
        if !price.is_finite() {
            return Err(Error::new(ErrorKind::Parse)
                .with_message(format!("item price must be finite, got {price}")));
        }
        Ok(Self { name, price, sku })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }
}

/// Decodes one item object. Fails with `ErrorKind::Parse` when the value is
/// not an object or its `price` is missing or cannot be read as a number.
pub fn parse_item(raw: &Value) -> Result<Item, Error> {
    let Some(fields) = raw.as_object() else {
        return Err(Error::new(ErrorKind::Parse).with_message("item is not a json object"));
    };
    let price = match fields.get("price") {
        Some(value) => coerce_price(value)?,
        None => return Err(Error::new(ErrorKind::Parse).with_message("item price is missing")),
    };
    Item::new(
        string_field(fields.get("name")),
        price,
        string_field(fields.get("sku")),
    )
}

fn coerce_price(value: &Value) -> Result<f64, Error> {
    match value {
        // Literals such as 1e400 decode losslessly and only fail here.
        Value::Number(number) => number
            .as_f64()
            .filter(|price| price.is_finite())
            .ok_or_else(|| {
                Error::new(ErrorKind::Parse)
                    .with_message(format!("item price {number} is out of range"))
            }),
        Value::String(text) => text.trim().parse::<f64>().map_err(|err| {
            Error::new(ErrorKind::Parse)
                .with_message(format!("item price {text:?} is not a number"))
                .with_source(err)
        }),
        other => Err(Error::new(ErrorKind::Parse)
            .with_message(format!("item price has unsupported type {}", json_type(other)))),
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{Item, parse_item};
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_string_price() {
        let item = parse_item(&json!({
            "name": "Vanilla Cake",
            "price": "30.00",
            "sku": "VAN001",
        }))
        .expect("item");
        assert_eq!(item.name(), Some("Vanilla Cake"));
        assert_eq!(item.price(), 30.0);
        assert_eq!(item.sku(), Some("VAN001"));
    }

    #[test]
    fn parses_numeric_price() {
        let item = parse_item(&json!({"name": "Cookie", "price": 5.5})).expect("item");
        assert_eq!(item.price(), 5.5);
        assert_eq!(item.sku(), None);
    }

    #[test]
    fn trims_whitespace_around_string_price() {
        let item = parse_item(&json!({"price": " 12.25 "})).expect("item");
        assert_eq!(item.price(), 12.25);
    }

    #[test]
    fn missing_name_and_sku_are_absent() {
        let item = parse_item(&json!({"price": "1.00", "name": 7})).expect("item");
        assert_eq!(item.name(), None);
        assert_eq!(item.sku(), None);
    }

    #[test]
    fn rejects_missing_price() {
        let err = parse_item(&json!({"name": "Pie"})).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = parse_item(&json!({"name": "B", "price": "invalid"})).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn rejects_unsupported_price_types() {
        for price in [json!(null), json!(true), json!([1]), json!({"amount": 1})] {
            let err = parse_item(&json!({"price": price})).expect_err("err");
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
    }

    #[test]
    fn rejects_non_finite_price() {
        for price in ["inf", "-infinity", "NaN"] {
            let err = parse_item(&json!({"price": price})).expect_err("err");
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
        assert!(Item::new(None, f64::NAN, None).is_err());
    }

    #[test]
    fn rejects_out_of_range_numeric_price() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"name": "B", "price": 1e400}"#).expect("decodes");
        let err = parse_item(&raw).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn accepts_negative_price() {
        let item = parse_item(&json!({"name": "Refund", "price": "-5"})).expect("item");
        assert_eq!(item.price(), -5.0);
        let item = parse_item(&json!({"price": -2.5})).expect("item");
        assert_eq!(item.price(), -2.5);
    }

    #[test]
    fn rejects_non_object_item() {
        let err = parse_item(&json!("Cake")).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
