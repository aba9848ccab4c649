// Envelope validation for order payloads.
// Only the envelope shape is fatal; malformed orders and items are skipped.
use crate::core::error::{Error, ErrorKind};
use crate::core::json::json_type;
use crate::core::order::{Order, parse_order};
use serde_json::Value;

const ORDERS_KEY: &str = "orders";

pub fn parse_orders(payload: &Value) -> Result<Vec<Order>, Error> {
    let Some(envelope) = payload.as_object() else {
        return Err(Error::new(ErrorKind::InvalidFormat)
            .with_message(format!(
                "expected a json object with an 'orders' key, got {}",
                json_type(payload)
            )));
    };
    let Some(raw_orders) = envelope.get(ORDERS_KEY) else {
        return Err(Error::new(ErrorKind::InvalidFormat)
            .with_message("expected a json object with an 'orders' key")
            .with_hint("The payload must look like {\"orders\": [...]}."));
    };
    let Some(raw_orders) = raw_orders.as_array() else {
        return Err(Error::new(ErrorKind::InvalidFormat).with_message(format!(
            "'orders' must be an array, got {}",
            json_type(raw_orders)
        )));
    };

    let mut orders = Vec::with_capacity(raw_orders.len());
    for (index, raw) in raw_orders.iter().enumerate() {
        match raw.as_object() {
            Some(fields) => orders.push(parse_order(fields)),
            None => {
                tracing::debug!(index, found = json_type(raw), "skipping non-object order");
            }
        }
    }

    tracing::debug!(
        orders = orders.len(),
        skipped = raw_orders.len() - orders.len(),
        items = orders.iter().map(|order| order.items().len()).sum::<usize>(),
        "parsed orders payload"
    );
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::parse_orders;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn parses_orders_in_array_order() {
        let orders = parse_orders(&json!({
            "orders": [
                {
                    "id": "1",
                    "created_at": "2025-10-20T10:00:00Z",
                    "items": [{"name": "Cake", "price": "25.00", "sku": "CAKE001"}]
                },
                {
                    "id": "2",
                    "created_at": "2025-10-20T11:00:00Z",
                    "items": [{"name": "Cookie", "price": "5.50", "sku": "COOK001"}]
                }
            ]
        }))
        .expect("orders");

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id(), Some("1"));
        assert_eq!(orders[1].id(), Some("2"));
        assert_eq!(orders[0].items().len(), 1);
    }

    #[test]
    fn empty_orders_is_not_an_error() {
        let orders = parse_orders(&json!({"orders": []})).expect("orders");
        assert!(orders.is_empty());
    }

    #[test]
    fn missing_orders_key_is_invalid_format() {
        for payload in [
            json!({"no_orders_key": []}),
            json!({}),
            json!({"data": {"orders": []}}),
        ] {
            let err = parse_orders(&payload).expect_err("err");
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }
    }

    #[test]
    fn non_object_payload_is_invalid_format() {
        for payload in [json!("orders"), json!([]), json!(null), json!(3)] {
            let err = parse_orders(&payload).expect_err("err");
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }
    }

    #[test]
    fn non_array_orders_is_invalid_format() {
        let err = parse_orders(&json!({"orders": {"id": "1"}})).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn non_object_orders_are_skipped() {
        let orders = parse_orders(&json!({
            "orders": [
                "bogus",
                null,
                {"id": "7", "items": [{"name": "Pie", "price": "10.00"}]},
                [1, 2]
            ]
        }))
        .expect("orders");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id(), Some("7"));
    }
}
