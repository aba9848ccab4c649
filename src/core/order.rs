// Orders own their parsed items; the order value is always derived from them.
use crate::core::item::{Item, parse_item};
use crate::core::json::json_type;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    id: Option<String>,
    created_at: Option<String>,
    items: Vec<Item>,
}

impl Order {
    pub fn new(id: Option<String>, created_at: Option<String>, items: Vec<Item>) -> Self {
        Self {
            id,
            created_at,
            items,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Creation timestamp exactly as the endpoint sent it.
    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Sum of item prices, in item order.
    pub fn items_value(&self) -> f64 {
        self.items.iter().map(Item::price).sum()
    }
}

/// Decodes one order object. Never fails: items that are not objects or whose
/// price cannot be read are dropped and the rest of the order is kept.
pub fn parse_order(raw: &Map<String, Value>) -> Order {
    let id = text_field(raw.get("id"));
    let items = match raw.get("items") {
        Some(Value::Array(values)) => parse_items(id.as_deref(), values),
        Some(other) => {
            tracing::debug!(
                order = id.as_deref().unwrap_or(""),
                found = json_type(other),
                "order items is not an array; treating as empty"
            );
            Vec::new()
        }
        None => Vec::new(),
    };
    Order {
        id,
        created_at: text_field(raw.get("created_at")),
        items,
    }
}

fn parse_items(order_id: Option<&str>, values: &[Value]) -> Vec<Item> {
    let mut items = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        if !value.is_object() {
            tracing::debug!(
                order = order_id.unwrap_or(""),
                index,
                found = json_type(value),
                "skipping non-object item"
            );
            continue;
        }
        match parse_item(value) {
            Ok(item) => items.push(item),
            Err(err) => {
                tracing::debug!(
                    order = order_id.unwrap_or(""),
                    index,
                    error = %err,
                    "skipping item with unusable price"
                );
            }
        }
    }
    items
}

// Ids and timestamps are text, but some endpoints send numeric ids.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
