// Shared helpers for inspecting dynamically typed JSON.
use serde_json::Value;

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::json_type;
    use serde_json::json;

    #[test]
    fn names_every_variant() {
        let cases = [
            (json!(null), "null"),
            (json!(true), "bool"),
            (json!(1.5), "number"),
            (json!("x"), "string"),
            (json!([]), "array"),
            (json!({}), "object"),
        ];
        for (value, expected) in cases {
            assert_eq!(json_type(&value), expected);
        }
    }
}
