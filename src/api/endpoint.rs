//! Purpose: Resolve the orders endpoint and credentials from flags and environment.
//! Exports: `DEFAULT_ORDERS_URL`, `URL_ENV`, `TOKEN_ENV`, `resolve_endpoint_url`, `resolve_token`.
//! Role: Keep CLI and library callers on the same precedence rules.
//! Invariants: Precedence is explicit value, then environment, then default.
//! Invariants: Blank values are treated as unset.

pub const DEFAULT_ORDERS_URL: &str = "http://127.0.0.1:8000/orders";
pub const URL_ENV: &str = "ORDERVALUE_URL";
pub const TOKEN_ENV: &str = "ORDERVALUE_TOKEN";

pub fn resolve_endpoint_url(explicit: Option<&str>) -> String {
    pick(explicit, std::env::var(URL_ENV).ok()).unwrap_or_else(|| DEFAULT_ORDERS_URL.to_string())
}

pub fn resolve_token(explicit: Option<&str>) -> Option<String> {
    pick(explicit, std::env::var(TOKEN_ENV).ok())
}

fn pick(explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| {
            from_env
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::pick;

    #[test]
    fn explicit_value_wins() {
        let got = pick(Some("http://a/orders"), Some("http://b/orders".to_string()));
        assert_eq!(got.as_deref(), Some("http://a/orders"));
    }

    #[test]
    fn environment_fills_in() {
        let got = pick(None, Some(" http://b/orders ".to_string()));
        assert_eq!(got.as_deref(), Some("http://b/orders"));
    }

    #[test]
    fn blank_values_are_unset() {
        assert_eq!(pick(Some("  "), Some(String::new())), None);
        assert_eq!(pick(None, None), None);
    }
}
