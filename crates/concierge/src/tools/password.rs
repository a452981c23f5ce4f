//! Random password generation tool.

use rand::Rng;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use concierge_llm::tool::{ParamSpec, ParamType, ToolSchema};

pub const NAME: &str = "generate_random_password";

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub fn schema() -> ToolSchema {
    ToolSchema::new(
        NAME,
        "Generates a secure random password with a specified length, optionally including symbols.",
    )
    .param(ParamSpec::required(
        "length",
        ParamType::Integer,
        "Desired length (8-128).",
    ))
    .param(ParamSpec::optional(
        "include_symbols",
        ParamType::Boolean,
        "Include symbols? Defaults true.",
    ))
}

#[derive(Debug, Deserialize)]
struct PasswordArgs {
    length: u32,
    #[serde(default = "default_include_symbols")]
    include_symbols: bool,
}

fn default_include_symbols() -> bool {
    true
}

/// Generates a password from the coerced arguments. The value itself
/// is never logged, only its length.
pub async fn run(args: Map<String, Value>) -> String {
    let args: PasswordArgs = match serde_json::from_value(Value::Object(args)) {
        Ok(args) => args,
        Err(e) => return format!("Error: Invalid arguments provided - {e}"),
    };

    let mut charset = String::with_capacity(LETTERS.len() + DIGITS.len() + SYMBOLS.len());
    charset.push_str(LETTERS);
    charset.push_str(DIGITS);
    if args.include_symbols {
        charset.push_str(SYMBOLS);
    }
    let charset = charset.as_bytes();

    let mut rng = rand::thread_rng();
    let password: String = (0..args.length)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect();

    debug!(target: "concierge::tools", length = password.len(), "generated password");
    password
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn password_has_requested_length() {
        for length in [8u32, 12, 64, 128] {
            let password = run(args(json!({"length": length}))).await;
            assert_eq!(password.chars().count(), length as usize);
        }
    }

    #[tokio::test]
    async fn password_draws_only_from_permitted_classes() {
        let password = run(args(json!({"length": 128, "include_symbols": true}))).await;
        for c in password.chars() {
            assert!(
                LETTERS.contains(c) || DIGITS.contains(c) || SYMBOLS.contains(c),
                "unexpected character: {c:?}"
            );
        }
    }

    #[tokio::test]
    async fn symbols_excluded_when_disabled() {
        let password = run(args(json!({"length": 128, "include_symbols": false}))).await;
        for c in password.chars() {
            assert!(
                c.is_ascii_alphanumeric(),
                "symbol leaked into password: {c:?}"
            );
        }
    }

    #[tokio::test]
    async fn successive_passwords_differ() {
        let first = run(args(json!({"length": 32}))).await;
        let second = run(args(json!({"length": 32}))).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn missing_length_reports_invalid_arguments() {
        let output = run(Map::new()).await;
        assert!(output.starts_with("Error: Invalid arguments provided"));
    }
}
