//! Currency conversion backed by ExchangeRate-API.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use concierge_llm::tool::{ParamSpec, ParamType, ToolSchema};

pub const NAME: &str = "convert_currency";

pub fn schema() -> ToolSchema {
    ToolSchema::new(
        NAME,
        "Convert an amount from one currency to another using real-time rates.",
    )
    .param(ParamSpec::required(
        "amount",
        ParamType::Number,
        "Amount to convert.",
    ))
    .param(ParamSpec::required(
        "from_currency",
        ParamType::String,
        "3-letter currency code FROM (e.g., 'USD').",
    ))
    .param(ParamSpec::required(
        "to_currency",
        ParamType::String,
        "3-letter currency code TO (e.g., 'JPY').",
    ))
}

#[derive(Debug, Deserialize)]
struct CurrencyArgs {
    amount: f64,
    from_currency: String,
    to_currency: String,
}

#[derive(Debug, Deserialize)]
struct PairResponse {
    result: Option<String>,
    conversion_result: Option<f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

pub async fn run(args: Map<String, Value>, api_key: Option<&str>, http: &reqwest::Client) -> String {
    let args: CurrencyArgs = match serde_json::from_value(Value::Object(args)) {
        Ok(args) => args,
        Err(e) => return format!("Error: Invalid arguments provided - {e}"),
    };
    let Some(api_key) = api_key else {
        return "Error: Currency conversion API key is not configured.".to_string();
    };

    let url = format!(
        "https://v6.exchangerate-api.com/v6/{api_key}/pair/{}/{}/{}",
        args.from_currency, args.to_currency, args.amount
    );

    let response = match http.get(&url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return "Error: Currency service request timed out.".to_string();
        }
        Err(e) => return format!("Error connecting to currency service: {e}"),
    };

    let status = response.status();
    if !status.is_success() {
        debug!(target: "concierge::tools", %status, "currency fetch failed");
        return match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                "Error: Invalid Currency API key.".to_string()
            }
            StatusCode::NOT_FOUND => format!(
                "Error: Could not find exchange data for {}/{}.",
                args.from_currency, args.to_currency
            ),
            _ => format!("Error fetching exchange rates ({}).", status.as_u16()),
        };
    }

    let payload: PairResponse = match response.json().await {
        Ok(payload) => payload,
        Err(_) => return "Error: Unexpected response from currency service.".to_string(),
    };

    summarize(&args, &payload)
}

fn summarize(args: &CurrencyArgs, payload: &PairResponse) -> String {
    match payload.result.as_deref() {
        Some("success") => match payload.conversion_result {
            Some(converted) => format!(
                "{:.2} {} is approximately {:.2} {}.",
                args.amount, args.from_currency, converted, args.to_currency
            ),
            None => "Error: Could not get conversion result from API.".to_string(),
        },
        Some("error") => {
            let error_type = payload.error_type.as_deref().unwrap_or("Unknown API error");
            match error_type {
                "invalid-key" => "Error: Invalid Currency API key.".to_string(),
                "inactive-account" => "Error: Currency API account inactive.".to_string(),
                "unsupported-code" => format!(
                    "Error: Unsupported currency code ({} or {}).",
                    args.from_currency, args.to_currency
                ),
                other => format!("Error during currency conversion: {other}"),
            }
        }
        _ => "Error: Unexpected response from currency service.".to_string(),
    }
}
