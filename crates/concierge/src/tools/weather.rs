//! Current-weather lookup backed by OpenWeatherMap.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use concierge_llm::tool::{ParamSpec, ParamType, ToolSchema};

pub const NAME: &str = "get_current_weather";

const BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

pub fn schema() -> ToolSchema {
    ToolSchema::new(
        NAME,
        "Get the current weather conditions for a specified location.",
    )
    .param(ParamSpec::required(
        "location",
        ParamType::String,
        "City/Location (e.g., 'Tokyo', 'Brisbane, AU').",
    ))
    .param(
        ParamSpec::optional(
            "unit",
            ParamType::String,
            "'metric' (C) or 'imperial' (F). Defaults metric.",
        )
        .with_allowed(&["metric", "imperial"]),
    )
}

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    #[serde(default = "default_unit")]
    unit: String,
}

fn default_unit() -> String {
    "metric".to_string()
}

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    main: Option<MainData>,
    weather: Option<Vec<ConditionData>>,
    name: Option<String>,
    sys: Option<SysData>,
}

#[derive(Debug, Deserialize)]
struct MainData {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionData {
    description: String,
}

#[derive(Debug, Deserialize)]
struct SysData {
    country: Option<String>,
}

pub async fn run(args: Map<String, Value>, api_key: Option<&str>, http: &reqwest::Client) -> String {
    let args: WeatherArgs = match serde_json::from_value(Value::Object(args)) {
        Ok(args) => args,
        Err(e) => return format!("Error: Invalid arguments provided - {e}"),
    };
    let Some(api_key) = api_key else {
        return "Error: Weather API key is not configured.".to_string();
    };

    let units = if args.unit.eq_ignore_ascii_case("imperial") {
        "imperial"
    } else {
        "metric"
    };

    let response = match http
        .get(BASE_URL)
        .query(&[
            ("q", args.location.as_str()),
            ("appid", api_key),
            ("units", units),
            ("lang", "en"),
        ])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return "Error: The weather service request timed out.".to_string();
        }
        Err(e) => return format!("Error connecting to weather service: {e}"),
    };

    let status = response.status();
    if !status.is_success() {
        debug!(target: "concierge::tools", %status, location = %args.location, "weather fetch failed");
        return match status {
            StatusCode::NOT_FOUND => format!(
                "Error: Could not find weather data for '{}'. Check spelling.",
                args.location
            ),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                "Error: Invalid Weather API key.".to_string()
            }
            _ => format!("Error fetching weather ({}).", status.as_u16()),
        };
    }

    let payload: WeatherPayload = match response.json().await {
        Ok(payload) => payload,
        Err(_) => return format!("Error: Could not parse weather data for {}.", args.location),
    };

    format_report(units, &payload)
        .unwrap_or_else(|| format!("Error: Could not parse weather data for {}.", args.location))
}

/// Formats the upstream payload into the answer text, or `None` when
/// the 200 body lacks the expected fields.
fn format_report(units: &str, payload: &WeatherPayload) -> Option<String> {
    let main = payload.main.as_ref()?;
    let condition = payload.weather.as_ref()?.first()?;
    let city = payload.name.as_deref().filter(|name| !name.is_empty())?;
    let country = payload.sys.as_ref().and_then(|sys| sys.country.as_deref());

    let temp_unit = if units == "imperial" { "°F" } else { "°C" };
    let location_display = match country {
        Some(country) => format!("{city}, {country}"),
        None => city.to_string(),
    };

    Some(format!(
        "The current weather in {location_display} is {description}. \
         The temperature is {temp}{temp_unit} (feels like {feels_like}{temp_unit}). \
         Humidity is {humidity}%.",
        description = condition.description,
        temp = main.temp,
        feels_like = main.feels_like,
        humidity = main.humidity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> WeatherPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn report_includes_city_country_and_units() {
        let payload = payload(json!({
            "main": {"temp": 21.3, "feels_like": 20.1, "humidity": 55.0},
            "weather": [{"description": "scattered clouds"}],
            "name": "Tokyo",
            "sys": {"country": "JP"}
        }));

        let report = format_report("metric", &payload).unwrap();
        assert!(report.contains("Tokyo, JP"));
        assert!(report.contains("scattered clouds"));
        assert!(report.contains("21.3°C"));
        assert!(report.contains("feels like 20.1°C"));
        assert!(report.contains("Humidity is 55%."));
    }

    #[test]
    fn report_uses_fahrenheit_for_imperial() {
        let payload = payload(json!({
            "main": {"temp": 70.0, "feels_like": 68.0, "humidity": 40.0},
            "weather": [{"description": "clear sky"}],
            "name": "Phoenix"
        }));

        let report = format_report("imperial", &payload).unwrap();
        assert!(report.contains("70°F"));
        assert!(report.contains("The current weather in Phoenix is clear sky."));
    }

    #[test]
    fn incomplete_payload_yields_none() {
        let payload = payload(json!({"name": "Nowhere"}));
        assert!(format_report("metric", &payload).is_none());
    }

    #[tokio::test]
    async fn missing_api_key_is_a_handled_error() {
        let http = reqwest::Client::new();
        let args = json!({"location": "Tokyo", "unit": "metric"});
        let output = run(args.as_object().unwrap().clone(), None, &http).await;
        assert_eq!(output, "Error: Weather API key is not configured.");
    }
}
