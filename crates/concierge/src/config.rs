use std::env;
use std::net::SocketAddr;

use concierge_llm::LlmSettings;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);

/// Process-wide configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub weather_api_key: Option<String>,
    pub exchange_api_key: Option<String>,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = LlmSettings::default();
        let base_url = env::var("CONCIERGE_LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or(defaults.base_url);
        let api_key = env::var("CONCIERGE_LLM_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|value| !value.is_empty());
        let model = env::var("CONCIERGE_LLM_MODEL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.model);
        let bind_addr = env::var("CONCIERGE_BIND_ADDR")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));

        Self {
            llm: LlmSettings {
                base_url,
                api_key,
                model,
            },
            weather_api_key: env::var("OPENWEATHERMAP_API_KEY")
                .ok()
                .filter(|value| !value.is_empty()),
            exchange_api_key: env::var("EXCHANGERATE_API_KEY")
                .ok()
                .filter(|value| !value.is_empty()),
            bind_addr,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            weather_api_key: None,
            exchange_api_key: None,
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
        }
    }
}
