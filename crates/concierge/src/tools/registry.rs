//! Static catalog mapping tool names to schema + handler pairs.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use concierge_llm::tool::ToolSchema;

use crate::config::Config;
use crate::error::{CoreError, CoreResult};

use super::{currency, password, weather};

const HANDLER_TIMEOUT_SECS: u64 = 10;

/// Handler contract: coerced arguments in, human-readable text out.
///
/// Handlers never fail at the type level; failures are reported as
/// `"Error: …"` strings the model backend can read back.
pub type ToolHandler = Arc<
    dyn Fn(Map<String, Value>) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync,
>;

#[derive(Clone)]
pub struct RegisteredTool {
    pub schema: ToolSchema,
    pub handler: ToolHandler,
}

/// Registry of callable tools. Immutable once constructed; shared
/// read-only across concurrent requests.
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Panics if the name is already taken.
    pub fn register(&mut self, schema: ToolSchema, handler: ToolHandler) {
        let name = schema.name.clone();
        if self.tools.contains_key(&name) {
            panic!("duplicate tool: {name}");
        }
        self.tools.insert(name, RegisteredTool { schema, handler });
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Schemas offered to the model backend, sorted by name so the
    /// catalog order is stable across requests.
    pub fn catalog(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> =
            self.tools.values().map(|tool| tool.schema.clone()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Builds the registry of built-in tools.
    ///
    /// A failure here must not take the process down: the caller runs
    /// in tools-disabled mode instead.
    pub fn builtin(config: &Config) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HANDLER_TIMEOUT_SECS))
            .build()
            .map_err(|e| CoreError::Internal(format!("failed to build HTTP client: {e}")))?;

        let mut registry = Self::new();

        registry.register(
            password::schema(),
            Arc::new(|args| Box::pin(password::run(args))),
        );

        let weather_key = config.weather_api_key.clone();
        let weather_http = http.clone();
        registry.register(
            weather::schema(),
            Arc::new(move |args| {
                let key = weather_key.clone();
                let http = weather_http.clone();
                Box::pin(async move { weather::run(args, key.as_deref(), &http).await })
            }),
        );

        let exchange_key = config.exchange_api_key.clone();
        registry.register(
            currency::schema(),
            Arc::new(move |args| {
                let key = exchange_key.clone();
                let http = http.clone();
                Box::pin(async move { currency::run(args, key.as_deref(), &http).await })
            }),
        );

        Ok(registry)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
