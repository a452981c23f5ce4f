use serde_json::{json, Map, Value};

/// Parameter types the tool-calling protocol understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    Number,
    String,
    Boolean,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
    pub required: bool,
    pub allowed: Option<Vec<String>>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            allowed: None,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            allowed: None,
        }
    }

    pub fn with_allowed(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|v| (*v).to_string()).collect());
        self
    }
}

/// Machine-readable description of a callable tool.
///
/// Immutable after registry construction; the orchestrator offers the
/// schema to the model backend and the coercion layer validates raw
/// arguments against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Renders the parameter spec as the JSON Schema object the
    /// function-declaration wire format expects.
    pub fn parameters_json(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(param.kind.as_str()));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(allowed) = &param.allowed {
                prop.insert("enum".to_string(), json!(allowed));
            }
            properties.insert(param.name.clone(), Value::Object(prop));
            if param.required {
                required.push(param.name.clone());
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_json_lists_properties_and_required() {
        let schema = ToolSchema::new("get_current_weather", "Current weather for a location.")
            .param(ParamSpec::required(
                "location",
                ParamType::String,
                "City or location name.",
            ))
            .param(
                ParamSpec::optional("unit", ParamType::String, "'metric' or 'imperial'.")
                    .with_allowed(&["metric", "imperial"]),
            );

        let json = schema.parameters_json();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["location"]["type"], "string");
        assert_eq!(
            json["properties"]["unit"]["enum"],
            serde_json::json!(["metric", "imperial"])
        );
        assert_eq!(json["required"], serde_json::json!(["location"]));
    }

    #[test]
    fn parameters_json_empty_schema() {
        let schema = ToolSchema::new("noop", "Does nothing.");
        let json = schema.parameters_json();
        assert_eq!(json["required"], serde_json::json!([]));
        assert!(json["properties"].as_object().unwrap().is_empty());
    }
}
