//! Tool domain entities
//!
//! The discovery protocol exposes exactly one tool to the model: a probe of
//! the eight-cell neighbourhood around a coordinate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire name of the probe tool.
pub const PROBE_TOOL_NAME: &str = "GetNeighbours";

/// Definition of a tool offered to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "GetNeighbours")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "integer", "string")
    pub param_type: String,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Render this definition as a provider tool schema:
    /// `{name, description, input_schema: {type, properties, required}}`.
    pub fn to_api_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type,
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(param.name.clone());
            }
        }

        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}

/// The single probe tool: neighbour statuses of a cell at (x, y).
pub fn probe_tool() -> ToolDefinition {
    ToolDefinition::new(
        PROBE_TOOL_NAME,
        "Returns the status of the eight cells surrounding the cell at (x, y), \
         keyed by compass direction (N, NE, E, SE, S, SW, W, NW). Each entry \
         carries the neighbour's coordinates and its status: path, wall, exit \
         or out_of_bounds.",
    )
    .with_parameter(
        ToolParameter::new("x", "Column of the cell to probe", true).with_type("integer"),
    )
    .with_parameter(ToolParameter::new("y", "Row of the cell to probe", true).with_type("integer"))
}

/// A tool invocation requested by the model, with its provider-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUseRequest {
    pub id: String,
    pub name: String,
    pub input: HashMap<String, serde_json::Value>,
}

impl ToolUseRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        input: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Get an optional integer argument.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.input.get(key).and_then(|v| v.as_i64())
    }

    /// Get a required integer argument or an error message suitable for a
    /// tool-result payload.
    pub fn require_i64(&self, key: &str) -> Result<i64, String> {
        self.get_i64(key)
            .ok_or_else(|| format!("missing or non-integer required argument: {}", key))
    }
}
