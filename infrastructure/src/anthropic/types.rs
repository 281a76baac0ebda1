//! Wire types for the provider's Messages API and conversions to domain types.
//!
//! The domain's [`ContentBlock`] already serializes to the provider's tagged
//! block shape, so request bodies reuse it directly; only responses need a
//! separate wire enum (unknown block types are skipped, not errors).

use scout_domain::{ContentBlock, ModelReply, Role, StopReason, TokenUsage, TurnRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Requests ────────────────────────────────────────────────────

/// Body of a `POST /v1/messages` request.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<serde_json::Value>,
}

/// One conversation message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: Vec<ContentBlock>,
}

/// Assemble a request body from the protocol's per-turn inputs.
pub fn build_request(
    model: &str,
    system_prompt: &str,
    history: &[TurnRecord],
    tools: &[serde_json::Value],
    max_tokens: u32,
) -> MessagesRequest {
    MessagesRequest {
        model: model.to_string(),
        max_tokens,
        system: system_prompt.to_string(),
        messages: history.iter().map(to_wire_message).collect(),
        tools: tools.to_vec(),
    }
}

fn to_wire_message(turn: &TurnRecord) -> WireMessage {
    WireMessage {
        role: match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        },
        content: turn.blocks.clone(),
    }
}

// ─── Responses ───────────────────────────────────────────────────

/// Body of a successful Messages API response.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: WireUsage,
}

/// A response content block. Block types this system does not consume
/// deserialize as `Unknown` and are dropped during conversion.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

/// Token accounting as reported by the provider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

// ─── Wire → Domain ───────────────────────────────────────────────

/// Convert a wire response to a domain [`ModelReply`].
pub fn convert_response(response: MessagesResponse) -> ModelReply {
    let content = response
        .content
        .into_iter()
        .filter_map(convert_block)
        .collect();

    ModelReply {
        content,
        stop_reason: normalize_stop_reason(response.stop_reason.as_deref()),
        usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
    }
}

fn convert_block(block: ResponseBlock) -> Option<ContentBlock> {
    match block {
        ResponseBlock::Text { text } => Some(ContentBlock::Text { text }),
        ResponseBlock::ToolUse { id, name, input } => {
            let input: HashMap<String, serde_json::Value> = match input {
                serde_json::Value::Object(map) => map.into_iter().collect(),
                _ => HashMap::new(),
            };
            Some(ContentBlock::ToolUse { id, name, input })
        }
        ResponseBlock::Unknown => None,
    }
}

/// Normalize the provider's stop indicator.
///
/// Exactly two values are recognized; everything else is surfaced verbatim
/// for the protocol's failure branch.
pub fn normalize_stop_reason(raw: Option<&str>) -> StopReason {
    match raw {
        Some("end_turn") => StopReason::EndTurn,
        Some("tool_use") => StopReason::ToolUse,
        Some(other) => StopReason::Other(other.to_string()),
        None => StopReason::Other("(missing)".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_stop_reason() {
        assert_eq!(normalize_stop_reason(Some("end_turn")), StopReason::EndTurn);
        assert_eq!(normalize_stop_reason(Some("tool_use")), StopReason::ToolUse);
        assert_eq!(
            normalize_stop_reason(Some("max_tokens")),
            StopReason::Other("max_tokens".to_string())
        );
        assert_eq!(
            normalize_stop_reason(None),
            StopReason::Other("(missing)".to_string())
        );
    }

    #[test]
    fn test_build_request_maps_roles_and_keeps_blocks() {
        let history = vec![
            TurnRecord::user_text("probe the maze"),
            TurnRecord::assistant(vec![ContentBlock::text("on it")]),
        ];
        let tools = vec![serde_json::json!({"name": "GetNeighbours"})];
        let request = build_request("test-model", "system text", &history, &tools, 1024);

        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[1].role, "assistant");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["system"], "system text");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["tools"][0]["name"], "GetNeighbours");
    }

    #[test]
    fn test_tool_results_serialize_into_request_messages() {
        let history = vec![TurnRecord::tool_results(vec![ContentBlock::tool_result(
            "toolu_1",
            serde_json::json!({"position": {"x": 1, "y": 0}}),
        )])];
        let request = build_request("m", "s", &history, &[], 16);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "tool_result");
        assert_eq!(json["messages"][0]["content"][0]["tool_use_id"], "toolu_1");
        // Empty tools list is omitted entirely.
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_convert_response_extracts_blocks_and_usage() {
        let body = serde_json::json!({
            "content": [
                {"type": "text", "text": "probing"},
                {"type": "tool_use", "id": "toolu_1", "name": "GetNeighbours",
                 "input": {"x": 1, "y": 0}},
                {"type": "server_tool_use", "id": "x", "name": "unused"},
            ],
            "stop_reason": "tool_use",
            "usage": {"input_tokens": 321, "output_tokens": 45}
        });
        let response: MessagesResponse = serde_json::from_value(body).unwrap();
        let reply = convert_response(response);

        // The unknown block type was skipped.
        assert_eq!(reply.content.len(), 2);
        assert_eq!(reply.stop_reason, StopReason::ToolUse);
        assert_eq!(reply.usage.input_tokens, 321);
        assert_eq!(reply.usage.output_tokens, 45);

        let uses = reply.tool_uses();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].require_i64("x").unwrap(), 1);
    }

    #[test]
    fn test_error_envelope_parses() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.kind, "rate_limit_error");
        assert_eq!(envelope.error.message, "slow down");
    }
}
