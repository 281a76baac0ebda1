//! Tool domain
//!
//! The probe tool definition and argument decoding for tool invocations.
//! This system offers the model exactly one tool ([`probe_tool`]); the
//! definition types stay generic so the schema rendering is reusable.

pub mod entities;

pub use entities::{PROBE_TOOL_NAME, ToolDefinition, ToolParameter, ToolUseRequest, probe_tool};
