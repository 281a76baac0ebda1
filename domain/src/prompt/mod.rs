//! Prompt domain
//!
//! Templates for the discovery conversation: system prompt, opening request,
//! rejection texts, and the probe result's cell description.

mod discovery;

pub use discovery::DiscoveryPrompt;
