//! Logging infrastructure — structured transcript logging.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`ConversationLogger`](scout_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
