//! Application layer for maze-scout
//!
//! This crate contains the discovery protocol use case, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SolveParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model_gateway::{GatewayError, ModelGateway},
    observer::{ChannelObserver, DiscoveryEvent, DiscoveryObserver, NoObserver},
};
pub use use_cases::solve_maze::{SolveMazeUseCase, SolveOutcome};
