//! Application-level configuration.
//!
//! [`SolveParams`] groups the static parameters that control the discovery
//! loop in [`SolveMazeUseCase`](crate::use_cases::solve_maze::SolveMazeUseCase).
//! The iteration cap and token budgets are policy constants, not protocol
//! invariants — callers may tune them between solve sessions.

use serde::{Deserialize, Serialize};

/// Discovery loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveParams {
    /// Enforce the adjacency constraint on probes.
    pub enforce_adjacency: bool,
    /// Attach the long templated cell description to every probe result
    /// (simulates heavy per-call token cost).
    pub verbose_cell_description: bool,
    /// Safety cap on conversation iterations before the session fails.
    pub max_iterations: usize,
    /// Context ceiling reported in usage events. Informational only — the
    /// provider is the authority on overflow.
    pub max_context_tokens: u64,
    /// Output token limit passed to the model on every request.
    pub max_output_tokens: u32,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            enforce_adjacency: true,
            verbose_cell_description: true,
            max_iterations: 10_000,
            max_context_tokens: 200_000,
            max_output_tokens: 4_096,
        }
    }
}

impl SolveParams {
    // ==================== Builder Methods ====================

    pub fn with_enforce_adjacency(mut self, enabled: bool) -> Self {
        self.enforce_adjacency = enabled;
        self
    }

    pub fn with_verbose_cell_description(mut self, enabled: bool) -> Self {
        self.verbose_cell_description = enabled;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}
