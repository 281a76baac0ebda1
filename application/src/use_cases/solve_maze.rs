//! Solve Maze use case — the discovery protocol.
//!
//! Drives one strictly sequential conversation with the remote model: each
//! iteration sends the system prompt, the full turn history, and the single
//! probe tool, then branches on the declared stop reason. Probe invocations
//! are answered with neighbour reports, subject to the adjacency constraint;
//! free text is passed through opaquely. The loop ends in exactly one of
//! `Solved`, `Failed`, `Overflowed` or `Cancelled`, always delivered as a
//! structured [`SolveOutcome`] rather than an error.

use crate::config::SolveParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::observer::DiscoveryObserver;
use scout_domain::{
    ContentBlock, Conversation, DiscoveryPrompt, DiscoverySession, Grid, NeighbourReport,
    Position, ProbeRejection, SessionPhase, StopReason, ToolUseRequest, TurnRecord, probe_tool,
};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Terminal result of one solve session.
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutcome {
    /// Whether the model delivered a final answer.
    pub success: bool,
    /// Final answer text, or a diagnostic for unsuccessful sessions.
    pub message: String,
    /// Number of probe invocations the model attempted.
    pub probe_count: u64,
    /// Latest provider-reported input+output token total.
    pub total_tokens: u64,
    /// Whether the session ended because the conversation outgrew the
    /// model's context window.
    pub overflowed: bool,
}

/// Use case for driving an agent through maze discovery.
pub struct SolveMazeUseCase<G: ModelGateway> {
    gateway: Arc<G>,
    params: SolveParams,
    cancellation_token: Option<CancellationToken>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ModelGateway> SolveMazeUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            params: SolveParams::default(),
            cancellation_token: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: SolveParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Record the session transcript through the given logger
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run one solve session against `grid`.
    ///
    /// Resets the grid's discovered flags and starts a fresh session; the
    /// previous session's terminal phase never leaks into this run.
    pub async fn solve(&self, grid: &mut Grid, observer: &dyn DiscoveryObserver) -> SolveOutcome {
        let mut session = DiscoverySession::new();
        grid.reset_discovered();
        session.set_phase(SessionPhase::Exploring);
        observer.on_status("Exploring the maze");

        info!(
            width = grid.width(),
            height = grid.height(),
            "starting discovery session"
        );
        self.logger.log(ConversationEvent::new(
            "session_started",
            serde_json::json!({
                "width": grid.width(),
                "height": grid.height(),
                "entry": grid.entry(),
                "exit": grid.exit(),
                "enforce_adjacency": self.params.enforce_adjacency,
            }),
        ));

        let system_prompt = DiscoveryPrompt::system(
            grid.width(),
            grid.height(),
            grid.entry(),
            grid.exit(),
            self.params.enforce_adjacency,
        );
        let tools = vec![probe_tool().to_api_schema()];
        let entry = grid.entry();

        let mut conversation = Conversation::new();
        conversation.push(TurnRecord::user_text(DiscoveryPrompt::opening_request(entry)));

        for iteration in 0..self.params.max_iterations {
            if self.is_cancelled() {
                return self.conclude(
                    &mut session,
                    SessionPhase::Cancelled,
                    "exploration cancelled".to_string(),
                    observer,
                );
            }

            let reply = match self
                .gateway
                .send(
                    &system_prompt,
                    conversation.turns(),
                    &tools,
                    self.params.max_output_tokens,
                )
                .await
            {
                Ok(reply) => reply,
                Err(GatewayError::ContextOverflow(message)) => {
                    observer.on_context_overflow(&message);
                    return self.conclude(&mut session, SessionPhase::Overflowed, message, observer);
                }
                Err(GatewayError::Cancelled) => {
                    return self.conclude(
                        &mut session,
                        SessionPhase::Cancelled,
                        "exploration cancelled".to_string(),
                        observer,
                    );
                }
                Err(error) => {
                    warn!(%error, "model request failed");
                    return self.conclude(
                        &mut session,
                        SessionPhase::Failed,
                        format!("model request failed: {}", error),
                        observer,
                    );
                }
            };

            session.adopt_usage(reply.usage);
            observer.on_usage(reply.usage, self.params.max_context_tokens);
            self.logger.log(ConversationEvent::new(
                "model_turn",
                serde_json::json!({
                    "iteration": iteration,
                    "stop_reason": &reply.stop_reason,
                    "blocks": reply.content.len(),
                    "input_tokens": reply.usage.input_tokens,
                    "output_tokens": reply.usage.output_tokens,
                }),
            ));

            conversation.push(TurnRecord::assistant(reply.content.clone()));

            match &reply.stop_reason {
                StopReason::EndTurn => {
                    let message = reply.first_text().unwrap_or_default().to_string();
                    observer.on_solved(&message, session.probe_count(), session.total_tokens());
                    return self.conclude(&mut session, SessionPhase::Solved, message, observer);
                }
                StopReason::ToolUse => {
                    let requests = reply.tool_uses();
                    if requests.is_empty() {
                        return self.conclude(
                            &mut session,
                            SessionPhase::Failed,
                            "model stopped for tool use without any tool invocation".to_string(),
                            observer,
                        );
                    }

                    // A turn may batch several invocations; each one gets its
                    // own result block in a single following user turn.
                    let mut results = Vec::with_capacity(requests.len());
                    for request in &requests {
                        session.record_probe();
                        let payload = self.process_probe(grid, &mut session, entry, request, observer);
                        results.push(ContentBlock::tool_result(request.id.clone(), payload));
                    }
                    conversation.push(TurnRecord::tool_results(results));
                }
                StopReason::Other(raw) => {
                    warn!(stop_reason = %raw, "unrecognized stop reason, ending session");
                    return self.conclude(
                        &mut session,
                        SessionPhase::Failed,
                        format!("unexpected stop reason: {}", raw),
                        observer,
                    );
                }
            }
        }

        self.conclude(
            &mut session,
            SessionPhase::Failed,
            format!("max iterations reached ({})", self.params.max_iterations),
            observer,
        )
    }

    /// Answer one probe invocation.
    ///
    /// Violations (undecodable arguments, non-adjacent targets) produce a
    /// structured rejection payload and keep the session running — the model
    /// is expected to read the error and self-correct.
    fn process_probe(
        &self,
        grid: &mut Grid,
        session: &mut DiscoverySession,
        entry: Position,
        request: &ToolUseRequest,
        observer: &dyn DiscoveryObserver,
    ) -> serde_json::Value {
        let (x, y) = match (request.require_i64("x"), request.require_i64("y")) {
            (Ok(x), Ok(y)) => (x as i32, y as i32),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "probe arguments undecodable");
                observer.on_probe_rejected(None, session.probe_count(), &error);
                self.log_probe(None, false, Some(error.as_str()), session);
                return rejection_payload(&error, session.discovered_count());
            }
        };

        let target = Position::new(x, y);
        if self.params.enforce_adjacency && !session.admissible(target, entry) {
            let reason = DiscoveryPrompt::adjacency_rejection(target, session.discovered_count());
            observer.on_probe_rejected(Some(target), session.probe_count(), &reason);
            self.log_probe(Some(target), false, Some(reason.as_str()), session);
            return rejection_payload(&reason, session.discovered_count());
        }

        session.admit(target);
        // Off-grid probes are answerable (each neighbour reports its own
        // status) but have no cell to flag.
        let _ = grid.mark_discovered(target);

        observer.on_probe_accepted(target, session.probe_count());
        self.log_probe(Some(target), true, None, session);

        let description =
            DiscoveryPrompt::cell_description(target, self.params.verbose_cell_description);
        let report = NeighbourReport::for_position(grid, target, description);
        serde_json::to_value(&report).unwrap_or(serde_json::Value::Null)
    }

    fn log_probe(
        &self,
        position: Option<Position>,
        accepted: bool,
        reason: Option<&str>,
        session: &DiscoverySession,
    ) {
        self.logger.log(ConversationEvent::new(
            "probe",
            serde_json::json!({
                "position": position,
                "accepted": accepted,
                "reason": reason,
                "probe_count": session.probe_count(),
                "discovered_count": session.discovered_count(),
            }),
        ));
    }

    fn conclude(
        &self,
        session: &mut DiscoverySession,
        phase: SessionPhase,
        message: String,
        observer: &dyn DiscoveryObserver,
    ) -> SolveOutcome {
        session.set_phase(phase);
        observer.on_status(&phase.to_string());

        let outcome = SolveOutcome {
            success: phase == SessionPhase::Solved,
            message,
            probe_count: session.probe_count(),
            total_tokens: session.total_tokens(),
            overflowed: phase == SessionPhase::Overflowed,
        };

        info!(
            phase = %phase,
            probes = outcome.probe_count,
            tokens = outcome.total_tokens,
            "discovery session finished"
        );
        self.logger.log(ConversationEvent::new(
            "outcome",
            serde_json::json!({
                "phase": phase,
                "success": outcome.success,
                "probe_count": outcome.probe_count,
                "total_tokens": outcome.total_tokens,
                "overflowed": outcome.overflowed,
                "message": &outcome.message,
            }),
        ));

        outcome
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

fn rejection_payload(reason: &str, discovered_count: usize) -> serde_json::Value {
    serde_json::to_value(ProbeRejection::new(reason, discovered_count))
        .unwrap_or(serde_json::Value::Null)
}
