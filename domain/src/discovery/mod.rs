//! Discovery domain
//!
//! Session bookkeeping for one solve attempt (discovered set, probe counter,
//! adopted token totals) and the probe result payloads sent back to the model.

pub mod report;
pub mod session;

pub use report::{NeighbourCell, NeighbourMap, NeighbourReport, ProbeRejection};
pub use session::{DiscoverySession, SessionPhase};
