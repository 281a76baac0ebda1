//! Probe result payloads: the `GetNeighbours` wire contract.

use crate::grid::entities::{CellStatus, Grid};
use crate::grid::position::{Direction, Position};
use serde::Serialize;

/// One neighbour entry: its coordinates and status.
#[derive(Debug, Clone, Serialize)]
pub struct NeighbourCell {
    pub x: i32,
    pub y: i32,
    pub status: CellStatus,
}

/// The eight neighbours of a probed cell, keyed by direction label.
#[derive(Debug, Clone, Serialize)]
pub struct NeighbourMap {
    #[serde(rename = "N")]
    pub north: NeighbourCell,
    #[serde(rename = "NE")]
    pub north_east: NeighbourCell,
    #[serde(rename = "E")]
    pub east: NeighbourCell,
    #[serde(rename = "SE")]
    pub south_east: NeighbourCell,
    #[serde(rename = "S")]
    pub south: NeighbourCell,
    #[serde(rename = "SW")]
    pub south_west: NeighbourCell,
    #[serde(rename = "W")]
    pub west: NeighbourCell,
    #[serde(rename = "NW")]
    pub north_west: NeighbourCell,
}

/// Successful probe result:
/// `{position, neighbours: {N..NW}, currentCellDescription}`.
#[derive(Debug, Clone, Serialize)]
pub struct NeighbourReport {
    pub position: Position,
    pub neighbours: NeighbourMap,
    #[serde(rename = "currentCellDescription")]
    pub current_cell_description: String,
}

impl NeighbourReport {
    /// Assemble the report for `position` by querying the grid's status of
    /// all eight neighbours. The description is caller-provided text.
    pub fn for_position(grid: &Grid, position: Position, description: String) -> Self {
        let cell = |direction: Direction| {
            let neighbour = position.neighbour(direction);
            NeighbourCell {
                x: neighbour.x,
                y: neighbour.y,
                status: grid.status_of(neighbour),
            }
        };

        Self {
            position,
            neighbours: NeighbourMap {
                north: cell(Direction::N),
                north_east: cell(Direction::NE),
                east: cell(Direction::E),
                south_east: cell(Direction::SE),
                south: cell(Direction::S),
                south_west: cell(Direction::SW),
                west: cell(Direction::W),
                north_west: cell(Direction::NW),
            },
            current_cell_description: description,
        }
    }

    /// Statuses of all eight neighbours, for callers that only need counts.
    pub fn statuses(&self) -> [CellStatus; 8] {
        [
            self.neighbours.north.status,
            self.neighbours.north_east.status,
            self.neighbours.east.status,
            self.neighbours.south_east.status,
            self.neighbours.south.status,
            self.neighbours.south_west.status,
            self.neighbours.west.status,
            self.neighbours.north_west.status,
        ]
    }
}

/// Structured rejection payload returned to the model when a probe violates
/// the protocol (non-adjacent target, malformed arguments). The session
/// continues; the model is expected to self-correct.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeRejection {
    pub error: String,
    pub discovered_count: usize,
}

impl ProbeRejection {
    pub fn new(error: impl Into<String>, discovered_count: usize) -> Self {
        Self {
            error: error.into(),
            discovered_count,
        }
    }
}
