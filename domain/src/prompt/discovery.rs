//! Prompt templates for the maze discovery conversation

use crate::grid::position::Position;

/// Placeholder used when verbose cell descriptions are disabled.
const PLAIN_DESCRIPTION: &str = "A cell in the maze.";

/// Templates for the system prompt, opening request, and probe texts.
pub struct DiscoveryPrompt;

impl DiscoveryPrompt {
    /// System prompt for a solve session.
    ///
    /// The adjacency clause is appended only when enforcement is enabled, so
    /// an unconstrained agent is never told about a rule that isn't applied.
    pub fn system(
        width: i32,
        height: i32,
        entry: Position,
        exit: Position,
        enforce_adjacency: bool,
    ) -> String {
        let mut prompt = format!(
            r#"You are exploring a rectangular grid maze of {width} columns by {height} rows.
Cells are addressed by integer coordinates (x, y); (0, 0) is the top-left corner,
x grows to the east and y grows to the south.

Each cell has one of four statuses: path, wall, exit or out_of_bounds.
You can walk on path and exit cells; walls block movement and out_of_bounds
lies beyond the maze border. Diagonal movement between walkable cells is allowed.

The entry is at ({entry_x}, {entry_y}) and the exit is at ({exit_x}, {exit_y}).

Explore with the GetNeighbours tool: it reports the status of the eight cells
around a coordinate. When you have found a walkable route from entry to exit,
stop calling the tool and answer with the route as a list of coordinates."#,
            width = width,
            height = height,
            entry_x = entry.x,
            entry_y = entry.y,
            exit_x = exit.x,
            exit_y = exit.y,
        );

        if enforce_adjacency {
            prompt.push_str(
                r#"

Exploration is constrained: your first probe must be the entry cell or one of
its eight neighbours, and every later probe must be adjacent to a cell you have
already probed. Probes that break this rule are rejected without revealing
anything about the maze."#,
            );
        }

        prompt
    }

    /// Opening user turn seeding the conversation.
    pub fn opening_request(entry: Position) -> String {
        format!(
            "Find a path from the entry to the exit. Start by probing the entry \
             cell at ({}, {}) with the GetNeighbours tool, then work outward from \
             the cells you have seen.",
            entry.x, entry.y
        )
    }

    /// Rejection text for a probe that violates the adjacency constraint.
    pub fn adjacency_rejection(probe: Position, discovered_count: usize) -> String {
        format!(
            "Probe {} rejected: it is not adjacent to any cell you have discovered \
             ({} discovered so far). Probe the entry first, then only cells \
             adjacent to ones you have already probed.",
            probe, discovered_count
        )
    }

    /// The `currentCellDescription` field of a probe result.
    ///
    /// The verbose variant is deliberately long, fixed filler parameterized
    /// by the coordinates — it simulates a heavy per-call token cost so
    /// context growth can be exercised against small mazes.
    pub fn cell_description(pos: Position, verbose: bool) -> String {
        if !verbose {
            return PLAIN_DESCRIPTION.to_string();
        }

        format!(
            r#"You are standing in cell ({x}, {y}) of the maze. The floor here is worn
smooth, and the air carries the same still dampness found everywhere between
these walls. Looking around from ({x}, {y}) you can make out the eight
surrounding cells, each either open passage or blank stone.

Records of earlier expeditions mention cell ({x}, {y}) only in passing: a
waypoint among hundreds, notable solely for where it can lead next. The
masonry offers no markings, no scratches from previous travellers, and no
hint of which direction shortens the road to the exit.

Take stock of the neighbour statuses reported alongside this description.
Passages marked path continue the labyrinth; walls end it; anything marked
out_of_bounds lies beyond the outer border of the maze itself. Somewhere a
cell marked exit is waiting, and cell ({x}, {y}) is one step along the way."#,
            x = pos.x,
            y = pos.y,
        )
    }
}
