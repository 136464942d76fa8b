//! Structured, serializable view of a [`Simulation`][crate::Simulation]
use crate::game::{Cell, Direction, Mode};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Everything a renderer needs to know about a game at one instant.
///
/// Snapshots serialize to JSON with `camelCase` keys, e.g.:
///
/// ```json
/// {"mode":"playing","coordinateSystem":"...","gridSize":16,
///  "direction":"right","pendingDirection":"right","score":0,"best":0,
///  "tickIntervalMs":190,"snake":[{"x":8,"z":8,"role":"head"},...],
///  "food":{"x":10,"z":8}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub mode: Mode,
    pub coordinate_system: &'static str,
    pub grid_size: u16,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub score: u32,
    pub best: u32,
    pub tick_interval_ms: u64,
    /// The cells of the snake, head first
    pub snake: Vec<Segment>,
    pub food: Cell,
}

impl Snapshot {
    /// Render the snapshot as a single line of JSON
    ///
    /// # Errors
    ///
    /// Returns `Err` if serialization fails, which should not happen for
    /// well-formed snapshots.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Segment {
    pub x: i32,
    pub z: i32,
    pub role: Role,
}

impl Segment {
    pub(crate) fn from_body(body: &VecDeque<Cell>) -> Vec<Segment> {
        body.iter()
            .enumerate()
            .map(|(i, &Cell { x, z })| Segment {
                x,
                z,
                role: if i == 0 { Role::Head } else { Role::Body },
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Head,
    Body,
}
