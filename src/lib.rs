//! Deterministic grid snake simulation.
//!
//! A [`Simulation`] owns one game: the snake, the fruit, the score, and the
//! current speed.  Drivers feed it commands ([`Simulation::start()`],
//! [`Simulation::pause()`], [`Simulation::request_direction()`], …) and
//! elapsed time ([`Simulation::advance()`]), and read it back through
//! [`Simulation::snapshot()`].  Time is converted into whole ticks by a
//! fixed-timestep accumulator, so identical inputs (and an identically seeded
//! RNG) always produce identical games.
//!
//! ```
//! use gridsnake::{Cell, Direction, Mode, Rules, Simulation};
//! use std::time::Duration;
//!
//! let mut sim = Simulation::new(Rules::default());
//! sim.start();
//! sim.request_direction(Direction::Up);
//! assert_eq!(sim.advance(Duration::from_millis(190)), 1);
//! assert_eq!(sim.snake().head(), Some(Cell::new(8, 7)));
//! assert_eq!(sim.snapshot().mode, Mode::Playing);
//! ```
pub mod config;
pub mod consts;
pub mod game;
pub mod snapshot;
pub use crate::config::{Config, ConfigError, Rules, RulesError};
pub use crate::game::{Cell, Direction, Mode, Simulation};
pub use crate::snapshot::{Role, Segment, Snapshot};
