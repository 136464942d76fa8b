//! Assorted constants & default rules

/// Width & height of the (square) board, in cells
pub const GRID_SIZE: u16 = 16;

/// Time between movements of the snake at the start of a round
pub const STEP_MS_START: u64 = 190;

/// The tick interval never drops below this many milliseconds, no matter the
/// score.
pub const STEP_MS_MIN: u64 = 85;

/// How many milliseconds each point of score shaves off the tick interval
pub const STEP_DECAY: u64 = 3;

/// Length of the snake at the start of a round
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// The first fruit of a round is placed this many cells directly ahead of the
/// snake's starting head, so that it can always be reached without turning.
pub const FIRST_FOOD_OFFSET: i32 = 2;

/// Smallest board on which the starting snake and the first fruit fit
pub const MIN_GRID_SIZE: u16 = 5;

/// Rate at which [`Simulation::advance_in_frames()`][crate::Simulation::advance_in_frames]
/// slices up time
pub const FRAMES_PER_SECOND: u32 = 60;

/// Coordinate convention declared in every snapshot
pub const COORDINATE_SYSTEM: &str = "grid origin=(0,0) top-left; x rightwards, z downwards";

