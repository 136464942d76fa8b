mod board;
mod clock;
mod difficulty;
mod direction;
mod food;
mod snake;
pub use self::board::{Board, Cell};
pub use self::clock::{frame_slices, CatchUp, GameClock};
pub use self::difficulty::Difficulty;
pub use self::direction::{Direction, ParseDirectionError};
pub use self::food::FoodPlacer;
pub use self::snake::Snake;
use crate::config::Rules;
use crate::consts;
use crate::snapshot::{Segment, Snapshot};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single game of snake, together with the best score seen across all of
/// its rounds.
///
/// All mutation goes through the command methods ([`Simulation::start()`],
/// [`Simulation::restart()`], [`Simulation::pause()`],
/// [`Simulation::resume()`], [`Simulation::request_direction()`], and
/// [`Simulation::advance()`]).  Commands issued in a mode where they make no
/// sense are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Simulation<R = rand::rngs::ThreadRng> {
    rng: R,
    rules: Rules,
    mode: Mode,
    score: u32,
    best: u32,
    tick_interval: Duration,
    clock: GameClock,
    snake: Snake,
    food: Cell,
    placer: FoodPlacer,
}

impl Simulation<rand::rngs::ThreadRng> {
    pub fn new(rules: Rules) -> Self {
        Simulation::new_with_rng(rules, rand::rng())
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation sitting at the menu.  No round is in progress until
    /// [`Simulation::start()`] is called.
    pub fn new_with_rng(rules: Rules, rng: R) -> Simulation<R> {
        let board = rules.board();
        Simulation {
            rng,
            rules,
            mode: Mode::Menu,
            score: 0,
            best: 0,
            tick_interval: rules.difficulty().start_interval(),
            clock: GameClock::new(),
            snake: Snake::default(),
            food: Cell::default(),
            placer: FoodPlacer::new(board.center(), Direction::Right),
        }
    }

    /// Begin a new round.  Everything except the best score is reset.
    pub fn start(&mut self) {
        let board = self.rules.board();
        self.mode = Mode::Playing;
        self.score = 0;
        self.tick_interval = self.rules.difficulty().start_interval();
        self.clock.reset();
        self.snake = Snake::starting(board);
        self.placer = FoodPlacer::new(board.center(), self.snake.direction());
        self.food = self
            .placer
            .place(board, self.snake.cells(), &mut self.rng)
            .unwrap_or_default();
        log::info!(
            "Round started on {size}x{size} board; best = {best}",
            size = board.size(),
            best = self.best
        );
    }

    /// Abandon the current round, if any, and begin a new one
    pub fn restart(&mut self) {
        self.start();
    }

    /// Feed `delta` of elapsed time into the clock and run as many ticks as
    /// it pays for.  Ticking stops early if the round ends.  Returns the
    /// number of ticks run.
    ///
    /// Does nothing unless a round is being played.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.playing() {
            return 0;
        }
        self.clock.accumulate(delta);
        let catch_up = self.rules.catch_up();
        let mut ticks = 0;
        // The interval is re-read every iteration, as eating a fruit shortens
        // it.
        while self.clock.consume(self.tick_interval) {
            self.step();
            ticks += 1;
            if !self.playing() {
                break;
            }
            if !catch_up.allows(ticks) {
                let dropped = self.clock.drop_backlog(self.tick_interval);
                if !dropped.is_zero() {
                    log::debug!("Tick limit of {ticks} reached; dropping {dropped:?} of backlog");
                }
                break;
            }
        }
        ticks
    }

    /// Like [`Simulation::advance()`], but first splits `total` into
    /// 60-per-second frames and advances once per frame.  Returns the total
    /// number of ticks run.
    pub fn advance_in_frames(&mut self, total: Duration) -> u32 {
        frame_slices(total).map(|dt| self.advance(dt)).sum()
    }

    /// Perform a single tick: turn, move, and then either die, eat, or just
    /// slither along.
    fn step(&mut self) {
        let direction = self.snake.resolve_direction();
        let Some(next) = self.snake.next_head(direction) else {
            return;
        };
        let board = self.rules.board();
        // Checked before touching the body, and against the whole body (tail
        // included), so a collision leaves the snake exactly as it was.
        if !board.in_bounds(next) || self.snake.contains(next) {
            log::trace!("Snake heading {direction} collided at ({}, {})", next.x, next.z);
            self.game_over();
            return;
        }
        self.snake.push_head(next);
        if next == self.food {
            self.score = self.score.saturating_add(1);
            self.tick_interval = self.rules.difficulty().interval_for(self.score);
            log::debug!(
                "Fruit eaten at ({}, {}); score = {}, interval = {:?}",
                next.x,
                next.z,
                self.score,
                self.tick_interval
            );
            match self.placer.place(board, self.snake.cells(), &mut self.rng) {
                Some(cell) => self.food = cell,
                None => {
                    log::warn!("Snake fills the entire board; no room for another fruit");
                    self.game_over();
                }
            }
        } else {
            let _ = self.snake.pop_tail();
            log::trace!("Snake moved {direction} to ({}, {})", next.x, next.z);
        }
    }
}

impl<R> Simulation<R> {
    /// Suspend a round in progress; time fed in while paused is ignored
    pub fn pause(&mut self) {
        if self.mode == Mode::Playing {
            log::debug!("Paused");
            self.mode = Mode::Paused;
        } else {
            log::debug!("Ignoring pause while {}", self.mode);
        }
    }

    /// Continue a paused round
    pub fn resume(&mut self) {
        if self.mode == Mode::Paused {
            log::debug!("Resumed");
            self.mode = Mode::Playing;
        } else {
            log::debug!("Ignoring resume while {}", self.mode);
        }
    }

    /// Ask the snake to turn on its next tick.  Only the latest request
    /// before a tick counts, and a request to reverse is dropped at tick
    /// time.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.playing() {
            self.snake.request(direction);
        } else {
            log::debug!("Ignoring turn {direction} while {}", self.mode);
        }
    }

    /// Return a view of the current state for rendering or inspection
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            coordinate_system: consts::COORDINATE_SYSTEM,
            grid_size: self.rules.board().size(),
            direction: self.snake.direction(),
            pending_direction: self.snake.pending_direction(),
            score: self.score,
            best: self.best,
            tick_interval_ms: u64::try_from(self.tick_interval.as_millis()).unwrap_or(u64::MAX),
            snake: Segment::from_body(self.snake.cells()),
            food: self.food,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Time accumulated towards the next tick
    pub fn accumulated(&self) -> Duration {
        self.clock.accumulated()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn playing(&self) -> bool {
        self.mode == Mode::Playing
    }

    fn game_over(&mut self) {
        self.mode = Mode::GameOver;
        self.best = self.best.max(self.score);
        log::info!("Game over; score = {}, best = {}", self.score, self.best);
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Playing => "playing",
            Mode::Paused => "paused",
            Mode::GameOver => "gameover",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
