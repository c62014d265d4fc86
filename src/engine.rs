//! The tick engine.
//!
//! [`GameState`] owns everything the rules care about. A frame loop feeds it
//! elapsed time through [`GameState::advance`]; once a full tick interval has
//! built up the cat takes one step. Input only ever appends to the turn queue,
//! the queue is drained one entry per step.

use crate::anim::Animations;
use crate::config::{GameConfig, Level, SCORE_PER_FOOD};
use crate::direction::Direction;
use crate::food::{Food, FoodSpawner};
use crate::grid::Grid;
use crate::snake::{Segment, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
    /// Terminal until the game is restarted
    Dead,
}

/// Things that happened, for the sound, score and scene layers to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started { level: Level },
    Paused,
    Resumed,
    FoodEaten { kind: usize, score: u32 },
    Died { score: u32 },
}

/// Read-only view of the state, for drawing
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub status: Status,
    pub level: Level,
    pub facing: Direction,
    pub segments: &'a [Segment],
    pub foods: &'a [Food],
    pub score: u32,
    pub animations: &'a Animations,
}

pub struct GameState {
    grid: Grid,
    level: Level,
    status: Status,
    snake: Snake,
    facing: Direction,
    turns: Vec<Direction>,
    next_turn: usize,
    foods: Vec<Food>,
    score: u32,
    tick_timer: f64,
    spawner: FoodSpawner,
    animations: Animations,
}

impl GameState {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let grid = Grid::new(config.cols, config.rows);

        GameState {
            grid,
            level: config.level,
            status: Status::NotStarted,
            snake: Snake::spawn(&grid),
            facing: Direction::Right,
            turns: Vec::new(),
            next_turn: 0,
            foods: Vec::new(),
            score: 0,
            tick_timer: 0.0,
            spawner: FoodSpawner::new(seed, config.food_kinds),
            animations: Animations::new(config.food_kinds),
        }
    }

    ///////////////////////////////////////////////////////////////////////////
    // Lifecycle

    /// Begins a fresh run at `level`. Only valid before the first game or after dying.
    pub fn start(&mut self, level: Level) -> Option<GameEvent> {
        if !matches!(self.status, Status::NotStarted | Status::Dead) {
            log::debug!("Ignoring start while {:?}", self.status);
            return None;
        }

        self.level = level;
        self.reset();
        self.status = Status::Running;

        log::info!("Started a {} game ({} ms per tick)", level, level.tick_interval_ms());
        Some(GameEvent::Started { level })
    }

    /// Starts over at the level of the run that just ended
    pub fn restart(&mut self) -> Option<GameEvent> {
        if self.status != Status::Dead {
            return None;
        }

        self.start(self.level)
    }

    pub fn pause(&mut self) -> Option<GameEvent> {
        if self.status != Status::Running {
            return None;
        }

        self.status = Status::Paused;
        Some(GameEvent::Paused)
    }

    pub fn resume(&mut self) -> Option<GameEvent> {
        if self.status != Status::Paused {
            return None;
        }

        self.status = Status::Running;
        Some(GameEvent::Resumed)
    }

    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            _ => None,
        }
    }

    /// Abandons a paused or finished run and goes back to the start scene
    pub fn exit_to_menu(&mut self) -> bool {
        if !matches!(self.status, Status::Paused | Status::Dead) {
            return false;
        }

        self.status = Status::NotStarted;
        true
    }

    ///////////////////////////////////////////////////////////////////////////
    // Input

    /// Queues a turn for a later tick. Repeating the last queued direction does nothing.
    pub fn request_turn(&mut self, dir: Direction) {
        if self.status != Status::Running {
            return;
        }

        if self.turns.last() == Some(&dir) {
            return;
        }

        // Keep the last entry around, it is what repeats are checked against
        if self.next_turn > 1 && self.next_turn == self.turns.len() {
            self.turns.drain(..self.next_turn - 1);
            self.next_turn = 1;
        }

        self.turns.push(dir);
    }

    /// Drops an extra food item somewhere on the grid
    pub fn spawn_food(&mut self) -> bool {
        if !matches!(self.status, Status::Running | Status::Paused) {
            return false;
        }

        self.place_food();
        true
    }

    ///////////////////////////////////////////////////////////////////////////
    // Time

    /// Feeds `dt` milliseconds of real time to the game, taking at most one step
    pub fn advance(&mut self, dt: f64) -> Vec<GameEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.animations.advance(dt);

        if self.status != Status::Running {
            return Vec::new();
        }

        self.tick_timer += dt;
        if self.tick_timer < self.level.tick_interval_ms() as f64 {
            return Vec::new();
        }

        // Whatever went over the interval is lost, not carried into the next tick
        self.tick_timer = 0.0;
        self.step()
    }

    fn step(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.resolve_turn();
        self.eat_food_under_head(&mut events);

        self.snake.move_step(self.facing, &self.grid);
        log::trace!("Head at {:?} facing {}", self.snake.head().cell(), self.facing);

        if self.snake.hits_itself() {
            self.status = Status::Dead;
            log::info!("Died with a score of {} at length {}", self.score, self.snake.len());
            events.push(GameEvent::Died { score: self.score });
        }

        events
    }

    fn resolve_turn(&mut self) {
        let wanted = self.turns.get(self.next_turn).copied().unwrap_or(self.facing);
        self.next_turn = (self.next_turn + 1).min(self.turns.len());

        if wanted == self.facing {
            return;
        }

        if wanted.is_opposite(self.facing) {
            log::debug!("Ignoring turn from {} to {}", self.facing, wanted);
            return;
        }

        self.facing = wanted;
    }

    fn eat_food_under_head(&mut self, events: &mut Vec<GameEvent>) {
        let head = self.snake.head().cell();

        // New food never lands under the head, so items placed here need no check
        for i in 0..self.foods.len() {
            let food = &mut self.foods[i];
            if food.eaten || food.cell() != head {
                continue;
            }

            food.eaten = true;
            let kind = food.kind;

            self.snake.grow();
            self.score += SCORE_PER_FOOD;
            self.place_food();

            log::debug!("Ate food of kind {} at {:?}, score {}", kind, head, self.score);
            events.push(GameEvent::FoodEaten { kind, score: self.score });
        }
    }

    fn place_food(&mut self) {
        let food = self.spawner.spawn(&self.grid, Some(self.snake.head().cell()));
        log::debug!("Placed food of kind {} at {:?}", food.kind, food.cell());
        self.foods.push(food);
    }

    fn reset(&mut self) {
        self.snake = Snake::spawn(&self.grid);
        self.facing = Direction::Right;
        self.turns.clear();
        self.next_turn = 0;
        self.foods.clear();
        self.score = 0;
        self.tick_timer = 0.0;

        self.place_food();
    }

    ///////////////////////////////////////////////////////////////////////////
    // Queries

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            status: self.status,
            level: self.level,
            facing: self.facing,
            segments: self.snake.body(),
            foods: &self.foods,
            score: self.score,
            animations: &self.animations,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Turns queued but not yet taken
    pub fn pending_turns(&self) -> &[Direction] {
        &self.turns[self.next_turn..]
    }
}
