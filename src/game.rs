use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::{bail, Context, Result};
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

use crate::anim::TailPose;
use crate::config::{GameConfig, Level};
use crate::direction::Direction::{self, *};
use crate::engine::{GameEvent, GameState, Snapshot, Status};
use crate::input::{self, Command};
use crate::term::{Pos, TermManager};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const BODY_GLYPH: [char; 2] = ['█', '█'];
const TURN_GLYPH: [char; 2] = ['▓', '▓'];
const DEAD_GLYPH: [char; 2] = ['X', 'X'];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];
// Catnip, carrot, spider; two poses each
const FOOD_GLYPHS: [[char; 2]; 3] = [['*', '+'], ['Y', 'y'], ['%', '&']];

/// Runs the game in the terminal: reads input, feeds frame time to the engine
/// and draws the result
pub struct SnakeGame {
    config: GameConfig,
    state: GameState,
    term: TermManager,
    origin: Pos,
    fits: bool,
    shown_status: Option<Status>,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new().context("Could not read the terminal size")?;

        let (width, height) = board_size(&config);
        let (term_w, term_h) = term.size();
        if width > term_w || height > term_h {
            bail!(
                "a {}x{} grid needs a {}x{} terminal, this one is {}x{}",
                config.cols, config.rows, width, height, term_w, term_h
            );
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Food seed is {seed}");

        let state = GameState::new(&config, seed);
        let mut game = SnakeGame { config, state, term, origin: (0, 0), fits: true, shown_status: None };
        game.layout();

        Ok(game)
    }

    /// Plays until the player quits. The terminal is restored on every way out.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("Could not set up the terminal")?;

        let res = self.play();
        let restored = self.term.restore().context("Could not restore the terminal");

        res.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            sleep(FRAME_INTERVAL);

            for event in self.term.poll_events()? {
                if !self.handle_event(event)? {
                    return Ok(());
                }
            }

            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f64() * 1000.0;
            last_frame = now;

            for event in self.state.advance(dt) {
                self.react(event)?;
            }

            self.redraw()?;
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Returns false once the player wants out
    fn handle_event(&mut self, event: Event) -> Result<bool> {
        let status = self.state.status();

        let command = match event {
            Event::Key(key) => input::key_command(&key, status),
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
                let head = self.state.snake().head().cell();
                input::click_command(status, head, self.state.facing(), self.screen_to_grid((column, row)))
            }
            Event::Resize(width, height) => {
                self.resize(width, height)?;
                None
            }
            _ => None,
        };

        match command {
            Some(command) => self.apply(command),
            None => Ok(true),
        }
    }

    fn apply(&mut self, command: Command) -> Result<bool> {
        let event = match command {
            Command::Quit => return Ok(false),
            Command::Turn(dir) => {
                self.state.request_turn(dir);
                None
            }
            Command::TogglePause => self.state.toggle_pause(),
            Command::Pause => self.state.pause(),
            Command::Resume => self.state.resume(),
            Command::Start(level) => self.state.start(level.unwrap_or(self.config.level)),
            Command::Restart => self.state.restart(),
            Command::ExitToMenu => {
                self.state.exit_to_menu();
                None
            }
            Command::SpawnFood => {
                self.state.spawn_food();
                None
            }
        };

        if let Some(event) = event {
            self.react(event)?;
        }

        Ok(true)
    }

    /// Sound and logging for things the engine reports
    fn react(&mut self, event: GameEvent) -> Result<()> {
        match event {
            GameEvent::FoodEaten { kind, score } => {
                log::debug!("Crunch ({kind}), score {score}");
                self.beep()?;
            }
            GameEvent::Died { score } => {
                log::info!("Game over, final score {score}");
                self.beep()?;
            }
            GameEvent::Started { .. } => self.term.clear()?,
            GameEvent::Paused | GameEvent::Resumed => {}
        }

        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        if self.config.sound {
            self.term.bell()?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        log::debug!("Terminal resized to {width}x{height}");

        self.state.pause();
        self.term.resize(width, height)?;
        self.layout();
        self.shown_status = None;

        Ok(())
    }

    /// Centers the board in the terminal
    fn layout(&mut self) {
        let (width, height) = board_size(&self.config);
        let (term_w, term_h) = self.term.size();

        self.fits = width <= term_w && height <= term_h;
        self.origin = (term_w.saturating_sub(width) / 2, term_h.saturating_sub(height) / 2);
    }

    /// Terminal position of the left half of a grid cell
    fn grid_to_screen(&self, (col, row): (u16, u16)) -> Pos {
        (self.origin.0 + 1 + col * 2, self.origin.1 + 2 + row)
    }

    /// Grid position of the middle of a terminal character, in fractional cells
    fn screen_to_grid(&self, (x, y): Pos) -> (f64, f64) {
        let col = (x as f64 - self.origin.0 as f64 - 1.0 + 0.5) / 2.0;
        let row = y as f64 - self.origin.1 as f64 - 2.0 + 0.5;
        (col, row)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn redraw(&mut self) -> Result<()> {
        if !self.fits {
            if !self.term.has_message() {
                self.term.show_message(&["Terminal too small", "", "Make it bigger to keep playing"])?;
            }
            return Ok(());
        }

        let status = self.state.status();

        if status != Status::NotStarted {
            self.draw_hud();
            self.draw_board();
        }

        if self.shown_status != Some(status) {
            self.shown_status = Some(status);
            self.show_scene(status)?;
        }

        self.term.flush().context("Could not draw")
    }

    fn show_scene(&mut self, status: Status) -> Result<()> {
        let score = format!("Score: {}", self.state.score());

        match status {
            Status::NotStarted => {
                self.term.clear()?;
                let levels = Level::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, level)| format!("{}: {}", i + 1, level))
                    .collect::<Vec<_>>()
                    .join("  ");
                let default = format!("Enter: {}", self.config.level);
                self.term.show_message(&[
                    "CAT SNAKE",
                    "",
                    "Pick a difficulty",
                    &levels,
                    &default,
                    "",
                    "Arrow keys, WASD or mouse to steer",
                    "Esc to pause, Ctrl+C to quit",
                ])?;
            }
            Status::Running => self.term.hide_message()?,
            Status::Paused => self.term.show_message(&[
                "Paused",
                &score,
                "",
                "Esc to resume",
                "Q to leave this game",
            ])?,
            Status::Dead => self.term.show_message(&[
                "Game over!",
                &score,
                "",
                "R to play again,",
                "Q for the menu.",
            ])?,
        }

        Ok(())
    }

    fn draw_hud(&mut self) {
        let (width, _) = board_size(&self.config);
        let snap = self.state.snapshot();

        let left = format!("Score: {}", snap.score);
        let right = format!("{}{}", if snap.status == Status::Paused { "paused  " } else { "" }, snap.level);
        let gap = (width as usize).saturating_sub(left.len() + right.len()).max(1);
        let line = format!("{left}{}{right}", " ".repeat(gap));

        self.term.print_str(self.origin, &line);
    }

    fn draw_board(&mut self) {
        let (width, height) = board_size(&self.config);
        self.term.draw_borders((self.origin.0, self.origin.1 + 1), (width, height - 1));

        let cells = render_cells(&self.state.snapshot());
        let grid = self.state.grid();

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let glyph = cells[row as usize * grid.cols() as usize + col as usize];
                let (x, y) = self.grid_to_screen((col, row));
                self.term.print_at((x, y), glyph[0]);
                self.term.print_at((x + 1, y), glyph[1]);
            }
        }
    }
}

/// Terminal size needed for the board: two characters per cell, a border and the score line
fn board_size(config: &GameConfig) -> Pos {
    (config.cols * 2 + 2, config.rows + 3)
}

/// What each cell of the grid looks like, row by row
fn render_cells(snap: &Snapshot<'_>) -> Vec<[char; 2]> {
    let cols = snap.grid.cols() as usize;
    let mut cells = vec![EMPTY_GLYPH; cols * snap.grid.rows() as usize];
    let mut put = |(col, row): (u16, u16), glyph: [char; 2]| {
        cells[row as usize * cols + col as usize] = glyph;
    };

    for food in snap.foods.iter().filter(|f| !f.eaten) {
        let glyph = FOOD_GLYPHS[food.kind % FOOD_GLYPHS.len()];
        let (pose, swollen) = snap
            .animations
            .food(food.kind)
            .map(|bob| ((bob.angle() / 90.0) as usize % 2, bob.scale() >= 1.1))
            .unwrap_or((0, false));

        put(food.cell(), [glyph[pose], if swollen { glyph[pose] } else { ' ' }]);
    }

    // Tail first so the head wins where they overlap
    let dead = snap.status == Status::Dead;
    let last = snap.segments.len() - 1;

    for (i, seg) in snap.segments.iter().enumerate().rev() {
        let glyph = if i == 0 {
            head_glyph(seg.facing)
        } else if dead {
            DEAD_GLYPH
        } else if i == last {
            tail_glyph(snap.animations.tail.pose())
        } else if snap.segments[i - 1].facing != seg.facing {
            TURN_GLYPH
        } else {
            BODY_GLYPH
        };

        put(seg.cell(), glyph);
    }

    cells
}

fn head_glyph(facing: Direction) -> [char; 2] {
    match facing {
        Up => ['^', '^'],
        Down => ['v', 'v'],
        Left => ['<', '@'],
        Right => ['@', '>'],
    }
}

fn tail_glyph(pose: TailPose) -> [char; 2] {
    match pose {
        TailPose::Straight => ['~', '~'],
        TailPose::Up => ['~', '\''],
        TailPose::Down => ['~', ','],
    }
}
