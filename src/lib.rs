//! Cat snake: a snake-style arcade game on a wrap-around grid.
//!
//! The rules live in [`engine`] and the modules it builds on, free of any I/O.
//! [`game`], [`term`] and [`input`] put them on a terminal.

pub mod anim;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod term;

pub use config::{ConfigError, GameConfig, Level};
pub use direction::Direction;
pub use engine::{GameEvent, GameState, Snapshot, Status};
pub use grid::{Cell, Grid};
