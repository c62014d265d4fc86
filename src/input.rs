//! Translates raw keyboard, mouse and touch input into game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Level;
use crate::direction::Direction;
use crate::engine::Status;
use crate::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Pause,
    Resume,
    /// Start a run; `None` picks the configured level
    Start(Option<Level>),
    Restart,
    ExitToMenu,
    SpawnFood,
    Quit,
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Maps a key press to what it means in the current scene
pub fn key_command(key: &KeyEvent, status: Status) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    match status {
        Status::NotStarted => match key.code {
            KeyCode::Char('1') => Some(Command::Start(Some(Level::Easy))),
            KeyCode::Char('2') => Some(Command::Start(Some(Level::Normal))),
            KeyCode::Char('3') => Some(Command::Start(Some(Level::Hard))),
            KeyCode::Char('4') => Some(Command::Start(Some(Level::Insane))),
            KeyCode::Enter => Some(Command::Start(None)),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
        Status::Running => match key.code {
            KeyCode::Esc => Some(Command::TogglePause),
            KeyCode::Char(' ') => Some(Command::SpawnFood),
            code => key_direction(code).map(Command::Turn),
        },
        Status::Paused => match key.code {
            KeyCode::Esc => Some(Command::TogglePause),
            KeyCode::Char(' ') => Some(Command::SpawnFood),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::ExitToMenu),
            _ => None,
        },
        Status::Dead => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::ExitToMenu),
            _ => None,
        },
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Which way to turn for a click at `target`, given in fractional grid cells.
///
/// Only perpendicular turns come out of this: moving sideways a click above or
/// below the head decides, moving vertically a click left or right of it does.
pub fn pointer_turn(head: Cell, facing: Direction, target: (f64, f64)) -> Direction {
    let dx = target.0 - (head.0 as f64 + 0.5);
    let dy = target.1 - (head.1 as f64 + 0.5);

    if facing.is_horizontal() {
        if dy < 0.0 { Direction::Up } else { Direction::Down }
    } else if dx < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// A single pointer press (mouse click or one finger)
pub fn click_command(status: Status, head: Cell, facing: Direction, target: (f64, f64)) -> Option<Command> {
    match status {
        Status::Running => Some(Command::Turn(pointer_turn(head, facing, target))),
        _ => None,
    }
}

/// A touch start with every finger currently down. Two or more fingers pause;
/// touching a paused game resumes it and steers with the first finger.
pub fn touch_commands(status: Status, head: Cell, facing: Direction, touches: &[(f64, f64)]) -> Vec<Command> {
    let Some(&first) = touches.first() else {
        return Vec::new();
    };

    match status {
        Status::Running if touches.len() >= 2 => vec![Command::Pause],
        Status::Running => vec![Command::Turn(pointer_turn(head, facing, first))],
        Status::Paused => vec![Command::Resume, Command::Turn(pointer_turn(head, facing, first))],
        Status::NotStarted | Status::Dead => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for status in [Status::NotStarted, Status::Running, Status::Paused, Status::Dead] {
            assert_eq!(key_command(&key, status), Some(Command::Quit));
        }
    }

    #[test]
    fn test_start_scene_picks_level() {
        assert_eq!(
            key_command(&press(KeyCode::Char('3')), Status::NotStarted),
            Some(Command::Start(Some(Level::Hard)))
        );
        assert_eq!(key_command(&press(KeyCode::Enter), Status::NotStarted), Some(Command::Start(None)));
        assert_eq!(key_command(&press(KeyCode::Up), Status::NotStarted), None);
    }

    #[test]
    fn test_arrows_and_wasd_turn_while_running() {
        assert_eq!(key_command(&press(KeyCode::Left), Status::Running), Some(Command::Turn(Direction::Left)));
        assert_eq!(key_command(&press(KeyCode::Char('w')), Status::Running), Some(Command::Turn(Direction::Up)));
        assert_eq!(key_command(&press(KeyCode::Char('x')), Status::Running), None);
    }

    #[test]
    fn test_arrows_ignored_while_paused() {
        assert_eq!(key_command(&press(KeyCode::Left), Status::Paused), None);
        assert_eq!(key_command(&press(KeyCode::Esc), Status::Paused), Some(Command::TogglePause));
        assert_eq!(key_command(&press(KeyCode::Char('q')), Status::Paused), Some(Command::ExitToMenu));
    }

    #[test]
    fn test_dead_scene_keys() {
        assert_eq!(key_command(&press(KeyCode::Char('r')), Status::Dead), Some(Command::Restart));
        assert_eq!(key_command(&press(KeyCode::Esc), Status::Dead), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(key_command(&key, Status::Running), None);
    }

    #[test]
    fn test_pointer_turn_is_perpendicular() {
        let head = (10, 10);

        assert_eq!(pointer_turn(head, Direction::Right, (15.0, 3.0)), Direction::Up);
        assert_eq!(pointer_turn(head, Direction::Left, (2.0, 12.0)), Direction::Down);
        assert_eq!(pointer_turn(head, Direction::Up, (4.0, 2.0)), Direction::Left);
        assert_eq!(pointer_turn(head, Direction::Down, (10.5, 0.0)), Direction::Right);
    }

    #[test]
    fn test_click_only_steers_running_game() {
        assert_eq!(
            click_command(Status::Running, (5, 5), Direction::Right, (5.0, 9.0)),
            Some(Command::Turn(Direction::Down))
        );
        assert_eq!(click_command(Status::Paused, (5, 5), Direction::Right, (5.0, 9.0)), None);
    }

    #[test]
    fn test_multi_touch_pauses() {
        let touches = [(1.0, 1.0), (8.0, 8.0)];
        assert_eq!(touch_commands(Status::Running, (5, 5), Direction::Up, &touches), vec![Command::Pause]);
    }

    #[test]
    fn test_touch_resumes_and_steers() {
        assert_eq!(
            touch_commands(Status::Paused, (5, 5), Direction::Up, &[(9.0, 5.0)]),
            vec![Command::Resume, Command::Turn(Direction::Right)]
        );
        assert!(touch_commands(Status::Dead, (5, 5), Direction::Up, &[(9.0, 5.0)]).is_empty());
        assert!(touch_commands(Status::Running, (5, 5), Direction::Up, &[]).is_empty());
    }
}
