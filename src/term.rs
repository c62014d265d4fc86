use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// Terminal position as `(x, y)`
pub type Pos = (u16, u16);

/// Owns the terminal while the game runs. Keeps a copy of everything printed so
/// message boxes can be taken down again without redrawing the scene.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

#[derive(Debug, Clone, Copy)]
struct Message {
    top_left: Pos,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
    }

    /// Undoes `setup`. Tries every step even if an earlier one failed.
    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        let screen = execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        raw.and(screen)
    }

    /// Everything that arrived since the last call, without blocking
    pub fn poll_events(&self) -> io::Result<Vec<Event>> {
        let mut events = vec![];

        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }

        Ok(events)
    }

    pub fn size(&self) -> Pos {
        (self.width, self.height)
    }

    /// Adopts a new terminal size. The screen is wiped and has to be redrawn.
    pub fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.width = width;
        self.height = height;
        self.current_msg = None;
        self.clear()
    }

    pub fn draw_borders(&mut self, top_left: Pos, (width, height): Pos) {
        if width < 2 || height < 2 {
            return;
        }

        let (x0, y0) = top_left;
        let (end_x, end_y) = (x0 + width - 1, y0 + height - 1);

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x { '+' } else { '-' };
            self.print_at((x, y0), ch);
            self.print_at((x, end_y), ch);
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), '|');
            self.print_at((end_x, y), '|');
        }
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Top and bottom padding
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (x_diff, ch) in padded.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as u16, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> io::Result<()> {
        let Some(msg) = self.current_msg.take() else {
            return Ok(());
        };

        // Put back what the message covered
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                if let Some(i) = self.index((x, y)) {
                    let ch = self.screen[i];
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Prints `ch` unless it is already there. Under a message box only the
    /// buffer is updated, the box stays on top.
    pub fn print_at(&mut self, pos: Pos, ch: char) {
        let Some(i) = self.index(pos) else {
            return;
        };

        if self.screen[i] == ch {
            return;
        }
        self.screen[i] = ch;

        if self.current_msg.is_some_and(|msg| msg.covers(pos)) {
            return;
        }

        // Errors surface on the next flush
        let _ = queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch));
    }

    pub fn print_str(&mut self, (x, y): Pos, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.print_at((x + i as u16, y), ch);
        }
    }

    pub fn bell(&mut self) -> io::Result<()> {
        queue!(self.stdout, style::Print('\u{7}'))
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, (x, y): Pos) -> Option<usize> {
        (x < self.width && y < self.height).then(|| self.width as usize * y as usize + x as usize)
    }

    fn print_at_no_save(&mut self, pos: Pos, ch: char) -> io::Result<()> {
        // For message boxes, which must not end up in the buffer they get restored from
        if self.index(pos).is_none() {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }
}

impl Message {
    fn covers(&self, (x, y): Pos) -> bool {
        (self.top_left.0..self.top_left.0 + self.width).contains(&x)
            && (self.top_left.1..self.top_left.1 + self.height).contains(&y)
    }
}
