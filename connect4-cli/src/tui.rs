use std::io;
use std::io::Write;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::{
    cursor, execute, queue, style,
    terminal::{self, ClearType},
};

use connect4::{GameEngine, GameStatus};

use crate::config::Palette;

/// Character typed by a key press, lowercased so caps lock doesn't matter.
fn pressed_char(event: &Event) -> Option<char> {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            kind: KeyEventKind::Press,
            ..
        }) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Blocks until a character key is pressed.
pub fn read_char() -> io::Result<char> {
    loop {
        if let Some(c) = pressed_char(&event::read()?) {
            return Ok(c);
        }
    }
}

fn border(width: usize) -> String {
    let mut border = "+---".repeat(width);
    border.push('+');
    border
}

pub fn show_connect4(
    engine: &GameEngine,
    palette: &Palette,
    last_drop: Option<(usize, usize)>,
) -> io::Result<()> {
    let mut stdout = io::stdout();
    let width = engine.width();

    // Header
    queue!(
        stdout,
        style::ResetColor,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    match engine.status() {
        GameStatus::Ongoing => {
            let seat = engine.current_seat();
            queue!(
                stdout,
                style::SetForegroundColor(palette.color(seat)),
                style::Print(engine.player(seat).label()),
                style::ResetColor,
                style::Print("'s turn"),
                cursor::MoveToNextLine(1)
            )?;
        }
        GameStatus::Won { seat } => {
            let label = engine.player(seat).label().to_uppercase();
            queue!(
                stdout,
                style::SetForegroundColor(palette.color(seat)),
                style::Print(format!("{} PLAYER WINS!!!", label)),
                style::ResetColor,
                cursor::MoveToNextLine(1)
            )?;
        }
        GameStatus::Tied => {
            queue!(stdout, style::Print("TIE!"), cursor::MoveToNextLine(1))?;
        }
    }

    // Column keys, only over columns that still take a piece.
    for column in 0..width {
        if engine.is_column_playable(column) {
            queue!(stdout, style::Print(format!("  {} ", column + 1)))?;
        } else {
            queue!(stdout, style::Print("    "))?;
        }
    }
    queue!(
        stdout,
        cursor::MoveToNextLine(1),
        style::Print(border(width)),
        cursor::MoveToNextLine(1)
    )?;

    let winning_line = engine.winning_line();
    for row in 0..engine.height() {
        for column in 0..width {
            queue!(stdout, style::Print("| "))?;
            match engine.board().cell_owner(row, column) {
                Some(seat) => {
                    let winning = winning_line.map_or(false, |line| line.contains(&(row, column)));
                    let piece = if winning {
                        "◉"
                    } else if last_drop == Some((row, column)) {
                        "○"
                    } else {
                        "●"
                    };
                    queue!(
                        stdout,
                        style::SetForegroundColor(palette.color(seat)),
                        style::Print(piece),
                        style::ResetColor
                    )?;
                }
                None => {
                    queue!(stdout, style::Print(" "))?;
                }
            };
            queue!(stdout, style::Print(" "))?;
        }
        queue!(
            stdout,
            style::Print("|"),
            cursor::MoveToNextLine(1),
            style::Print(border(width)),
            cursor::MoveToNextLine(1)
        )?;
    }

    if !engine.is_terminal() {
        queue!(
            stdout,
            style::Print(format!("choose a column (1-{}), ", width))
        )?;
    }

    queue!(
        stdout,
        style::Print("hit 'n' for a new game or 'q' to quit"),
        cursor::MoveToNextLine(1),
        style::ResetColor
    )?;

    stdout.flush()
}

/// Raw mode on the alternate screen, cursor hidden. Undone by [`cleanup`].
pub fn setup() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)
}

pub fn cleanup() -> io::Result<()> {
    execute!(
        io::stdout(),
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}
