use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;
use tracing::error;

use crate::cell::{Cell, CellKind};
use crate::session::{Button, Event, GameSession, Status};

pub fn run_tui(mut session: GameSession) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // (row, col)
    let mut cursor = (0usize, 0usize);
    // Redraw at least this often so the clock keeps moving.
    let tick_rate = Duration::from_millis(250);

    let mut last_inner_board = Rect::default();
    let res = loop {
        terminal.draw(|f| { last_inner_board = ui(f, &session, cursor); })?;

        if event::poll(tick_rate)? {
            let (height, width) = (session.field().height(), session.field().width());
            let input = match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
                    KeyCode::Char('h') | KeyCode::Left => {
                        if cursor.1 > 0 { cursor.1 -= 1; }
                        None
                    }
                    KeyCode::Char('l') | KeyCode::Right => {
                        if cursor.1 + 1 < width { cursor.1 += 1; }
                        None
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        if cursor.0 > 0 { cursor.0 -= 1; }
                        None
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        if cursor.0 + 1 < height { cursor.0 += 1; }
                        None
                    }
                    KeyCode::Char('f') => Some(Event::Click { row: cursor.0, col: cursor.1, button: Button::Secondary }),
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Event::Click { row: cursor.0, col: cursor.1, button: Button::Primary }),
                    KeyCode::Char('n') | KeyCode::Char('R') => Some(Event::Restart),
                    _ => None,
                },
                TermEvent::Mouse(m) => {
                    // Map mouse to cell coordinates within the inner board area
                    let cell = pos_to_cell(m.column, m.row, last_inner_board, width as u16, height as u16);
                    match (m.kind, cell) {
                        (MouseEventKind::Down(MouseButton::Left), Some((row, col))) => {
                            cursor = (row as usize, col as usize);
                            Some(Event::Click { row: cursor.0, col: cursor.1, button: Button::Primary })
                        }
                        (MouseEventKind::Down(MouseButton::Right), Some((row, col))) => {
                            cursor = (row as usize, col as usize);
                            Some(Event::Click { row: cursor.0, col: cursor.1, button: Button::Secondary })
                        }
                        _ => None,
                    }
                }
                _ => None,
            };
            if let Some(input) = input {
                match session.handle_event(input) {
                    Ok(true) => {}
                    Ok(false) => break Ok(()),
                    Err(e) => {
                        error!(error = %e, "cannot apply input");
                        break Err(io::Error::new(io::ErrorKind::Other, e));
                    }
                }
            }
        }
    };

    // teardown via guard; just ensure cursor visible
    terminal.show_cursor()?;
    res
}

fn ui(f: &mut ratatui::Frame, session: &GameSession, cursor: (usize, usize)) -> Rect {
    let field = session.field();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(f.size());

    // Header
    let (status, color) = match session.status() {
        Status::Lost => ("Boom! You hit a mine. n to restart, q to quit", Color::Red),
        Status::Won => ("You won! n to restart, q to quit", Color::Green),
        Status::Playing => ("Mouse: left=open, right=flag • Arrows/HJKL move • Enter/Space open • f flag • n new • q quit", Color::Cyan),
    };
    let title = format!("Minesweeper  Mines: {}  Time: {}s", session.remaining_mines(), session.elapsed().as_secs());
    let header = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], field.width() as u16, field.height() as u16);
    let inner = inner_area(area);
    draw_field(f, session, area, cursor);

    let footer = Paragraph::new(format!(
        "Mode: {}  Size: {}x{}  Mines: {}",
        session.config().mode(), field.height(), field.width(), field.mines_count()
    ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    // one char + one space per cell, plus the border
    let grid_w = cols * 2 + 2;
    let grid_h = rows + 2;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_field(f: &mut ratatui::Frame, session: &GameSession, area: Rect, cursor: (usize, usize)) {
    let field = session.field();
    let mut lines: Vec<Line> = Vec::with_capacity(field.height());
    for row in 0..field.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(field.width());
        for col in 0..field.width() {
            let Some(c) = field.cell(row, col) else { continue };
            let exploded = field.exploded() == Some((row, col));
            let (mut ch, mut style) = glyph(c, exploded);

            // Highlight selected cell
            if cursor == (row, col) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Field");
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn glyph(c: &Cell, exploded: bool) -> (char, Style) {
    if exploded {
        return ('X', Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    }
    if !c.is_opened() {
        return if c.is_flagged() { ('F', Style::default().fg(Color::Yellow)) } else { ('·', Style::default().fg(Color::DarkGray)) };
    }
    // Flags survive the full reveal after a loss: show which ones were right.
    match (c.kind(), c.is_flagged()) {
        (CellKind::Mine, true) => ('F', Style::default().fg(Color::Green)),
        (_, true) => ('x', Style::default().fg(Color::Magenta)),
        (CellKind::Mine, false) => ('*', Style::default().fg(Color::Red)),
        (CellKind::Number(n), false) => (char::from_digit(n as u32, 10).unwrap_or('?'), number_style(n)),
        (CellKind::Empty, false) => (' ', Style::default()),
    }
}

fn number_style(n: u8) -> Style {
    match n {
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    // Match Block::inner() for Borders::ALL: shrink by 1 on each side
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

/// Screen position to `(row, col)`, if it lands on the field.
fn pos_to_cell(mx: u16, my: u16, inner: Rect, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let col = (mx - inner.x) / 2; // must match the two-column cell width in draw_field
    let row = my - inner.y;
    if col < cols && row < rows { Some((row, col)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
