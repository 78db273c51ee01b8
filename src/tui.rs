//! Full-screen terminal interface for Motus, built on Ratatui.
//!
//! # Architecture
//! - `InputState`: turns key events into [`UserAction`]s for either input mode
//! - `TuiInterface`: owns the terminal, renders the session and plays reveals
//!
//! # Input modes
//! - `TextField`: typing edits the whole guess at once
//! - `Keyboard`: an on-screen AZERTY grid navigated with the arrow keys
//!
//! `Tab` switches between the two. While the end-of-game popup is shown only
//! `Enter` (new game), `Ctrl-R` and `Esc` are honoured.

use crate::error::GameError;
use crate::evaluator::LetterStatus;
use crate::game_state::{GameInterface, GameSession, GameStatus, UserAction, game_over_message};
use crate::reveal::{RevealProgress, RevealStep, RevealTiming};
use crate::word::{MAX_ATTEMPTS, WORD_LENGTH};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 7;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const SELECTED_KEY_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);
const KEY_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

const KEYBOARD_ROWS: [&[KeyCap]; 3] = [
    &[
        KeyCap::Letter('A'),
        KeyCap::Letter('Z'),
        KeyCap::Letter('E'),
        KeyCap::Letter('R'),
        KeyCap::Letter('T'),
        KeyCap::Letter('Y'),
        KeyCap::Letter('U'),
        KeyCap::Letter('I'),
        KeyCap::Letter('O'),
        KeyCap::Letter('P'),
    ],
    &[
        KeyCap::Letter('Q'),
        KeyCap::Letter('S'),
        KeyCap::Letter('D'),
        KeyCap::Letter('F'),
        KeyCap::Letter('G'),
        KeyCap::Letter('H'),
        KeyCap::Letter('J'),
        KeyCap::Letter('K'),
        KeyCap::Letter('L'),
        KeyCap::Letter('M'),
    ],
    &[
        KeyCap::Backspace,
        KeyCap::Letter('W'),
        KeyCap::Letter('X'),
        KeyCap::Letter('C'),
        KeyCap::Letter('V'),
        KeyCap::Letter('B'),
        KeyCap::Letter('N'),
        KeyCap::Enter,
    ],
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum KeyCap {
    Letter(char),
    Backspace,
    Enter,
}

impl KeyCap {
    fn label(self) -> String {
        match self {
            Self::Letter(c) => c.to_string(),
            Self::Backspace => "←".to_string(),
            Self::Enter => "Entrée".to_string(),
        }
    }

    fn action(self) -> UserAction {
        match self {
            Self::Letter(c) => UserAction::Letter(c),
            Self::Backspace => UserAction::Backspace,
            Self::Enter => UserAction::Submit,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum InputMode {
    TextField,
    Keyboard,
}

/// Background and foreground of a grid cell.
fn cell_colors(status: Option<LetterStatus>) -> (Color, Color) {
    match status {
        None => (Color::Blue, Color::White),
        Some(LetterStatus::Correct) => (Color::Red, Color::White),
        Some(LetterStatus::Present) => (Color::Yellow, Color::Black),
        Some(LetterStatus::Absent) => (Color::DarkGray, Color::White),
    }
}

/// Status shown for a cell: a row being revealed only shows what the reveal
/// has uncovered so far, every other row its stored feedback.
fn visible_status(
    session: &GameSession,
    reveal: Option<&RevealProgress>,
    row: usize,
    col: usize,
) -> Option<LetterStatus> {
    match reveal {
        Some(reveal) if reveal.attempt_index() == row => reveal.visible_status(col),
        _ => session.attempts()[row].feedback.map(|feedback| feedback[col]),
    }
}

/// Key handling state, kept apart from the terminal so it can be driven in tests.
#[derive(Debug)]
struct InputState {
    mode: InputMode,
    key_row: usize,
    key_col: usize,
    current_input: String,
    game_over: bool,
    error_message: String,
}

impl InputState {
    fn new() -> Self {
        Self {
            mode: InputMode::TextField,
            key_row: 0,
            key_col: 0,
            current_input: String::new(),
            game_over: false,
            error_message: String::new(),
        }
    }

    /// Mirror what the key handlers need from the session.
    fn sync(&mut self, session: &GameSession) {
        self.current_input.clear();
        self.current_input.push_str(session.current_input());
        self.game_over = session.status().is_terminal();
    }

    fn selected_key(&self) -> KeyCap {
        KEYBOARD_ROWS[self.key_row][self.key_col]
    }

    fn move_selection(&mut self, row_delta: isize, col_delta: isize) {
        let rows = KEYBOARD_ROWS.len() as isize;
        self.key_row = (self.key_row as isize + row_delta).rem_euclid(rows) as usize;
        let cols = KEYBOARD_ROWS[self.key_row].len() as isize;
        let col = (self.key_col as isize).min(cols - 1);
        self.key_col = (col + col_delta).rem_euclid(cols) as usize;
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            InputMode::TextField => InputMode::Keyboard,
            InputMode::Keyboard => InputMode::TextField,
        };
        info_log!("InputState::toggle_mode() - now {:?}", self.mode);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Shortcuts honoured in every state, including during a reveal.
    fn global_action(key: &KeyEvent) -> Option<UserAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char('n' | 'N') if ctrl => Some(UserAction::NewGame),
            KeyCode::Char('r' | 'R') if ctrl => Some(UserAction::ResetAll),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        if let Some(action) = Self::global_action(&key) {
            return Some(action);
        }

        if self.game_over {
            return match key.code {
                KeyCode::Enter => Some(UserAction::NewGame),
                _ => {
                    debug_log!("handle_key() - Ignoring {:?} on game over", key.code);
                    None
                }
            };
        }

        if key.code == KeyCode::Tab {
            self.toggle_mode();
            return None;
        }

        match self.mode {
            InputMode::TextField => self.handle_text_field_key(key),
            InputMode::Keyboard => self.handle_keyboard_key(key),
        }
    }

    fn handle_text_field_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char(c) if !Self::has_modifier_keys(&key) => {
                let mut text = self.current_input.clone();
                text.push(c.to_ascii_uppercase());
                Some(UserAction::Input(text))
            }
            KeyCode::Backspace if !self.current_input.is_empty() => {
                let mut text = self.current_input.clone();
                text.pop();
                Some(UserAction::Input(text))
            }
            KeyCode::Enter => Some(UserAction::Submit),
            _ => {
                debug_log!("handle_text_field_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_keyboard_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Left => self.move_selection(0, -1),
            KeyCode::Right => self.move_selection(0, 1),
            KeyCode::Up => self.move_selection(-1, 0),
            KeyCode::Down => self.move_selection(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let cap = self.selected_key();
                info_log!("handle_keyboard_key() - Key cap pressed: {:?}", cap);
                return Some(cap.action());
            }
            KeyCode::Backspace => return Some(UserAction::Backspace),
            _ => {
                debug_log!("handle_keyboard_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    session: &'a GameSession,
    input: &'a InputState,
    reveal: Option<&'a RevealProgress>,
    popup: Option<&'a str>,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and the staged reveal.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    input: InputState,
    reveal: Option<RevealProgress>,
    popup: Option<String>,
    status: String,
    restore: TerminalRestore,
}

/// Raw mode and the alternate screen are left exactly once.
#[derive(Debug, Default)]
struct TerminalRestore {
    done: bool,
}

impl TerminalRestore {
    fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.done, true)
    }
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            input: InputState::new(),
            reveal: None,
            popup: None,
            status: "Ready".to_string(),
            restore: TerminalRestore::default(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if !self.restore.claim() {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self, session: &GameSession) -> Result<(), io::Error> {
        let ctx = RenderContext {
            session,
            input: &self.input,
            reveal: self.reveal.as_ref(),
            popup: self.popup.as_deref(),
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self, session: &GameSession) {
        if let Err(e) = self.draw(session) {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                                // Title
                Constraint::Length(3),                                // Score
                Constraint::Length(MAX_ATTEMPTS as u16 * ROW_SPACING + 2), // Grid
                Constraint::Length(5),                                // Text field or keyboard
                Constraint::Min(3),                                   // Messages
                Constraint::Length(3),                                // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_score(f, chunks[1], ctx.session, ctx.status);
        Self::render_board(f, chunks[2], ctx.session, ctx.reveal);
        match ctx.input.mode {
            InputMode::TextField => Self::render_text_field(f, chunks[3], ctx.session),
            InputMode::Keyboard => Self::render_keyboard(f, chunks[3], ctx.input),
        }
        Self::render_messages(f, chunks[4], &ctx.input.error_message);
        Self::render_instructions(f, chunks[5], ctx.input);

        if let Some(message) = ctx.popup {
            Self::render_popup(f, message, ctx.session.score());
        }
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MOTUS - Jeu de Devinettes")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_score(f: &mut Frame, area: Rect, session: &GameSession, status: &str) {
        let text = format!(
            "Score: {}   Attempts left: {}/{}   {}",
            session.score(),
            session.attempts_remaining(),
            MAX_ATTEMPTS,
            status
        );
        let paragraph = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        session: &GameSession,
        reveal: Option<&RevealProgress>,
    ) {
        let block = Block::default().title("Grid").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for row in 0..MAX_ATTEMPTS {
            Self::render_grid_row(f, session, reveal, row, inner);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_grid_row(
        f: &mut Frame,
        session: &GameSession,
        reveal: Option<&RevealProgress>,
        row: usize,
        area: Rect,
    ) {
        let y = area.y + (row as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for col in 0..WORD_LENGTH {
            let (bg_color, fg_color) = cell_colors(visible_status(session, reveal, row, col));
            let letter = session.cell_letter(row, col).unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default()
                    .fg(fg_color)
                    .bg(bg_color)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }

        let is_current = row == session.current_attempt()
            && session.status() == GameStatus::InProgress
            && !session.is_revealing();
        if is_current {
            spans.push(Span::raw(" <"));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_text_field(f: &mut Frame, area: Rect, session: &GameSession) {
        let input = session.current_input();
        let cursor = if input.len() < WORD_LENGTH { "_" } else { "" };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::raw("> "),
            Span::styled(format!("{input}{cursor}"), SUCCESS_STYLE),
        ]))
        .block(Block::default().title("Guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, input: &InputState) {
        let lines: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(row, caps)| {
                let mut spans = vec![Span::raw(" ".repeat(row))];
                for (col, cap) in caps.iter().enumerate() {
                    let style = if row == input.key_row && col == input.key_col {
                        SELECTED_KEY_STYLE
                    } else {
                        KEY_STYLE
                    };
                    spans.push(Span::styled(format!(" {} ", cap.label()), style));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, error_message: &str) {
        let line = if error_message.is_empty() {
            Line::from("")
        } else {
            Line::from(vec![Span::styled(error_message, ERROR_STYLE)])
        };
        let paragraph = Paragraph::new(line)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, input: &InputState) {
        let text = if input.game_over {
            "ENTER: Play again | Ctrl-R: Reset game and score | ESC: Quit"
        } else {
            match input.mode {
                InputMode::TextField => {
                    "Type your 6-letter guess | ENTER: Submit | TAB: Keyboard | Ctrl-N: New game | Ctrl-R: Reset all | ESC: Quit"
                }
                InputMode::Keyboard => {
                    "Arrows: Select | SPACE/ENTER: Press key | TAB: Text field | Ctrl-N: New game | ESC: Quit"
                }
            }
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_popup(f: &mut Frame, message: &str, score: u32) {
        let area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, f.area());
        let lines = vec![
            Line::from(Span::styled(message, SUCCESS_STYLE)),
            Line::from(""),
            Line::from(Span::styled(format!("Score: {score}"), MESSAGE_STYLE)),
            Line::from("ENTER: Jouer à nouveau"),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }

    /// Wait up to `duration` for a reset or quit shortcut. Other keys are dropped.
    fn wait_for_interrupt(&mut self, duration: Duration) -> Result<Option<UserAction>, io::Error> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = InputState::global_action(&key) {
                    return Ok(Some(action));
                }
                debug_log!("wait_for_interrupt() - Ignoring key during reveal: {:?}", key.code);
            }
        }
    }

    fn run_reveal(
        &mut self,
        session: &GameSession,
        timing: &RevealTiming,
    ) -> Result<Option<UserAction>, io::Error> {
        loop {
            let step = match self.reveal.as_mut() {
                Some(reveal) => reveal.tick(),
                None => return Ok(None),
            };
            self.draw(session)?;
            let pause = match step {
                RevealStep::Letter { .. } => timing.letter_delay,
                RevealStep::Finished => timing.final_pause,
            };
            if let Some(action) = self.wait_for_interrupt(pause)? {
                return Ok(Some(action));
            }
            if step == RevealStep::Finished {
                return Ok(None);
            }
        }
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        let Event::Key(key) = event else {
            debug_log!("handle_input() - Ignoring non-key event: {:?}", event);
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from focus changes (alt-tab) shows up as replacement or control characters
        if let KeyCode::Char(c) = key.code {
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                return Ok(None);
            }
        }

        debug_log!(
            "handle_input() - Key event: code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );
        Ok(self.input.handle_key(key))
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, session: &GameSession) {
        self.input.sync(session);
        self.draw_or_log(session);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                info_log!("read_action() - Error handling input, returning Exit: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn play_reveal(
        &mut self,
        session: &GameSession,
        reveal: RevealProgress,
        timing: &RevealTiming,
    ) -> Option<UserAction> {
        self.input.sync(session);
        if timing.is_instant() {
            return None;
        }

        self.status = "Revealing...".to_string();
        self.reveal = Some(reveal);
        let result = self.run_reveal(session, timing);
        self.reveal = None;
        self.status.clear();

        match result {
            Ok(action) => action,
            Err(e) => {
                info_log!("play_reveal() - Terminal error, returning Exit: {}", e);
                Some(UserAction::Exit)
            }
        }
    }

    fn display_rejection(&mut self, error: &GameError) {
        self.input.error_message = error.to_string();
    }

    fn display_game_over(&mut self, session: &GameSession) {
        self.popup = game_over_message(session);
        self.status = match session.status() {
            GameStatus::Won => "Won".to_string(),
            GameStatus::Lost => "Lost".to_string(),
            GameStatus::InProgress => String::new(),
        };
        self.render(session);
    }

    fn display_new_game(&mut self, session: &GameSession) {
        self.popup = None;
        self.reveal = None;
        self.input.error_message.clear();
        self.status = "New game".to_string();
        self.render(session);
    }

    fn display_exit_message(&mut self) {
        info_log!("display_exit_message() - Leaving TUI");
        if let Err(e) = self.cleanup() {
            debug_log!("Terminal cleanup failed: {}", e);
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealToken;
    use crate::word::Word;
    use ratatui::backend::TestBackend;

    fn session(secret: &str, hint: bool) -> GameSession {
        GameSession::new(Word::parse(secret).unwrap(), 0, hint)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn render_to_string(ctx: &RenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, ctx))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_text_field_builds_whole_input() {
        let mut input = InputState::new();
        input.current_input = "GAR".to_string();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('d'))),
            Some(UserAction::Input("GARD".to_string()))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Backspace)),
            Some(UserAction::Input("GA".to_string()))
        );
        assert_eq!(input.handle_key(key(KeyCode::Enter)), Some(UserAction::Submit));
    }

    #[test]
    fn test_backspace_on_empty_text_field_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_global_shortcuts() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(ctrl('n')), Some(UserAction::NewGame));
        assert_eq!(input.handle_key(ctrl('r')), Some(UserAction::ResetAll));
        assert_eq!(input.handle_key(key(KeyCode::Esc)), Some(UserAction::Exit));
    }

    #[test]
    fn test_game_over_enter_starts_new_game() {
        let mut input = InputState::new();
        input.game_over = true;
        assert_eq!(input.handle_key(key(KeyCode::Char('a'))), None);
        assert_eq!(input.handle_key(key(KeyCode::Enter)), Some(UserAction::NewGame));
    }

    #[test]
    fn test_keyboard_navigation_and_press() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(key(KeyCode::Tab)), None);
        assert_eq!(input.mode, InputMode::Keyboard);

        // A -> Z
        input.handle_key(key(KeyCode::Right));
        assert_eq!(
            input.handle_key(key(KeyCode::Char(' '))),
            Some(UserAction::Letter('Z'))
        );

        // Wrap left from the first cap to the last one of the row
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        assert_eq!(input.selected_key(), KeyCap::Letter('P'));

        // Down into the shorter bottom row clamps the column
        input.handle_key(key(KeyCode::Down));
        input.handle_key(key(KeyCode::Down));
        assert_eq!(input.selected_key(), KeyCap::Enter);
        assert_eq!(input.handle_key(key(KeyCode::Enter)), Some(UserAction::Submit));

        input.handle_key(key(KeyCode::Right));
        assert_eq!(input.selected_key(), KeyCap::Backspace);
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            Some(UserAction::Backspace)
        );

        input.handle_key(key(KeyCode::Tab));
        assert_eq!(input.mode, InputMode::TextField);
    }

    #[test]
    fn test_keyboard_layout_is_azerty() {
        let letters: String = KEYBOARD_ROWS
            .iter()
            .flat_map(|row| row.iter())
            .filter_map(|cap| match cap {
                KeyCap::Letter(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(letters, "AZERTYUIOPQSDFGHJKLMWXCVBN");
    }

    #[test]
    fn test_sync_mirrors_session() {
        let mut s = session("GARDEN", false);
        s.update_current_input("GAR").unwrap();
        let mut input = InputState::new();
        input.sync(&s);
        assert_eq!(input.current_input, "GAR");
        assert!(!input.game_over);
    }

    #[test]
    fn test_visible_status_during_reveal() {
        let mut s = session("GARDEN", false);
        s.update_current_input("GARNET").unwrap();
        let submission = s.submit_guess().unwrap();
        let mut reveal = submission.reveal();

        assert_eq!(visible_status(&s, Some(&reveal), 0, 0), None);
        reveal.tick();
        assert_eq!(
            visible_status(&s, Some(&reveal), 0, 0),
            Some(LetterStatus::Correct)
        );
        assert_eq!(visible_status(&s, Some(&reveal), 0, 3), None);
        assert_eq!(visible_status(&s, None, 0, 3), Some(LetterStatus::Present));

        let other = RevealProgress::new(
            RevealToken {
                generation: 0,
                attempt_index: 1,
            },
            submission.feedback,
        );
        assert_eq!(
            visible_status(&s, Some(&other), 0, 5),
            Some(LetterStatus::Absent)
        );
    }

    #[test]
    fn test_render_grid_and_hint() {
        let mut s = session("GARDEN", true);
        s.update_current_input("").unwrap();
        let input = InputState::new();
        let ctx = RenderContext {
            session: &s,
            input: &input,
            reveal: None,
            popup: None,
            status: "",
        };
        let screen = render_to_string(&ctx);
        assert!(screen.contains("MOTUS"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Attempts left: 6/6"));
        assert!(screen.contains(" G "));

        s.update_current_input("MAISON").unwrap();
        let ctx = RenderContext {
            session: &s,
            input: &input,
            reveal: None,
            popup: None,
            status: "",
        };
        let screen = render_to_string(&ctx);
        assert!(screen.contains(" M   A   I   S   O   N "));
        assert!(screen.contains("> MAISON"));
    }

    #[test]
    fn test_render_keyboard_and_popup() {
        let mut s = session("GARDEN", false);
        s.update_current_input("GARDEN").unwrap();
        s.submit_guess().unwrap();
        let mut input = InputState::new();
        input.toggle_mode();
        input.sync(&s);
        let message = game_over_message(&s).unwrap();
        let ctx = RenderContext {
            session: &s,
            input: &input,
            reveal: None,
            popup: Some(&message),
            status: "Won",
        };
        let screen = render_to_string(&ctx);
        assert!(screen.contains("Keyboard"));
        assert!(screen.contains("Entrée"));
        assert!(screen.contains("Bravo!"));
        assert!(screen.contains("Score: 1"));
        assert!(screen.contains("Attempts left: 5/6"));
    }

    #[test]
    fn test_terminal_restored_once() {
        let mut restore = TerminalRestore::default();
        assert!(restore.claim());
        assert!(!restore.claim());
        assert!(!restore.claim());
    }

    #[test]
    fn test_centered_rect_clips_to_area() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 4));

        let area = Rect::new(0, 0, 100, 41);
        let rect = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        assert_eq!(rect, Rect::new(25, 17, 50, 7));
    }
}
