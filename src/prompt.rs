use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// What the caller wants typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub hint: &'static str,
    pub accept_label: &'static str,
    /// Longest accepted answer, in bytes.
    pub max_len: usize,
    pub initial: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Accepted(String),
    Cancelled,
}

/// Blocking single-line text entry.
pub trait TextPrompt {
    fn prompt(&mut self, request: PromptRequest) -> Result<PromptOutcome>;
}

/// Editing state of an open prompt.
#[derive(Debug)]
struct PromptInput {
    text: String,
    max_len: usize,
}

impl PromptInput {
    fn new(request: &PromptRequest) -> Self {
        let mut text = request.initial.clone();
        while text.len() > request.max_len {
            text.pop();
        }
        Self {
            text,
            max_len: request.max_len,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Enter => return Some(PromptOutcome::Accepted(self.text.clone())),
            KeyCode::Esc => return Some(PromptOutcome::Cancelled),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(PromptOutcome::Cancelled);
            }
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                if self.text.len() + ch.len_utf8() <= self.max_len {
                    self.text.push(ch);
                }
            }
            _ => {}
        }
        None
    }
}

/// Full-screen prompt drawn on the application terminal.
pub struct TerminalPrompt<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

impl<'a, B: Backend> TerminalPrompt<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>) -> Self {
        Self { terminal }
    }
}

impl<B: Backend> TextPrompt for TerminalPrompt<'_, B> {
    fn prompt(&mut self, request: PromptRequest) -> Result<PromptOutcome> {
        let mut input = PromptInput::new(&request);

        loop {
            self.terminal
                .draw(|f| render_prompt(f, &request, &input.text))?;

            if let Event::Key(key) = event::read()?
                && let Some(outcome) = input.handle_key(key)
            {
                return Ok(outcome);
            }
        }
    }
}

fn render_prompt(frame: &mut Frame, request: &PromptRequest, text: &str) {
    let area = frame.area();
    let box_area = prompt_rect(area);
    frame.render_widget(Clear, area);

    let banner = Paragraph::new(Span::styled(
        "pocketnote",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(banner, Rect { height: 1, ..area });

    let counter = format!(" {}/{} ", text.len(), request.max_len);
    let body = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", request.hint))
                .title_bottom(Line::from(counter).alignment(Alignment::Right))
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::Rgb(15, 15, 24))),
        );
    frame.render_widget(body, box_area);

    let help = Paragraph::new(format!(
        "Enter: {}  Esc: Cancel",
        request.accept_label
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    let help_y = area.y + area.height.saturating_sub(1);
    frame.render_widget(
        help,
        Rect {
            y: help_y,
            height: 1,
            ..area
        },
    );

    let inner_width = box_area.width.saturating_sub(2).max(1) as usize;
    let typed = text.chars().count();
    let cursor_x = box_area.x + 1 + (typed % inner_width) as u16;
    let cursor_y = box_area.y + 1 + (typed / inner_width) as u16;
    if cursor_y < box_area.y + box_area.height.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn prompt_rect(r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(rows[1])[1]
}
