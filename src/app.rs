use anyhow::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::mode::Mode;
use crate::model::note::{CONTENT_CAPACITY, MAX_NOTES, Note, TITLE_CAPACITY};
use crate::model::store::{NoteStore, SaveStatus};
use crate::msg::{Input, Msg};
use crate::prompt::{PromptOutcome, PromptRequest, TextPrompt};

const MENU_ITEMS: [&str; 2] = ["New Note", "View Notes"];
const MENU_NEW_NOTE: usize = 0;

/// Read-only picture of the application handed to the renderer each frame.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub selected_menu: usize,
    pub selected_note: Option<usize>,
    pub titles: Vec<&'a str>,
    pub viewed: Option<&'a Note>,
    pub status: Option<&'a str>,
}

pub struct App {
    pub mode: Mode,
    selected_menu: usize,
    /// Where `back` leads from the note view.
    view_origin: Mode,
    pub store: NoteStore,
    pub should_quit: bool,
    status: Option<String>,
}

impl App {
    pub fn new(store: NoteStore) -> Self {
        Self {
            mode: Mode::Menu,
            selected_menu: 0,
            view_origin: Mode::NoteList,
            store,
            should_quit: false,
            status: None,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode,
            selected_menu: self.selected_menu,
            selected_note: self.store.selected_index(),
            titles: self.store.titles(),
            viewed: match self.mode {
                Mode::ViewNote => self.store.selected_note(),
                _ => None,
            },
            status: self.status.as_deref(),
        }
    }

    // ── MVU: Update ──────────────────────────────────────────────

    pub fn update(&mut self, msg: Msg, prompt: &mut dyn TextPrompt) -> Result<()> {
        match msg {
            Msg::Key(key) => {
                if let Some(input) = Input::from_key(key) {
                    self.handle_input(input, prompt)?;
                }
            }
            Msg::Resize(w, h) => tracing::debug!(w, h, "resize"),
        }
        Ok(())
    }

    fn handle_input(&mut self, input: Input, prompt: &mut dyn TextPrompt) -> Result<()> {
        self.status = None;
        match self.mode {
            Mode::Menu => self.handle_menu(input, prompt),
            Mode::NoteList => {
                self.handle_note_list(input);
                Ok(())
            }
            Mode::ViewNote => self.handle_view_note(input, prompt),
        }
    }

    fn handle_menu(&mut self, input: Input, prompt: &mut dyn TextPrompt) -> Result<()> {
        match input {
            Input::Up | Input::Down => {
                self.selected_menu = (self.selected_menu + 1) % MENU_ITEMS.len();
            }
            Input::Confirm if self.selected_menu == MENU_NEW_NOTE => self.new_note(prompt)?,
            Input::Confirm => {
                if self.store.is_empty() {
                    self.status = Some("no notes yet".to_string());
                } else {
                    self.store.select(0);
                    self.mode = Mode::NoteList;
                }
            }
            Input::Quit => {
                tracing::info!("quit requested");
                self.should_quit = true;
            }
            Input::Back => {}
        }
        Ok(())
    }

    fn new_note(&mut self, prompt: &mut dyn TextPrompt) -> Result<()> {
        let outcome = prompt.prompt(PromptRequest {
            hint: "Enter note title",
            accept_label: "OK",
            max_len: TITLE_CAPACITY - 1,
            initial: String::new(),
        })?;

        let PromptOutcome::Accepted(title) = outcome else {
            tracing::debug!("title prompt cancelled");
            return Ok(());
        };

        match self.store.create_note(&title) {
            Ok((_, status)) => {
                self.mode = Mode::ViewNote;
                self.view_origin = Mode::Menu;
                self.report_save(status);
            }
            Err(err) => {
                tracing::info!("note not created: {err}");
                self.status = Some(err.to_string());
            }
        }
        Ok(())
    }

    fn handle_note_list(&mut self, input: Input) {
        match input {
            Input::Back => self.mode = Mode::Menu,
            Input::Up => self.store.previous_note(),
            Input::Down => self.store.next_note(),
            Input::Confirm => {
                if self.store.selected_note().is_some() {
                    self.mode = Mode::ViewNote;
                    self.view_origin = Mode::NoteList;
                }
            }
            Input::Quit => {}
        }
    }

    fn handle_view_note(&mut self, input: Input, prompt: &mut dyn TextPrompt) -> Result<()> {
        match input {
            Input::Back => self.mode = self.view_origin,
            Input::Confirm => self.add_line(prompt)?,
            Input::Up | Input::Down | Input::Quit => {}
        }
        Ok(())
    }

    fn add_line(&mut self, prompt: &mut dyn TextPrompt) -> Result<()> {
        let outcome = prompt.prompt(PromptRequest {
            hint: "Add a line to note",
            accept_label: "Add",
            max_len: CONTENT_CAPACITY - 1,
            initial: String::new(),
        })?;

        let PromptOutcome::Accepted(line) = outcome else {
            tracing::debug!("line prompt cancelled");
            return Ok(());
        };

        match self.store.append_to_selected(&line) {
            Ok(status) => self.report_save(status),
            Err(err) => self.status = Some(err.to_string()),
        }
        Ok(())
    }

    fn report_save(&mut self, status: SaveStatus) {
        tracing::debug!(saved = status.is_saved(), "change flushed");
        if let SaveStatus::Failed(err) = status {
            self.status = Some(format!("not saved: {err}"));
        }
    }

    // ── MVU: View ────────────────────────────────────────────────

    pub fn view(&self, frame: &mut Frame) {
        let snap = self.snapshot();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // banner
                Constraint::Min(1),    // body
                Constraint::Length(1), // key hints
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        let banner = Paragraph::new(Span::styled(
            "pocketnote",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(banner, chunks[0]);

        let hints = match snap.mode {
            Mode::Menu => "Enter: Select  q: Quit",
            Mode::NoteList => "Enter: View  Esc: Back",
            Mode::ViewNote => "Enter: Add Line  Esc: Back",
        };

        match snap.mode {
            Mode::Menu => render_menu(frame, chunks[1], &snap),
            Mode::NoteList => render_note_list(frame, chunks[1], &snap),
            Mode::ViewNote => render_note(frame, chunks[1], &snap),
        }

        frame.render_widget(
            Paragraph::new(hints)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[2],
        );

        render_status_bar(frame, chunks[3], &snap);
    }
}

fn highlight(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_menu(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let mut lines = Vec::new();
    let top_pad = area.height.saturating_sub(3) / 2;
    lines.extend((0..top_pad).map(|_| Line::default()));

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let selected = snap.selected_menu == i;
        let label = if selected {
            format!("> {item} <")
        } else {
            item.to_string()
        };
        lines.push(Line::from(Span::styled(label, highlight(selected))));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_note_list(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let lines: Vec<Line> = snap
        .titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let selected = snap.selected_note == Some(i);
            let marker = if selected { "> " } else { "  " };
            Line::from(Span::styled(format!("{marker}{title}"), highlight(selected)))
        })
        .collect();

    let inner = Rect {
        x: area.x + 2,
        width: area.width.saturating_sub(2),
        ..area
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_note(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let Some(note) = snap.viewed else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            note.title().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(
        note.content()
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray)))),
    );

    let inner = Rect {
        x: area.x + 2,
        width: area.width.saturating_sub(4),
        ..area
    };
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let mode_style = match snap.mode {
        Mode::Menu => Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        Mode::NoteList => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Mode::ViewNote => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    };

    let mode_span = Span::styled(format!(" {} ", snap.mode.label()), mode_style);

    let mut info = format!(" {}/{MAX_NOTES} notes", snap.titles.len());
    if let Some(note) = snap.viewed {
        info.push_str(&format!(
            "  {}/{} bytes",
            note.content().len(),
            CONTENT_CAPACITY - 1
        ));
    }
    if let Some(status) = snap.status {
        info.push_str(&format!(" | {status}"));
    }

    let bar = Line::from(vec![
        mode_span,
        Span::styled(
            format!("{info} "),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(bar).style(Style::default().bg(Color::DarkGray)),
        area,
    );
}
