// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use stockreq_app::{FieldId, ReferenceData, RequestForm, SubmissionRecord};
use time::OffsetDateTime;

/// The persistence seam. The CLI implements this over the configured sheet
/// sink; tests implement it with a recording stub.
pub trait AppRuntime {
    fn append_request(&mut self, record: &SubmissionRecord) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    status_line: Option<String>,
    status_token: u64,
    submitted: usize,
}

/// Synchronous event loop: one thread polls keys, every keystroke runs one
/// recompute-and-render cycle. The append-on-submit write happens inline on
/// this thread; a slow sheet path stalls the UI until it completes.
pub fn run_app<R: AppRuntime>(
    form: &mut RequestForm,
    reference: &ReferenceData,
    runtime: &mut R,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    form.refresh_description(reference);

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, form, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(form, reference, runtime, &mut view_data, &internal_tx, key)
                    {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Returns true when the app should quit. Every key is reported handled
/// here, so an Enter never reaches the quantity field as a newline.
fn handle_key_event<R: AppRuntime>(
    form: &mut RequestForm,
    reference: &ReferenceData,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        submit_request(form, runtime, view_data, internal_tx);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) => form.focus_next(),
        (KeyCode::BackTab, _) => form.focus_prev(),
        (KeyCode::Esc, _) => view_data.status_line = None,
        (KeyCode::Enter, _) => {
            if form.focus == FieldId::Quantity {
                submit_request(form, runtime, view_data, internal_tx);
            } else {
                // Keypad-Enter semantics: accept the suggestion as typed
                // text, then move on to the next field.
                if let Some(selector) = form.selector_mut(form.focus) {
                    selector.accept();
                }
                if form.focus == FieldId::Item {
                    form.refresh_description(reference);
                }
                form.focus_next();
            }
        }
        _ => handle_field_key(form, reference, key),
    }

    false
}

fn handle_field_key(form: &mut RequestForm, reference: &ReferenceData, key: KeyEvent) {
    let field = form.focus;
    if field == FieldId::Quantity {
        match (key.code, key.modifiers) {
            (KeyCode::Backspace, _) => {
                form.quantity.pop();
            }
            (KeyCode::Char(ch), modifiers)
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
            {
                form.quantity.push(ch);
            }
            _ => {}
        }
        return;
    }

    let Some(selector) = form.selector_mut(field) else {
        return;
    };
    match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => selector.backspace(),
        (KeyCode::Left, _) => selector.collapse_left(),
        (KeyCode::Right, _) => selector.accept(),
        (KeyCode::Down, _) => selector.cycle_next(),
        (KeyCode::Up, _) => selector.cycle_prev(),
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            selector.insert_char(ch);
        }
        _ => {}
    }

    if field == FieldId::Item {
        form.refresh_description(reference);
    }
}

fn submit_request<R: AppRuntime>(
    form: &mut RequestForm,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let today = OffsetDateTime::now_utc().date();
    match form.draft().finalize(today) {
        Err(error) => emit_status(view_data, internal_tx, error.to_string()),
        Ok(record) => match runtime.append_request(&record) {
            Err(error) => {
                // Entered values stay put so the user can retry the submit
                // without re-typing.
                emit_status(
                    view_data,
                    internal_tx,
                    format!("could not save request: {error:#}"),
                );
            }
            Ok(()) => {
                view_data.submitted = view_data.submitted.saturating_add(1);
                emit_status(
                    view_data,
                    internal_tx,
                    format!("logged {} x {}", record.quantity, record.item),
                );
                form.reset_after_submit();
            }
        },
    }
}

fn render(frame: &mut ratatui::Frame<'_>, form: &RequestForm, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let title = Paragraph::new("inventory request entry")
        .block(Block::default().title("stockreq").borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    let body = Paragraph::new(field_lines(form))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("request").borders(Borders::ALL));
    frame.render_widget(body, layout[1]);

    let status = Paragraph::new(status_text(view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);
}

fn field_lines(form: &RequestForm) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in FieldId::ALL {
        let focused = form.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::styled(
            format!("{marker}{:<10}", format!("{}:", field.label())),
            label_style,
        )];
        match form.selector(field) {
            None => spans.push(Span::raw(form.quantity.clone())),
            Some(selector) => {
                spans.push(Span::raw(selector.typed_prefix().to_owned()));
                if selector.has_suggestion() {
                    spans.push(Span::styled(
                        selector.suggested_suffix().to_owned(),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ));
                }
                if selector.hits().len() > 1 {
                    spans.push(Span::styled(
                        format!("  {}/{}", selector.hit_index() + 1, selector.hits().len()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("description: {}", form.description)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "tab field · ↓/↑ cycle · → accept · enter/ctrl-s submit · ctrl-q quit",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn status_text(view_data: &ViewData) -> String {
    match &view_data.status_line {
        Some(message) => message.clone(),
        None => format!("submitted this session: {}", view_data.submitted),
    }
}
