//! Registration form rendering

use super::field_renderer::{draw_field, draw_help_text, draw_input, InputView};
use crate::app::App;
use crate::registration::{self, HOBBIES};
use crate::state::{FieldPath, Focus, FormField, HobbyEntry};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

/// Draw the registration form with its hobbies and buttons
pub fn draw_registration(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Inscription ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let values = app.store.values();
    let visible: Vec<&FormField> = app
        .fields
        .iter()
        .filter(|f| registration::is_visible(&f.name, values))
        .collect();
    let hobbies = values.list(HOBBIES);

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1)); // Hobbies heading
    constraints.extend(hobbies.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1)); // Help
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let focus = app.focus();

    for (i, field) in visible.iter().enumerate() {
        draw_field(
            frame,
            chunks[i],
            field,
            &app.store,
            focus == Focus::Field(field.name.clone()),
        );
    }

    let mut row = visible.len();
    draw_hobbies_heading(frame, chunks[row], app);
    row += 1;

    for (index, entry) in hobbies.iter().enumerate() {
        draw_hobby_row(frame, chunks[row], app, &focus, index, entry);
        row += 1;
    }

    draw_buttons(frame, chunks[row], app, &focus);
    draw_help_text(frame, chunks[row + 1]);
}

fn draw_hobbies_heading(frame: &mut Frame, area: Rect, app: &App) {
    let count = app.store.values().list(HOBBIES).len();
    let in_error = (0..count)
        .filter(|index| app.store.errors().has_item_error(HOBBIES, *index))
        .count();

    let mut spans = vec![
        Span::styled("Hobbies", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" ({count})"), Style::default().fg(Color::DarkGray)),
    ];
    if in_error > 0 {
        spans.push(Span::styled(
            format!("  {in_error} à corriger"),
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_hobby_row(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    focus: &Focus,
    index: usize,
    entry: &HobbyEntry,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let errors = app.store.errors();
    let value_error = errors.get(&FieldPath::item(HOBBIES, index, "value"));
    let level_error = errors.get(&FieldPath::item(HOBBIES, index, "level"));

    draw_input(
        frame,
        cols[0],
        InputView {
            label: &format!("Hobby {}", index + 1),
            value: &entry.value,
            error: value_error.map(|e| e.message.as_str()),
            is_active: focus == &Focus::HobbyValue(index),
            editable: true,
            placeholder: Some("(vide)"),
        },
    );
    draw_input(
        frame,
        cols[1],
        InputView {
            label: "Niveau",
            value: &format!("‹ {} ›", entry.level.label()),
            error: level_error.map(|e| e.message.as_str()),
            is_active: focus == &Focus::HobbyLevel(index),
            editable: false,
            placeholder: None,
        },
    );
}

fn draw_buttons(frame: &mut Frame, area: Rect, app: &App, focus: &Focus) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Length(18),
            Constraint::Min(0),
        ])
        .split(area);

    render_button(
        frame,
        cols[0],
        "+ Ajouter un hobby",
        focus == &Focus::AddHobby,
        true,
        None,
    );

    let busy = app.is_busy();
    let label = if busy { "Envoi…" } else { "Valider" };
    render_button(
        frame,
        cols[1],
        label,
        focus == &Focus::Submit,
        !busy,
        Some(Color::Green),
    );
}
