//! Field rendering utilities for forms

use crate::platform::{
    ADD_HOBBY_SHORTCUT, REMOVE_HOBBY_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::{FieldValue, FormField, FormStore};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What to draw for one input
pub struct InputView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Show the text cursor when active
    pub editable: bool,
    /// Shown instead of an empty value
    pub placeholder: Option<&'a str>,
}

/// Draw a form field using FormField from the domain layer
///
/// Modified fields get a `*` after their label.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    store: &FormStore,
    is_active: bool,
) {
    let empty = FieldValue::default();
    let value = store.value(&field.name).unwrap_or(&empty);
    let display = field.display_value(value);
    let label = if store.is_dirty(&field.name) {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    draw_input(
        frame,
        area,
        InputView {
            label: &label,
            value: &display,
            error: store.errors().message(&field.name),
            is_active,
            editable: field.accepts_text(),
            // Untouched inputs stay blank until visited
            placeholder: store.is_touched(&field.name).then_some("(vide)"),
        },
    );
}

/// Draw a bordered input with its error message on the bottom border
///
/// Active inputs are cyan, inputs in error are red.
pub fn draw_input(frame: &mut Frame, area: Rect, view: InputView) {
    let border_color = match (view.is_active, view.error.is_some()) {
        (true, _) => Color::Cyan,
        (false, true) => Color::Red,
        (false, false) => Color::DarkGray,
    };
    let text_style = if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = match view.placeholder {
        Some(placeholder) if view.value.is_empty() && !view.is_active => {
            vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
        }
        _ => vec![Span::styled(view.value, text_style)],
    };
    if view.is_active && view.editable {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let mut block = Block::default()
        .title(format!(" {} ", view.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(message) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Keyboard hints shown under the form
pub fn draw_help_text(frame: &mut Frame, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![];
    for (key, action) in [
        ("Tab", "champ suivant"),
        ("Espace/←→", "choisir"),
        (ADD_HOBBY_SHORTCUT, "ajouter un hobby"),
        (REMOVE_HOBBY_SHORTCUT, "retirer"),
        (RESET_SHORTCUT, "réinitialiser"),
        (SUBMIT_SHORTCUT, "valider"),
    ] {
        if !spans.is_empty() {
            spans.push(Span::styled(" · ", text_style));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {action}"), text_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
