//! Picker rendering.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::app::{PickerApp, Row};

/// Render the whole picker: query box, grouped list, key hints.
pub fn render(frame: &mut Frame, app: &PickerApp) {
    let [search_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let search = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(app.query()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Select a script to run"),
    );
    frame.render_widget(search, search_area);

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| match row {
            Row::Header(group) => ListItem::new(Line::from(Span::styled(
                format!("--- {group} ---"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))),
            Row::Entry(index) => {
                let entry = app.entry(*index);
                let mut spans = vec![Span::raw("  "), Span::raw(entry.name.clone())];
                if let Some(desc) = &entry.description {
                    spans.push(Span::styled(
                        format!(" - {desc}"),
                        Style::default().add_modifier(Modifier::DIM),
                    ));
                }
                ListItem::new(Line::from(spans))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.rows().is_empty() {
        state.select(Some(app.cursor()));
    }
    frame.render_stateful_widget(list, list_area, &mut state);

    let footer = Paragraph::new(Line::from(Span::styled(
        " enter: run   esc: cancel   type to filter",
        Style::default().add_modifier(Modifier::DIM),
    )));
    frame.render_widget(footer, footer_area);
}
