//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use phonebook_core::NotificationKind;

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // notification banner
            Constraint::Length(3), // filter input
            Constraint::Min(3),    // person list
            Constraint::Length(1), // form / legend / confirm
        ])
        .split(frame.area());

    draw_banner(frame, app, chunks[0]);
    draw_filter(frame, app, chunks[1]);
    draw_list(frame, app, chunks[2]);
    draw_bottom_bar(frame, app, chunks[3]);
}

/// Draw the notification banner (empty line when nothing is displayed)
fn draw_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notification) = app.state.notification() else {
        return;
    };

    let style = match notification.kind {
        NotificationKind::Added => Style::default().fg(Color::Green),
        NotificationKind::Updated => Style::default().fg(Color::Cyan),
        NotificationKind::Deleted => Style::default().fg(Color::Yellow),
        NotificationKind::Error => Style::default().fg(Color::Red),
    };

    let banner = Paragraph::new(notification.message.as_str())
        .style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(banner, area);
}

/// Draw the filter input (bound to the sync core's filter text)
fn draw_filter(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.input_mode == InputMode::Filter;

    let border_style = if is_active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let text = if is_active {
        format!("{}▌", app.state.filter_text)
    } else {
        app.state.filter_text.clone()
    };

    let filter = Paragraph::new(text).block(
        Block::default()
            .title(" Filter ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(filter, area);
}

/// Draw the filtered person list
fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.state.visible();

    let items: Vec<ListItem> = visible
        .iter()
        .map(|p| ListItem::new(format!("{} {}", p.name, p.number)))
        .collect();

    let title = if app.is_loading {
        " Persons (loading...) ".to_string()
    } else {
        format!(" Persons ({}) ", visible.len())
    };

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the bottom bar: legend, add form, or confirm prompt
fn draw_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    if app.input_mode == InputMode::Confirm {
        let prompt = Paragraph::new(format!("{} [y/n]", app.confirm_text))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(prompt, area);
        return;
    }

    let text = match app.input_mode {
        InputMode::Name => format!(
            "name: {}▌  number: {}  (Enter: next, Esc: cancel)",
            app.state.draft_name, app.state.draft_number
        ),
        InputMode::Number => format!(
            "name: {}  number: {}▌  (Enter: save, Esc: cancel)",
            app.state.draft_name, app.state.draft_number
        ),
        InputMode::Filter => "(Enter: done, Esc: back)".to_string(),
        _ => "a: Add | d: Delete | /: Filter | j/k: Move | q: Quit".to_string(),
    };

    let bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}
