use crate::app::{App, InputMode};
use crate::card::{ButtonStyle, Card};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + buttons(1) + cards(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Show Explorer   [{}: {} shows]",
        app.filter().selected_name(),
        app.list().len()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let input = app.search().input();
    let search_style = if input.is_invalid() {
        Style::default().fg(Color::Red)
    } else {
        match app.input_mode {
            InputMode::Editing => Style::default().fg(Color::Yellow),
            InputMode::Normal => Style::default().fg(Color::DarkGray),
        }
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " Show name (Enter to search, Esc to cancel): "
    } else {
        " Show name (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", search_label, input.value()))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        frame.set_cursor_position(search_cursor(chunks[1], search_label, input.value()));
    }

    // ── Preset buttons ──
    let mut button_spans = if app.buttons().is_empty() {
        vec![Span::styled(" No presets configured", Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::styled(" Presets: ", Style::default().fg(Color::DarkGray))]
    };
    for (key, name) in app.buttons().iter() {
        let style = if name == app.filter().selected_name() {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().fg(Color::Cyan)
        };
        button_spans.push(Span::styled(format!(" {} ", key), Style::default().fg(Color::Yellow)));
        button_spans.push(Span::styled(format!("[{}]", name), style));
        button_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(button_spans)), chunks[2]);

    // ── Cards ──
    let body_width = (chunks[3].width as usize).saturating_sub(6);
    let items: Vec<ListItem> = app
        .list()
        .cards()
        .iter()
        .map(|rendered| card_item(&rendered.card, body_width))
        .collect();

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Shows ")
                .title_bottom(
                    Line::from(format!(" {} cards ", app.list().len())).alignment(Alignment::Right),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !app.list().is_empty() {
        list_state.select(Some(app.list().selected()));
    }
    frame.render_stateful_widget(list_widget, chunks[3], &mut list_state);

    // ── Status bar ──
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style),
        Span::raw(" Navigate  "),
        Span::styled("/", key_style),
        Span::raw(" Search  "),
        Span::styled("1-9", key_style),
        Span::raw(" Preset  "),
        Span::styled("Enter", key_style),
        Span::raw(" Details  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);
}

/// Summary card as a multi-line list entry.
fn card_item(card: &Card, body_width: usize) -> ListItem<'static> {
    let image_style = if card.image.is_placeholder {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED)
    };
    let lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("  img ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.image.url.clone(), image_style),
        ]),
        Line::from(Span::raw(format!("  {}", truncate_str(&card.body, body_width)))),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[ {} ]", card.action.label), button_style(card.action.style)),
        ]),
        Line::from(""),
    ];
    ListItem::new(lines)
}

pub(crate) fn button_style(style: ButtonStyle) -> Style {
    match style {
        ButtonStyle::Primary => Style::default().bg(Color::Blue).fg(Color::White),
        ButtonStyle::Danger => Style::default().bg(Color::Red).fg(Color::White),
    }
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
/// Cursor cell after the typed text, kept inside the search bar border.
fn search_cursor(area: Rect, label: &str, value: &str) -> (u16, u16) {
    let offset = u16::try_from(label.width() + value.width()).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2));
    (x, area.y.saturating_add(1))
}

pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        result.push(c);
    }
    result.push('…');
    result
}
