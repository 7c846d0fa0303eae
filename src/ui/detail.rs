use super::list::button_style;
use crate::app::App;
use crate::card::ImagePlacement;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Detail overlay drawn over the list.
pub fn render(app: &App, frame: &mut Frame) {
    let Some(card) = app.overlay().content() else {
        return;
    };
    let area = super::centered_rect(80, 80, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", card.title))
        .title_bottom(
            Line::from(format!(" scroll: {} ", app.overlay().body_scroll())).alignment(Alignment::Right),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Layout: image(2) + body(min) + close control(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let placement = match card.image.placement {
        ImagePlacement::Backdrop => " Backdrop: ",
        ImagePlacement::Thumbnail => " Image: ",
    };
    let image_line = Line::from(vec![
        Span::styled(placement, Style::default().fg(Color::DarkGray)),
        Span::styled(
            card.image.url.as_str(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ),
    ]);
    frame.render_widget(Paragraph::new(image_line), chunks[0]);

    let body = Paragraph::new(card.body.as_str())
        .wrap(Wrap { trim: false })
        .scroll((app.overlay().body_scroll(), 0));
    frame.render_widget(body, chunks[1]);

    let close = Line::from(vec![
        Span::styled(format!("[ {} ]", card.action.label), button_style(card.action.style)),
        Span::styled("  Enter/Esc", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" close  "),
        Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" scroll"),
    ]);
    frame.render_widget(Paragraph::new(close).alignment(Alignment::Center), chunks[2]);
}
