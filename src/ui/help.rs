use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = super::centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("    ?         ", "Toggle this help"),
        binding("    Ctrl+C    ", "Quit application"),
        Line::from(""),
        section("  Show List"),
        binding("    ↑/k ↓/j   ", "Move between cards"),
        binding("    g/G       ", "Jump to first/last card"),
        binding("    Enter     ", "Show details for the selected card"),
        binding("    /         ", "Type a show name to search"),
        binding("    1-9       ", "Search a preset show name"),
        binding("    q         ", "Quit application"),
        Line::from(""),
        section("  Search Bar"),
        binding("    Enter     ", "Search (blank names are rejected)"),
        binding("    Esc       ", "Leave the search bar"),
        Line::from(""),
        section("  Details"),
        binding("    ↑/↓       ", "Scroll the summary"),
        binding("    PgUp/PgDn ", "Scroll page up/down"),
        binding("    Enter/Esc ", "Close details"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
