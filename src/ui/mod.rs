mod detail;
mod help;
mod list;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    list::render(app, frame);

    if app.overlay().is_visible() {
        detail::render(app, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::fetch::{FetchMessage, FetchRequest};
    use crate::model::{SearchHit, ShowId, ShowSummary};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn loaded_app() -> App {
        let mut app = App::new(&ExplorerConfig::default()).unwrap();
        let FetchRequest::Search { generation, name } = app.start() else {
            panic!("expected search");
        };
        let show = ShowSummary {
            id: ShowId(5),
            name: "The Wire".to_string(),
            image: None,
            summary: Some("<p>Baltimore drug scene.</p>".to_string()),
        };
        app.apply(FetchMessage::SearchResolved {
            generation,
            name,
            result: Ok(vec![SearchHit { score: 1.0, show }]),
        });
        app
    }

    #[test]
    fn test_list_screen_shows_cards_and_buttons() {
        let app = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("The Wire"));
        assert!(text.contains("Show details"));
        assert!(text.contains("batman"));
        assert!(!text.contains("Close details"));
    }

    #[test]
    fn test_overlay_drawn_when_open() {
        let mut app = loaded_app();
        let Some(FetchRequest::Lookup { generation, id }) = app.activate_selected() else {
            panic!("expected lookup");
        };
        let show = app.list().cards()[0].card.clone();
        app.apply(FetchMessage::LookupResolved {
            generation,
            id,
            result: Ok(ShowSummary {
                id,
                name: show.title,
                image: None,
                summary: Some("<p>Baltimore drug scene.</p>".to_string()),
            }),
        });
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Close details"));
        assert!(text.contains("1058x353"));
    }
}
