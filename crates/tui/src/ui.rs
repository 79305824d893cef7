//! Pure rendering: reads [`App`] state and draws widgets. No state changes
//! happen here.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap};
use ratatui::Frame;

use api::{FeedItem, HtmlFragment, Locale, RssItem, TrendingItem};
use dashboard::{Panel, RemoteData};

use crate::app::{App, PanelId};

pub fn draw(app: &mut App, frame: &mut Frame) {
    if app.session.is_resolving() {
        draw_notice(frame, "Checking session...");
        return;
    }
    if !app.session.is_authenticated() {
        draw_login(app, frame);
        return;
    }
    draw_dashboard(app, frame);
    if let Some(id) = app.modal {
        draw_modal(app, id, frame);
    }
}

fn draw_notice(frame: &mut Frame, message: &str) {
    let area = centered_rect(40, 20, frame.area());
    let notice = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(notice, area);
}

// -- login screen -------------------------------------------------------------

fn draw_login(app: &App, frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());
    let [title_area, username_area, password_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(area);

    let title = Paragraph::new("trendboard login")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, title_area);

    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let username = Paragraph::new(app.login.username.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" username ")
            .border_style(field_style(!app.login.editing_password)),
    );
    frame.render_widget(username, username_area);

    let masked = "•".repeat(app.login.password.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" password ")
            .border_style(field_style(app.login.editing_password)),
    );
    frame.render_widget(password, password_area);

    if app.login.submitting {
        let submitting = Paragraph::new("Logging in...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(submitting, error_area);
    } else if let Some(message) = app.session.login_error() {
        let error = Paragraph::new(message).style(Style::default().fg(Color::Red));
        frame.render_widget(error, error_area);
    }

    let hint = Paragraph::new("tab: switch field  enter: log in  esc: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);
}

// -- dashboard ----------------------------------------------------------------

fn draw_dashboard(app: &mut App, frame: &mut Frame) {
    let [tabs_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let selected = PanelId::ALL
        .iter()
        .position(|p| *p == app.focus)
        .unwrap_or(0);
    let titles: Vec<Line> = PanelId::ALL
        .iter()
        .map(|id| Line::from(app.panel_name(*id)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    match app.focus {
        PanelId::InfoQ => draw_rss_table(&app.infoq, app.selected, frame, body_area),
        PanelId::GithubTrending => draw_trending_table(&app.github, app.selected, frame, body_area),
        PanelId::GolangTrending => draw_trending_table(&app.golang, app.selected, frame, body_area),
        PanelId::GoogleCloud => draw_feed_list(&app.google_cloud, app.selected, frame, body_area),
        PanelId::Aws => draw_feed_list(&app.aws, app.selected, frame, body_area),
        PanelId::Azure => draw_feed_list(&app.azure, app.selected, frame, body_area),
        PanelId::GolangWeekly => draw_feed_list(&app.golang_weekly, app.selected, frame, body_area),
    }

    let summary_hint = if app.focus.summary_kind().is_some() {
        "g: AI summary  "
    } else {
        ""
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" lang: {} ", app.locale),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(
            " q: quit  tab: panel  up/down: row  {}l: language  x: logout",
            summary_hint
        )),
    ]));
    frame.render_widget(status, status_area);
}

/// Render the shared loading/failed/empty states; returns the items when
/// there is something to draw.
fn panel_body<'a, T>(
    panel: &'a Panel<T>,
    frame: &mut Frame,
    area: Rect,
) -> Option<&'a [T]> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", panel.name()));

    match panel.data() {
        RemoteData::Loading => {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(loading, area);
            None
        }
        RemoteData::Failed(message) => {
            let failed = Paragraph::new(*message)
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(failed, area);
            None
        }
        RemoteData::Ready(items) if items.is_empty() => {
            let empty = Paragraph::new("No articles found.").block(block);
            frame.render_widget(empty, area);
            None
        }
        RemoteData::Ready(items) => Some(items),
    }
}

fn draw_trending_table(
    panel: &Panel<TrendingItem>,
    selected: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let Some(items) = panel_body(panel, frame, area) else {
        return;
    };

    let header = Row::new(["name", "description", "language", "stars"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            Row::new([
                fallback(&item.name, "No name"),
                fallback(&item.description, "No description"),
                fallback(&item.language, "N/A"),
                fallback(&item.stars, "0"),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(13),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", panel.name())),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
    .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_rss_table(panel: &Panel<RssItem>, selected: usize, frame: &mut Frame, area: Rect) {
    let Some(items) = panel_body(panel, frame, area) else {
        return;
    };

    let header = Row::new(["title", "description", "publication date"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            let description = HtmlFragment::new(item.description.clone()).to_plain_text();
            Row::new([
                fallback(&item.title, "No title"),
                fallback(&description, "No description"),
                fallback(&item.published, "No date"),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", panel.name())),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
    .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_feed_list(panel: &Panel<FeedItem>, selected: usize, frame: &mut Frame, area: Rect) {
    let Some(items) = panel_body(panel, frame, area) else {
        return;
    };

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let lines = vec![
                Line::from(Span::styled(
                    item.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled("Published: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(item.pub_date.clone()),
                ]),
                Line::from(Span::styled(
                    item.description.to_plain_text(),
                    Style::default().fg(Color::Gray),
                )),
            ];
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", panel.name())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ratatui::widgets::ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

// -- summary modal ------------------------------------------------------------

fn draw_modal(app: &App, id: PanelId, frame: &mut Frame) {
    let Some(viewer) = app.viewer(id) else {
        return;
    };
    if !viewer.is_open() {
        return;
    }

    let (title, loading) = match app.locale {
        Locale::Ja => (" AIサマリー ", "処理中..."),
        Locale::En => (" AI Summary ", "processing..."),
    };

    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let body = if viewer.is_requesting() {
        Paragraph::new(loading).style(Style::default().fg(Color::DarkGray))
    } else {
        // Markdown is shown as-is; the terminal does not interpret it.
        Paragraph::new(viewer.text().unwrap_or_default()).wrap(Wrap { trim: false })
    };
    let modal = body.block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(" esc: close "),
    );
    frame.render_widget(modal, area);
}

fn fallback(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Centered sub-rectangle taking the given percentages of `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{test_app, trending};
    use crate::app::{AppMsg, PanelPayload};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draws_session_check_notice_before_resolution() {
        let (mut app, _rx, _rt) = test_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Checking session"));
    }

    #[test]
    fn draws_login_screen_when_unauthenticated() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(false)));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("username"));
        assert!(text.contains("password"));
    }

    #[test]
    fn draws_loading_dashboard_after_authentication() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(true)));
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading..."));
    }

    #[test]
    fn draws_trending_rows_with_fallbacks() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(true)));
        app.focus = PanelId::GithubTrending;
        let mut item = trending("repo-x", "http://x");
        item.language = String::new();
        app.apply(AppMsg::PanelFetched {
            id: PanelId::GithubTrending,
            locale: api::Locale::Ja,
            result: Ok(PanelPayload::Trending(vec![item])),
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("repo-x"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn draws_empty_state_for_empty_feed() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(true)));
        app.focus = PanelId::Aws;
        app.apply(AppMsg::PanelFetched {
            id: PanelId::Aws,
            locale: api::Locale::Ja,
            result: Ok(PanelPayload::Feed(vec![])),
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("No articles found."));
    }

    #[test]
    fn draws_modal_loading_indicator_while_requesting() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(true)));
        app.focus = PanelId::GithubTrending;
        app.apply(AppMsg::PanelFetched {
            id: PanelId::GithubTrending,
            locale: api::Locale::Ja,
            result: Ok(PanelPayload::Trending(vec![trending("r", "http://r")])),
        });
        app.generate_summary();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        // Wide glyphs leave continuation cells behind; compare ignoring them.
        let text = buffer_text(&terminal).replace(' ', "");
        assert!(text.contains("処理中"));
    }

    #[test]
    fn draws_resolved_summary_text() {
        let (mut app, _rx, _rt) = test_app();
        app.apply(AppMsg::SessionChecked(Ok(true)));
        app.focus = PanelId::GithubTrending;
        app.apply(AppMsg::PanelFetched {
            id: PanelId::GithubTrending,
            locale: api::Locale::Ja,
            result: Ok(PanelPayload::Trending(vec![trending("r", "http://r")])),
        });
        app.generate_summary();
        app.apply(AppMsg::SummaryFetched {
            id: PanelId::GithubTrending,
            text: "a concise summary".to_string(),
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
        assert!(buffer_text(&terminal).contains("a concise summary"));
    }
}
