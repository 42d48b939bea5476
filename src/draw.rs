use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::app_state::DetailView;
use crate::state::messages::{MatchDetail, SeriesDetail};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use cricket_api::{LiveMatch, Match, News, SUCCESS_MESSAGE, SideScore};

const HELP_TEXT: &str = "\
1-5        switch tab (Live, Upcoming, Recent, Series, News)
j/k ↑/↓    move selection, scroll detail
Enter      open detail for the selected row
Esc        close detail or help
r          reload dashboard (detail: reload the open match)
\"          toggle log pane
f          toggle full screen
?          this help
q          quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
                draw_status_line(f, layout.status, app);
            }

            match app.state.active_tab {
                MenuItem::Live => draw_live(f, layout.main, app),
                MenuItem::Upcoming => {
                    draw_matches(f, layout.main, app, " Upcoming ", &app.state.dashboard.upcoming)
                }
                MenuItem::Recent => {
                    draw_matches(f, layout.main, app, " Recent ", &app.state.dashboard.recent)
                }
                MenuItem::Series => draw_series(f, layout.main, app),
                MenuItem::News => draw_news(f, layout.main, app),
                MenuItem::Detail => draw_detail(f, layout.main, app),
                MenuItem::Help => draw_help(f, layout.main),
            }

            if let Some(logs) = layout.logs {
                draw_logs(f, logs);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    // Detail and help keep the tab they were opened from underlined.
    let current = match app.state.active_tab {
        MenuItem::Detail | MenuItem::Help => app.state.previous_tab,
        tab => tab,
    };
    let tab_index = MenuItem::TABS.iter().position(|t| *t == current).unwrap_or(0);

    let titles: Vec<Line> = MenuItem::TABS.iter().map(|t| Line::from(t.label())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let (text, color) = if let Some(err) = app.state.last_error.as_deref() {
        (format!(" error: {err}"), Color::Red)
    } else if !dashboard.failures.is_empty() {
        (format!(" {} section(s) unavailable, see logs", dashboard.failures.len()), Color::Yellow)
    } else {
        let updated = dashboard.last_updated.as_deref().unwrap_or("never");
        (format!(" {} | updated {updated}", app.state.provider), Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

/// Rows with the selected one highlighted, scrolled so it stays visible.
fn draw_rows(f: &mut Frame, area: Rect, title: &str, rows: Vec<String>, selected: usize, empty: &str) {
    let block = default_border(Color::White).title(title.to_owned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if rows.is_empty() {
        draw_placeholder(f, inner, empty);
        return;
    }

    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            if idx == selected {
                Line::styled(format!("> {row}"), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Line::from(format!("  {row}"))
            }
        })
        .collect();

    let visible = usize::from(inner.height.max(1));
    let offset = selected.saturating_sub(visible - 1);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

fn empty_message(app: &App, what: &str) -> String {
    if app.state.dashboard.loaded {
        format!("No {what}")
    } else {
        "Loading...".to_string()
    }
}

fn draw_live(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.state.dashboard.live.iter().map(live_row).collect();
    let selected = app.state.cursors.get(MenuItem::Live);
    draw_rows(f, area, " Live ", rows, selected, &empty_message(app, "live matches"));
}

fn live_row(live: &LiveMatch) -> String {
    let score = &live.score;
    format!(
        "{:<22} {} {}  |  {} {}  {}",
        live.match_info.title(),
        score.batting.team,
        score.batting.summary(),
        score.bowling.team,
        score.bowling.summary(),
        score.current_status,
    )
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App, title: &str, matches: &[Match]) {
    let rows = matches.iter().map(match_row).collect();
    let selected = app.state.cursors.get(app.state.active_tab);
    draw_rows(f, area, title, rows, selected, &empty_message(app, "matches"));
}

fn match_row(m: &Match) -> String {
    let outcome = if m.result.is_empty() { &m.status } else { &m.result };
    format!("{:<22} {:<20} {:<28} {outcome}", m.title(), m.date, m.series_name)
}

fn draw_series(f: &mut Frame, area: Rect, app: &App) {
    let rows = app
        .state
        .dashboard
        .series
        .iter()
        .map(|s| format!("{:<36} {:<10} {}", s.name, s.season, s.status))
        .collect();
    let selected = app.state.cursors.get(MenuItem::Series);
    draw_rows(f, area, " Series ", rows, selected, &empty_message(app, "series"));
}

fn draw_news(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let title = if dashboard.news_message.is_empty() || dashboard.news_message == SUCCESS_MESSAGE {
        " News ".to_string()
    } else {
        format!(" News ({}) ", dashboard.news_message)
    };
    let rows = dashboard
        .news
        .iter()
        .map(|n| format!("{:<60} {}", n.title, n.source))
        .collect();
    let selected = app.state.cursors.get(MenuItem::News);
    draw_rows(f, area, &title, rows, selected, &empty_message(app, "news"));
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
    let detail = &app.state.detail;
    let (title, lines) = match (&detail.view, &detail.pending) {
        (Some(DetailView::Match(m)), _) => (" Match ", match_detail_lines(m)),
        (Some(DetailView::Series(s)), _) => (" Series ", series_detail_lines(s)),
        (Some(DetailView::News(n)), _) => (" News ", news_detail_lines(n)),
        (None, Some(pending)) => (" Detail ", vec![format!("Loading {pending}...")]),
        (None, None) => {
            let msg = match app.state.last_error.as_deref() {
                Some(err) => format!("Load failed:\n{err}"),
                None => "Select a row and press Enter".to_string(),
            };
            (" Detail ", vec![msg])
        }
    };

    let block = default_border(Color::White).title(title);
    f.render_widget(
        Paragraph::new(lines.join("\n"))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll_offset, 0)),
        area,
    );
}

fn side_line(side: &SideScore) -> String {
    format!("  {:<24} {}", side.team, side.summary())
}

fn match_detail_lines(detail: &MatchDetail) -> Vec<String> {
    let mut lines = Vec::new();

    let info = detail
        .info
        .as_ref()
        .or_else(|| detail.live.as_ref().map(|l| &l.match_info));
    match info {
        Some(m) => {
            lines.push(m.name.clone());
            if !m.series_name.is_empty() {
                lines.push(m.series_name.clone());
            }
            lines.push(String::new());
            lines.push(format!("Venue:  {}", m.venue));
            lines.push(format!("Date:   {}", m.date));
            lines.push(format!("Status: {}", m.status));
            if let Some(toss) = &m.toss
                && !toss.winner.is_empty()
            {
                lines.push(format!("Toss:   {} chose to {}", toss.winner, toss.decision));
            }
            if !m.result.is_empty() {
                lines.push(format!("Result: {}", m.result));
            }
        }
        None => lines.push(format!("Match {}", detail.match_id)),
    }

    if let Some(live) = &detail.live {
        lines.push(String::new());
        lines.push("Score".to_string());
        lines.push(side_line(&live.score.batting));
        lines.push(side_line(&live.score.bowling));
        if !live.score.current_status.is_empty() {
            lines.push(format!("  {}", live.score.current_status));
        }
    }

    if let Some(scorecard) = &detail.scorecard {
        lines.push(String::new());
        lines.push(format!("Scorecard: {} innings", scorecard.scorecard.len()));
    }

    if !detail.squad.is_empty() {
        lines.push(String::new());
        lines.push("Squad".to_string());
        for player in &detail.squad {
            lines.push(format!("  {:<28} {:<16} {}", player.name, player.role, player.team));
        }
    }

    push_notes(&mut lines, &detail.notes);
    lines
}

fn series_detail_lines(detail: &SeriesDetail) -> Vec<String> {
    let mut lines = vec![format!("Series {}", detail.series_id), String::new()];

    lines.push("Upcoming".to_string());
    if detail.upcoming.is_empty() {
        lines.push("  none".to_string());
    }
    lines.extend(detail.upcoming.iter().map(|m| format!("  {}", match_row(m))));

    lines.push(String::new());
    lines.push("Recent".to_string());
    if detail.recent.is_empty() {
        lines.push("  none".to_string());
    }
    lines.extend(detail.recent.iter().map(|m| format!("  {}", match_row(m))));

    if !detail.points_table.is_empty() {
        lines.push(String::new());
        lines.push(format!("  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4}  NRR", "Team", "P", "W", "L", "NR", "Pts"));
        for row in &detail.points_table {
            lines.push(format!(
                "  {:<24} {:>3} {:>3} {:>3} {:>3} {:>4}  {}",
                row.team, row.played, row.won, row.lost, row.no_result, row.points, row.net_run_rate
            ));
        }
    }

    push_notes(&mut lines, &detail.notes);
    lines
}

fn news_detail_lines(news: &News) -> Vec<String> {
    vec![
        news.title.clone(),
        format!("{} | {}", news.source, news.published_at),
        String::new(),
        news.content.clone(),
        String::new(),
        news.image.clone(),
    ]
}

fn push_notes(lines: &mut Vec<String>, notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.extend(notes.iter().map(|n| format!("note: {n}")));
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    f.render_widget(Paragraph::new(HELP_TEXT).block(block), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Green))
        .style_trace(Style::default().fg(Color::Magenta));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg.to_owned())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
