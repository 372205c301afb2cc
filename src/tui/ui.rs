use crate::tui::app::{App, AppState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    match &app.state {
        AppState::Setup => draw_setup(f, app),
        AppState::Scanning => draw_scanning(f, app),
        AppState::Results => draw_results(f, app),
        AppState::Detail => draw_detail(f, app),
    }
}

fn draw_setup(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Keyword
            Constraint::Length(3), // Days
            Constraint::Length(3), // Min views
            Constraint::Length(3), // Max subs
            Constraint::Length(3), // History toggle
            Constraint::Min(1),    // Notice
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Trendscope - YouTube Trend & Script Tool")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.keyword_input.render(f, chunks[1]);
    app.days_input.render(f, chunks[2]);
    app.min_views_input.render(f, chunks[3]);
    app.max_subs_input.render(f, chunks[4]);

    let toggle_style = if app.input_focus == 4 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let checkbox = if app.use_history { "☑" } else { "☐" };
    let toggle = Paragraph::new(format!(
        "{checkbox} Use the history niche keyword set (ignores the keyword field)"
    ))
    .style(toggle_style)
    .block(Block::default().borders(Borders::ALL).title("Preset"));
    f.render_widget(toggle, chunks[5]);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(notice, chunks[6]);
    }

    let help = Paragraph::new("[Enter] Scan  [Tab] Next field  [Space] Toggle  [Esc] Exit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[7]);
}

fn draw_scanning(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Progress area
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Scanning...")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    app.progress.render(f, chunks[1]);

    let help = Paragraph::new("[Esc] Cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn draw_results(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    if app.result_list.items.is_empty() {
        let empty = Paragraph::new("No videos met the filters (duration/views/subs).")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Results"));
        f.render_widget(empty, chunks[0]);
    } else {
        let title = format!("Results ({} trending videos)", app.result_list.items.len());
        app.result_list.render(f, chunks[0], &title);
    }

    let help = Paragraph::new("[↑↓] Navigate  [s] Script  [p] Thumbnail prompt  [Esc] Back  [q] Quit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn draw_detail(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    if let Some(viewer) = &mut app.content_viewer {
        app.viewer_height = chunks[0].height;
        viewer.render(f, chunks[0]);
    }

    let help = Paragraph::new("[↑↓] Scroll  [PgUp/PgDn] Page  [Home/End] Jump  [Esc] Back")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}
