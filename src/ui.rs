use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::menu::{MenuViewModel, NO_MATCHES};
use crate::theme::Theme;

/// Draw one frame of the menu
pub fn draw_menu(frame: &mut Frame, view: &MenuViewModel, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    draw_header(frame, view, theme, chunks[0]);
    draw_rows(frame, view, theme, chunks[1]);
    draw_help(frame, view, theme, chunks[2]);
}

fn draw_header(frame: &mut Frame, view: &MenuViewModel, theme: &Theme, area: Rect) {
    let line = match &view.query {
        Some(query) => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(theme.title)),
            Span::styled(query.clone(), Style::default().fg(theme.search_text)),
            Span::styled("█", Style::default().fg(theme.search_text)),
        ]),
        None => Line::from(Span::styled(
            format!("{}:", view.title),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_rows(frame: &mut Frame, view: &MenuViewModel, theme: &Theme, area: Rect) {
    if view.rows.is_empty() {
        let notice = if view.is_search() {
            NO_MATCHES
        } else {
            "No profiles found"
        };
        let paragraph = Paragraph::new(notice).style(Style::default().fg(theme.empty_notice));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let label_style = if row.is_group {
                Style::default().fg(theme.group).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.profile)
            };

            // Numbers match the positional argument (`dexter 3`), which
            // always refers to the unfiltered listing
            let number = if view.is_search() {
                String::new()
            } else {
                format!("{:>3} ", row.index + 1)
            };

            ListItem::new(Line::from(vec![
                Span::styled(number, Style::default().fg(theme.index_number)),
                Span::styled(row.label.clone(), label_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(view.rows.iter().position(|row| row.is_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_help(frame: &mut Frame, view: &MenuViewModel, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            view.help.clone(),
            Style::default().fg(theme.help_text),
        )),
    ]);
    frame.render_widget(paragraph, area);
}

/// Draw the contents of a profile file, scrolled down by `scroll` lines, with a
/// continue prompt underneath
pub fn draw_viewer(frame: &mut Frame, title: &str, content: &str, scroll: u16, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.viewer_border));

    let paragraph = Paragraph::new(content.to_string())
        .block(block)
        .style(Style::default().fg(theme.viewer_text))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    // Inner height excludes the two border rows
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let prompt = if content.lines().count() > visible {
        "Press Enter to continue... (Up/Down to scroll)"
    } else {
        "Press Enter to continue..."
    };
    let prompt = Paragraph::new(prompt).style(Style::default().fg(theme.help_text));
    frame.render_widget(prompt, chunks[1]);
}
