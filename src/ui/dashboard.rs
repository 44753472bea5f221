use crate::ui::app::App;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C);
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0);
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68);
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C);
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65);

const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);

pub fn draw_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Summary
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_main_content(frame, chunks[1], app);
    draw_summary(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Estate Maps | {} | {} localities | {} regions | scope: {} ",
        app.resolved.name,
        app.resolved.localities.len(),
        app.resolved.regions.len(),
        app.scope_label(),
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(30), // Hierarchy
        Constraint::Percentage(70), // Locality table
    ])
    .split(area);

    draw_hierarchy(frame, chunks[0], app);
    draw_locality_table(frame, chunks[1], app);
}

fn draw_hierarchy(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .resolved
        .hierarchy
        .iter()
        .map(|entry| {
            let is_current = entry.id == app.resolved.id;
            let style = if is_current {
                Style::default().fg(BRAND_ORANGE).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let indent = "  ".repeat(entry.depth);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", entry.rank), Style::default().fg(BRAND_MUTED)),
                Span::styled(format!("{indent}{}", entry.name), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Hierarchy ({}) ", app.resolved.hierarchy.len()))
            .borders(Borders::ALL),
    );

    frame.render_widget(list, area);
}

fn draw_locality_table(frame: &mut Frame, area: Rect, app: &App) {
    let visible_rows = (area.height as usize).saturating_sub(3);

    let header = Row::new(vec!["Name", "Type", "Status", "Area", "Price"]).style(HEADER_STYLE);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .skip(app.rows_scroll_offset)
        .take(visible_rows)
        .map(|(i, row)| {
            let style = if i == app.selected_row {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            Row::new(vec![
                row.name.clone(),
                row.unit_type.clone(),
                row.status_label
                    .clone()
                    .or_else(|| row.status_id.clone())
                    .unwrap_or_else(|| "-".to_string()),
                row.area.clone().unwrap_or_else(|| "-".to_string()),
                row.price.clone().unwrap_or_else(|| "-".to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Percentage(32),
        Constraint::Percentage(14),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Percentage(20),
    ];

    let title = format!(
        " Localities ({}/{}) ",
        app.rows.len(),
        app.resolved.localities.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);

    if app.rows.len() > visible_rows {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(app.rows.len()).position(app.selected_row);

        let scrollbar_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 2,
            width: 1,
            height: area.height.saturating_sub(3),
        };
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

fn draw_summary(frame: &mut Frame, area: Rect, app: &App) {
    let text = format!(
        " {}  ||  filter: {}  |  price: {}  |  search: {} ",
        app.status_line(),
        app.status_filter_label(),
        app.price_order_label(),
        app.filter.search.as_deref().unwrap_or("-"),
    );

    let summary = Paragraph::new(text)
        .style(Style::default().fg(BRAND_GREEN))
        .block(Block::default().title(" Occupancy ").borders(Borders::ALL));

    frame.render_widget(summary, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help = match &app.search_input {
        Some(input) => format!(" Search: {input}▌  (Enter apply | Esc clear) "),
        None => {
            " ↑↓ Row | Tab Scope | s Status filter | p Price order | / Search | q Quit ".to_string()
        }
    };

    let footer = Paragraph::new(help)
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
