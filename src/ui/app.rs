use crate::model::HierarchyScope;
use crate::parser::Envelope;
use crate::resolve::{resolve_envelope, ResolvedProject};
use crate::table::{project_rows, PriceOrder, TableFilter, TableRow};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{DefaultTerminal, Frame};

pub struct App {
    envelope: Envelope,
    pub resolved: ResolvedProject,
    pub filter: TableFilter,
    pub rows: Vec<TableRow>,
    pub selected_row: usize,
    pub rows_scroll_offset: usize,
    /// Some while the user is typing a search term.
    pub search_input: Option<String>,
    pub status_keys: Vec<String>,
    pub status_cursor: usize, // 0 = "All"
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(envelope: Envelope, scope: HierarchyScope) -> Self {
        let resolved = resolve_envelope(&envelope, scope);
        let mut app = Self {
            envelope,
            resolved,
            filter: TableFilter::default(),
            rows: Vec::new(),
            selected_row: 0,
            rows_scroll_offset: 0,
            search_input: None,
            status_keys: Vec::new(),
            status_cursor: 0,
            should_quit: false,
        };
        app.rebuild_status_keys();
        app.refresh_rows();
        app
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            let height = terminal.size()?.height as usize;
            self.adjust_scroll(height);
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        super::dashboard::draw_dashboard(frame, self);
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            if self.search_input.is_some() {
                self.handle_search_keys(key.code);
            } else {
                self.handle_dashboard_keys(key.code);
            }
        }
        Ok(())
    }

    fn handle_dashboard_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.previous_row(),
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Tab => self.toggle_scope(),
            KeyCode::Char('s') => self.cycle_status_filter(),
            KeyCode::Char('p') => self.cycle_price_order(),
            KeyCode::Char('/') => {
                self.search_input = Some(self.filter.search.clone().unwrap_or_default());
            }
            _ => {}
        }
    }

    fn handle_search_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let term = self.search_input.take().unwrap_or_default();
                self.filter.search = (!term.trim().is_empty()).then_some(term);
                self.refresh_rows();
            }
            KeyCode::Esc => {
                self.search_input = None;
                self.filter.search = None;
                self.refresh_rows();
            }
            KeyCode::Backspace => {
                if let Some(input) = &mut self.search_input {
                    input.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = &mut self.search_input {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    fn previous_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    fn next_row(&mut self) {
        if self.selected_row < self.rows.len().saturating_sub(1) {
            self.selected_row += 1;
        }
    }

    fn toggle_scope(&mut self) {
        let scope = match self.resolved.scope {
            HierarchyScope::Current => HierarchyScope::Hierarchy,
            HierarchyScope::Hierarchy => HierarchyScope::Current,
        };
        self.resolved = resolve_envelope(&self.envelope, scope);
        self.rebuild_status_keys();
        self.refresh_rows();
    }

    fn cycle_status_filter(&mut self) {
        self.status_cursor = (self.status_cursor + 1) % (self.status_keys.len() + 1);
        self.filter.status = if self.status_cursor == 0 {
            None
        } else {
            Some(self.status_keys[self.status_cursor - 1].clone())
        };
        self.refresh_rows();
    }

    fn cycle_price_order(&mut self) {
        self.filter.price_order = match self.filter.price_order {
            None => Some(PriceOrder::Ascending),
            Some(PriceOrder::Ascending) => Some(PriceOrder::Descending),
            Some(PriceOrder::Descending) => None,
        };
        self.refresh_rows();
    }

    fn refresh_rows(&mut self) {
        self.rows = project_rows(&self.resolved.localities, &self.filter);
        if self.selected_row >= self.rows.len() {
            self.selected_row = self.rows.len().saturating_sub(1);
        }
        self.rows_scroll_offset = self.rows_scroll_offset.min(self.selected_row);
    }

    // Distinct status ids across the resolved locality set, first seen first;
    // drives the "s" filter cycling.
    fn rebuild_status_keys(&mut self) {
        self.status_keys.clear();
        for resolved in &self.resolved.localities {
            if let Some(id) = resolved.locality.status_id.as_deref() {
                if !id.is_empty() && !self.status_keys.iter().any(|k| k == id) {
                    self.status_keys.push(id.to_string());
                }
            }
        }
        self.status_cursor = 0;
        self.filter.status = None;
    }

    // Keep the selection inside the table viewport. The dashboard reserves
    // 12 rows of chrome around the table body.
    fn adjust_scroll(&mut self, terminal_height: usize) {
        let visible = terminal_height.saturating_sub(12).max(1);
        if self.selected_row < self.rows_scroll_offset {
            self.rows_scroll_offset = self.selected_row;
        } else if self.selected_row >= self.rows_scroll_offset + visible {
            self.rows_scroll_offset = self.selected_row + 1 - visible;
        }
    }

    /// Aggregate status counts across the resolved regions, for the summary
    /// line under the table.
    #[must_use]
    pub fn status_line(&self) -> String {
        let mut parts: Vec<(String, usize)> = Vec::new();
        for region in &self.resolved.regions {
            for entry in &region.summary.entries {
                match parts.iter_mut().find(|(label, _)| label == &entry.label) {
                    Some((_, count)) => *count += entry.count,
                    None => parts.push((entry.label.clone(), entry.count)),
                }
            }
        }
        if parts.is_empty() {
            return "no region summaries".to_string();
        }
        parts
            .iter()
            .map(|(label, count)| format!("{label}: {count}"))
            .collect::<Vec<_>>()
            .join("  |  ")
    }

    #[must_use]
    pub fn scope_label(&self) -> &'static str {
        match self.resolved.scope {
            HierarchyScope::Current => "current",
            HierarchyScope::Hierarchy => "hierarchy",
        }
    }

    #[must_use]
    pub fn price_order_label(&self) -> &'static str {
        match self.filter.price_order {
            None => "-",
            Some(PriceOrder::Ascending) => "asc",
            Some(PriceOrder::Descending) => "desc",
        }
    }

    #[must_use]
    pub fn status_filter_label(&self) -> String {
        self.filter.status.clone().unwrap_or_else(|| "all".to_string())
    }
}
