//! "Browse" screen: filter, search, and page through executive orders.

use crossterm::event::{KeyCode, KeyModifiers};
use eodb_core::{Catalog, Facets, FilteredPage, Pager};
use eodb_shared::FilterState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::Navigation;
use crate::widgets::page_strip;

pub(crate) struct BrowseScreen {
    filter: FilterState,
    facets: Facets,
    page: FilteredPage,
    /// Row selected within the current page.
    selected: usize,
    editing: bool,
}

impl BrowseScreen {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        let filter = FilterState::default();
        let page = catalog.filter_and_paginate(&filter);
        Self {
            filter,
            facets: catalog.facets(),
            page,
            selected: 0,
            editing: false,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    fn pager(&self) -> Pager {
        Pager::new(self.page.page, self.page.total_pages)
    }

    fn refresh(&mut self, catalog: &Catalog) {
        self.page = catalog.filter_and_paginate(&self.filter);
        if self.selected >= self.page.items.len() {
            self.selected = 0;
        }
    }

    fn turn_page(&mut self, catalog: &Catalog, forward: bool) {
        let mut pager = self.pager();
        let moved = if forward {
            pager.next_page()
        } else {
            pager.previous_page()
        };
        if moved {
            self.filter.set_page(pager.current());
            self.selected = 0;
            self.refresh(catalog);
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Filters
                Constraint::Min(1),    // Orders
                Constraint::Length(1), // Page strip
                Constraint::Length(1), // Hints
            ])
            .split(area);

        self.draw_filters(f, chunks[0]);

        if self.page.items.is_empty() {
            let message = if self.filter.is_filtering() {
                "No executive orders match the current filters.\n\nPress 'x' to clear filters."
            } else {
                "No executive orders loaded.\n\nCheck the data directory in ~/.eodb/eodb.toml."
            };
            let empty = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Executive Orders "),
                );
            f.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .page
                .items
                .iter()
                .map(|order| {
                    ListItem::new(vec![
                        Line::from(vec![
                            Span::styled(
                                format!("{:<12}", order.document_number),
                                Style::default().fg(Color::Cyan),
                            ),
                            Span::raw(order.display_title().to_string()),
                        ]),
                        Line::from(Span::styled(
                            format!("            {}", order.agencies.join(", ")),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(
                            " Executive Orders ({} of {}) ",
                            self.page.total_filtered, self.page.total_records
                        )),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("▸ ");
            let mut state = ListState::default().with_selected(Some(self.selected));
            f.render_stateful_widget(list, chunks[1], &mut state);
        }

        let strip = Paragraph::new(page_strip(&self.pager(), self.page.page))
            .alignment(Alignment::Center);
        f.render_widget(strip, chunks[2]);

        let hint = if self.editing {
            "Type to search · Enter/Esc to finish"
        } else {
            "/ search · a/A agency · c/C category · x clear · ←/→ page · Enter open · g agency"
        };
        let hint_p = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint_p, chunks[3]);
    }

    fn draw_filters(&self, f: &mut Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
            ])
            .split(area);

        let search_style = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let search = Paragraph::new(self.filter.search_text.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(search_style),
        );
        f.render_widget(search, cols[0]);

        let agency = Paragraph::new(self.filter.active_agency().unwrap_or("All agencies"))
            .block(Block::default().borders(Borders::ALL).title(" Agency "));
        f.render_widget(agency, cols[1]);

        let category = Paragraph::new(self.filter.active_category().unwrap_or("All categories"))
            .block(Block::default().borders(Borders::ALL).title(" Category "));
        f.render_widget(category, cols[2]);
    }

    pub(crate) fn handle_key(
        &mut self,
        catalog: &Catalog,
        code: KeyCode,
        _modifiers: KeyModifiers,
    ) -> Option<Navigation> {
        if self.editing {
            match code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.editing = false;
                }
                KeyCode::Backspace => {
                    let mut text = self.filter.search_text.clone();
                    text.pop();
                    self.filter.set_search_text(text);
                    self.refresh(catalog);
                }
                KeyCode::Char(c) => {
                    let text = format!("{}{c}", self.filter.search_text);
                    self.filter.set_search_text(text);
                    self.refresh(catalog);
                }
                _ => {}
            }
            return None;
        }

        match code {
            KeyCode::Char('/') => self.editing = true,
            KeyCode::Char(c @ ('a' | 'A')) => {
                let next = cycle(
                    &self.facets.agencies,
                    self.filter.active_agency(),
                    c == 'a',
                );
                self.filter.set_agency(next);
                self.refresh(catalog);
            }
            KeyCode::Char(c @ ('c' | 'C')) => {
                let next = cycle(
                    &self.facets.categories,
                    self.filter.active_category(),
                    c == 'c',
                );
                self.filter.set_category(next);
                self.refresh(catalog);
            }
            KeyCode::Char('x') => {
                self.filter.clear();
                self.refresh(catalog);
            }
            KeyCode::Left | KeyCode::Char('h') => self.turn_page(catalog, false),
            KeyCode::Right | KeyCode::Char('l') => self.turn_page(catalog, true),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.page.items.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                let order = self.page.items.get(self.selected)?;
                return Some(Navigation::OpenOrder(order.document_number.clone()));
            }
            KeyCode::Char('g') => {
                let order = self.page.items.get(self.selected)?;
                let agency = order.agencies.first()?;
                return Some(Navigation::OpenAgency(agency.clone()));
            }
            _ => {}
        }
        None
    }
}

/// Step through `options` with "none selected" between the last and the first.
fn cycle(options: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    let position = current.and_then(|c| options.iter().position(|o| o == c));
    let next = match (position, forward) {
        (None, true) => 0,
        (None, false) => options.len().checked_sub(1)?,
        (Some(i), true) if i + 1 < options.len() => i + 1,
        (Some(i), false) if i > 0 => i - 1,
        _ => return None,
    };
    options.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use eodb_shared::ExecutiveOrder;

    use super::*;

    fn order(doc: &str, title: &str, agencies: &[&str]) -> ExecutiveOrder {
        ExecutiveOrder {
            document_number: doc.into(),
            title: title.into(),
            agencies_raw: format!("{agencies:?}"),
            categories_raw: String::new(),
            html_url: None,
            agencies: agencies.iter().map(|a| a.to_string()).collect(),
            categories: vec![],
        }
    }

    fn catalog(count: usize) -> Catalog {
        let orders = (0..count)
            .map(|i| {
                let agency = if i % 2 == 0 { "EPA" } else { "Department of Labor" };
                order(&format!("2025-{i:05}"), &format!("Order {i}"), &[agency])
            })
            .collect();
        Catalog::new(orders, vec![])
    }

    fn press(screen: &mut BrowseScreen, catalog: &Catalog, code: KeyCode) -> Option<Navigation> {
        screen.handle_key(catalog, code, KeyModifiers::NONE)
    }

    #[test]
    fn cycle_wraps_through_none() {
        let options = vec!["A".to_string(), "B".to_string()];
        assert_eq!(cycle(&options, None, true).as_deref(), Some("A"));
        assert_eq!(cycle(&options, Some("A"), true).as_deref(), Some("B"));
        assert_eq!(cycle(&options, Some("B"), true), None);
        assert_eq!(cycle(&options, None, false).as_deref(), Some("B"));
        assert_eq!(cycle(&options, Some("A"), false), None);
        assert_eq!(cycle(&[], None, true), None);
        assert_eq!(cycle(&[], None, false), None);
    }

    #[test]
    fn paging_stays_in_bounds() {
        let catalog = catalog(30);
        let mut screen = BrowseScreen::new(&catalog);
        assert_eq!(screen.page.total_pages, 3);

        press(&mut screen, &catalog, KeyCode::Left);
        assert_eq!(screen.filter.current_page, 1);

        for _ in 0..5 {
            press(&mut screen, &catalog, KeyCode::Right);
        }
        assert_eq!(screen.filter.current_page, 3);
        assert_eq!(screen.page.items.len(), 6);
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let catalog = catalog(30);
        let mut screen = BrowseScreen::new(&catalog);
        press(&mut screen, &catalog, KeyCode::Right);
        assert_eq!(screen.filter.current_page, 2);

        press(&mut screen, &catalog, KeyCode::Char('a'));
        assert_eq!(screen.filter.active_agency(), Some("Department of Labor"));
        assert_eq!(screen.filter.current_page, 1);
        assert_eq!(screen.page.total_filtered, 15);
    }

    #[test]
    fn typing_searches_live_and_x_clears() {
        let catalog = catalog(30);
        let mut screen = BrowseScreen::new(&catalog);

        press(&mut screen, &catalog, KeyCode::Char('/'));
        assert!(screen.is_editing());
        for c in "order 2".chars() {
            press(&mut screen, &catalog, KeyCode::Char(c));
        }
        // "Order 2", "Order 20".."Order 29"
        assert_eq!(screen.page.total_filtered, 11);

        press(&mut screen, &catalog, KeyCode::Esc);
        assert!(!screen.is_editing());
        press(&mut screen, &catalog, KeyCode::Char('x'));
        assert!(!screen.filter.is_filtering());
        assert_eq!(screen.page.total_filtered, 30);
    }

    #[test]
    fn enter_opens_selected_order() {
        let catalog = catalog(3);
        let mut screen = BrowseScreen::new(&catalog);
        press(&mut screen, &catalog, KeyCode::Down);
        assert_eq!(
            press(&mut screen, &catalog, KeyCode::Enter),
            Some(Navigation::OpenOrder("2025-00001".into()))
        );
        assert_eq!(
            press(&mut screen, &catalog, KeyCode::Char('g')),
            Some(Navigation::OpenAgency("Department of Labor".into()))
        );
    }

    #[test]
    fn title_counts_filtered_of_total() {
        use ratatui::backend::TestBackend;

        let catalog = catalog(30);
        let mut screen = BrowseScreen::new(&catalog);
        press(&mut screen, &catalog, KeyCode::Char('a'));
        assert_eq!(screen.page.total_records, 30);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|f| {
                let area = f.area();
                screen.draw(f, area);
            })
            .expect("draw");
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Executive Orders (15 of 30)"));
    }

    #[test]
    fn enter_on_empty_page_does_nothing() {
        let catalog = catalog(0);
        let mut screen = BrowseScreen::new(&catalog);
        assert_eq!(press(&mut screen, &catalog, KeyCode::Enter), None);
        assert!(screen.pager().window().is_empty());
    }
}
