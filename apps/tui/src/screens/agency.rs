//! "Agency" screen: the orders naming an agency and its required actions.

use crossterm::event::{KeyCode, KeyModifiers};
use eodb_core::Catalog;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::Navigation;
use crate::widgets::timeline_item;

/// Which list ↑/↓ and Enter act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Orders,
    Actions,
}

pub(crate) struct AgencyScreen {
    /// Known agencies, for stepping with ←/→.
    agencies: Vec<String>,
    agency: Option<String>,
    focus: Pane,
    /// Order selected in the left pane.
    selected: usize,
    /// Action selected in the right pane.
    selected_action: usize,
}

impl AgencyScreen {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            agencies: catalog.facets().agencies,
            agency: None,
            focus: Pane::Orders,
            selected: 0,
            selected_action: 0,
        }
    }

    pub(crate) fn show(&mut self, agency: String) {
        self.agency = Some(agency);
        self.focus = Pane::Orders;
        self.selected = 0;
        self.selected_action = 0;
    }

    fn step(&mut self, forward: bool) {
        if self.agencies.is_empty() {
            return;
        }
        let last = self.agencies.len() - 1;
        let position = self
            .agency
            .as_ref()
            .and_then(|a| self.agencies.iter().position(|known| known == a));
        let next = match (position, forward) {
            (Some(i), true) if i < last => i + 1,
            (Some(i), false) if i > 0 => i - 1,
            (_, true) => 0,
            (_, false) => last,
        };
        self.show(self.agencies[next].clone());
    }

    pub(crate) fn draw(&self, catalog: &Catalog, f: &mut Frame, area: Rect) {
        let Some(name) = self.agency.as_deref() else {
            let empty = Paragraph::new(
                "No agency selected.\n\nPress ←/→ to step through agencies, \
                 or 'g' on the Browse tab.",
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Agency "));
            f.render_widget(empty, area);
            return;
        };
        let view = catalog.agency_view(name);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Agency name
                Constraint::Min(1),    // Panes
                Constraint::Length(1), // Hints
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        if view.is_empty() {
            let empty = Paragraph::new("No orders or actions found for this agency.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, chunks[1]);
        } else {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[1]);

            let orders: Vec<ListItem> = view
                .orders
                .iter()
                .map(|order| {
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:<12}", order.document_number),
                            Style::default().fg(Color::Cyan),
                        ),
                        Span::raw(order.display_title().to_string()),
                    ]))
                })
                .collect();
            let orders_list = List::new(orders)
                .block(
                    pane_block(self.focus == Pane::Orders)
                        .title(format!(" Executive Orders ({}) ", view.orders.len())),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("▸ ");
            let selected = (self.focus == Pane::Orders).then_some(self.selected);
            let mut state = ListState::default().with_selected(selected);
            f.render_stateful_widget(orders_list, panes[0], &mut state);

            let actions: Vec<ListItem> = view
                .timeline
                .iter()
                .map(|item| timeline_item(item, true))
                .collect();
            let actions_list = List::new(actions)
                .block(
                    pane_block(self.focus == Pane::Actions)
                        .title(format!(" Required Actions ({}) ", view.timeline.len())),
                )
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("▸ ");
            let selected = (self.focus == Pane::Actions).then_some(self.selected_action);
            let mut state = ListState::default().with_selected(selected);
            f.render_stateful_widget(actions_list, panes[1], &mut state);
        }

        let hint = Paragraph::new(
            "←/→ agency · t orders/actions · ↑/↓ select · Enter open order · Esc back",
        )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, chunks[2]);
    }

    pub(crate) fn handle_key(
        &mut self,
        catalog: &Catalog,
        code: KeyCode,
        _modifiers: KeyModifiers,
    ) -> Option<Navigation> {
        match code {
            KeyCode::Esc | KeyCode::Backspace => return Some(Navigation::Back),
            KeyCode::Left | KeyCode::Char('h') => self.step(false),
            KeyCode::Right | KeyCode::Char('l') => self.step(true),
            KeyCode::Char('t') => {
                self.focus = match self.focus {
                    Pane::Orders => Pane::Actions,
                    Pane::Actions => Pane::Orders,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let selected = self.selected_mut();
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.agency.as_deref().map_or(0, |a| match self.focus {
                    Pane::Orders => catalog.find_records_by_agency(a).len(),
                    Pane::Actions => catalog.find_timeline_items_by_agency(a).len(),
                });
                let selected = self.selected_mut();
                if *selected + 1 < count {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                let agency = self.agency.as_deref()?;
                let document_number = match self.focus {
                    Pane::Orders => {
                        let orders = catalog.find_records_by_agency(agency);
                        orders.get(self.selected)?.document_number.clone()
                    }
                    Pane::Actions => {
                        let actions = catalog.find_timeline_items_by_agency(agency);
                        actions.get(self.selected_action)?.bridge_key()?.to_string()
                    }
                };
                return Some(Navigation::OpenOrder(document_number));
            }
            _ => {}
        }
        None
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.focus {
            Pane::Orders => &mut self.selected,
            Pane::Actions => &mut self.selected_action,
        }
    }
}

fn pane_block(focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).border_style(style)
}
