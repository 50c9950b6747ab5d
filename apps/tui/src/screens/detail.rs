//! "Detail" screen: one executive order and its timeline.

use crossterm::event::{KeyCode, KeyModifiers};
use eodb_core::Catalog;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::Navigation;
use crate::widgets::timeline_item;

pub(crate) struct DetailScreen {
    document_number: Option<String>,
    /// Agency highlighted in the header, for jumping to its view.
    selected_agency: usize,
}

impl DetailScreen {
    pub(crate) fn new() -> Self {
        Self {
            document_number: None,
            selected_agency: 0,
        }
    }

    pub(crate) fn show(&mut self, document_number: String) {
        self.document_number = Some(document_number);
        self.selected_agency = 0;
    }

    pub(crate) fn draw(&self, catalog: &Catalog, f: &mut Frame, area: Rect) {
        let Some(id) = self.document_number.as_deref() else {
            let empty =
                Paragraph::new("No order selected.\n\nPick one on the Browse tab and press Enter.")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(" Detail "));
            f.render_widget(empty, area);
            return;
        };

        let Some(detail) = catalog.order_detail(id) else {
            let missing = Paragraph::new(format!("Executive order {id} not found."))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Detail "));
            f.render_widget(missing, area);
            return;
        };
        let order = detail.order;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(8), // Header
                Constraint::Min(1),    // Timeline
                Constraint::Length(1), // Hints
            ])
            .split(area);

        let label = Style::default().fg(Color::DarkGray);
        let mut agencies = vec![Span::styled("Agencies:   ", label)];
        for (i, agency) in order.agencies.iter().enumerate() {
            if i > 0 {
                agencies.push(Span::raw(", "));
            }
            let style = if i == self.selected_agency {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            agencies.push(Span::styled(agency.clone(), style));
        }

        let mut header = vec![
            Line::from(Span::styled(
                order.display_title().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Document:   ", label),
                Span::raw(order.document_number.clone()),
            ]),
            Line::from(agencies),
            Line::from(vec![
                Span::styled("Categories: ", label),
                Span::raw(order.categories.join(", ")),
            ]),
        ];
        if let Some(url) = &order.html_url {
            header.push(Line::from(vec![
                Span::styled("Link:       ", label),
                Span::raw(url.clone()),
            ]));
        }

        let header_p = Paragraph::new(header)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Executive Order "));
        f.render_widget(header_p, chunks[0]);

        if detail.timeline.is_empty() {
            let empty = Paragraph::new("No timeline items recorded for this order.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Timeline "));
            f.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = detail
                .timeline
                .iter()
                .map(|item| timeline_item(item, false))
                .collect();
            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Timeline ({}) ", detail.timeline.len())),
            );
            f.render_widget(list, chunks[1]);
        }

        let hint = Paragraph::new("↑/↓ pick agency · Enter open agency · Esc back")
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
        let agency_count = self
            .document_number
            .as_deref()
            .and_then(|id| catalog.find_record_by_document_number(id))
            .map_or(0, |order| order.agencies.len());

        match code {
            KeyCode::Esc | KeyCode::Backspace => return Some(Navigation::Back),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_agency = self.selected_agency.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_agency + 1 < agency_count {
                    self.selected_agency += 1;
                }
            }
            KeyCode::Enter => {
                let id = self.document_number.as_deref()?;
                let order = catalog.find_record_by_document_number(id)?;
                let agency = order.agencies.get(self.selected_agency)?;
                return Some(Navigation::OpenAgency(agency.clone()));
            }
            _ => {}
        }
        None
    }
}
