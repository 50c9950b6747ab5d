//! Reusable TUI widgets.

use eodb_core::{PageLink, Pager};
use eodb_shared::TimelineItem;
use ratatui::prelude::*;
use ratatui::widgets::{ListItem, Paragraph};

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}"))
        .style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White),
        )
}

/// Page strip such as `‹ 1 … 4 [5] 6 … 10 ›`, bracketing `requested`
/// only when it is one of the listed pages.
pub(crate) fn page_strip(pager: &Pager, requested: usize) -> Line<'static> {
    let mut spans = vec![arrow("‹ ", pager.has_previous())];
    for link in pager.window() {
        let span = match link {
            PageLink::Page(n) if n == requested => Span::styled(
                format!("[{n}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            PageLink::Page(n) => Span::raw(n.to_string()),
            PageLink::Gap => Span::styled("…", Style::default().fg(Color::DarkGray)),
        };
        spans.push(span);
        spans.push(Span::raw(" "));
    }
    spans.push(arrow("›", pager.has_next()));
    Line::from(spans)
}

fn arrow(symbol: &'static str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::raw(symbol)
    } else {
        Span::styled(symbol, Style::default().fg(Color::DarkGray))
    }
}

/// A timeline item as a two-line list entry, with `Immediate` in red.
pub(crate) fn timeline_item(item: &TimelineItem, show_key: bool) -> ListItem<'static> {
    let due = item.due_date.clone().unwrap_or_else(|| "-".to_string());
    let due_style = if item.is_immediate() {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut head = vec![
        Span::styled(format!("{due:<11}"), due_style),
        Span::styled(
            item.agency.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if show_key {
        if let Some(key) = item.bridge_key() {
            head.push(Span::styled(
                format!("  ({key})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    ListItem::new(vec![
        Line::from(head),
        Line::from(format!("           {}", item.action)),
    ])
}
