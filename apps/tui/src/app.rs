//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eodb_core::Catalog;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use tracing::debug;

use crate::screens::{Navigation, ScreenId, Screens};
use crate::widgets::status_bar;

const READY: &str = "Ready · press ? for help";

/// Application state.
pub(crate) struct App {
    /// The dataset, loaded once at startup.
    catalog: Catalog,
    /// Currently active screen tab.
    active_tab: usize,
    /// Whether the app should quit.
    should_quit: bool,
    /// Status message shown in bottom bar.
    status: String,
    /// Whether help overlay is visible.
    show_help: bool,
    screens: Screens,
}

impl App {
    pub(crate) fn new(catalog: Catalog) -> Self {
        let screens = Screens::new(&catalog);
        let status = format!(
            "{} orders · {} timeline items · press ? for help",
            catalog.list_all_records().len(),
            catalog.list_all_timeline_items().len()
        );
        Self {
            catalog,
            active_tab: 0,
            should_quit: false,
            status,
            show_help: false,
            screens,
        }
    }

    fn current_screen(&self) -> ScreenId {
        ScreenId::ALL[self.active_tab]
    }

    fn is_editing(&self) -> bool {
        self.screens.is_editing(self.current_screen())
    }

    fn switch_to(&mut self, id: ScreenId) {
        if let Some(idx) = ScreenId::ALL.iter().position(|s| *s == id) {
            self.active_tab = idx;
        }
    }

    fn navigate(&mut self, nav: Navigation) {
        debug!(?nav, "navigate");
        match nav {
            Navigation::OpenOrder(document_number) => {
                self.status = format!("Executive order {document_number}");
                self.screens.open_order(document_number);
                self.switch_to(ScreenId::Detail);
            }
            Navigation::OpenAgency(agency) => {
                self.status = agency.clone();
                self.screens.open_agency(agency);
                self.switch_to(ScreenId::Agency);
            }
            Navigation::Back => {
                self.status = READY.to_string();
                self.switch_to(ScreenId::Browse);
            }
        }
    }
}

/// Set up the terminal, run the event loop, restore the terminal.
pub(crate) fn run(catalog: Catalog) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(catalog));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='3') if !app.is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            app.active_tab = idx;
            app.status = format!("{}", app.current_screen());
            return;
        }
        KeyCode::Tab if !app.is_editing() => {
            app.active_tab = (app.active_tab + 1) % ScreenId::ALL.len();
            app.status = format!("{}", app.current_screen());
            return;
        }
        KeyCode::BackTab if !app.is_editing() => {
            app.active_tab = if app.active_tab == 0 {
                ScreenId::ALL.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.current_screen());
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    let id = app.current_screen();
    if let Some(nav) = app.screens.handle_key(id, &app.catalog, code, modifiers) {
        app.navigate(nav);
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = ScreenId::ALL
        .iter()
        .map(|s| Line::from(format!("{s}")))
        .collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Executive Orders "),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area
    app.screens
        .draw(app.current_screen(), &app.catalog, f, chunks[1]);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-3          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Browse:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  /            Edit search text"),
        Line::from("  a/A  c/C     Next/previous agency, category"),
        Line::from("  x            Clear all filters"),
        Line::from("  ←/→          Previous/next page"),
        Line::from("  Enter        Open order · g open its agency"),
        Line::from(""),
        Line::from("Detail / Agency:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓ Enter    Pick and open"),
        Line::from("  t            Agency: switch orders/actions"),
        Line::from("  Esc          Back to Browse"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help · press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use eodb_shared::ExecutiveOrder;
    use ratatui::backend::TestBackend;

    use super::*;

    fn app() -> App {
        let order = ExecutiveOrder {
            document_number: "2025-02000".into(),
            title: "Protecting American Workers".into(),
            agencies_raw: "['EPA']".into(),
            categories_raw: String::new(),
            html_url: None,
            agencies: vec!["EPA".into()],
            categories: vec![],
        };
        App::new(Catalog::new(vec![order], vec![]))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, code, KeyModifiers::NONE);
    }

    #[test]
    fn enter_on_browse_opens_detail_and_esc_returns() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_screen(), ScreenId::Detail);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_screen(), ScreenId::Agency);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.current_screen(), ScreenId::Browse);
    }

    #[test]
    fn q_types_into_search_instead_of_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn every_screen_draws() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        for tab in ['1', '2', '3'] {
            press(&mut app, KeyCode::Char(tab));
            terminal.draw(|f| draw(f, &app)).expect("draw");
        }
        press(&mut app, KeyCode::Char('?'));
        terminal.draw(|f| draw(f, &app)).expect("draw help");
    }
}
