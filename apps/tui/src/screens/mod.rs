//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic. Screens read from the shared
//! [`Catalog`] and ask the app to switch tabs through [`Navigation`].

mod agency;
mod browse;
mod detail;

use std::fmt;

use crossterm::event::{KeyCode, KeyModifiers};
use eodb_core::Catalog;
use ratatui::prelude::*;

/// Screen identifiers, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Browse,
    Detail,
    Agency,
}

impl ScreenId {
    pub(crate) const ALL: [ScreenId; 3] = [Self::Browse, Self::Detail, Self::Agency];
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browse => write!(f, "Browse"),
            Self::Detail => write!(f, "Detail"),
            Self::Agency => write!(f, "Agency"),
        }
    }
}

/// A request from a screen to show another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Navigation {
    OpenOrder(String),
    OpenAgency(String),
    Back,
}

/// State for every screen.
pub(crate) struct Screens {
    browse: browse::BrowseScreen,
    detail: detail::DetailScreen,
    agency: agency::AgencyScreen,
}

impl Screens {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            browse: browse::BrowseScreen::new(catalog),
            detail: detail::DetailScreen::new(),
            agency: agency::AgencyScreen::new(catalog),
        }
    }

    /// Whether the given screen has an active text input field.
    pub(crate) fn is_editing(&self, id: ScreenId) -> bool {
        match id {
            ScreenId::Browse => self.browse.is_editing(),
            _ => false,
        }
    }

    pub(crate) fn open_order(&mut self, document_number: String) {
        self.detail.show(document_number);
    }

    pub(crate) fn open_agency(&mut self, agency: String) {
        self.agency.show(agency);
    }

    pub(crate) fn draw(&self, id: ScreenId, catalog: &Catalog, f: &mut Frame, area: Rect) {
        match id {
            ScreenId::Browse => self.browse.draw(f, area),
            ScreenId::Detail => self.detail.draw(catalog, f, area),
            ScreenId::Agency => self.agency.draw(catalog, f, area),
        }
    }

    pub(crate) fn handle_key(
        &mut self,
        id: ScreenId,
        catalog: &Catalog,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<Navigation> {
        match id {
            ScreenId::Browse => self.browse.handle_key(catalog, code, modifiers),
            ScreenId::Detail => self.detail.handle_key(catalog, code, modifiers),
            ScreenId::Agency => self.agency.handle_key(catalog, code, modifiers),
        }
    }
}
