/// View selection
///
/// Which screen to show, and which navigation controls are live, is a pure
/// function of the navigation state. The widgets themselves live in card.rs.

use crate::state::data::{ImageRecord, NavigationState};

/// Screen shown for a navigation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    /// Fetch in flight
    Progress,
    /// Past the newest entry, offer to jump back to today
    FutureNotice,
    /// Picture, title, date and explanation with navigation controls
    Record(&'a ImageRecord),
    /// "No data available" with navigation controls
    NoData,
}

impl<'a> Screen<'a> {
    pub fn select(state: &'a NavigationState) -> Self {
        match state {
            NavigationState::Loading => Screen::Progress,
            NavigationState::FutureBlocked => Screen::FutureNotice,
            NavigationState::Loaded(record) => Screen::Record(record),
            NavigationState::Empty | NavigationState::Failed(_) => Screen::NoData,
        }
    }
}

/// Availability of the navigation controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub previous: bool,
    pub next: bool,
    pub random: bool,
}

impl Controls {
    pub fn for_state(state: &NavigationState) -> Self {
        Controls {
            previous: true,
            next: !state.is_future_blocked(),
            random: true,
        }
    }
}
