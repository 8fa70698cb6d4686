/// Shared data structures for the application state
///
/// These represent the data model that flows between
/// the APOD client and the UI layer.

use super::date::CalendarDate;
use crate::apod::error::FetchError;

/// Kind of media an archive entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Image,
    Video,
    Other,
}

impl MediaType {
    /// Map the API's `media_type` string (missing means image)
    pub fn from_api(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("image") => MediaType::Image,
            Some("video") => MediaType::Video,
            Some(_) => MediaType::Other,
        }
    }
}

/// One archive entry, immutable once received
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Day this record was requested for
    pub date: CalendarDate,
    pub title: String,
    pub explanation: String,
    /// Address of the picture (or video page)
    pub image_url: String,
    pub media_type: MediaType,
    /// Credit line, absent for public-domain entries
    pub copyright: Option<String>,
}

/// What the navigator currently shows for its current date.
/// Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    /// A fetch for the current date is in flight
    Loading,
    /// Current date is after today, nothing was requested
    FutureBlocked,
    /// Last fetch for the current date succeeded
    Loaded(ImageRecord),
    /// Last fetch resolved without a usable record
    Empty,
    /// Last fetch errored
    Failed(FetchError),
}

impl NavigationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, NavigationState::Loading)
    }

    pub fn is_future_blocked(&self) -> bool {
        matches!(self, NavigationState::FutureBlocked)
    }

    pub fn record(&self) -> Option<&ImageRecord> {
        match self {
            NavigationState::Loaded(record) => Some(record),
            _ => None,
        }
    }
}
