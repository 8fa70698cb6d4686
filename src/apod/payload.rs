/// APOD API response body
///
/// Every field is optional on the wire. Whether the payload is usable is
/// decided when it is turned into an `ImageRecord`, not while parsing:
/// a well-formed body without a title or url is an empty result, not an error.

use serde::Deserialize;

use super::error::FetchError;
use crate::state::data::{ImageRecord, MediaType};
use crate::state::date::CalendarDate;

/// Raw fields returned by `GET /planetary/apod?date=YYYY-MM-DD`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ImageRecordPayload {
    pub date: Option<String>,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub url: Option<String>,
    pub media_type: Option<String>,
    pub copyright: Option<String>,
}

impl ImageRecordPayload {
    /// Parse a response body
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Build the record for `requested`, or `None` when title or url is missing.
    pub fn into_record(self, requested: CalendarDate) -> Option<ImageRecord> {
        let title = non_blank(self.title)?;
        let image_url = non_blank(self.url)?;

        if let Some(reported) = self.date.as_deref() {
            if CalendarDate::parse_iso(reported) != Some(requested) {
                tracing::warn!(
                    requested = %requested,
                    reported,
                    "APOD payload reports a different date"
                );
            }
        }

        Some(ImageRecord {
            date: requested,
            title,
            explanation: self.explanation.unwrap_or_default(),
            image_url,
            media_type: MediaType::from_api(self.media_type.as_deref()),
            copyright: non_blank(self.copyright).map(|c| c.trim().to_string()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
