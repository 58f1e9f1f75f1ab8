//! Browser bookmark payloads.
//!
//! The companion browser exports shared links as
//! `{"shared_links": [{"title": .., "url": .., "timestamp": ..}, ..]}`.

use chrono::{Local, NaiveDate, TimeZone};
use serde::Deserialize;

/// One link shared from the browser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bookmark {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Unix epoch seconds when the link was saved.
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl Bookmark {
    /// Calendar day the link was saved, in the local time zone.
    ///
    /// Matches `form::today()`, so a bookmark saved just now yields today.
    pub fn date(&self) -> Option<NaiveDate> {
        let seconds = self.timestamp?;
        if !seconds.is_finite() {
            return None;
        }
        Local
            .timestamp_opt(seconds.trunc() as i64, 0)
            .single()
            .map(|at| at.date_naive())
    }
}

#[derive(Debug, Deserialize)]
struct SharedLinks {
    #[serde(default)]
    shared_links: Vec<Bookmark>,
}

/// Decodes the browser's shared-links document.
///
/// A document without `shared_links` yields an empty list.
pub fn parse_shared_links(json: &str) -> Result<Vec<Bookmark>, serde_json::Error> {
    let payload: SharedLinks = serde_json::from_str(json)?;
    Ok(payload.shared_links)
}

#[cfg(test)]
mod tests {
    use super::{parse_shared_links, Bookmark};
    use chrono::{Local, NaiveDate, TimeZone};

    fn local_timestamp(day: u32, hour: u32, minute: u32) -> f64 {
        Local
            .with_ymd_and_hms(2015, 1, day, hour, minute, 0)
            .single()
            .expect("no DST transition falls on 3 January")
            .timestamp() as f64
    }

    #[test]
    fn parses_links_and_dates() {
        let json = format!(
            r#"{{"shared_links": [
                {{"title": "Sugar Labs", "url": "http://sugarlabs.org/", "timestamp": {}}},
                {{"url": "http://example.com/"}}
            ]}}"#,
            local_timestamp(3, 12, 0) + 0.5
        );
        let links = parse_shared_links(&json).expect("shared links document is valid");

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title.as_deref(), Some("Sugar Labs"));
        assert_eq!(links[0].date(), NaiveDate::from_ymd_opt(2015, 1, 3));
        assert_eq!(links[1].title, None);
        assert_eq!(links[1].date(), None);
    }

    #[test]
    fn date_uses_local_calendar_day_near_midnight() {
        let day = NaiveDate::from_ymd_opt(2015, 1, 3);
        for (hour, minute) in [(0, 30), (23, 30)] {
            let bookmark = Bookmark {
                title: None,
                url: None,
                timestamp: Some(local_timestamp(3, hour, minute)),
            };
            assert_eq!(bookmark.date(), day, "saved at {hour}:{minute} local time");
        }
    }

    #[test]
    fn missing_shared_links_is_empty() {
        assert!(parse_shared_links("{}").unwrap().is_empty());
    }
}
