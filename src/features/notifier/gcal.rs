//! # Calendar Add Link
//!
//! Builds the clickable Google Calendar event-creation link included in
//! every reminder mail, a fallback delivery path that works even when the
//! mail client ignores the ICS attachment. No calendar API call is made;
//! this is purely a generated hyperlink.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{Duration, NaiveDate};
use reqwest::Url;

const RENDER_URL: &str = "https://www.google.com/calendar/render?action=TEMPLATE";

/// Build the event-creation link for an all-day entry on the due date.
pub fn calendar_add_link(title: &str, due_date: NaiveDate) -> String {
    let start = due_date.format("%Y%m%d").to_string();
    let end = (due_date + Duration::days(1)).format("%Y%m%d").to_string();
    let dates = format!("{start}/{end}");

    let params = [
        ("text", title),
        ("dates", dates.as_str()),
        ("details", "Hatırlatma: PatiLog"),
        ("sf", "true"),
        ("output", "xml"),
    ];

    match Url::parse_with_params(RENDER_URL, &params) {
        Ok(url) => url.to_string(),
        // The base URL is a constant; parsing cannot fail in practice
        Err(_) => RENDER_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_link_carries_template_action_and_dates() {
        let link = calendar_add_link("Max - Kuduz", date(2025, 6, 3));
        assert!(link.starts_with("https://www.google.com/calendar/render?action=TEMPLATE"));
        assert!(link.contains("dates=20250603%2F20250604"));
        assert!(link.contains("sf=true"));
        assert!(link.contains("output=xml"));
    }

    #[test]
    fn test_title_is_url_encoded() {
        let link = calendar_add_link("Max - Kuduz", date(2025, 6, 3));
        assert!(link.contains("text=Max+-+Kuduz"));
    }

    #[test]
    fn test_all_day_range_spans_one_day() {
        let link = calendar_add_link("Luna - Karma", date(2025, 12, 31));
        assert!(link.contains("dates=20251231%2F20260101"));
    }
}
