use crate::core::store::{SITE_OFFSET, to_site_time};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Today's date at the site, not at the machine running the CLI.
pub fn today() -> NaiveDate {
    now_at_site().date_naive()
}

pub fn now_at_site() -> DateTime<FixedOffset> {
    to_site_time(&Utc::now())
}

/// Parse an RFC 3339 instant; a naive `YYYY-MM-DDTHH:MM[:SS]` is read as site time.
pub fn parse_scan_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| naive.and_local_timezone(SITE_OFFSET).single())
}

/// Short display form used in tables: `HH:MM:SS` at the site offset.
pub fn clock(ts: &DateTime<FixedOffset>) -> String {
    to_site_time(ts).format("%H:%M:%S").to_string()
}
