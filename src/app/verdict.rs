use chrono::NaiveDateTime;

use super::listing::Broadcast;

/// Outcome of checking a listing against the cutoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// An earlier airing exists. `title` is None when a station filter was
    /// active, because then the caller already knows where it aired.
    Repeat {
        when: String,
        title: Option<String>,
    },
    New,
}

/// Strip the seconds-plus-offset tail the listing timestamps carry. UK
/// broadcast schedules only ever show +00:00 or +01:00, so dropping this
/// fixed suffix is the entire timezone story here.
pub(crate) fn normalize_timestamp(raw: &str) -> &str {
    raw.strip_suffix(":00+01:00")
        .or_else(|| raw.strip_suffix(":00+00:00"))
        .unwrap_or(raw)
}

pub(crate) fn format_when(normalized: &str) -> String {
    match NaiveDateTime::parse_from_str(normalized, "%Y-%m-%dT%H:%M") {
        Ok(when) => when.format("%a %d %b %Y %H:%M").to_string(),
        Err(_) => normalized.to_string(),
    }
}

/// Walk the listing from its end looking for the first airing strictly
/// before the cutoff. The page lists broadcasts oldest first, so the first
/// hit going backward is the most recent repeat. Note this is a scan in
/// listing order, not a max over timestamps: a page that isn't actually
/// chronological gives the page's answer, not the calendar's.
///
/// Both sides of the comparison are zero-padded ISO-ordered strings with
/// the same precision, so comparing them lexicographically is comparing
/// them chronologically.
pub(crate) fn decide(broadcasts: &[Broadcast], cutoff: &str, station_known: bool) -> Verdict {
    for broadcast in broadcasts.iter().rev() {
        let when = normalize_timestamp(&broadcast.timestamp);
        if when < cutoff {
            return Verdict::Repeat {
                when: format_when(when),
                title: (!station_known).then(|| broadcast.title.clone()),
            };
        }
    }
    Verdict::New
}
