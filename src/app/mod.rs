mod dialect;
mod listing;
mod verdict;


use chrono::Local;
use log::{info, warn};

use crate::cli::Cli;
use crate::error::ChkError;
use crate::http::{self, FetchError};

use self::dialect::{AnchorHref, SvgLogo};
use self::listing::{Broadcast, scan_document};
use self::verdict::{Verdict, decide};

const PROGRAMME_URL_BASE: &str = "http://www.bbc.co.uk/programmes/";
const PID_LEN: usize = 8;
const CUTOFF_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Fetch the programme page and check its broadcasts against the cutoff.
/// Returns the process exit status: 0 = new programme, 1 = repeat found.
pub fn run(cli: Cli) -> Result<i32, ChkError> {
    let url = resolve_url(&cli.pid)?;
    let cutoff = match cli.time.as_deref() {
        Some(raw) => normalize_cutoff(raw).ok_or_else(|| ChkError::BadTime(raw.to_string()))?,
        None => Local::now().format(CUTOFF_FORMAT).to_string(),
    };

    let page = http::fetch_page(&url).map_err(|err| match err {
        FetchError::Status(status) => {
            warn!("HTTP status {status} for {url}");
            ChkError::Fetch(url.clone())
        }
        FetchError::Transport(detail) => {
            warn!("transport failure for {url}: {detail}");
            ChkError::Network
        }
    })?;

    let station = cli.station.as_deref();
    let broadcasts = extract_broadcasts(&page, station);
    info!(
        "{} broadcast(s) to check against cutoff {cutoff}",
        broadcasts.len()
    );

    match decide(&broadcasts, &cutoff, station.is_some()) {
        Verdict::Repeat {
            when,
            title: Some(title),
        } => {
            println!("{when} - {title}");
            Ok(1)
        }
        Verdict::Repeat { when, title: None } => {
            println!("{when}");
            Ok(1)
        }
        Verdict::New => Ok(0),
    }
}

/// Scan with the schedule-link markup rule first; if that finds nothing,
/// try the svg-logo variant the site has also used.
pub(crate) fn extract_broadcasts(page: &str, station: Option<&str>) -> Vec<Broadcast> {
    let broadcasts = scan_document(page, station, &AnchorHref);
    if !broadcasts.is_empty() {
        return broadcasts;
    }
    scan_document(page, station, &SvgLogo)
}

fn resolve_url(pid: &str) -> Result<String, ChkError> {
    if pid.contains('/') {
        return Ok(pid.to_string());
    }
    if pid.chars().count() != PID_LEN {
        return Err(ChkError::BadPid(pid.to_string()));
    }
    Ok(format!("{PROGRAMME_URL_BASE}{pid}"))
}

/// `yyyy/mm/dd-hh:mm` (getPids format) -> `YYYY-MM-DDTHH:MM`, the shape
/// record timestamps are normalized to before comparison.
fn normalize_cutoff(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() != 16 {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'/',
            10 => b == b'-',
            13 => b == b':',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return None;
        }
    }
    Some(format!(
        "{}-{}-{}T{}",
        &raw[0..4],
        &raw[5..7],
        &raw[8..10],
        &raw[11..16]
    ))
}
