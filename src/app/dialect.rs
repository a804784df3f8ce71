/// How to pull a station short code out of a tag attribute. The listing
/// markup has changed shape over the years, so the derivation rule is kept
/// separate from the scanner; a new page shape needs a new rule, not a new
/// state machine.
pub(crate) trait StationRule {
    fn station_from(&self, attr: &str, value: &str) -> Option<String>;
}

/// Entries link to the station's schedule page; the short code is the last
/// path segment of the href.
pub(crate) struct AnchorHref;

impl StationRule for AnchorHref {
    fn station_from(&self, attr: &str, value: &str) -> Option<String> {
        if attr != "href" {
            return None;
        }
        let tail = value.rsplit('/').next().unwrap_or(value);
        Some(tail.to_string())
    }
}

/// Entries carry the station's svg logo; the short code is the path segment
/// after `/svg/`, with the superfluous `bbc_` dropped from the front of
/// radio station names (`bbc_radio_four` -> `radio_four`).
pub(crate) struct SvgLogo;

impl StationRule for SvgLogo {
    fn station_from(&self, attr: &str, value: &str) -> Option<String> {
        if attr != "src" {
            return None;
        }
        let idx = value.find("/svg/")?;
        let tail = &value[idx + "/svg/".len()..];
        let segment = tail.split('/').next().unwrap_or(tail);
        let code = match segment.strip_prefix("bbc_radio") {
            Some(rest) => format!("radio{rest}"),
            None => segment.to_string(),
        };
        Some(code)
    }
}
