use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::dialect::StationRule;

/// One airing pulled out of the "Broadcasts" listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Broadcast {
    /// Raw attribute value, ISO-like: `YYYY-MM-DDTHH:MM[:SS][+OFFSET]`.
    pub(crate) timestamp: String,
    pub(crate) station: String,
    pub(crate) title: String,
}

/// Where the scan currently is inside the listing markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Looking for a heading that might open the listing.
    Idle,
    /// Inside an `h2`, waiting for its text.
    Heading,
    /// Inside the listing, waiting for the next entry's date/time node.
    WaitEntry,
    /// Date/time node located, waiting for the timestamp attribute.
    WaitTimestamp,
    /// Timestamp captured, waiting for the station-identifying attribute.
    WaitStation,
    /// Station captured, waiting for the programme title text.
    WaitTitle,
    /// Full record ready, waiting for the entry's closing tag.
    EntryDone,
}

/// Tokenizer events the extractor reacts to. Tag and attribute names come
/// pre-decoded and lowercased so the transition logic is testable without
/// a real tokenizer.
#[derive(Debug)]
pub(crate) enum MarkupEvent<'e> {
    Open {
        tag: &'e str,
        attrs: &'e [(String, String)],
    },
    Text(&'e str),
    Close(&'e str),
}

pub(crate) const BROADCASTS_HEADING: &str = "Broadcasts";
const HEADING_TAG: &str = "h2";
const ENTRY_TAG: &str = "li";
const LISTING_TAG: &str = "ul";
const TIMESLOT_ATTR: &str = "datatype";
const TIMESTAMP_ATTR: &str = "content";

/// Single-pass scanner that rebuilds broadcast records from the listing
/// section. State is per-document; build a fresh one for each page.
pub(crate) struct Extractor<'a> {
    step: Step,
    timestamp: String,
    station: String,
    title: String,
    broadcasts: Vec<Broadcast>,
    finished: bool,
    station_filter: Option<&'a str>,
    rule: &'a dyn StationRule,
}

impl<'a> Extractor<'a> {
    pub(crate) fn new(station_filter: Option<&'a str>, rule: &'a dyn StationRule) -> Self {
        Self {
            step: Step::Idle,
            timestamp: String::new(),
            station: String::new(),
            title: String::new(),
            broadcasts: Vec::new(),
            finished: false,
            station_filter,
            rule,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    #[cfg(test)]
    pub(crate) fn step(&self) -> Step {
        self.step
    }

    /// The collected records, in document order. A listing that never
    /// closed (or was never found) yields nothing: no broadcasts section.
    pub(crate) fn into_broadcasts(self) -> Vec<Broadcast> {
        if self.finished {
            self.broadcasts
        } else {
            Vec::new()
        }
    }

    pub(crate) fn handle(&mut self, event: &MarkupEvent<'_>) {
        if self.finished {
            return;
        }
        match event {
            MarkupEvent::Open { tag, attrs } => self.on_open(tag, attrs),
            MarkupEvent::Text(text) => self.on_text(text),
            MarkupEvent::Close(tag) => self.on_close(tag),
        }
    }

    fn on_open(&mut self, tag: &str, attrs: &[(String, String)]) {
        if self.step == Step::Idle && tag == HEADING_TAG {
            self.step = Step::Heading;
            return;
        }
        for (attr, value) in attrs {
            match self.step {
                Step::WaitEntry if attr == TIMESLOT_ATTR => {
                    self.step = Step::WaitTimestamp;
                }
                Step::WaitTimestamp if attr == TIMESTAMP_ATTR => {
                    self.timestamp = value.clone();
                    self.step = Step::WaitStation;
                }
                Step::WaitStation => {
                    if let Some(code) = self.rule.station_from(attr, value) {
                        self.station = code;
                        self.step = Step::WaitTitle;
                    }
                }
                _ => {}
            }
        }
    }

    fn on_text(&mut self, text: &str) {
        match self.step {
            Step::Heading => {
                if text == BROADCASTS_HEADING {
                    debug!("found broadcasts heading");
                    self.step = Step::WaitEntry;
                } else {
                    self.step = Step::Idle;
                }
            }
            Step::WaitTitle => {
                self.title = text.to_string();
                self.step = Step::EntryDone;
            }
            _ => {}
        }
    }

    fn on_close(&mut self, tag: &str) {
        match self.step {
            Step::EntryDone if tag == ENTRY_TAG => {
                let keep = self
                    .station_filter
                    .is_none_or(|wanted| wanted == self.station);
                if keep {
                    debug!(
                        "record: {} {} - {}",
                        self.timestamp, self.station, self.title
                    );
                    self.broadcasts.push(Broadcast {
                        timestamp: std::mem::take(&mut self.timestamp),
                        station: std::mem::take(&mut self.station),
                        title: std::mem::take(&mut self.title),
                    });
                } else {
                    debug!("skipping {} entry at {}", self.station, self.timestamp);
                }
                self.step = Step::WaitEntry;
            }
            Step::WaitEntry if tag == LISTING_TAG => {
                debug!("listing closed with {} record(s)", self.broadcasts.len());
                self.finished = true;
            }
            _ => {}
        }
    }
}

/// Run the extractor over one complete markup document. Tokenizer trouble
/// is not an error: an unparseable or truncated page just means no records.
pub(crate) fn scan_document(
    html: &str,
    station_filter: Option<&str>,
    rule: &dyn StationRule,
) -> Vec<Broadcast> {
    let mut reader = Reader::from_reader(html.as_bytes());
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut extractor = Extractor::new(station_filter, rule);
    let mut buf = Vec::new();
    loop {
        if extractor.is_finished() {
            break;
        }
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let tag = decode_name(e.local_name().as_ref());
                let attrs = decode_attrs(&e);
                extractor.handle(&MarkupEvent::Open {
                    tag: &tag,
                    attrs: &attrs,
                });
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map(|cow| cow.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(t.as_ref()).into_owned());
                extractor.handle(&MarkupEvent::Text(text.trim()));
            }
            Ok(Event::End(e)) => {
                let tag = decode_name(e.local_name().as_ref());
                extractor.handle(&MarkupEvent::Close(&tag));
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                debug!("tokenizer stopped: {err}");
                break;
            }
            Ok(_) => {}
        }
        buf.clear();
    }
    extractor.into_broadcasts()
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn decode_attrs(e: &BytesStart<'_>) -> Vec<(String, String)> {
    e.attributes()
        .with_checks(false)
        .flatten()
        .map(|attr| {
            let name = decode_name(attr.key.local_name().as_ref());
            let value = attr
                .unescape_value()
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (name, value)
        })
        .collect()
}
