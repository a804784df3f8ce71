use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "chknew",
    version,
    about = "Check that a BBC programme was NOT broadcast before a given time"
)]
pub struct Cli {
    /// Look for repeats only on this station. The code is the one in the
    /// station's svg logo URL, minus the "bbc_" prefix on radio stations
    /// (e.g. bbc_one, radio_four, radio_four_extra)
    #[arg(short, long)]
    pub station: Option<String>,

    /// Eight-character programme id, or a full programme page URL
    pub pid: String,

    /// Scheduled time in getPids format, yyyy/mm/dd-hh:mm (default: now)
    pub time: Option<String>,
}
