use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Calendar pages with week numbers, day of year, moon phases and events.
#[derive(Parser, Debug)]
#[command(
    name = "calgrid",
    version,
    about = "Month and year calendar pages for the terminal"
)]
pub struct Cli {
    /// YEAR | MONTH YEAR | BEGIN END YEAR. Defaults to the current year.
    #[arg(value_name = "NUMBERS", num_args = 0..=3, allow_negative_numbers = true)]
    pub numbers: Vec<String>,

    /// Page layout.
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Pages a year layout is split into (1, 2, 3, 4, 6 or 12).
    #[arg(short, long)]
    pub spread: Option<u32>,

    /// Background fill codes (S s Y y X x c C).
    #[arg(short, long)]
    pub fill: Option<String>,

    /// Leave days of neighbouring months blank.
    #[arg(long)]
    pub noother: bool,

    /// Hide moon phases.
    #[arg(long)]
    pub nomoon: bool,

    /// Hide ISO week numbers.
    #[arg(long)]
    pub noweek: bool,

    /// Hide day-of-year counters.
    #[arg(long)]
    pub nodoy: bool,

    /// Hide events.
    #[arg(long)]
    pub noevents: bool,

    /// Disable ANSI colors and weekend highlighting.
    #[arg(long)]
    pub nocolor: bool,

    /// Hide moon, week numbers, day of year and events.
    #[arg(long)]
    pub plain: bool,

    /// Locale for month and weekday names, e.g. de_DE. Defaults to $LANG.
    #[arg(long)]
    pub lang: Option<String>,

    /// Start weeks on Sunday.
    #[arg(long)]
    pub sunday_first: bool,

    /// Event rule file.
    #[arg(short, long, default_value = "events.txt")]
    pub events: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "calgrid.toml")]
    pub config: PathBuf,

    /// Picture shown on every month page.
    #[arg(long, conflicts_with = "photos")]
    pub photo: Option<PathBuf>,

    /// Directory of pictures assigned to months in name order.
    #[arg(long)]
    pub photos: Option<PathBuf>,

    /// Note printed at the bottom of every page.
    #[arg(long)]
    pub footer: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutArg {
    Month,
    Year,
    YearInverse,
}

impl From<LayoutArg> for calgrid::Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Month => calgrid::Layout::Month,
            LayoutArg::Year => calgrid::Layout::Year,
            LayoutArg::YearInverse => calgrid::Layout::YearInverse,
        }
    }
}
