use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{info, warn};

use calgrid::rules::events_around;
use calgrid::{CalendarOptions, CalendarRequest, Event, FillPattern, Layout, WeekStart};

use crate::cli::{Cli, LayoutArg};

/// Top-level calgrid configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalgridConfig {
    /// Locale code for month and weekday names.
    #[serde(default)]
    pub locale: Option<String>,

    /// Note printed at the bottom of every page.
    #[serde(default)]
    pub footer: Option<String>,

    #[serde(default)]
    pub sunday_first: bool,

    #[serde(default)]
    pub layout: Option<LayoutArg>,

    /// Display toggles.
    #[serde(default)]
    pub options: OptionsToml,

    /// Extra events, using the event file's rule language.
    #[serde(default, rename = "event")]
    pub events: Vec<EventToml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsToml {
    #[serde(default)]
    pub hide_other_months: bool,
    #[serde(default)]
    pub hide_moon: bool,
    #[serde(default)]
    pub hide_week_number: bool,
    #[serde(default)]
    pub hide_day_of_year: bool,
    #[serde(default)]
    pub hide_events: bool,
    #[serde(default)]
    pub plain: bool,
    #[serde(default)]
    pub no_color: bool,
    #[serde(default)]
    pub year_spread: Option<u32>,
    #[serde(default)]
    pub fill_pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventToml {
    pub date: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

impl CalgridConfig {
    /// Reads the config file at `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("failed to parse config: {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("failed to read config: {}", path.display()))
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolves the `[[event]]` entries around `year`, skipping bad ones.
    pub fn events_for_year(&self, year: i32) -> Vec<Event> {
        let mut events = Vec::new();
        for entry in &self.events {
            match events_around(&entry.date, &entry.text, entry.image.clone(), year) {
                Ok(found) => events.extend(found),
                Err(e) => warn!(rule = %entry.date, error = %e, "skipping config event"),
            }
        }
        events
    }
}

/// Everything the renderer needs, after merging CLI and config file.
#[derive(Debug)]
pub struct Settings {
    pub request: CalendarRequest,
    pub layout: Layout,
    pub locale: String,
    pub footer: String,
}

/// Merges `cli` over `config`. `today` supplies the fallback year.
pub fn resolve(cli: &Cli, config: &CalgridConfig, today: NaiveDate) -> Settings {
    let file = &config.options;
    let mut options = CalendarOptions {
        hide_other_months: cli.noother || file.hide_other_months,
        hide_moon: cli.nomoon || file.hide_moon,
        hide_week_number: cli.noweek || file.hide_week_number,
        hide_day_of_year: cli.nodoy || file.hide_day_of_year,
        hide_events: cli.noevents || file.hide_events,
        plain: cli.plain || file.plain,
        no_color: cli.nocolor || file.no_color,
        week_start: if cli.sunday_first || config.sunday_first {
            WeekStart::Sunday
        } else {
            WeekStart::Monday
        },
        ..Default::default()
    };
    if let Some(pages) = cli.spread.or(file.year_spread) {
        options.set_year_spread(pages);
    }
    if let Some(pattern) = cli.fill.as_deref().or(file.fill_pattern.as_deref()) {
        options.fill_pattern = FillPattern::new(pattern);
    }

    let (begin, end, year) = month_range(&cli.numbers, today);
    let request = match CalendarRequest::new(begin, end, year, options.clone()) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "using the full year");
            CalendarRequest::full_year(year, options)
        }
    };

    let locale = cli
        .lang
        .clone()
        .or_else(|| config.locale.clone())
        .or_else(|| std::env::var("LANG").ok())
        .unwrap_or_else(|| "en_US".to_string());

    Settings {
        request,
        layout: cli.layout.or(config.layout).map(Layout::from).unwrap_or_default(),
        locale,
        footer: cli
            .footer
            .clone()
            .or_else(|| config.footer.clone())
            .unwrap_or_default(),
    }
}

/// Interprets the positional arguments as `(begin, end, year)`.
///
/// Values that are not numbers or out of range fall back to the current
/// year or the full year, with a warning.
pub fn month_range(args: &[String], today: NaiveDate) -> (u32, u32, i32) {
    let number = |arg: &String| arg.trim().parse::<i64>().ok();
    let (begin, end, year) = match args {
        [] => (Some(1), Some(12), Some(i64::from(today.year()))),
        [year] => (Some(1), Some(12), number(year)),
        [month, year] => (number(month), number(month), number(year)),
        [begin, end, year, ..] => (number(begin), number(end), number(year)),
    };

    let year = match year.and_then(|y| i32::try_from(y).ok()) {
        Some(year) if (1..=9999).contains(&year) => year,
        _ => {
            warn!(?args, "invalid year, using the current year");
            today.year()
        }
    };

    let month = |m: Option<i64>| {
        m.and_then(|m| u32::try_from(m).ok())
            .filter(|m| (1..=12).contains(m))
    };
    match (month(begin), month(end)) {
        (Some(begin), Some(end)) if begin <= end => (begin, end, year),
        _ => {
            warn!(?args, "invalid month range, using the full year");
            (1, 12, year)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn range(args: &[&str]) -> (u32, u32, i32) {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        month_range(&args, today())
    }

    #[test]
    fn positional_forms() {
        assert_eq!(range(&[]), (1, 12, 2026));
        assert_eq!(range(&["2019"]), (1, 12, 2019));
        assert_eq!(range(&["2", "2024"]), (2, 2, 2024));
        assert_eq!(range(&["3", "5", "2024"]), (3, 5, 2024));
    }

    #[test]
    fn invalid_positionals_fall_back() {
        assert_eq!(range(&["13", "2024"]), (1, 12, 2024));
        assert_eq!(range(&["5", "3", "2024"]), (1, 12, 2024));
        assert_eq!(range(&["2", "0"]), (2, 2, 2026));
        assert_eq!(range(&["-1"]), (1, 12, 2026));
        assert_eq!(range(&["feb", "2024"]), (1, 12, 2024));
        assert_eq!(range(&["2", "next"]), (2, 2, 2026));
    }

    #[test]
    fn non_numeric_and_negative_positionals_parse() {
        let cli = Cli::try_parse_from(["calgrid", "feb", "2024"]).unwrap();
        let settings = resolve(&cli, &CalgridConfig::default(), today());
        assert_eq!(settings.request.months(), 1..=12);
        assert_eq!(settings.request.year(), 2024);

        let cli = Cli::try_parse_from(["calgrid", "-1", "2024"]).unwrap();
        let settings = resolve(&cli, &CalgridConfig::default(), today());
        assert_eq!(settings.request.months(), 1..=12);
        assert_eq!(settings.request.year(), 2024);
    }

    #[test]
    fn parse_full_config() {
        let config = CalgridConfig::parse(
            r#"
            locale = "de_DE"
            footer = "Family calendar"
            sunday_first = true
            layout = "year-inverse"

            [options]
            hide_moon = true
            year_spread = 4
            fill_pattern = "S"

            [[event]]
            date = "12/24"
            text = "Christmas Eve"

            [[event]]
            date = "*/1"
            text = "Rent"
            image = "rent.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale.as_deref(), Some("de_DE"));
        assert_eq!(config.layout, Some(LayoutArg::YearInverse));
        assert!(config.options.hide_moon);
        assert_eq!(config.options.year_spread, Some(4));
        assert_eq!(config.events.len(), 2);

        let events = config.events_for_year(2024);
        let this_year = events.iter().filter(|e| e.year() == Some(2024)).count();
        // One for Christmas Eve, twelve for rent.
        assert_eq!(this_year, 13);
        assert_eq!(events.len(), 39);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(CalgridConfig::parse("colour = true").is_err());
        assert!(CalgridConfig::parse("[options]\nhide_sun = true").is_err());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = CalgridConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.events.is_empty());
        assert!(config.locale.is_none());
    }

    #[test]
    fn cli_overrides_file() {
        let config = CalgridConfig::parse(
            r#"
            locale = "de_DE"
            footer = "from file"
            layout = "year"

            [options]
            year_spread = 4
            fill_pattern = "S"
            "#,
        )
        .unwrap();
        let cli = Cli::parse_from([
            "calgrid", "--lang", "fr_FR", "--layout", "month", "--spread", "6", "--nomoon", "2",
            "2024",
        ]);
        let settings = resolve(&cli, &config, today());
        assert_eq!(settings.locale, "fr_FR");
        assert_eq!(settings.footer, "from file");
        assert_eq!(settings.layout, Layout::Month);
        assert_eq!(settings.request.options.year_spread.get(), 6);
        assert_eq!(settings.request.options.fill_pattern.as_str(), "S");
        assert!(settings.request.options.hide_moon);
        assert_eq!(settings.request.months(), 2..=2);
        assert_eq!(settings.request.year(), 2024);
    }
}
