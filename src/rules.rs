//! Event source: date rules and the plain-text event file.
//!
//! Each non-empty, non-comment line of an event file reads
//! `RULE; [image] TEXT`. Rules are resolved against one calendar year:
//!
//! - `MM/DD` every year, `*/DD` every month
//! - `E`, `E+N`, `E-N` relative to Easter Sunday
//! - `MM/W#N` N-th weekday `W` (1=Mon..6=Sat, 0 or 7=Sun) of month `MM`
//! - `MM/DD?W+N`, `MM/DD?W-N` moved by `N` days when `MM/DD` is weekday `W`
//! - `DD-MM-YYYY`, `MM/DD/YYYY`, `YYYY-MM-DD` only in that year

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::{debug, info, warn};

use crate::error::CalendarError;
use crate::events::Event;

/// Where a rule lands in a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// A single (month, day).
    Date { month: u32, day: u32 },
    /// The given day of every month.
    EveryMonth { day: u32 },
}

/// Helper to parse fixed dates in DD-MM-YYYY, MM/DD/YYYY or YYYY-MM-DD format.
fn parse_fixed_date_rule(rule: &str) -> Option<NaiveDate> {
    ["%d-%m-%Y", "%m/%d/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(rule, fmt).ok())
}

/// Resolves `rule` for `year`; `None` if the rule is malformed or does not
/// occur in that year.
pub fn resolve_rule(rule: &str, year: i32) -> Option<Occurrence> {
    let rule = rule.trim();

    if let Some(date) = parse_fixed_date_rule(rule) {
        return (date.year() == year).then(|| occurrence(date));
    }

    // Easter relative rule: E[+-]N (E+1, E-2, E)
    if let Some(offset) = rule.strip_prefix('E') {
        let offset = if offset.is_empty() {
            0
        } else {
            offset.parse::<i64>().ok()?
        };
        return easter_sunday(year).map(|date| occurrence(date + Duration::days(offset)));
    }

    // Every month: */DD
    if let Some(day) = rule.strip_prefix("*/") {
        let day = day.parse::<u32>().ok()?;
        return Some(Occurrence::EveryMonth { day });
    }

    // Nth day of week: MM/DOW#N
    if let Some((date_part, n_str)) = rule.split_once('#') {
        let (month, dow_num) = date_part.split_once('/')?;
        let month = month.parse::<u32>().ok()?;
        let dow_num = dow_num.parse::<u32>().ok()?;
        let n = n_str.parse::<u32>().ok()?;
        return find_nth_dow(year, month, weekday_from_number(dow_num)?, n).map(occurrence);
    }

    // Conditional / bank holiday: MM/DD?D[+-]N
    if let Some((date_part, condition)) = rule.split_once('?') {
        let target_date = month_day(date_part, year)?;
        let mut chars = condition.chars();
        let target_weekday = weekday_from_number(chars.next()?.to_digit(10)?)?;
        let sign = match chars.next()? {
            '+' => 1,
            '-' => -1,
            _ => return None,
        };
        let offset = chars.as_str().parse::<i64>().ok()?;

        let date = if target_date.weekday() == target_weekday {
            target_date + Duration::days(sign * offset)
        } else {
            target_date
        };
        return Some(occurrence(date));
    }

    // Annual: MM/DD
    if rule.matches('/').count() == 1 {
        return month_day(rule, year).map(occurrence);
    }

    None
}

fn occurrence(date: NaiveDate) -> Occurrence {
    Occurrence::Date {
        month: date.month(),
        day: date.day(),
    }
}

fn month_day(part: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = part.split_once('/')?;
    NaiveDate::from_ymd_opt(year, month.trim().parse().ok()?, day.trim().parse().ok()?)
}

/// Maps 1=Mon..6=Sat and 0 or 7=Sun.
fn weekday_from_number(n: u32) -> Option<Weekday> {
    match n {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Easter Sunday of the Gregorian `year`; `None` before 1583.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < 1583 {
        return None;
    }

    let century = year / 100;
    let golden = year % 19;
    let skipped = (century - 17) / 25;

    // Days from March 21 to the paschal full moon.
    let mut moon = (century - century / 4 - (century - skipped) / 3 + 19 * golden + 15) % 30;
    moon -= (moon / 28) * (1 - (moon / 28) * (29 / (moon + 1)) * ((21 - golden) / 11));

    let weekday = (year + year / 4 + moon + 2 - century + century / 4) % 7;
    let offset = moon - weekday;
    let month = 3 + (offset + 40) / 44;
    let day = offset + 28 - 31 * (month / 4);

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Finds the `n`-th `weekday` of a month; `n == 5` falls back to the last one.
pub fn find_nth_dow(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 || n > 5 {
        return None;
    }

    let first_day_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shift = (7 + weekday.num_days_from_monday()
        - first_day_of_month.weekday().num_days_from_monday())
        % 7;
    let first = first_day_of_month + Duration::days(shift as i64);

    let mut date = first + Duration::weeks((n - 1) as i64);
    if n == 5 && date.month() != month {
        date -= Duration::weeks(1);
    }
    (date.month() == month).then_some(date)
}

/// Turns one rule into concrete events pinned to `year`.
pub fn events_for_rule(
    rule: &str,
    text: &str,
    image: Option<PathBuf>,
    year: i32,
) -> Result<Vec<Event>, CalendarError> {
    let events = match resolve_rule(rule, year) {
        Some(Occurrence::Date { month, day }) => vec![Event::new(month, day, text, image)?],
        Some(Occurrence::EveryMonth { day }) => Event::every_month(day, text, image)?,
        None => Vec::new(),
    };
    Ok(events.into_iter().map(|e| e.in_year(year)).collect())
}

/// Events for `rule` in `year` and both neighbouring years, so month grids
/// that spill into December or January see the right dates.
pub fn events_around(
    rule: &str,
    text: &str,
    image: Option<PathBuf>,
    year: i32,
) -> Result<Vec<Event>, CalendarError> {
    let mut events = Vec::new();
    for y in year - 1..=year + 1 {
        events.extend(events_for_rule(rule, text, image.clone(), y)?);
    }
    Ok(events)
}

/// Splits an event line into rule, optional image and text.
///
/// Returns `None` for blank lines and `#` comments.
pub fn split_event_line(line: &str) -> Option<(&str, Option<PathBuf>, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let Some((rule, rest)) = line.split_once(';') else {
        // For rules without semicolon, the description follows the first blank.
        return Some(match line.split_once(char::is_whitespace) {
            Some((rule, text)) => (rule, None, text.trim()),
            None => (line, None, ""),
        });
    };

    let rest = rest.trim();
    if let Some(meta) = rest.strip_prefix('[') {
        if let Some((image, text)) = meta.split_once(']') {
            let image = image.trim();
            let image = (!image.is_empty()).then(|| PathBuf::from(image));
            return Some((rule.trim(), image, text.trim()));
        }
    }
    Some((rule.trim(), None, rest))
}

/// Parses event-file contents for `year` and its neighbouring years.
///
/// Lines whose rule cannot be parsed or whose date is impossible are
/// skipped with a warning.
pub fn parse_events(contents: &str, year: i32) -> Vec<Event> {
    let mut events = Vec::new();
    for (line_num, line) in (1usize..).zip(contents.lines()) {
        let Some((rule, image, text)) = split_event_line(line) else {
            continue;
        };
        if resolve_rule(rule, year).is_none() && parse_fixed_date_rule(rule).is_none() {
            warn!(line = line_num, rule, "skipping unrecognised event rule");
            continue;
        }
        match events_around(rule, text, image, year) {
            Ok(found) => events.extend(found),
            Err(e) => warn!(line = line_num, rule, error = %e, "skipping event"),
        }
    }
    events
}

/// Loads the event file at `path` for `year` (see [`parse_events`]).
///
/// A missing file yields no events.
///
/// # Errors
///
/// Returns [`CalendarError::EventFile`] if the file exists but cannot be read.
pub fn load_event_file(path: &Path, year: i32) -> Result<Vec<Event>, CalendarError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let events = parse_events(&contents, year);
            debug!(path = %path.display(), count = events.len(), "events loaded");
            Ok(events)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "event file not found, continuing without events");
            Ok(Vec::new())
        }
        Err(source) => Err(CalendarError::EventFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(month: u32, day: u32) -> Option<Occurrence> {
        Some(Occurrence::Date { month, day })
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2024), Some(ymd(2024, 3, 31)));
        assert_eq!(easter_sunday(2019), Some(ymd(2019, 4, 21)));
        assert_eq!(easter_sunday(2025), Some(ymd(2025, 4, 20)));
        // Earliest and latest possible dates.
        assert_eq!(easter_sunday(1818), Some(ymd(1818, 3, 22)));
        assert_eq!(easter_sunday(1943), Some(ymd(1943, 4, 25)));
        assert_eq!(easter_sunday(2000), Some(ymd(2000, 4, 23)));
        assert_eq!(easter_sunday(1500), None);
    }

    #[test]
    fn easter_relative_rules() {
        assert_eq!(resolve_rule("E", 2024), at(3, 31));
        assert_eq!(resolve_rule("E+1", 2024), at(4, 1));
        assert_eq!(resolve_rule("E-2", 2024), at(3, 29));
        assert_eq!(resolve_rule("Ex", 2024), None);
    }

    #[test]
    fn nth_weekday_rules() {
        // Thanksgiving: fourth Thursday of November.
        assert_eq!(resolve_rule("11/4#4", 2024), at(11, 28));
        // Memorial Day: last Monday of May.
        assert_eq!(resolve_rule("5/1#5", 2024), at(5, 27));
        // Mother's Day (US): second Sunday of May, Sunday as 0.
        assert_eq!(resolve_rule("5/0#2", 2024), at(5, 12));
        assert_eq!(find_nth_dow(2024, 2, Weekday::Thu, 5), Some(ymd(2024, 2, 29)));
        assert_eq!(resolve_rule("5/1#0", 2024), None);
        assert_eq!(resolve_rule("5/9#1", 2024), None);
    }

    #[test]
    fn conditional_rules() {
        // 2022-12-25 is a Sunday; moved to Monday.
        assert_eq!(resolve_rule("12/25?0+1", 2022), at(12, 26));
        // 2024-12-25 is a Wednesday; stays.
        assert_eq!(resolve_rule("12/25?0+1", 2024), at(12, 25));
        // 2021-07-04 is a Sunday; observed the Friday before with a minus.
        assert_eq!(resolve_rule("7/4?0-2", 2021), at(7, 2));
        assert_eq!(resolve_rule("7/4?0*2", 2021), None);
    }

    #[test]
    fn annual_wildcard_and_fixed_rules() {
        assert_eq!(resolve_rule("7/4", 2024), at(7, 4));
        assert_eq!(resolve_rule("2/29", 2023), None);
        assert_eq!(resolve_rule("*/15", 2024), Some(Occurrence::EveryMonth { day: 15 }));
        assert_eq!(resolve_rule("24-12-2024", 2024), at(12, 24));
        assert_eq!(resolve_rule("24-12-2024", 2025), None);
        assert_eq!(resolve_rule("2024-06-01", 2024), at(6, 1));
        assert_eq!(resolve_rule("06/01/2024", 2024), at(6, 1));
        assert_eq!(resolve_rule("garbage", 2024), None);
    }

    #[test]
    fn split_lines_with_image_block() {
        assert_eq!(
            split_event_line("3/17; [clover.png] St. Patrick"),
            Some(("3/17", Some(PathBuf::from("clover.png")), "St. Patrick"))
        );
        assert_eq!(split_event_line("3/17; Plain"), Some(("3/17", None, "Plain")));
        assert_eq!(split_event_line("7/4 Independence Day"), Some(("7/4", None, "Independence Day")));
        assert_eq!(split_event_line("   "), None);
        assert_eq!(split_event_line("# comment"), None);
    }

    #[test]
    fn parse_events_expands_and_skips() {
        let contents = "\
# holidays
1/1; New Year
*/1; [rent.png] Rent\\ndue
E+1; Easter Monday
2/30; impossible
nonsense; skipped
";
        let all = parse_events(contents, 2024);
        assert!(all.iter().all(|e| matches!(e.year(), Some(2023..=2025))));

        let events: Vec<&Event> = all.iter().filter(|e| e.year() == Some(2024)).collect();
        // New Year + 12 rent days + Easter Monday.
        assert_eq!(events.len(), 14);
        assert_eq!(events[0].text(), "New Year");
        assert_eq!(events[1].image(), Some(&PathBuf::from("rent.png")));
        assert_eq!(events[1].text(), "Rent\\ndue");
        let easter_monday = events[13];
        assert_eq!((easter_monday.month(), easter_monday.day()), (4, 1));
    }

    #[test]
    fn neighbour_years_resolve_their_own_dates() {
        let events = events_around("E+1", "Easter Monday", None, 2024).unwrap();
        let dates: Vec<_> = events
            .iter()
            .map(|e| (e.year(), e.month(), e.day()))
            .collect();
        assert_eq!(
            dates,
            vec![(Some(2023), 4, 10), (Some(2024), 4, 1), (Some(2025), 4, 21)]
        );

        let fixed = events_around("2024-12-25", "Party", None, 2025).unwrap();
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].year(), Some(2024));
        assert!(events_around("2024-12-25", "Party", None, 2026).unwrap().is_empty());
    }
}
