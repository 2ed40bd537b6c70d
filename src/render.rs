//! Page composition: turns annotated grids into ordered draw calls.

use chrono::{Datelike, Weekday};
use tracing::debug;

use crate::annotate::{DayCell, MAX_DAYS, YearOrientation, month_grid, year_page};
use crate::error::CalendarError;
use crate::events::{Event, text_lines};
use crate::locale::NameProvider;
use crate::options::{CalendarOptions, CalendarRequest};
use crate::ordinal::iso_week;
use crate::photos::PhotoList;
use crate::spread::partition;
use crate::surface::{CellLook, Surface};

/// Width of a day cell in the month layout.
const DAY_WIDTH: usize = 5;
/// Width of the week-number column.
const WEEK_WIDTH: usize = 3;
/// Width of a day cell in the month-rows year layout.
const YEAR_DAY_WIDTH: usize = 3;
/// Width of a month column in the day-rows year layout.
const YEAR_MONTH_WIDTH: usize = 14;
/// Width of the row label in year layouts.
const YEAR_LABEL_WIDTH: usize = 10;

/// Page style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// One 6×7 grid per requested month.
    #[default]
    Month,
    /// Months as rows, days of month as columns.
    Year,
    /// Days of month as rows, months as columns.
    YearInverse,
}

/// Everything on a page that is not derived from the dates.
pub struct PageDecor<'a> {
    pub names: &'a dyn NameProvider,
    pub photos: &'a PhotoList,
    pub footer: &'a str,
}

/// Renders `request` in `layout` onto `surface`.
///
/// # Errors
///
/// Returns [`CalendarError::Output`] when the surface fails and
/// [`CalendarError::InvalidMonth`] for months outside 1..=12.
pub fn render(
    surface: &mut dyn Surface,
    layout: Layout,
    request: &CalendarRequest,
    events: &[Event],
    decor: &PageDecor<'_>,
) -> Result<(), CalendarError> {
    match layout {
        Layout::Month => render_months(surface, request, events, decor),
        Layout::Year => render_year(surface, request, YearOrientation::MonthRows, events, decor),
        Layout::YearInverse => {
            render_year(surface, request, YearOrientation::DayRows, events, decor)
        }
    }
}

/// One month grid page per requested month.
pub fn render_months(
    surface: &mut dyn Surface,
    request: &CalendarRequest,
    events: &[Event],
    decor: &PageDecor<'_>,
) -> Result<(), CalendarError> {
    let options = &request.options;
    let year = request.year();

    for month in request.months() {
        debug!(year, month, "rendering month page");
        let grid = month_grid(year, month, options, events)?;

        let title = format!("{} {}", decor.names.month_name(month), year);
        surface.begin_page(&title)?;
        if let Some(photo) = decor.photos.get(month)? {
            surface.place_image(photo)?;
        }

        weekday_header(surface, options, decor.names)?;

        for row in grid.rows() {
            if options.show_week_number() {
                // Blank neighbour cells carry no week, so read it off the row's Monday.
                let week = row
                    .iter()
                    .find(|c| c.weekday() == Weekday::Mon)
                    .map(|c| iso_week(c.date).to_string())
                    .unwrap_or_default();
                surface.small(&week, WEEK_WIDTH)?;
            }
            for cell in row {
                let text = if cell.blank {
                    String::new()
                } else {
                    cell.date.day().to_string()
                };
                surface.cell(&text, DAY_WIDTH, CellLook::of(cell))?;
            }
            surface.advance_line()?;

            if row.iter().any(|c| c.day_of_year.is_some()) {
                if options.show_week_number() {
                    surface.small("", WEEK_WIDTH)?;
                }
                for cell in row {
                    let doy = cell.day_of_year.map(|d| d.to_string()).unwrap_or_default();
                    surface.small(&format!("{doy} "), DAY_WIDTH)?;
                }
                surface.advance_line()?;
            }
        }

        event_list(surface, grid.cells(), month, decor.names)?;
        surface.end_page(decor.footer)?;
    }
    Ok(())
}

fn weekday_header(
    surface: &mut dyn Surface,
    options: &CalendarOptions,
    names: &dyn NameProvider,
) -> Result<(), CalendarError> {
    if options.show_week_number() {
        surface.small("Wk", WEEK_WIDTH)?;
    }
    for weekday in options.week_start.weekdays() {
        let weekend = !options.no_color && is_weekend(weekday);
        surface.label(&format!("{} ", names.weekday_short(weekday)), DAY_WIDTH, weekend)?;
    }
    surface.advance_line()?;
    Ok(())
}

/// Lists the events of the month's own days below the grid, one line per
/// text line.
fn event_list(
    surface: &mut dyn Surface,
    cells: &[DayCell<'_>],
    month: u32,
    names: &dyn NameProvider,
) -> Result<(), CalendarError> {
    for cell in cells.iter().filter(|c| !c.blank && c.date.month() == month) {
        for event in &cell.events {
            let when = format!(
                "{} {:>2}",
                names.weekday_short(cell.weekday()),
                cell.date.day()
            );
            for (i, line) in text_lines(event.text()).enumerate() {
                let prefix = if i == 0 { when.as_str() } else { "" };
                surface.label(prefix, 6, cell.weekend)?;
                surface.label(&format!("  {line}"), 0, false)?;
                surface.advance_line()?;
            }
            if let Some(image) = event.image() {
                surface.place_image(image)?;
            }
        }
    }
    Ok(())
}

/// Year pages split by the request's year spread.
pub fn render_year(
    surface: &mut dyn Surface,
    request: &CalendarRequest,
    orientation: YearOrientation,
    events: &[Event],
    decor: &PageDecor<'_>,
) -> Result<(), CalendarError> {
    let options = &request.options;
    let year = request.year();
    let plan = partition(options.year_spread);

    for months in plan.iter() {
        debug!(year, ?months, ?orientation, "rendering year page");
        let page = year_page(year, months.clone(), orientation, options, events)?;

        let title = if plan.pages_count() == 1 {
            year.to_string()
        } else if months.start() == months.end() {
            format!("{} {}", decor.names.month_name(*months.start()), year)
        } else {
            format!(
                "{} – {} {}",
                decor.names.month_name(*months.start()),
                decor.names.month_name(*months.end()),
                year
            )
        };
        surface.begin_page(&title)?;
        if let Some(photo) = decor.photos.get(*months.start())? {
            surface.place_image(photo)?;
        }

        match orientation {
            YearOrientation::MonthRows => {
                surface.label("", YEAR_LABEL_WIDTH, false)?;
                for day in 1..=MAX_DAYS {
                    surface.small(&format!("{day} "), YEAR_DAY_WIDTH)?;
                }
                surface.advance_line()?;

                for (month, row) in months.clone().zip(page.rows()) {
                    surface.label(&decor.names.month_name(month), YEAR_LABEL_WIDTH, false)?;
                    for slot in row {
                        year_cell(surface, slot.as_ref(), YEAR_DAY_WIDTH, decor.names, false)?;
                    }
                    surface.advance_line()?;
                }
            }
            YearOrientation::DayRows => {
                surface.label("", WEEK_WIDTH, false)?;
                for month in months.clone() {
                    surface.label(&decor.names.month_name(month), YEAR_MONTH_WIDTH, false)?;
                }
                surface.advance_line()?;

                for (day, row) in (1..=MAX_DAYS).zip(page.rows()) {
                    surface.small(&day.to_string(), WEEK_WIDTH)?;
                    for slot in row {
                        year_cell(surface, slot.as_ref(), YEAR_MONTH_WIDTH, decor.names, true)?;
                    }
                    surface.advance_line()?;
                }
            }
        }

        surface.end_page(decor.footer)?;
    }
    Ok(())
}

/// One slot of a year page. Narrow cells show the weekday; wide cells add
/// the week number and the start of the first event.
fn year_cell(
    surface: &mut dyn Surface,
    cell: Option<&DayCell<'_>>,
    width: usize,
    names: &dyn NameProvider,
    wide: bool,
) -> Result<(), CalendarError> {
    let Some(cell) = cell else {
        surface.cell("", width, CellLook::default())?;
        return Ok(());
    };

    let mut text = names.weekday_short(cell.weekday());
    if wide {
        let week = cell.iso_week.map(|w| format!("W{w:02}")).unwrap_or_default();
        text = format!("{text} {week:<3}");
        if let Some(line) = cell.events.first().and_then(|e| text_lines(e.text()).next()) {
            let room = width.saturating_sub(text.chars().count() + 2);
            let short: String = line.chars().take(room).collect();
            text = format!("{text} {short}");
        }
        text = format!("{text:<w$}", w = width - 1);
    }
    surface.cell(&text, width, CellLook::of(cell))?;
    Ok(())
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
