//! Drawing surfaces.
//!
//! The renderer only issues ordered draw calls; a [`Surface`] turns them
//! into output. [`AnsiSurface`] writes a terminal page with ANSI colors.

use std::io::{self, Write};
use std::path::Path;

use crate::annotate::DayCell;
use crate::moon::MoonPhase;

const BOLD_CODE: &str = "\x1b[1m";
const RESET_CODE: &str = "\x1b[0m";
const RED_CODE: &str = "\x1b[31m";
const BLUE_CODE: &str = "\x1b[34m";
const GREY_CODE: &str = "\x1b[90m";
const REVERSE_CODE: &str = "\x1b[7m";
const FILL_CODE: &str = "\x1b[47m\x1b[30m";

/// Decoration of one day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellLook {
    pub weekend: bool,
    /// Neighbour-month day.
    pub dim: bool,
    pub fill: bool,
    /// The day has events.
    pub marked: bool,
    pub moon: Option<MoonPhase>,
}

impl CellLook {
    pub fn of(cell: &DayCell<'_>) -> Self {
        if cell.blank {
            return Self::default();
        }
        Self {
            weekend: cell.weekend,
            dim: cell.outside_month,
            fill: cell.fill,
            marked: !cell.events.is_empty(),
            moon: cell.moon_phase,
        }
    }
}

/// Glyph drawn for a phase.
pub fn moon_glyph(phase: MoonPhase) -> char {
    match phase {
        MoonPhase::New => '○',
        MoonPhase::FirstQuarter => '◐',
        MoonPhase::Full => '●',
        MoonPhase::LastQuarter => '◑',
    }
}

/// Receives draw calls in page order.
pub trait Surface {
    /// Starts a page headed by `title`.
    fn begin_page(&mut self, title: &str) -> io::Result<()>;

    /// Places a picture on the current page.
    fn place_image(&mut self, path: &Path) -> io::Result<()>;

    /// Places `text` right-aligned in a field of `width` columns.
    fn label(&mut self, text: &str, width: usize, weekend: bool) -> io::Result<()>;

    /// Places a day cell of `width` columns; the last column holds the moon.
    fn cell(&mut self, text: &str, width: usize, look: CellLook) -> io::Result<()>;

    /// Places secondary text (week numbers, day of year) in `width` columns.
    fn small(&mut self, text: &str, width: usize) -> io::Result<()>;

    /// Moves to the next line.
    fn advance_line(&mut self) -> io::Result<()>;

    /// Finishes the page with `footer`.
    fn end_page(&mut self, footer: &str) -> io::Result<()>;
}

/// Terminal output, with or without ANSI escapes.
pub struct AnsiSurface<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> AnsiSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&mut self, codes: &str, text: &str) -> io::Result<()> {
        if self.color && !codes.is_empty() {
            write!(self.out, "{codes}{text}{RESET_CODE}")
        } else {
            write!(self.out, "{text}")
        }
    }
}

impl<W: Write> Surface for AnsiSurface<W> {
    fn begin_page(&mut self, title: &str) -> io::Result<()> {
        self.styled(BOLD_CODE, title)?;
        writeln!(self.out)
    }

    fn place_image(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "[image: {}]", path.display())
    }

    fn label(&mut self, text: &str, width: usize, weekend: bool) -> io::Result<()> {
        let padded = format!("{text:>width$}");
        self.styled(if weekend { RED_CODE } else { "" }, &padded)
    }

    fn cell(&mut self, text: &str, width: usize, look: CellLook) -> io::Result<()> {
        let text_width = width.saturating_sub(1);
        let moon = look.moon.map(moon_glyph).unwrap_or(' ');
        let padded = format!("{text:>text_width$}{moon}");

        let mut format_codes = String::new();
        if look.fill {
            format_codes.push_str(FILL_CODE);
        }
        if look.dim {
            format_codes.push_str(GREY_CODE);
        } else if look.weekend {
            format_codes.push_str(RED_CODE);
            if look.marked {
                format_codes.push_str(BOLD_CODE);
            }
        }
        if look.marked && !look.weekend {
            format_codes.push_str(REVERSE_CODE);
        }
        self.styled(&format_codes, &padded)
    }

    fn small(&mut self, text: &str, width: usize) -> io::Result<()> {
        let padded = format!("{text:>width$}");
        self.styled(BLUE_CODE, &padded)
    }

    fn advance_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn end_page(&mut self, footer: &str) -> io::Result<()> {
        if !footer.is_empty() {
            self.styled(GREY_CODE, footer)?;
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> AnsiSurface<Vec<u8>> {
        AnsiSurface::new(Vec::new(), false)
    }

    fn output(surface: AnsiSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn cell_reserves_moon_column() {
        let mut s = plain();
        s.cell("9", 5, CellLook::default()).unwrap();
        s.cell(
            "24",
            5,
            CellLook {
                moon: Some(MoonPhase::Full),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(output(s), "   9   24●");
    }

    #[test]
    fn colors_follow_look() {
        let mut s = AnsiSurface::new(Vec::new(), true);
        s.cell(
            "3",
            3,
            CellLook {
                weekend: true,
                ..Default::default()
            },
        )
        .unwrap();
        s.cell(
            "4",
            3,
            CellLook {
                marked: true,
                ..Default::default()
            },
        )
        .unwrap();
        let out = output(s);
        assert!(out.starts_with("\x1b[31m 3 \x1b[0m"), "{out:?}");
        assert!(out.ends_with("\x1b[7m 4 \x1b[0m"), "{out:?}");
    }

    #[test]
    fn page_frame() {
        let mut s = plain();
        s.begin_page("May 2024").unwrap();
        s.place_image(Path::new("taxi.jpg")).unwrap();
        s.label("Mo", 5, false).unwrap();
        s.advance_line().unwrap();
        s.end_page("Printed at home").unwrap();
        assert_eq!(output(s), "May 2024\n[image: taxi.jpg]\n   Mo\nPrinted at home\n\n");
    }

    #[test]
    fn blank_cells_have_no_decoration() {
        let cell = DayCell {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 28).unwrap(),
            outside_month: true,
            blank: true,
            weekend: true,
            moon_phase: Some(MoonPhase::New),
            iso_week: None,
            day_of_year: None,
            events: Vec::new(),
            fill: true,
        };
        assert_eq!(CellLook::of(&cell), CellLook::default());

        let shown = DayCell { blank: false, ..cell };
        let look = CellLook::of(&shown);
        assert!(look.dim && look.weekend && look.fill);
        assert_eq!(look.moon, Some(MoonPhase::New));
    }
}
