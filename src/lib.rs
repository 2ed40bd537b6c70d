//! Calendar grid computation and annotation.
//!
//! For a requested month range (or a whole year) the engine decides which
//! date sits in every cell of a page and what each cell carries: neighbour
//! month flag, moon phase, ISO week, day of year, matching events and
//! background fill. [`render`] composes the annotated grids into pages on
//! any [`Surface`].
//!
//! ```no_run
//! use calgrid::{
//!     AnsiSurface, CalendarOptions, CalendarRequest, ChronoNames, Layout, PageDecor, PhotoList,
//!     render,
//! };
//!
//! let request = CalendarRequest::new(2, 2, 2024, CalendarOptions::default())?;
//! let names = ChronoNames::default();
//! let photos = PhotoList::default();
//! let decor = PageDecor { names: &names, photos: &photos, footer: "" };
//! let mut surface = AnsiSurface::new(std::io::stdout(), true);
//! render(&mut surface, Layout::Month, &request, &[], &decor)?;
//! # Ok::<(), calgrid::CalendarError>(())
//! ```

pub mod annotate;
pub mod error;
pub mod events;
pub mod fill;
pub mod grid;
pub mod locale;
pub mod moon;
pub mod options;
pub mod ordinal;
pub mod photos;
pub mod render;
pub mod rules;
pub mod spread;
pub mod surface;

pub use annotate::{DayCell, MonthGrid, YearOrientation, YearPage, month_grid, year_page};
pub use error::CalendarError;
pub use events::{Event, match_events};
pub use fill::{FillPattern, should_fill};
pub use grid::{DateGrid, build_grid};
pub use locale::{ChronoNames, NameProvider};
pub use moon::{MoonPhase, MoonPhases, locate_moon_phases};
pub use options::{CalendarOptions, CalendarRequest, WeekStart};
pub use ordinal::{day_of_year, iso_week};
pub use photos::PhotoList;
pub use render::{Layout, PageDecor, render};
pub use rules::{events_around, load_event_file, parse_events};
pub use spread::{YearSpread, YearSpreadPlan, partition};
pub use surface::{AnsiSurface, Surface};
