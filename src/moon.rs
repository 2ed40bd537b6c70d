//! Moon phase events at day granularity.
//!
//! Phase instants follow Jean Meeus, *Astronomical Algorithms* (2nd ed.),
//! chapter 49: the mean phase for lunation `k` plus the periodic terms and
//! the fourteen planetary corrections. The result is a Julian Ephemeris Day
//! (TT); the difference to UT is well below the one-day resolution needed
//! here, so dates are read off directly.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use tracing::{trace, warn};

use crate::ordinal::{day_of_year, days_in_year, is_leap_year};

/// Days scanned per month, counted from the grid start.
pub const SCAN_DAYS: u32 = 32;

/// Julian day of 0001-01-01 00:00 minus one day, the offset between
/// chrono's day count from the Common Era and the Julian day at midnight.
const JD_CE_EPOCH: f64 = 1_721_424.5;

/// The four named lunar phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonPhase {
    /// Order in which the locator queries the phases.
    pub const SCAN_ORDER: [MoonPhase; 4] = [
        MoonPhase::New,
        MoonPhase::Full,
        MoonPhase::FirstQuarter,
        MoonPhase::LastQuarter,
    ];

    /// Fraction of a lunation after new moon.
    fn lunation_fraction(self) -> f64 {
        match self {
            MoonPhase::New => 0.0,
            MoonPhase::FirstQuarter => 0.25,
            MoonPhase::Full => 0.5,
            MoonPhase::LastQuarter => 0.75,
        }
    }
}

/// Julian day for a Gregorian calendar date; `day` may carry a fraction.
pub fn julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Calendar date containing the instant `jd`.
pub fn jd_to_date(jd: f64) -> Option<NaiveDate> {
    let days = (jd - JD_CE_EPOCH).floor();
    if !days.is_finite() || days.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

/// Julian day of a fractional year such as `2024.5`.
///
/// The fraction is measured in days of the integral year, so
/// `year + (doy - 1) / days_in_year` maps back to midnight of day `doy`.
pub fn jd_from_decimal_year(decimal_year: f64) -> f64 {
    let year = decimal_year.floor();
    let days = if is_leap_year(year as i32) { 366.0 } else { 365.0 };
    julian_day(year as i32, 1, 1.0) + (decimal_year - year) * days
}

/// JDE of `phase` in lunation `k` (integral for new moon, `.25`/`.5`/`.75`
/// for the others, counted from the new moon of 2000-01-06).
pub fn phase_jde(phase: MoonPhase, k: f64) -> f64 {
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = 2_451_550.09766 + 29.530588861 * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;

    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = deg(2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3);
    let mp = deg(
        201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3 - 0.000000058 * t4,
    );
    let f = deg(160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3
        + 0.000000011 * t4);
    let om = deg(124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3);

    let periodic = match phase {
        MoonPhase::New | MoonPhase::Full => {
            let (c0, c1, c2, c3, c4) = if phase == MoonPhase::New {
                (-0.40720, 0.17241, 0.01608, 0.01039, 0.00739)
            } else {
                (-0.40614, 0.17302, 0.01614, 0.01043, 0.00734)
            };
            let c6 = if phase == MoonPhase::New { 0.00208 } else { 0.00209 };
            c0 * mp.sin() + c1 * e * m.sin() + c2 * (2.0 * mp).sin() + c3 * (2.0 * f).sin()
                + c4 * e * (mp - m).sin()
                - 0.00514 * e * (mp + m).sin()
                + c6 * e * e * (2.0 * m).sin()
                - 0.00111 * (mp - 2.0 * f).sin()
                - 0.00057 * (mp + 2.0 * f).sin()
                + 0.00056 * e * (2.0 * mp + m).sin()
                - 0.00042 * (3.0 * mp).sin()
                + 0.00042 * e * (m + 2.0 * f).sin()
                + 0.00038 * e * (m - 2.0 * f).sin()
                - 0.00024 * e * (2.0 * mp - m).sin()
                - 0.00017 * om.sin()
                - 0.00007 * (mp + 2.0 * m).sin()
                + 0.00004 * (2.0 * mp - 2.0 * f).sin()
                + 0.00004 * (3.0 * m).sin()
                + 0.00003 * (mp + m - 2.0 * f).sin()
                + 0.00003 * (2.0 * mp + 2.0 * f).sin()
                - 0.00003 * (mp + m + 2.0 * f).sin()
                + 0.00003 * (mp - m + 2.0 * f).sin()
                - 0.00002 * (mp - m - 2.0 * f).sin()
                - 0.00002 * (3.0 * mp + m).sin()
                + 0.00002 * (4.0 * mp).sin()
        }
        MoonPhase::FirstQuarter | MoonPhase::LastQuarter => {
            let quarter = -0.62801 * mp.sin() + 0.17172 * e * m.sin()
                - 0.01183 * e * (mp + m).sin()
                + 0.00862 * (2.0 * mp).sin()
                + 0.00804 * (2.0 * f).sin()
                + 0.00454 * e * (mp - m).sin()
                + 0.00204 * e * e * (2.0 * m).sin()
                - 0.00180 * (mp - 2.0 * f).sin()
                - 0.00070 * (mp + 2.0 * f).sin()
                - 0.00040 * (3.0 * mp).sin()
                - 0.00034 * e * (2.0 * mp - m).sin()
                + 0.00032 * e * (m + 2.0 * f).sin()
                + 0.00032 * e * (m - 2.0 * f).sin()
                - 0.00028 * e * e * (mp + 2.0 * m).sin()
                + 0.00027 * e * (2.0 * mp + m).sin()
                - 0.00017 * om.sin()
                - 0.00005 * (mp - m - 2.0 * f).sin()
                + 0.00004 * (2.0 * mp + 2.0 * f).sin()
                - 0.00004 * (mp + m + 2.0 * f).sin()
                + 0.00004 * (mp - 2.0 * m).sin()
                + 0.00003 * (mp + m - 2.0 * f).sin()
                + 0.00003 * (3.0 * m).sin()
                + 0.00002 * (2.0 * mp - 2.0 * f).sin()
                + 0.00002 * (mp - m + 2.0 * f).sin()
                - 0.00002 * (3.0 * mp + m).sin();
            let w = 0.00306 - 0.00038 * e * m.cos() + 0.00026 * mp.cos()
                - 0.00002 * (mp - m).cos()
                + 0.00002 * (mp + m).cos()
                + 0.00002 * (2.0 * f).cos();
            if phase == MoonPhase::FirstQuarter {
                quarter + w
            } else {
                quarter - w
            }
        }
    };

    mean + periodic + planetary_correction(k, t2)
}

/// Additional corrections for all phases (Meeus table 49.B arguments).
fn planetary_correction(k: f64, t2: f64) -> f64 {
    const TERMS: [(f64, f64, f64); 14] = [
        (0.000325, 299.77, 0.107408),
        (0.000165, 251.88, 0.016321),
        (0.000164, 251.83, 26.651886),
        (0.000126, 349.42, 36.412478),
        (0.000110, 84.66, 18.206239),
        (0.000062, 141.74, 53.303771),
        (0.000060, 207.14, 2.453732),
        (0.000056, 154.84, 7.306860),
        (0.000047, 34.52, 27.261239),
        (0.000042, 207.19, 0.121824),
        (0.000040, 291.34, 1.844379),
        (0.000037, 161.72, 24.198154),
        (0.000035, 239.56, 25.513099),
        (0.000023, 331.55, 3.592518),
    ];

    TERMS
        .iter()
        .enumerate()
        .map(|(i, &(coeff, base, rate))| {
            // A1 carries a secular term.
            let extra = if i == 0 { -0.009173 * t2 } else { 0.0 };
            coeff * deg(base + rate * k + extra).sin()
        })
        .sum()
}

fn deg(angle: f64) -> f64 {
    angle.rem_euclid(360.0) * PI / 180.0
}

/// JDE of the first `phase` at or after `decimal_year`.
pub fn next_phase(phase: MoonPhase, decimal_year: f64) -> f64 {
    let target = jd_from_decimal_year(decimal_year);
    let q = phase.lunation_fraction();

    // Start one lunation early; the mean-motion estimate is good to a few days.
    let mut k = ((decimal_year - 2000.0) * 12.3685 - q).floor() - 1.0 + q;
    while phase_jde(phase, k) < target {
        k += 1.0;
    }
    while phase_jde(phase, k - 1.0) >= target {
        k -= 1.0;
    }
    phase_jde(phase, k)
}

/// Phases found for one month, keyed by day of month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoonPhases(BTreeMap<u32, MoonPhase>);

impl MoonPhases {
    /// Phase on day `day` of the scanned month, if any.
    pub fn get(&self, day: u32) -> Option<MoonPhase> {
        self.0.get(&day).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Records `phase` on `day`; a phase already on that day is replaced.
    fn record(&mut self, year: i32, month: u32, day: u32, phase: MoonPhase) {
        if let Some(previous) = self.0.insert(day, phase) {
            warn!(year, month, day, ?previous, ?phase, "two moon phases on one day");
        }
    }

    /// `(day, phase)` pairs in day order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, MoonPhase)> + '_ {
        self.0.iter().map(|(day, phase)| (*day, *phase))
    }
}

/// Finds the days of `month` on which a named phase occurs.
///
/// For each of [`SCAN_DAYS`] offsets `i` the scan queries every phase at
/// the fractional-year position of relative day `grid_start_day + i` and
/// records a hit when the returned instant falls on day `i` of the month.
/// Should two phases land on the same day the later one in
/// [`MoonPhase::SCAN_ORDER`] wins.
pub fn locate_moon_phases(year: i32, month: u32, grid_start_day: i32) -> MoonPhases {
    let year_length = days_in_year(year) as f64;
    let mut found = MoonPhases::default();

    for i in 0..SCAN_DAYS {
        let doy = day_of_year(year, month, grid_start_day + i as i32);
        let decimal_year = year as f64 + (doy - 1) as f64 / year_length;

        for phase in MoonPhase::SCAN_ORDER {
            let Some(date) = jd_to_date(next_phase(phase, decimal_year)) else {
                continue;
            };
            if date.year() == year && date.month() == month && date.day() == i {
                found.record(year, month, i, phase);
            }
        }
    }

    trace!(year, month, phases = found.len(), "moon phase scan done");
    found
}
