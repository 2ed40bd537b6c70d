//! Month and weekday names.
//!
//! The engine only places names into grid positions it has already
//! computed; where they come from is behind [`NameProvider`].

use chrono::{Locale, NaiveDate, Weekday};
use tracing::warn;

/// Supplies display names for months and weekdays.
pub trait NameProvider {
    /// Full name of `month` (1..=12).
    fn month_name(&self, month: u32) -> String;

    /// Full name of `weekday`.
    fn weekday_name(&self, weekday: Weekday) -> String;

    /// Two-character abbreviation of `weekday`, used in narrow columns.
    fn weekday_short(&self, weekday: Weekday) -> String {
        self.weekday_name(weekday).chars().take(2).collect()
    }
}

/// Locale codes accepted by [`ChronoNames::from_code`].
const KNOWN_LOCALES: &[(&str, Locale)] = &[
    ("en_US", Locale::en_US),
    ("en_GB", Locale::en_GB),
    ("da_DK", Locale::da_DK),
    ("nl_BE", Locale::nl_BE),
    ("nl_NL", Locale::nl_NL),
    ("fi_FI", Locale::fi_FI),
    ("fr_FR", Locale::fr_FR),
    ("fr_CA", Locale::fr_CA),
    ("de_DE", Locale::de_DE),
    ("hu_HU", Locale::hu_HU),
    ("it_IT", Locale::it_IT),
    ("nn_NO", Locale::nn_NO),
    ("nb_NO", Locale::nb_NO),
    ("pt_PT", Locale::pt_PT),
    ("pt_BR", Locale::pt_BR),
    ("ro_RO", Locale::ro_RO),
    ("ru_RU", Locale::ru_RU),
    ("es_ES", Locale::es_ES),
    ("sv_SE", Locale::sv_SE),
    ("tr_TR", Locale::tr_TR),
    ("bg_BG", Locale::bg_BG),
    ("zh_CN", Locale::zh_CN),
    ("zh_TW", Locale::zh_TW),
    ("zh_HK", Locale::zh_HK),
];

/// Names taken from chrono's locale tables.
#[derive(Debug, Clone, Copy)]
pub struct ChronoNames {
    locale: Locale,
}

impl ChronoNames {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Looks up a POSIX-style code such as `de_DE` or `fr_FR.UTF-8`.
    ///
    /// Unknown or empty codes fall back to `en_US`.
    pub fn from_code(code: &str) -> Self {
        let base = code.split(['.', '@']).next().unwrap_or_default();
        match KNOWN_LOCALES.iter().find(|(name, _)| *name == base) {
            Some((_, locale)) => Self::new(*locale),
            None => {
                if !code.is_empty() {
                    warn!(code, "unknown locale, falling back to en_US");
                }
                Self::default()
            }
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Default for ChronoNames {
    fn default() -> Self {
        Self::new(Locale::en_US)
    }
}

impl NameProvider for ChronoNames {
    fn month_name(&self, month: u32) -> String {
        match NaiveDate::from_ymd_opt(2013, month, 1) {
            Some(date) => date.format_localized("%B", self.locale).to_string(),
            None => String::new(),
        }
    }

    fn weekday_name(&self, weekday: Weekday) -> String {
        // 2013-01-07 is a Monday.
        let day = 7 + weekday.num_days_from_monday();
        match NaiveDate::from_ymd_opt(2013, 1, day) {
            Some(date) => date.format_localized("%A", self.locale).to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_names() {
        let names = ChronoNames::default();
        assert_eq!(names.month_name(1), "January");
        assert_eq!(names.month_name(12), "December");
        assert_eq!(names.month_name(13), "");
        assert_eq!(names.weekday_name(Weekday::Mon), "Monday");
        assert_eq!(names.weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(names.weekday_short(Weekday::Thu), "Th");
    }

    #[test]
    fn german_names() {
        let names = ChronoNames::from_code("de_DE.UTF-8");
        assert_eq!(names.month_name(3), "März");
        assert_eq!(names.weekday_name(Weekday::Wed), "Mittwoch");
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        for code in ["", "xx_XX", "C", "klingon"] {
            let names = ChronoNames::from_code(code);
            assert_eq!(names.month_name(5), "May", "code {code:?}");
        }
    }
}
