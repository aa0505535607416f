//! Elapsed employment duration for the experience timeline.
//!
//! Pure calendar arithmetic: whole years and months between two dates, with
//! a month deducted when the end day-of-month has not yet reached the start
//! day-of-month. The caller supplies "today" for open-ended positions; this
//! module never reads the clock.

use chrono::{Datelike, NaiveDate};
use hereiam_core::{AppError, AppResult};

use crate::i18n::Locale;

/// Whole years and months elapsed between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenure {
    years: u32,
    months: u32,
}

impl Tenure {
    /// Computes the tenure from `start` to `end` inclusive of full months
    /// only. Fails when `end` precedes `start`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::MalformedRequest(format!(
                "period end {end} precedes start {start}"
            )));
        }

        let mut years = end.year() - start.year();
        let mut months = i32::try_from(end.month()).unwrap_or(0) -
            i32::try_from(start.month()).unwrap_or(0);

        if months < 0 {
            years -= 1;
            months += 12;
        }

        // The current month only counts once its start day has passed.
        if end.day() < start.day() {
            months -= 1;
            if months < 0 {
                years -= 1;
                months += 12;
            }
        }

        Ok(Self {
            years: u32::try_from(years).unwrap_or(0),
            months: u32::try_from(months).unwrap_or(0),
        })
    }

    /// Full years elapsed.
    #[must_use]
    pub fn years(self) -> u32 {
        self.years
    }

    /// Months elapsed beyond the full years, always below 12.
    #[must_use]
    pub fn months(self) -> u32 {
        self.months
    }

    /// Renders the tenure in the given locale with correct plural forms.
    #[must_use]
    pub fn localize(self, locale: Locale) -> String {
        match locale {
            Locale::Es => {
                let year_word = if self.years == 1 { "año" } else { "años" };
                let month_word = if self.months == 1 { "mes" } else { "meses" };

                match (self.years, self.months) {
                    (0, 0) => "menos de un mes".to_owned(),
                    (0, months) => format!("{months} {month_word}"),
                    (years, 0) => format!("{years} {year_word}"),
                    (years, months) => {
                        format!("{years} {year_word} y {months} {month_word}")
                    }
                }
            }
            Locale::En => {
                let year_word = if self.years == 1 { "year" } else { "years" };
                let month_word = if self.months == 1 { "month" } else { "months" };

                match (self.years, self.months) {
                    (0, 0) => "less than a month".to_owned(),
                    (0, months) => format!("{months} {month_word}"),
                    (years, 0) => format!("{years} {year_word}"),
                    (years, months) => {
                        format!("{years} {year_word} and {months} {month_word}")
                    }
                }
            }
        }
    }
}
