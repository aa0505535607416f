//! The experience timeline entries.
//!
//! Like the message dictionary, the entries are compiled in. Open-ended
//! positions carry no end date; the caller supplies "today" when computing
//! the tenure.

use chrono::NaiveDate;
use hereiam_core::AppResult;

use crate::i18n::Locale;
use crate::tenure::Tenure;

/// One position on the experience timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceEntry {
    /// Employer name, not localized.
    pub company: &'static str,
    role_en: &'static str,
    role_es: &'static str,
    /// First day of the position.
    pub start: NaiveDate,
    /// Last day of the position; `None` while the position is held.
    pub end: Option<NaiveDate>,
}

impl ExperienceEntry {
    /// Role title in the given locale.
    #[must_use]
    pub fn role(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.role_en,
            Locale::Es => self.role_es,
        }
    }

    /// Elapsed tenure, using `today` for open-ended positions.
    pub fn tenure(&self, today: NaiveDate) -> AppResult<Tenure> {
        Tenure::between(self.start, self.end.unwrap_or(today))
    }
}

/// The site's positions, most recent first.
#[must_use]
pub fn site_entries() -> Vec<ExperienceEntry> {
    vec![
        ExperienceEntry {
            company: "Lefebvre Inc",
            role_en: "Full-Stack Developer",
            role_es: "Desarrollador Full-Stack",
            start: date(2024, 3, 1),
            end: None,
        },
        ExperienceEntry {
            company: "Repair Mobile World",
            role_en: "Computer Technician",
            role_es: "Técnico Informático",
            start: date(2023, 3, 1),
            end: Some(date(2023, 6, 1)),
        },
    ]
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // The literals above are all valid dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Locale, site_entries};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(value) => value,
            None => panic!("invalid test date {year}-{month}-{day}"),
        }
    }

    #[test]
    fn entries_are_most_recent_first() {
        let entries = site_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].start > entries[1].start);
        assert!(entries[0].end.is_none());
    }

    #[test]
    fn roles_are_localized() {
        let entries = site_entries();
        assert_eq!(entries[0].role(Locale::En), "Full-Stack Developer");
        assert_eq!(entries[0].role(Locale::Es), "Desarrollador Full-Stack");
    }

    #[test]
    fn closed_position_ignores_today() {
        let entries = site_entries();
        let tenure = match entries[1].tenure(date(2030, 1, 1)) {
            Ok(tenure) => tenure,
            Err(error) => panic!("tenure failed: {error}"),
        };
        assert_eq!((tenure.years(), tenure.months()), (0, 3));
    }

    #[test]
    fn open_position_runs_to_today() {
        let entries = site_entries();
        let tenure = match entries[0].tenure(date(2025, 3, 1)) {
            Ok(tenure) => tenure,
            Err(error) => panic!("tenure failed: {error}"),
        };
        assert_eq!((tenure.years(), tenure.months()), (1, 0));
    }
}
