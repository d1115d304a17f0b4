//! Month names and leap-year-aware month lengths.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A calendar month as labeled in the generation extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Parses a full English month name, ignoring case and padding.
    pub fn from_name(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(label))
    }

    /// Full English month name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Month number, 1 for January.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// First day of this month in `year`.
    pub fn first_day(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.number(), 1)
    }

    /// Number of days in this month of `year`, counting February 29 in leap
    /// years.
    ///
    /// # Examples
    ///
    /// ```
    /// use nuclear_cf::pipeline::calendar::Month;
    ///
    /// assert_eq!(Month::February.days_in(2024), Some(29));
    /// assert_eq!(Month::February.days_in(2023), Some(28));
    /// ```
    pub fn days_in(self, year: i32) -> Option<u32> {
        let (next_year, next_month) = match self {
            Month::December => (year.checked_add(1)?, 1),
            m => (year, m.number() + 1),
        };
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
        Some(last.day())
    }

    /// Number of hours in this month of `year`.
    pub fn hours_in(self, year: i32) -> Option<f64> {
        self.days_in(year).map(|d| f64::from(d * 24))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Month::from_name("January"), Some(Month::January));
        assert_eq!(Month::from_name(" september "), Some(Month::September));
        assert_eq!(Month::from_name("DECEMBER"), Some(Month::December));
        assert_eq!(Month::from_name("Year To Date"), None);
        assert_eq!(Month::from_name("Jan"), None);
    }

    #[test]
    fn month_lengths_for_report_years() {
        let lengths: Vec<u32> = Month::ALL
            .iter()
            .filter_map(|m| m.days_in(2021))
            .collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
        assert_eq!(lengths.iter().sum::<u32>(), 365);
    }

    #[test]
    fn february_leap_years() {
        assert_eq!(Month::February.days_in(2024), Some(29));
        assert_eq!(Month::February.days_in(2022), Some(28));
        assert_eq!(Month::February.days_in(2020), Some(29));
        assert_eq!(Month::February.days_in(2000), Some(29));
        assert_eq!(Month::February.days_in(1900), Some(28));
    }

    #[test]
    fn hours_are_days_times_24() {
        assert_eq!(Month::February.hours_in(2024), Some(696.0));
        assert_eq!(Month::January.hours_in(2023), Some(744.0));
        assert_eq!(Month::April.hours_in(2023), Some(720.0));
    }

    #[test]
    fn number_and_first_day_agree() {
        for (i, m) in Month::ALL.iter().enumerate() {
            assert_eq!(m.number() as usize, i + 1);
            let day = m.first_day(2022).unwrap();
            assert_eq!(day.month(), m.number());
            assert_eq!(day.day(), 1);
        }
    }
}
