//! Bengali calendar conversion and digit formatting.
//!
//! Converts Gregorian dates to the Bengali calendar using a fixed Pohela
//! Boishakh anchor (April 14) and a fixed month-length table, with the leap
//! adjustment tied to the Gregorian leap rule.
//!
//! This is a display-oriented approximation. It tracks no astronomical or
//! government-published calendar and can drift a day from authoritative
//! almanacs near month boundaries. Nothing else in the application keys off
//! these dates.

use chrono::{Datelike, NaiveDate};

use crate::constants::{
    BANGLA_ANCHOR_DAY, BANGLA_ANCHOR_MONTH, BANGLA_LEAP_MONTH_INDEX, BANGLA_MONTH_LENGTHS,
    BANGLA_YEAR_OFFSET,
};

/// The twelve Bengali months, Boishakh through Choitro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BanglaMonth {
    Boishakh,
    Joishtho,
    Asharh,
    Srabon,
    Bhadro,
    Ashwin,
    Kartik,
    Ogrohayon,
    Poush,
    Magh,
    Falgun,
    Choitro,
}

impl BanglaMonth {
    const ALL: [BanglaMonth; 12] = [
        Self::Boishakh,
        Self::Joishtho,
        Self::Asharh,
        Self::Srabon,
        Self::Bhadro,
        Self::Ashwin,
        Self::Kartik,
        Self::Ogrohayon,
        Self::Poush,
        Self::Magh,
        Self::Falgun,
        Self::Choitro,
    ];

    /// Month at the given table index (0 = Boishakh).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Transliterated month name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Boishakh => "Boishakh",
            Self::Joishtho => "Joishtho",
            Self::Asharh => "Asharh",
            Self::Srabon => "Srabon",
            Self::Bhadro => "Bhadro",
            Self::Ashwin => "Ashwin",
            Self::Kartik => "Kartik",
            Self::Ogrohayon => "Ogrohayon",
            Self::Poush => "Poush",
            Self::Magh => "Magh",
            Self::Falgun => "Falgun",
            Self::Choitro => "Choitro",
        }
    }

    /// Month name in Bengali script.
    pub fn bengali_name(&self) -> &'static str {
        match self {
            Self::Boishakh => "বৈশাখ",
            Self::Joishtho => "জ্যৈষ্ঠ",
            Self::Asharh => "আষাঢ়",
            Self::Srabon => "শ্রাবণ",
            Self::Bhadro => "ভাদ্র",
            Self::Ashwin => "আশ্বিন",
            Self::Kartik => "কার্তিক",
            Self::Ogrohayon => "অগ্রহায়ণ",
            Self::Poush => "পৌষ",
            Self::Magh => "মাঘ",
            Self::Falgun => "ফাল্গুন",
            Self::Choitro => "চৈত্র",
        }
    }
}

/// A date in the Bengali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanglaDate {
    pub day: u32,
    pub month: BanglaMonth,
    pub year: i32,
}

impl BanglaDate {
    /// Convert a Gregorian date to the Bengali calendar.
    ///
    /// Pure arithmetic over well-formed dates; this never fails. The same
    /// input always produces the same output.
    pub fn from_gregorian(date: NaiveDate) -> Self {
        let gregorian_year = date.year();
        let leap = is_gregorian_leap(gregorian_year);

        // Pohela Boishakh of the input's Gregorian year. April 14 exists in
        // every year, so the unwrap cannot fire.
        let anchor =
            NaiveDate::from_ymd_opt(gregorian_year, BANGLA_ANCHOR_MONTH, BANGLA_ANCHOR_DAY)
                .expect("fixed anchor date is always valid");

        let year = if date >= anchor {
            gregorian_year - BANGLA_YEAR_OFFSET
        } else {
            gregorian_year - BANGLA_YEAR_OFFSET - 1
        };

        let mut day_of_year = (date - anchor).num_days();
        if day_of_year < 0 {
            day_of_year += if leap { 366 } else { 365 };
        }

        let mut lengths = BANGLA_MONTH_LENGTHS;
        if leap {
            lengths[BANGLA_LEAP_MONTH_INDEX] += 1;
        }

        let mut remaining = day_of_year as u32;
        let mut found = None;
        for (index, len) in lengths.iter().enumerate() {
            if remaining < *len {
                found = Some((index, remaining + 1));
                break;
            }
            remaining -= len;
        }

        // The Gregorian wrap can overshoot the table by one day at the seam
        // before the anchor; that spillover lands on Choitro's last day.
        let (month_index, day) = found.unwrap_or((11, lengths[11] + remaining));

        Self {
            day,
            month: BanglaMonth::from_index(month_index).unwrap_or(BanglaMonth::Choitro),
            year,
        }
    }

    /// Render with Bengali digits and month name, e.g. "১ বৈশাখ ১৪৩৩".
    pub fn format_bengali(&self) -> String {
        format!(
            "{} {} {}",
            to_bengali_digits(&self.day.to_string()),
            self.month.bengali_name(),
            to_bengali_digits(&self.year.to_string()),
        )
    }
}

impl std::fmt::Display for BanglaDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.day, self.month.display_name(), self.year)
    }
}

/// Standard Gregorian leap rule.
pub fn is_gregorian_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Replace ASCII digits with Bengali digit glyphs, leaving everything else
/// untouched.
pub fn to_bengali_digits(input: &str) -> String {
    const DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_day_is_pohela_boishakh() {
        let date = BanglaDate::from_gregorian(g(2026, 4, 14));
        assert_eq!(date.day, 1);
        assert_eq!(date.month, BanglaMonth::Boishakh);
        assert_eq!(date.year, 1433);
    }

    #[test]
    fn day_before_anchor_closes_the_previous_year() {
        let date = BanglaDate::from_gregorian(g(2026, 4, 13));
        assert_eq!(date.month, BanglaMonth::Choitro);
        assert_eq!(date.year, 1432);
    }

    #[test]
    fn year_changes_exactly_at_the_anchor() {
        let before = BanglaDate::from_gregorian(g(2025, 4, 13));
        let after = BanglaDate::from_gregorian(g(2025, 4, 14));
        assert_eq!(after.year - before.year, 1);
    }

    #[test]
    fn mid_winter_date() {
        // New Year's Day 2025 falls in Poush of 1431
        let date = BanglaDate::from_gregorian(g(2025, 1, 1));
        assert_eq!(date.month, BanglaMonth::Poush);
        assert_eq!(date.year, 1431);
        assert_eq!(date.day, 18);
    }

    #[test]
    fn leap_rule_extends_falgun() {
        // 2000 is divisible by 400; 1900 is not a leap year
        assert!(is_gregorian_leap(2000));
        assert!(!is_gregorian_leap(1900));
        assert!(is_gregorian_leap(2024));
        assert!(!is_gregorian_leap(2025));

        // In a leap year the wrapped day count runs one longer, so a date
        // pinned the same distance after Falgun starts lands a day earlier
        let leap_year = BanglaDate::from_gregorian(g(2000, 4, 13));
        assert_eq!(leap_year.month, BanglaMonth::Choitro);
        assert_eq!(leap_year.day, 30);
    }

    #[test]
    fn conversion_is_deterministic() {
        let date = g(2026, 8, 7);
        assert_eq!(
            BanglaDate::from_gregorian(date),
            BanglaDate::from_gregorian(date)
        );
    }

    #[test]
    fn bengali_digits_replace_ascii_only() {
        assert_eq!(to_bengali_digits("1433"), "১৪৩৩");
        assert_eq!(to_bengali_digits("12:30"), "১২:৩০");
        assert_eq!(to_bengali_digits("abc"), "abc");
        assert_eq!(to_bengali_digits(""), "");
    }

    #[test]
    fn bengali_formatting() {
        let date = BanglaDate {
            day: 1,
            month: BanglaMonth::Boishakh,
            year: 1433,
        };
        assert_eq!(date.format_bengali(), "১ বৈশাখ ১৪৩৩");
        assert_eq!(date.to_string(), "1 Boishakh 1433");
    }

    #[test]
    fn month_index_round_trip() {
        for i in 0..12 {
            let month = BanglaMonth::from_index(i).unwrap();
            assert_eq!(month.index(), i);
        }
        assert!(BanglaMonth::from_index(12).is_none());
    }
}
