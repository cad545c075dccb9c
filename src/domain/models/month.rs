//! Jalali months and the "Manual Assign Date" value.
//!
//! Operators type the assign month in transliterated form (`aban 1403`);
//! the tracker stores it in Persian (`آبان 1403`).

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::domain::errors::{DomainError, DomainResult};

/// The twelve months of the Jalali (Solar Hijri) calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersianMonth {
    Farvardin,
    Ordibehesht,
    Khordad,
    Tir,
    Mordad,
    Shahrivar,
    Mehr,
    Aban,
    Azar,
    Dey,
    Bahman,
    Esfand,
}

impl PersianMonth {
    pub const ALL: [Self; 12] = [
        Self::Farvardin,
        Self::Ordibehesht,
        Self::Khordad,
        Self::Tir,
        Self::Mordad,
        Self::Shahrivar,
        Self::Mehr,
        Self::Aban,
        Self::Azar,
        Self::Dey,
        Self::Bahman,
        Self::Esfand,
    ];

    /// Transliterated name as typed by operators.
    pub const fn latin_name(self) -> &'static str {
        match self {
            Self::Farvardin => "farvardin",
            Self::Ordibehesht => "ordibehesht",
            Self::Khordad => "khordad",
            Self::Tir => "tir",
            Self::Mordad => "mordad",
            Self::Shahrivar => "shahrivar",
            Self::Mehr => "mehr",
            Self::Aban => "aban",
            Self::Azar => "azar",
            Self::Dey => "dey",
            Self::Bahman => "bahman",
            Self::Esfand => "esfand",
        }
    }

    /// Persian name as stored in the tracker and used in worksheet titles.
    pub const fn persian_name(self) -> &'static str {
        match self {
            Self::Farvardin => "فروردین",
            Self::Ordibehesht => "اردیبهشت",
            Self::Khordad => "خرداد",
            Self::Tir => "تیر",
            Self::Mordad => "مرداد",
            Self::Shahrivar => "شهریور",
            Self::Mehr => "مهر",
            Self::Aban => "آبان",
            Self::Azar => "آذر",
            Self::Dey => "دی",
            Self::Bahman => "بهمن",
            Self::Esfand => "اسفند",
        }
    }

    pub fn from_latin(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|m| m.latin_name() == name)
    }

    /// Month from its 1-based ordinal.
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        let idx = usize::try_from(ordinal).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }
}

/// Validated assign-month value, e.g. `آبان 1403`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignMonth {
    month: PersianMonth,
    year: String,
}

impl AssignMonth {
    /// Parse operator input of the form `<month> <year>`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let [month, year] = tokens.as_slice() else {
            return Err(invalid_month(input));
        };
        let month = PersianMonth::from_latin(month).ok_or_else(|| invalid_month(input))?;
        let value = Self {
            month,
            year: (*year).to_string(),
        };

        static SHAPE: OnceLock<Regex> = OnceLock::new();
        let shape = SHAPE
            .get_or_init(|| Regex::new(r"^[\x{0600}-\x{06FF}]+\s\d{4}$").expect("static regex"));
        if shape.is_match(&value.to_string()) {
            Ok(value)
        } else {
            Err(invalid_month(input))
        }
    }

    pub const fn month(&self) -> PersianMonth {
        self.month
    }

    pub fn year(&self) -> &str {
        &self.year
    }
}

fn invalid_month(input: &str) -> DomainError {
    DomainError::ValidationFailed(format!(
        "'{input}' is not a month and year such as 'aban 1403'"
    ))
}

impl fmt::Display for AssignMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.persian_name(), self.year)
    }
}

impl Serialize for AssignMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A date in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    /// Convert a Gregorian date.
    pub fn from_gregorian(date: NaiveDate) -> Self {
        const CUMULATIVE_DAYS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        let gy = i64::from(date.year());
        let gm = date.month();
        let gd = i64::from(date.day());

        let gy2 = if gm > 2 { gy + 1 } else { gy };
        let mut days = 355_666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100
            + (gy2 + 399) / 400
            + gd
            + CUMULATIVE_DAYS[(gm - 1) as usize];

        let mut jy = -1595 + 33 * (days / 12_053);
        days %= 12_053;
        jy += 4 * (days / 1461);
        days %= 1461;
        if days > 365 {
            jy += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let (jm, jd) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Self {
            year: jy,
            month: jm as u32,
            day: jd as u32,
        }
    }

    pub fn persian_month(&self) -> PersianMonth {
        PersianMonth::from_ordinal(self.month).unwrap_or(PersianMonth::Farvardin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_maps_to_persian() {
        let month = AssignMonth::parse("aban 1403").unwrap();
        assert_eq!(month.to_string(), "آبان 1403");
        assert_eq!(month.month(), PersianMonth::Aban);
        assert_eq!(month.year(), "1403");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let month = AssignMonth::parse("  Ordibehesht   1404 ").unwrap();
        assert_eq!(month.to_string(), "اردیبهشت 1404");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(AssignMonth::parse("aban").is_err());
        assert!(AssignMonth::parse("aban 1403 extra").is_err());
        assert!(AssignMonth::parse("october 1403").is_err());
        assert!(AssignMonth::parse("aban 03").is_err());
        assert!(AssignMonth::parse("aban ۱۴۰۳x").is_err());
        assert!(AssignMonth::parse("").is_err());
    }

    #[test]
    fn test_assign_month_serializes_as_string() {
        let month = AssignMonth::parse("dey 1402").unwrap();
        assert_eq!(serde_json::to_value(&month).unwrap(), "دی 1402");
    }

    #[test]
    fn test_from_ordinal_bounds() {
        assert_eq!(PersianMonth::from_ordinal(1), Some(PersianMonth::Farvardin));
        assert_eq!(PersianMonth::from_ordinal(12), Some(PersianMonth::Esfand));
        assert_eq!(PersianMonth::from_ordinal(0), None);
        assert_eq!(PersianMonth::from_ordinal(13), None);
    }

    #[test]
    fn test_gregorian_to_jalali() {
        let cases = [
            ((2024, 3, 20), (1403, 1, 1)),
            ((2024, 3, 19), (1402, 12, 29)),
            ((2024, 10, 22), (1403, 8, 1)),
            ((2025, 3, 20), (1403, 12, 30)),
            ((2025, 3, 21), (1404, 1, 1)),
            ((2000, 1, 1), (1378, 10, 11)),
        ];
        for ((gy, gm, gd), (jy, jm, jd)) in cases {
            let date = NaiveDate::from_ymd_opt(gy, gm, gd).unwrap();
            let jalali = JalaliDate::from_gregorian(date);
            assert_eq!((jalali.year, jalali.month, jalali.day), (jy, jm, jd), "{date}");
        }
    }

    #[test]
    fn test_jalali_persian_month() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
        assert_eq!(JalaliDate::from_gregorian(date).persian_month().persian_name(), "آبان");
    }
}
