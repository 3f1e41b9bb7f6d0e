/// Personal-record data model: the fixed field set the reports sort by,
/// plus the key renderings that make each field comparable as a string.
pub mod parse;


pub use self::parse::{parse_line, parse_records};

use crate::sort::{Keyed, pad_key};

/// Gender of a record, parsed leniently from raw tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse a raw token: the first character decides, case-insensitive.
    /// Anything unrecognized is Unknown.
    pub fn parse(token: &str) -> Gender {
        match token.as_bytes().first().map(|b| b.to_ascii_lowercase()) {
            Some(b'f') => Gender::Female,
            Some(b'm') => Gender::Male,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // pad() honors width/alignment flags in report columns.
        f.pad(self.as_str())
    }
}

/// A validated calendar date. Defaults to 0001-01-01 when a record carries
/// no (or an unparseable) date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Default for Date {
    fn default() -> Date {
        Date {
            year: 1,
            month: 1,
            day: 1,
        }
    }
}

impl Date {
    /// Construct a date, validating month and day ranges (leap years
    /// included).
    pub fn new(year: u16, month: u8, day: u8) -> Result<Date, String> {
        if year == 0 {
            return Err(format!("invalid year {}", year));
        }
        if month == 0 || month > 12 {
            return Err(format!("invalid month {}", month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(format!("invalid day {} for month {}", day, month));
        }
        Ok(Date { year, month, day })
    }

    /// Comparable key form: zero-padded year-month-day, so lexicographic
    /// order equals chronological order.
    pub fn sort_key(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Report display form is US-style MM/DD/YYYY.
impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// One parsed personal record. Immutable once built; sorting only ever
/// reorders indices into a `&[Record]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub last_name: String,
    pub first_name: String,
    pub gender: Gender,
    pub date_of_birth: Date,
    pub favorite_color: String,
}

impl Record {
    pub fn new(last_name: &str, first_name: &str) -> Record {
        Record {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            gender: Gender::Unknown,
            date_of_birth: Date::default(),
            favorite_color: String::new(),
        }
    }
}

/// The fixed field set reports may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LastName,
    FirstName,
    Gender,
    DateOfBirth,
    FavoriteColor,
}

impl Field {
    /// Parse a field name as written in a CLI sort spec. Unknown names are
    /// a configuration error reported before any sorting happens.
    pub fn parse(s: &str) -> Result<Field, String> {
        match s.to_ascii_lowercase().as_str() {
            "lastname" | "last" | "last_name" => Ok(Field::LastName),
            "firstname" | "first" | "first_name" => Ok(Field::FirstName),
            "gender" => Ok(Field::Gender),
            "dateofbirth" | "dob" | "date_of_birth" | "birthdate" => Ok(Field::DateOfBirth),
            "favoritecolor" | "color" | "favorite_color" => Ok(Field::FavoriteColor),
            _ => Err(format!("unknown field '{}'", s)),
        }
    }

    /// Display name used in report titles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::LastName => "LastName",
            Field::FirstName => "FirstName",
            Field::Gender => "Gender",
            Field::DateOfBirth => "DateOfBirth",
            Field::FavoriteColor => "FavoriteColor",
        }
    }
}

/// The explicit field registry: each field maps to its accessor plus the
/// rendering that makes byte comparison match the field's natural order.
impl Keyed for Record {
    type Field = Field;

    fn key_string(&self, field: Field) -> String {
        match field {
            Field::LastName => pad_key(&self.last_name),
            Field::FirstName => pad_key(&self.first_name),
            Field::Gender => pad_key(self.gender.as_str()),
            Field::DateOfBirth => pad_key(&self.date_of_birth.sort_key()),
            Field::FavoriteColor => pad_key(&self.favorite_color),
        }
    }
}
