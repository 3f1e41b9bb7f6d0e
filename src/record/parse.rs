/// Raw-line → Record parsing heuristics.
///
/// Input lines are loosely formatted: fields separated by any mix of
/// spaces, pipes and commas, in the order last name, first name, then any
/// of gender / date of birth / favorite color in no fixed order. Tokens
/// are classified by shape, not position.
use super::{Date, Gender, Record};

/// Token separators accepted in raw record lines.
const SEPARATORS: (u8, u8, u8) = (b' ', b'|', b',');

/// Minimum token length worth trying as a date of birth (M-D-YYYY).
const MIN_DATE_LEN: usize = 8;

/// Split a raw line into non-empty tokens on space, pipe or comma.
/// memchr3 scans for all three separators in one SIMD pass.
fn split_tokens(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let (a, b, c) = SEPARATORS;
    let mut tokens = Vec::new();
    let mut start = 0;

    for pos in memchr::memchr3_iter(a, b, c, bytes) {
        if pos > start {
            tokens.push(&line[start..pos]);
        }
        start = pos + 1;
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}

/// Parse a date token in month/day/year or month-day-year form.
pub fn parse_date(token: &str) -> Result<Date, String> {
    let parts: Vec<&str> = token
        .split(['-', '/'])
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(format!("'{}' is not a month/day/year date", token));
    }

    let month: u8 = parts[0]
        .parse()
        .map_err(|_| format!("invalid month '{}'", parts[0]))?;
    let day: u8 = parts[1]
        .parse()
        .map_err(|_| format!("invalid day '{}'", parts[1]))?;
    let year: u16 = parts[2]
        .parse()
        .map_err(|_| format!("invalid year '{}'", parts[2]))?;

    Date::new(year, month, day)
}

/// True if the token has date shape: long enough, with a separator past the
/// first character (so negative numbers don't qualify).
fn looks_like_date(token: &str) -> bool {
    token.len() >= MIN_DATE_LEN
        && !token.starts_with(['-', '/'])
        && token.get(1..).is_some_and(|rest| rest.contains(['-', '/']))
}

/// True if the token is worth trying as a gender: a single character, or a
/// word that spells out a gender name.
fn looks_like_gender(token: &str) -> bool {
    token.len() == 1
        || token.eq_ignore_ascii_case("female")
        || token.eq_ignore_ascii_case("male")
        || token.eq_ignore_ascii_case("unknown")
}

/// Parse a single raw line into a Record.
///
/// The first two tokens are last name then first name and are required;
/// remaining tokens are classified as gender, date of birth or favorite
/// color. An unparseable date warns and leaves the default date rather
/// than rejecting the whole record.
pub fn parse_line(line: &str) -> Option<Record> {
    let tokens = split_tokens(line);
    if tokens.len() < 2 {
        return None;
    }

    let mut record = Record::new(tokens[0], tokens[1]);

    for token in &tokens[2..] {
        if looks_like_gender(token) {
            let gender = Gender::parse(token);
            // Only overwrite when the token actually named a gender.
            if gender != Gender::Unknown {
                record.gender = gender;
                continue;
            }
        }
        if looks_like_date(token) {
            match parse_date(token) {
                Ok(date) => record.date_of_birth = date,
                Err(e) => eprintln!("recsort: {}: keeping default date", e),
            }
        } else if !looks_like_gender(token) {
            record.favorite_color = token.to_string();
        }
    }

    Some(record)
}

/// Bulk-load records from raw lines. Malformed lines are warned about and
/// skipped; a bad line never aborts the load.
pub fn parse_records<'a, I>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(record) => records.push(record),
            None => eprintln!("recsort: skipping malformed record line: {}", line),
        }
    }
    records
}
