/// Sort key contract: which field, which direction, and how a record
/// renders a field as a comparable key string.
///
/// A key string is a canonical rendering whose lexicographic order matches
/// the field's natural order (dates render zero-padded year-month-day, so
/// byte comparison equals chronological comparison). The engine never looks
/// inside a record; it only compares the strings this contract produces.

/// Minimum rendered key width. Every key string is right-padded with spaces
/// to this width so comparisons behave as fixed-width comparisons.
pub const KEY_WIDTH: usize = 30;

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Parse a direction name like "asc" or "DESC".
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            _ => Err(format!("invalid sort direction '{}'", s)),
        }
    }

    /// Short display form used in report titles.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

/// One (field selector, direction) pair. A sort specification is an ordered
/// slice of these, most significant key first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: Direction,
}

impl<F> SortKey<F> {
    pub fn new(field: F, direction: Direction) -> SortKey<F> {
        SortKey { field, direction }
    }
}

/// Capability the engine is generic over: given a field identifier, render
/// that field's value as a comparable key string.
///
/// Implementations must be pure (same field and value always yield the same
/// string) and order-preserving: for two values `a, b` of the same field,
/// domain comparison and byte comparison of `key_string` agree in sign.
pub trait Keyed {
    type Field: Copy;

    fn key_string(&self, field: Self::Field) -> String;
}

/// Right-pad a rendered value to [`KEY_WIDTH`] with spaces.
/// Padding never reorders distinct values: the pad byte (0x20) sorts below
/// every printable key character, so "Al " < "Alice" exactly as "Al" < "Alice".
pub fn pad_key(value: &str) -> String {
    if value.len() >= KEY_WIDTH {
        value.to_string()
    } else {
        let mut s = String::with_capacity(KEY_WIDTH);
        s.push_str(value);
        while s.len() < KEY_WIDTH {
            s.push(' ');
        }
        s
    }
}
