//! Sort directives parsed from `field,direction` query values
//!
//! Sort values arrive as repeated `sort` query parameters, for example
//! `?sort=created_at,desc&sort=id`. Each value is parsed into a [`Sort`].
//! Malformed values never fail a request: they are dropped.
//!
//! Field names are restricted to safe SQL identifier characters (ASCII
//! letters, digits, `_` and `.`) because callers interpolate them into
//! `ORDER BY` fragments.
//!
//! # Example
//!
//! ```rust
//! use pageable::{parse_sort, parse_sorts, Direction, Sort};
//!
//! assert_eq!(parse_sort("id,desc"), Some(Sort::desc("id")));
//! assert_eq!(parse_sort("name").map(|s| s.direction), Some(Direction::Asc));
//! assert_eq!(parse_sort("id;DROP TABLE users--,asc"), None);
//!
//! let sorts = parse_sorts(["", "name,desc", "  "]);
//! assert_eq!(sorts, Some(vec![Sort::desc("name")]));
//! ```

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Sort direction
///
/// # Example
///
/// ```rust
/// use pageable::Direction;
///
/// assert_eq!(format!("{}", Direction::Asc), "asc");
/// assert_eq!(format!("{}", Direction::Desc), "desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    /// Lower-case token used in both the `field,direction` text form and
    /// `ORDER BY` fragments
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction token
    ///
    /// Only `desc` (case-insensitive, surrounding whitespace ignored) selects
    /// [`Direction::Desc`]. Anything else, including garbage, is ascending.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pageable::Direction;
    ///
    /// assert_eq!(Direction::parse(" DESC "), Direction::Desc);
    /// assert_eq!(Direction::parse("bogus"), Direction::Asc);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// A single sort directive: field name plus direction
///
/// Serializes as its `field,direction` text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    /// Field (column) name, already checked with [`is_safe_identifier`]
    pub field: String,
    /// Sort direction
    pub direction: Direction,
}

impl Sort {
    /// Create a sort directive
    ///
    /// The field is taken as-is. Use [`parse_sort`] for untrusted input.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }

    /// `ORDER BY` fragment for this sort, e.g. `created_at desc`
    #[must_use]
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.field, self.direction)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_sort(&raw).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"field[,direction]")
        })
    }
}

/// Parse a single `field,direction` value
///
/// Returns `None` for empty input, an empty field, or a field containing
/// anything other than ASCII letters, digits, `_` or `.`. Only the first
/// comma splits; a missing or unknown direction means ascending.
#[must_use]
pub fn parse_sort(raw: &str) -> Option<Sort> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (field, direction) = match raw.split_once(',') {
        Some((field, direction)) => (field.trim(), Direction::parse(direction)),
        None => (raw, Direction::Asc),
    };

    if field.is_empty() {
        return None;
    }
    if !is_safe_identifier(field) {
        tracing::debug!(field = %field, "dropping sort with unsafe field name");
        return None;
    }

    Some(Sort::new(field, direction))
}

/// Parse every value of a repeated `sort` parameter
///
/// Invalid entries are skipped. Returns `None` when nothing valid remains,
/// so "no sort supplied" and "only garbage supplied" look the same.
pub fn parse_sorts<I, S>(raw: I) -> Option<Vec<Sort>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorts: Vec<Sort> = raw
        .into_iter()
        .filter_map(|value| parse_sort(value.as_ref()))
        .collect();
    non_empty(sorts)
}

/// Keep only sorts on whitelisted fields, preserving order
///
/// Returns `None` if no sort survives.
///
/// # Example
///
/// ```rust
/// use pageable::{filter_sorts_by_fields, Sort};
///
/// let sorts = Some(vec![Sort::asc("name"), Sort::desc("password_hash")]);
/// let kept = filter_sorts_by_fields(sorts, &["name", "id"]);
/// assert_eq!(kept, Some(vec![Sort::asc("name")]));
/// ```
#[must_use]
pub fn filter_sorts_by_fields(sorts: Option<Vec<Sort>>, fields: &[&str]) -> Option<Vec<Sort>> {
    let allowed: HashSet<&str> = fields.iter().copied().collect();
    let filtered: Vec<Sort> = sorts
        .unwrap_or_default()
        .into_iter()
        .filter(|sort| {
            let keep = allowed.contains(sort.field.as_str());
            if !keep {
                tracing::debug!(field = %sort.field, "dropping sort on non-sortable field");
            }
            keep
        })
        .collect();
    non_empty(filtered)
}

/// Rename sort fields through a lookup table
///
/// Translates user-facing names (`createdAt`) to column names
/// (`created_at`). Unmapped fields pass through; order and direction are
/// kept. An unset sort stays unset.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use pageable::{map_sort_fields, Sort};
///
/// let map = HashMap::from([("createdAt", "created_at")]);
/// let sorts = map_sort_fields(Some(vec![Sort::desc("createdAt"), Sort::asc("id")]), &map);
/// assert_eq!(sorts, Some(vec![Sort::desc("created_at"), Sort::asc("id")]));
/// ```
#[must_use]
pub fn map_sort_fields<K, V>(
    sorts: Option<Vec<Sort>>,
    field_map: &HashMap<K, V>,
) -> Option<Vec<Sort>>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
{
    sorts.map(|sorts| {
        sorts
            .into_iter()
            .map(|sort| match field_map.get(sort.field.as_str()) {
                Some(mapped) => Sort::new(mapped.as_ref(), sort.direction),
                None => sort,
            })
            .collect()
    })
}

/// Render sorts as an `ORDER BY` body: `name desc, id asc`
///
/// Returns an empty string when no sort is set.
#[must_use]
pub fn order_by(sorts: Option<&[Sort]>) -> String {
    sorts
        .unwrap_or_default()
        .iter()
        .map(Sort::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whether `s` only contains ASCII letters, digits, `_` and `.`
///
/// The dot allows table-qualified names such as `posts.id`.
#[must_use]
pub fn is_safe_identifier(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

pub(crate) fn non_empty(sorts: Vec<Sort>) -> Option<Vec<Sort>> {
    if sorts.is_empty() {
        None
    } else {
        Some(sorts)
    }
}
