use std::fmt;
use std::str::FromStr;

use crate::Hit;

/// Column a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

impl SortKey {
    /// Every sortable column, in header order.
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::Title,
        SortKey::Author,
        SortKey::Comments,
        SortKey::Points,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Comments => "comments",
            SortKey::Points => "points",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(pub String);

impl fmt::Display for ParseSortKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected none, title, author, comments or points)",
            self.0
        )
    }
}

impl std::error::Error for ParseSortKeyError {}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSortKeyError(wanted.to_string()))
    }
}

/// Returns a sorted copy of `hits`. Text columns sort ascending, numeric
/// columns descending; all sorts are stable.
pub fn sort_hits(key: SortKey, hits: &[Hit]) -> Vec<Hit> {
    let mut sorted = hits.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comments => {
            sorted.sort_by_key(|hit| hit.num_comments);
            sorted.reverse();
        }
        SortKey::Points => {
            sorted.sort_by_key(|hit| hit.points);
            sorted.reverse();
        }
    }
    sorted
}

/// Order in which a list is shown: the sorted list, reversed unless the
/// reverse flag is set.
pub fn display_order(key: SortKey, is_sort_reverse: bool, hits: &[Hit]) -> Vec<Hit> {
    let mut sorted = sort_hits(key, hits);
    if !is_sort_reverse {
        sorted.reverse();
    }
    sorted
}
