use crate::domain::model::Student;
use std::cmp::Ordering;

/// Natural student order: by id only.
pub fn by_id(a: &Student, b: &Student) -> Ordering {
    a.id.cmp(&b.id)
}

/// Last name, then first name, then id.
pub fn by_name(a: &Student, b: &Student) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Decides which key wins when two candidates have the same measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Keys compared in reverse order: the greatest key wins.
    ReverseKeyOrder,
    /// Keys compared in natural order: the least key wins.
    NaturalKeyOrder,
}

impl TieBreak {
    /// Ordering under which the winning key is the maximum.
    pub fn rank<K: Ord + ?Sized>(self, a: &K, b: &K) -> Ordering {
        match self {
            TieBreak::ReverseKeyOrder => a.cmp(b),
            TieBreak::NaturalKeyOrder => b.cmp(a),
        }
    }
}

/// Used by the largest-group queries.
pub const LARGEST_GROUP_TIE_BREAK: TieBreak = TieBreak::ReverseKeyOrder;

/// Used by the most-popular-name query. Intentionally not the same policy as
/// [`LARGEST_GROUP_TIE_BREAK`].
pub const POPULAR_NAME_TIE_BREAK: TieBreak = TieBreak::NaturalKeyOrder;
