use crate::core::ordering::TieBreak;
use crate::domain::model::Student;
use std::collections::BTreeMap;

/// Partitions students by `key`. Keys iterate in ascending order; members keep
/// the iteration order of the input until a caller re-arranges them.
pub fn partition<'a, K, F>(
    students: impl IntoIterator<Item = &'a Student>,
    key: F,
) -> BTreeMap<K, Vec<&'a Student>>
where
    K: Ord,
    F: Fn(&Student) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a Student>> = BTreeMap::new();
    for student in students {
        groups.entry(key(student)).or_default().push(student);
    }
    groups
}

/// Groups students by `key` and lets `arrange` build each group's member list.
pub fn group_by<'a, K, T, F, A>(
    students: impl IntoIterator<Item = &'a Student>,
    key: F,
    arrange: A,
) -> Vec<(K, T)>
where
    K: Ord,
    F: Fn(&Student) -> K,
    A: Fn(Vec<&'a Student>) -> T,
{
    partition(students, key)
        .into_iter()
        .map(|(key, members)| (key, arrange(members)))
        .collect()
}

/// Picks the key with the greatest measure; equal measures are settled by `tie_break`.
/// Returns `None` when there are no candidates.
pub fn select_largest<K, M, I>(candidates: I, tie_break: TieBreak) -> Option<K>
where
    K: Ord,
    M: Ord,
    I: IntoIterator<Item = (K, M)>,
{
    candidates
        .into_iter()
        .max_by(|(key_a, measure_a), (key_b, measure_b)| {
            measure_a
                .cmp(measure_b)
                .then_with(|| tie_break.rank(key_a, key_b))
        })
        .map(|(key, _)| key)
}
