use crate::core::grouping::{group_by, partition, select_largest};
use crate::core::ordering::{by_id, by_name, LARGEST_GROUP_TIE_BREAK, POPULAR_NAME_TIE_BREAK};
use crate::domain::model::{Group, Student};
use crate::domain::ports::{AdvancedQuery, GroupQuery, StudentQuery};
use crate::utils::error::{Result, StudentDbError};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Stateless query engine. Every call reads its input and builds a new result.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentDb;

impl StudentDb {
    pub fn new() -> Self {
        Self
    }

    /// Projects `field` for every index, in index order. Repeated indices repeat.
    pub fn project_by_indices<T, F>(
        &self,
        students: &[Student],
        indices: &[usize],
        field: F,
    ) -> Result<Vec<T>>
    where
        F: Fn(&Student) -> T,
    {
        indices
            .iter()
            .map(|&index| {
                students
                    .get(index)
                    .map(&field)
                    .ok_or(StudentDbError::IndexOutOfBounds {
                        index,
                        len: students.len(),
                    })
            })
            .collect()
    }

    fn project<T, F>(students: &[Student], field: F) -> Vec<T>
    where
        F: Fn(&Student) -> T,
    {
        students.iter().map(field).collect()
    }

    fn sorted<'a, C>(students: impl IntoIterator<Item = &'a Student>, comparator: C) -> Vec<Student>
    where
        C: Fn(&Student, &Student) -> Ordering,
    {
        let mut sorted: Vec<Student> = students.into_iter().cloned().collect();
        sorted.sort_by(|a, b| comparator(a, b));
        sorted
    }

    fn filter_sorted_by_name<'a, P>(
        students: impl IntoIterator<Item = &'a Student>,
        predicate: P,
    ) -> Vec<Student>
    where
        P: Fn(&Student) -> bool,
    {
        Self::sorted(students.into_iter().filter(|&s| predicate(s)), by_name)
    }

    fn groups_sorted_by<'a, C>(
        students: impl IntoIterator<Item = &'a Student>,
        comparator: C,
    ) -> Vec<Group>
    where
        C: Fn(&Student, &Student) -> Ordering + Copy,
    {
        group_by(
            students,
            |s| s.group.clone(),
            |members| Self::sorted(members, comparator),
        )
        .into_iter()
        .map(|(name, members)| Group::new(name, members))
        .collect()
    }

    fn largest_group_by<'a, M>(
        students: impl IntoIterator<Item = &'a Student>,
        measure: M,
    ) -> String
    where
        M: Fn(&[&Student]) -> usize,
    {
        let measured = partition(students, |s| s.group.clone())
            .into_iter()
            .map(|(group, members)| {
                let size = measure(members.as_slice());
                (group, size)
            });
        select_largest(measured, LARGEST_GROUP_TIE_BREAK).unwrap_or_default()
    }

    fn indexed<'a>(students: impl IntoIterator<Item = &'a Student>) -> Vec<Student> {
        students.into_iter().cloned().collect()
    }
}

fn distinct_by<'a, T, F>(students: impl IntoIterator<Item = &'a Student>, field: F) -> BTreeSet<T>
where
    T: Ord,
    F: Fn(&Student) -> T,
{
    students.into_iter().map(field).collect()
}

impl StudentQuery for StudentDb {
    fn first_names(&self, students: &[Student]) -> Vec<String> {
        Self::project(students, |s| s.first_name.clone())
    }

    fn last_names(&self, students: &[Student]) -> Vec<String> {
        Self::project(students, |s| s.last_name.clone())
    }

    fn groups(&self, students: &[Student]) -> Vec<String> {
        Self::project(students, |s| s.group.clone())
    }

    fn full_names(&self, students: &[Student]) -> Vec<String> {
        Self::project(students, Student::full_name)
    }

    fn distinct_first_names(&self, students: &[Student]) -> BTreeSet<String> {
        distinct_by(students, |s| s.first_name.clone())
    }

    fn min_student_first_name(&self, students: &[Student]) -> String {
        students
            .iter()
            .min_by(|a, b| by_id(a, b))
            .map(|s| s.first_name.clone())
            .unwrap_or_default()
    }

    fn sort_students_by_id<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> Vec<Student> {
        Self::sorted(students, by_id)
    }

    fn sort_students_by_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> Vec<Student> {
        Self::sorted(students, by_name)
    }

    fn find_students_by_first_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        name: &str,
    ) -> Vec<Student> {
        Self::filter_sorted_by_name(students, |s| s.first_name == name)
    }

    fn find_students_by_last_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        name: &str,
    ) -> Vec<Student> {
        Self::filter_sorted_by_name(students, |s| s.last_name == name)
    }

    fn find_students_by_group<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        group: &str,
    ) -> Vec<Student> {
        Self::filter_sorted_by_name(students, |s| s.group == group)
    }

    fn find_student_names_by_group<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        group: &str,
    ) -> BTreeMap<String, String> {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        for student in students.into_iter().filter(|s| s.group == group) {
            names
                .entry(student.last_name.clone())
                .and_modify(|first| {
                    if student.first_name < *first {
                        first.clone_from(&student.first_name);
                    }
                })
                .or_insert_with(|| student.first_name.clone());
        }
        names
    }
}

impl GroupQuery for StudentDb {
    fn groups_by_name<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> Vec<Group> {
        Self::groups_sorted_by(students, by_name)
    }

    fn groups_by_id<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> Vec<Group> {
        Self::groups_sorted_by(students, by_id)
    }

    fn largest_group<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> String {
        Self::largest_group_by(students, |members| members.len())
    }

    fn largest_group_first_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> String {
        Self::largest_group_by(students, |members| {
            distinct_by(members.iter().copied(), |s| s.first_name.clone()).len()
        })
    }
}

impl AdvancedQuery for StudentDb {
    fn most_popular_name<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> String {
        let measured = partition(students, Student::full_name)
            .into_iter()
            .map(|(name, members)| {
                let cohorts = distinct_by(members, |s| s.group.clone()).len();
                (name, cohorts)
            });
        select_largest(measured, POPULAR_NAME_TIE_BREAK).unwrap_or_default()
    }

    fn first_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>> {
        self.project_by_indices(&Self::indexed(students), indices, |s| s.first_name.clone())
    }

    fn last_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>> {
        self.project_by_indices(&Self::indexed(students), indices, |s| s.last_name.clone())
    }

    fn groups_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>> {
        self.project_by_indices(&Self::indexed(students), indices, |s| s.group.clone())
    }

    fn full_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>> {
        self.project_by_indices(&Self::indexed(students), indices, Student::full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lee_fox() -> Vec<Student> {
        vec![
            Student::new(1, "Bob", "Lee", "G1"),
            Student::new(2, "Ann", "Lee", "G1"),
            Student::new(3, "Cid", "Fox", "G2"),
        ]
    }

    fn ids(students: &[Student]) -> Vec<i32> {
        students.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_sort_by_name_end_to_end() {
        let db = StudentDb::new();
        let sorted = db.sort_students_by_name(&lee_fox());
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
        assert_eq!(sorted[0].full_name(), "Cid Fox");
        assert_eq!(sorted[1].full_name(), "Ann Lee");
        assert_eq!(sorted[2].full_name(), "Bob Lee");
    }

    #[test]
    fn test_sort_by_id_is_idempotent_and_does_not_mutate_input() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(5, "E", "E", "G"),
            Student::new(2, "B", "B", "G"),
            Student::new(9, "I", "I", "G"),
            Student::new(2, "X", "X", "G"),
        ];
        let snapshot = students.clone();
        let once = db.sort_students_by_id(&students);
        let twice = db.sort_students_by_id(&once);

        assert_eq!(ids(&once), vec![2, 2, 5, 9]);
        // equal ids keep input order
        assert_eq!(once[0].first_name, "B");
        assert_eq!(once[1].first_name, "X");
        assert_eq!(once, twice);
        assert_eq!(students, snapshot);
    }

    #[test]
    fn test_projections_preserve_order_and_duplicates() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(2, "Ann", "Lee", "G1"),
            Student::new(1, "Ann", "Fox", "G2"),
        ];
        assert_eq!(db.first_names(&students), vec!["Ann", "Ann"]);
        assert_eq!(db.last_names(&students), vec!["Lee", "Fox"]);
        assert_eq!(db.groups(&students), vec!["G1", "G2"]);
        assert_eq!(db.full_names(&students), vec!["Ann Lee", "Ann Fox"]);
    }

    #[test]
    fn test_distinct_first_names_sorted() {
        let db = StudentDb::new();
        let mut students = lee_fox();
        students.push(Student::new(4, "Ann", "Zed", "G3"));
        let names: Vec<String> = db.distinct_first_names(&students).into_iter().collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cid"]);
    }

    #[test]
    fn test_min_student_first_name() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(7, "Gus", "A", "G"),
            Student::new(3, "Cid", "B", "G"),
            Student::new(3, "Dan", "C", "G"),
        ];
        assert_eq!(db.min_student_first_name(&students), "Cid");
        assert_eq!(db.min_student_first_name(&[]), "");
    }

    #[test]
    fn test_groups_by_name_and_id() {
        let db = StudentDb::new();
        let students = lee_fox();

        let by_name = db.groups_by_name(&students);
        assert_eq!(by_name.len(), 2);
        assert_eq!(by_name[0].name, "G1");
        assert_eq!(ids(&by_name[0].students), vec![2, 1]);
        assert_eq!(by_name[1].name, "G2");

        let by_id = db.groups_by_id(&students);
        assert_eq!(ids(&by_id[0].students), vec![1, 2]);
        assert!(db.groups_by_id(&Vec::<Student>::new()).is_empty());
    }

    #[test]
    fn test_largest_group_reverse_tie_break() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(1, "A1", "X", "A"),
            Student::new(2, "A2", "X", "A"),
            Student::new(3, "B1", "X", "B"),
            Student::new(4, "B2", "X", "B"),
        ];
        assert_eq!(db.largest_group(&students), "B");
        assert_eq!(db.largest_group(&lee_fox()), "G1");
        assert_eq!(db.largest_group(&Vec::<Student>::new()), "");
    }

    #[test]
    fn test_largest_group_first_name_counts_distinct_names() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(1, "Ann", "X", "A"),
            Student::new(2, "Ann", "Y", "A"),
            Student::new(3, "Ann", "Z", "A"),
            Student::new(4, "Bob", "X", "B"),
            Student::new(5, "Cid", "X", "B"),
        ];
        assert_eq!(db.largest_group(&students), "A");
        assert_eq!(db.largest_group_first_name(&students), "B");
        assert_eq!(db.largest_group_first_name(&Vec::<Student>::new()), "");
    }

    #[test]
    fn test_find_filters_and_sorts_by_name() {
        let db = StudentDb::new();
        let students = lee_fox();
        assert_eq!(ids(&db.find_students_by_last_name(&students, "Lee")), vec![2, 1]);
        assert_eq!(ids(&db.find_students_by_first_name(&students, "Cid")), vec![3]);
        assert_eq!(ids(&db.find_students_by_group(&students, "G1")), vec![2, 1]);
        assert!(db.find_students_by_group(&students, "G9").is_empty());
    }

    #[test]
    fn test_names_by_group_keeps_smaller_first_name() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(1, "Zoe", "Smith", "G"),
            Student::new(2, "Amy", "Smith", "G"),
            Student::new(3, "Bea", "Jones", "G"),
            Student::new(4, "Aaa", "Smith", "H"),
        ];
        let names = db.find_student_names_by_group(&students, "G");
        assert_eq!(names.len(), 2);
        assert_eq!(names["Smith"], "Amy");
        assert_eq!(names["Jones"], "Bea");
    }

    #[test]
    fn test_most_popular_name_natural_tie_break() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(1, "Ann", "Lee", "G1"),
            Student::new(2, "Ann", "Lee", "G2"),
            Student::new(3, "Bob", "Fox", "G1"),
            Student::new(4, "Bob", "Fox", "G3"),
            Student::new(5, "Cid", "Ray", "G1"),
        ];
        assert_eq!(db.most_popular_name(&students), "Ann Lee");
        assert_eq!(db.most_popular_name(&Vec::<Student>::new()), "");
    }

    #[test]
    fn test_most_popular_name_counts_cohorts_not_people() {
        let db = StudentDb::new();
        let students = vec![
            Student::new(1, "Ann", "Lee", "G1"),
            Student::new(2, "Ann", "Lee", "G1"),
            Student::new(3, "Ann", "Lee", "G1"),
            Student::new(4, "Bob", "Fox", "G1"),
            Student::new(5, "Bob", "Fox", "G2"),
        ];
        assert_eq!(db.most_popular_name(&students), "Bob Fox");
    }

    #[test]
    fn test_project_by_indices() {
        let db = StudentDb::new();
        let students = lee_fox();
        let names = db
            .project_by_indices(&students, &[0, 2, 0], |s| s.first_name.clone())
            .unwrap();
        assert_eq!(names, vec!["Bob", "Cid", "Bob"]);

        let err = db
            .project_by_indices(&students, &[5], |s| s.first_name.clone())
            .unwrap_err();
        assert!(matches!(
            err,
            StudentDbError::IndexOutOfBounds { index: 5, len: 3 }
        ));
    }

    #[test]
    fn test_indexed_projections_over_collection() {
        let db = StudentDb::new();
        let students = lee_fox();
        assert_eq!(db.last_names_at(&students, &[2, 1]).unwrap(), vec!["Fox", "Lee"]);
        assert_eq!(db.groups_at(&students, &[]).unwrap(), Vec::<String>::new());
        assert_eq!(db.full_names_at(&students, &[1]).unwrap(), vec!["Ann Lee"]);
        assert!(db.first_names_at(&students, &[3]).is_err());
    }
}
