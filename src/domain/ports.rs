use crate::domain::model::{Group, OutputFormat, QueryReport, QueryRequest, RecordFormat, Student};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Positional projections and simple derivations.
///
/// Methods taking `&[Student]` treat the input as an ordered sequence and keep
/// its order; methods taking an iterator treat it as an unordered collection
/// and re-sort their result.
pub trait StudentQuery {
    fn first_names(&self, students: &[Student]) -> Vec<String>;

    fn last_names(&self, students: &[Student]) -> Vec<String>;

    fn groups(&self, students: &[Student]) -> Vec<String>;

    fn full_names(&self, students: &[Student]) -> Vec<String>;

    fn distinct_first_names(&self, students: &[Student]) -> BTreeSet<String>;

    /// First name of the student with the smallest id, or `""` for no students.
    fn min_student_first_name(&self, students: &[Student]) -> String;

    fn sort_students_by_id<'a>(&self, students: impl IntoIterator<Item = &'a Student>)
        -> Vec<Student>;

    fn sort_students_by_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> Vec<Student>;

    fn find_students_by_first_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        name: &str,
    ) -> Vec<Student>;

    fn find_students_by_last_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        name: &str,
    ) -> Vec<Student>;

    fn find_students_by_group<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        group: &str,
    ) -> Vec<Student>;

    /// Last name to first name within `group`; the smaller first name wins on collision.
    fn find_student_names_by_group<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        group: &str,
    ) -> BTreeMap<String, String>;
}

/// Cohort-level views.
pub trait GroupQuery: StudentQuery {
    fn groups_by_name<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> Vec<Group>;

    fn groups_by_id<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> Vec<Group>;

    fn largest_group<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> String;

    fn largest_group_first_name<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
    ) -> String;
}

pub trait AdvancedQuery: GroupQuery {
    fn most_popular_name<'a>(&self, students: impl IntoIterator<Item = &'a Student>) -> String;

    fn first_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>>;

    fn last_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>>;

    fn groups_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>>;

    fn full_names_at<'a>(
        &self,
        students: impl IntoIterator<Item = &'a Student>,
        indices: &[usize],
    ) -> Result<Vec<String>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn report_name(&self) -> &str;
    fn input_path(&self) -> &str;
    /// `None` means infer from the input file extension.
    fn input_format(&self) -> Option<RecordFormat>;
    fn output_path(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn queries(&self) -> Vec<QueryRequest>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Student>>;
    async fn transform(&self, students: Vec<Student>) -> Result<QueryReport>;
    async fn load(&self, report: QueryReport) -> Result<String>;
}
