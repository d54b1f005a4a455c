use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
    pub group: String,
}

impl Student {
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            group: group.into(),
        }
    }

    /// "first last", the key used for name popularity.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A cohort and its members, in whatever order the producing query defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub students: Vec<Student>,
}

impl Group {
    pub fn new(name: impl Into<String>, students: Vec<Student>) -> Self {
        Self {
            name: name.into(),
            students,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Csv,
    Json,
}

impl RecordFormat {
    /// 依副檔名判斷輸入格式
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(RecordFormat::Csv),
            "json" => Some(RecordFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    GroupsByName,
    GroupsById,
    LargestGroup,
    LargestGroupFirstName,
    FirstNames,
    LastNames,
    Groups,
    FullNames,
    DistinctFirstNames,
    MinStudentFirstName,
    SortById,
    SortByName,
    FindByFirstName,
    FindByLastName,
    FindByGroup,
    NamesByGroup,
    MostPopularName,
    FirstNamesAt,
    LastNamesAt,
    GroupsAt,
    FullNamesAt,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::GroupsByName => "groups-by-name",
            QueryKind::GroupsById => "groups-by-id",
            QueryKind::LargestGroup => "largest-group",
            QueryKind::LargestGroupFirstName => "largest-group-first-name",
            QueryKind::FirstNames => "first-names",
            QueryKind::LastNames => "last-names",
            QueryKind::Groups => "groups",
            QueryKind::FullNames => "full-names",
            QueryKind::DistinctFirstNames => "distinct-first-names",
            QueryKind::MinStudentFirstName => "min-student-first-name",
            QueryKind::SortById => "sort-by-id",
            QueryKind::SortByName => "sort-by-name",
            QueryKind::FindByFirstName => "find-by-first-name",
            QueryKind::FindByLastName => "find-by-last-name",
            QueryKind::FindByGroup => "find-by-group",
            QueryKind::NamesByGroup => "names-by-group",
            QueryKind::MostPopularName => "most-popular-name",
            QueryKind::FirstNamesAt => "first-names-at",
            QueryKind::LastNamesAt => "last-names-at",
            QueryKind::GroupsAt => "groups-at",
            QueryKind::FullNamesAt => "full-names-at",
        }
    }

    /// Kinds that filter on a name or group and therefore need `value`.
    pub fn requires_value(&self) -> bool {
        matches!(
            self,
            QueryKind::FindByFirstName
                | QueryKind::FindByLastName
                | QueryKind::FindByGroup
                | QueryKind::NamesByGroup
        )
    }

    /// Positional kinds that need `indices`.
    pub fn requires_indices(&self) -> bool {
        matches!(
            self,
            QueryKind::FirstNamesAt
                | QueryKind::LastNamesAt
                | QueryKind::GroupsAt
                | QueryKind::FullNamesAt
        )
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub kind: QueryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<usize>>,
}

impl QueryRequest {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            label: None,
            value: None,
            indices: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_indices(mut self, indices: Vec<usize>) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum QueryOutput {
    Names(Vec<String>),
    NameSet(BTreeSet<String>),
    Students(Vec<Student>),
    Groups(Vec<Group>),
    Mapping(BTreeMap<String, String>),
    Scalar(String),
}

impl QueryOutput {
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Names(names) => names.len(),
            QueryOutput::NameSet(names) => names.len(),
            QueryOutput::Students(students) => students.len(),
            QueryOutput::Groups(groups) => groups.len(),
            QueryOutput::Mapping(mapping) => mapping.len(),
            QueryOutput::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub kind: QueryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub output: QueryOutput,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub student_count: usize,
    pub results: Vec<QueryResult>,
}
