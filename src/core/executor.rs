use crate::core::student_db::StudentDb;
use crate::domain::model::{QueryKind, QueryOutput, QueryRequest, QueryResult, Student};
use crate::domain::ports::{AdvancedQuery, GroupQuery, StudentQuery};
use crate::utils::error::{Result, StudentDbError};

/// Runs named query requests against a loaded set of students.
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    db: StudentDb,
}

impl QueryExecutor {
    pub fn new(db: StudentDb) -> Self {
        Self { db }
    }

    pub fn execute(&self, students: &[Student], request: &QueryRequest) -> Result<QueryResult> {
        let db = &self.db;
        let output = match request.kind {
            QueryKind::GroupsByName => QueryOutput::Groups(db.groups_by_name(students)),
            QueryKind::GroupsById => QueryOutput::Groups(db.groups_by_id(students)),
            QueryKind::LargestGroup => QueryOutput::Scalar(db.largest_group(students)),
            QueryKind::LargestGroupFirstName => {
                QueryOutput::Scalar(db.largest_group_first_name(students))
            }
            QueryKind::FirstNames => QueryOutput::Names(db.first_names(students)),
            QueryKind::LastNames => QueryOutput::Names(db.last_names(students)),
            QueryKind::Groups => QueryOutput::Names(db.groups(students)),
            QueryKind::FullNames => QueryOutput::Names(db.full_names(students)),
            QueryKind::DistinctFirstNames => {
                QueryOutput::NameSet(db.distinct_first_names(students))
            }
            QueryKind::MinStudentFirstName => {
                QueryOutput::Scalar(db.min_student_first_name(students))
            }
            QueryKind::SortById => QueryOutput::Students(db.sort_students_by_id(students)),
            QueryKind::SortByName => QueryOutput::Students(db.sort_students_by_name(students)),
            QueryKind::FindByFirstName => QueryOutput::Students(
                db.find_students_by_first_name(students, Self::value(request)?),
            ),
            QueryKind::FindByLastName => QueryOutput::Students(
                db.find_students_by_last_name(students, Self::value(request)?),
            ),
            QueryKind::FindByGroup => {
                QueryOutput::Students(db.find_students_by_group(students, Self::value(request)?))
            }
            QueryKind::NamesByGroup => QueryOutput::Mapping(
                db.find_student_names_by_group(students, Self::value(request)?),
            ),
            QueryKind::MostPopularName => QueryOutput::Scalar(db.most_popular_name(students)),
            QueryKind::FirstNamesAt => {
                QueryOutput::Names(db.first_names_at(students, Self::indices(request)?)?)
            }
            QueryKind::LastNamesAt => {
                QueryOutput::Names(db.last_names_at(students, Self::indices(request)?)?)
            }
            QueryKind::GroupsAt => {
                QueryOutput::Names(db.groups_at(students, Self::indices(request)?)?)
            }
            QueryKind::FullNamesAt => {
                QueryOutput::Names(db.full_names_at(students, Self::indices(request)?)?)
            }
        };

        Ok(QueryResult {
            kind: request.kind,
            label: request.label.clone(),
            output,
        })
    }

    /// Checks that a request carries the arguments its kind needs.
    pub fn check_arguments(request: &QueryRequest) -> Result<()> {
        if request.kind.requires_value() {
            Self::value(request)?;
        }
        if request.kind.requires_indices() {
            Self::indices(request)?;
        }
        Ok(())
    }

    fn value(request: &QueryRequest) -> Result<&str> {
        request
            .value
            .as_deref()
            .ok_or_else(|| StudentDbError::MissingArgument {
                query: request.kind.to_string(),
                argument: "value".to_string(),
            })
    }

    fn indices(request: &QueryRequest) -> Result<&[usize]> {
        request
            .indices
            .as_deref()
            .ok_or_else(|| StudentDbError::MissingArgument {
                query: request.kind.to_string(),
                argument: "indices".to_string(),
            })
    }
}
