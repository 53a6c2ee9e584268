//! Maintenance commands over a roster file written by the pipeline.

use crate::core::writer;
use crate::domain::model::StudentRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation;
use serde_json::Value;

/// Search/gender filter used by `list`. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub gender: Option<String>,
}

impl StudentFilter {
    pub fn matches(&self, student: &Value) -> bool {
        let field = |key: &str| display_value(student.get(key).unwrap_or(&Value::Null));
        let matches_search = match self.search.as_deref().map(str::to_lowercase) {
            Some(query) if !query.is_empty() => {
                field("name").to_lowercase().contains(&query)
                    || field("course").to_lowercase().contains(&query)
            }
            _ => true,
        };
        let matches_gender = match self.gender.as_deref() {
            Some(gender) if !gender.is_empty() => {
                field("gender").to_lowercase() == gender.to_lowercase()
            }
            _ => true,
        };
        matches_search && matches_gender
    }
}

/// A student entered by hand, before trimming and validation.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub email: String,
    pub course: String,
    pub year: String,
    pub university: String,
}

impl NewStudent {
    fn into_record(self) -> Result<StudentRecord> {
        let student_id = self.student_id.trim().to_string();
        let name = self.name.trim().to_string();
        let gender = self.gender.trim().to_string();
        let email = self.email.trim().to_string();

        validation::validate_required("student_id", &student_id)?;
        validation::validate_required("name", &name)?;
        validation::validate_required("gender", &gender)?;
        validation::validate_required("email", &email)?;
        validation::validate_letters_only("name", &name)?;
        validation::validate_gender("gender", &gender)?;
        validation::validate_email("email", &email)?;

        Ok(StudentRecord {
            student_id: Value::String(student_id),
            name: Value::String(name),
            gender: Value::String(gender),
            email: Value::String(email),
            course: Value::String(self.course.trim().to_string()),
            year: Value::String(self.year.trim().to_string()),
            university: Value::String(self.university.trim().to_string()),
            age: String::new(),
        })
    }
}

pub struct Roster<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> Roster<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Missing or unreadable rosters read as empty.
    async fn load_or_empty(&self) -> Vec<Value> {
        match self.load_strict().await {
            Ok(students) => students,
            Err(e) => {
                tracing::warn!("Treating roster as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Entries are kept as raw JSON so keys this tool does not know about
    /// survive a rewrite.
    async fn load_strict(&self) -> Result<Vec<Value>> {
        let bytes = match self.storage.read_file(&self.path).await {
            Ok(bytes) => bytes,
            Err(EtlError::InputNotFound { .. }) => {
                return Err(EtlError::RosterNotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let format_error = |message: String| EtlError::RosterFormat {
            path: self.path.clone(),
            message,
        };
        let parsed: Value =
            serde_json::from_slice(&bytes).map_err(|e| format_error(e.to_string()))?;
        match parsed {
            Value::Array(students) => Ok(students),
            other => Err(format_error(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub async fn list(&self, filter: &StudentFilter) -> Vec<Value> {
        self.load_or_empty()
            .await
            .into_iter()
            .filter(|student| filter.matches(student))
            .collect()
    }

    /// Validates and appends a student, returning the stored entry.
    pub async fn add(&self, student: NewStudent) -> Result<StudentRecord> {
        let record = student.into_record()?;
        let mut students = self.load_or_empty().await;
        students.push(serde_json::to_value(&record)?);

        writer::write_dataset(&self.storage, &self.path, &students).await?;
        tracing::info!("Student saved: {}", display_value(&record.student_id));
        Ok(record)
    }

    /// Removes every entry with `student_id`, returning how many were dropped.
    pub async fn remove(&self, student_id: &str) -> Result<usize> {
        let mut students = self.load_strict().await?;
        let initial_len = students.len();
        students.retain(|s| {
            display_value(s.get("student_id").unwrap_or(&Value::Null)) != student_id
        });

        let removed = initial_len - students.len();
        if removed == 0 {
            return Err(EtlError::StudentNotFound {
                student_id: student_id.to_string(),
            });
        }

        writer::write_dataset(&self.storage, &self.path, &students).await?;
        tracing::info!("Deleted student: {}", student_id);
        Ok(removed)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Text form of a roster value: strings unquoted, `null` empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Box-drawn table of students under the source column titles.
#[cfg(feature = "cli")]
pub fn render_table(students: &[Value]) -> prettytable::Table {
    use crate::core::projector::FIELD_MAP;
    use prettytable::{format, Cell, Row, Table};

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        FIELD_MAP
            .iter()
            .map(|(column, _)| Cell::new(column).style_spec("b"))
            .collect(),
    ));
    for student in students {
        table.add_row(Row::new(
            FIELD_MAP
                .iter()
                .map(|(_, key)| {
                    Cell::new(&display_value(student.get(*key).unwrap_or(&Value::Null)))
                })
                .collect(),
        ));
    }
    table
}
