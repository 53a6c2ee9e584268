use crate::domain::model::{Record, StudentRecord};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Source column for each copied roster field, in roster key order.
pub const FIELD_MAP: [(&str, &str); 7] = [
    ("Student ID", "student_id"),
    ("Full Name", "name"),
    ("Gender", "gender"),
    ("Gmail", "email"),
    ("Program", "course"),
    ("Year Level", "year"),
    ("University", "university"),
];

fn take(record: &Record, column: &str, row: usize) -> Result<Value> {
    record
        .get(column)
        .cloned()
        .ok_or_else(|| EtlError::MissingField {
            column: column.to_string(),
            row,
        })
}

/// Renames one row into a roster entry. `row` is 1-based and only used in errors.
pub fn project(record: &Record, row: usize) -> Result<StudentRecord> {
    let [student_id, name, gender, email, course, year, university] =
        FIELD_MAP.map(|(column, _)| take(record, column, row));
    Ok(StudentRecord {
        student_id: student_id?,
        name: name?,
        gender: gender?,
        email: email?,
        course: course?,
        year: year?,
        university: university?,
        age: String::new(),
    })
}

pub fn project_all(records: &[Record]) -> Result<Vec<StudentRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| project(record, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ana() -> Record {
        let mut record = Record::default();
        for (column, value) in [
            ("Student ID", json!(1)),
            ("Full Name", json!("Ana Cruz")),
            ("Gender", json!("F")),
            ("Gmail", json!("ana@x.com")),
            ("Program", json!("BSCS")),
            ("Year Level", json!(3)),
            ("University", json!("ABC U")),
        ] {
            record.data.insert(column.to_string(), value);
        }
        record
    }

    #[test]
    fn test_project_renames_every_field() {
        let student = project(&ana(), 1).unwrap();

        assert_eq!(student.student_id, json!(1));
        assert_eq!(student.name, json!("Ana Cruz"));
        assert_eq!(student.gender, json!("F"));
        assert_eq!(student.email, json!("ana@x.com"));
        assert_eq!(student.course, json!("BSCS"));
        assert_eq!(student.year, json!(3));
        assert_eq!(student.university, json!("ABC U"));
        assert_eq!(student.age, "");
    }

    #[test]
    fn test_project_ignores_extra_columns() {
        let mut record = ana();
        record.data.insert("Age".to_string(), json!(21));
        let student = project(&record, 1).unwrap();
        assert_eq!(student.age, "");
    }

    #[test]
    fn test_missing_column_is_reported_with_row() {
        let mut record = ana();
        record.data.remove("Gmail");

        let err = project_all(&[ana(), record]).unwrap_err();
        match err {
            EtlError::MissingField { column, row } => {
                assert_eq!(column, "Gmail");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_cell_is_not_missing() {
        let mut record = ana();
        record.data.insert("Program".to_string(), Value::Null);
        let student = project(&record, 1).unwrap();
        assert_eq!(student.course, Value::Null);
    }

    #[test]
    fn test_field_map_matches_key_order() {
        let rendered = serde_json::to_string(&project(&ana(), 1).unwrap()).unwrap();
        let positions: Vec<usize> = FIELD_MAP
            .iter()
            .map(|(_, key)| rendered.find(&format!("\"{}\":", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(rendered.ends_with(r#""age":""}"#));
    }
}
