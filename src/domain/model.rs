use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One row of the source table, keyed by header column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.data.get(column)
    }
}

/// One entry of the student roster. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_id: Value,
    pub name: Value,
    pub gender: Value,
    pub email: Value,
    pub course: Value,
    pub year: Value,
    pub university: Value,
    // Placeholder column; never populated from the source.
    pub age: String,
}

/// Projected rows in input order.
#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub students: Vec<StudentRecord>,
}

impl TransformResult {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
