//! Request and transfer shapes for student records

use crate::models::Student;
use serde::{Deserialize, Serialize};

/// Create/update body exactly as received
///
/// Every field is optional so a missing field becomes a validation error
/// instead of a deserialization failure. See
/// [`validate_student_payload`](crate::validation::validate_student_payload).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: Option<String>,
    pub age: Option<String>,
    pub student_class: Option<String>,
    pub phone_number: Option<i64>,
}

/// Validated create/update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub name: String,
    pub age: String,
    pub student_class: String,
    pub phone_number: i64,
}

/// Student without timestamps, as returned by reads and stored in the cache
///
/// Two views of the same id are equal field-for-field unless an update
/// happened in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub id: i64,
    pub name: String,
    pub age: String,
    pub student_class: String,
    /// Rendered as a string on the wire
    pub phone_number: String,
}

impl StudentView {
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.name.clone(),
            age: student.age.clone(),
            student_class: student.student_class.clone(),
            phone_number: student.phone_number.to_string(),
        }
    }

    /// Build the view a successful update of `id` with `request` produces
    pub fn from_request(request: &StudentRequest, id: i64) -> Self {
        Self {
            id,
            name: request.name.clone(),
            age: request.age.clone(),
            student_class: request.student_class.clone(),
            phone_number: request.phone_number.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn student() -> Student {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Student {
            id: 5,
            name: "Alice".to_string(),
            age: "14".to_string(),
            student_class: "9B".to_string(),
            phone_number: 5_551_234_567,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_view_from_student_drops_timestamps() {
        let view = student().to_view();
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "id": 5,
                "name": "Alice",
                "age": "14",
                "studentClass": "9B",
                "phoneNumber": "5551234567"
            })
        );
    }

    #[test]
    fn test_from_request_matches_persisted_view() {
        let persisted = student();
        let request = StudentRequest {
            name: persisted.name.clone(),
            age: persisted.age.clone(),
            student_class: persisted.student_class.clone(),
            phone_number: persisted.phone_number,
        };
        assert_eq!(
            StudentView::from_request(&request, persisted.id),
            persisted.to_view()
        );
    }

    #[test]
    fn test_payload_accepts_partial_bodies() {
        let payload: StudentPayload = serde_json::from_value(json!({"name": "Bob"})).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Bob"));
        assert!(payload.phone_number.is_none());
    }

    #[test]
    fn test_student_serializes_camel_case_timestamps() {
        let value = serde_json::to_value(student()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["phoneNumber"], json!(5_551_234_567_i64));
    }
}
