//! Input validation for student requests
//!
//! Runs at the transport boundary before the facade is called and returns
//! every failing field at once rather than stopping at the first.

use crate::errors::FieldError;
use crate::types::{StudentPayload, StudentRequest};

/// Check a create/update body and produce the request the core accepts
pub fn validate_student_payload(payload: StudentPayload) -> Result<StudentRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = required_text(payload.name, "name", "Name is required", &mut errors);
    let age = required_text(payload.age, "age", "Age is required", &mut errors);
    let student_class = required_text(
        payload.student_class,
        "studentClass",
        "Student class is required",
        &mut errors,
    );
    let phone_number = match payload.phone_number {
        None => {
            errors.push(FieldError::new("phoneNumber", "Phone number is required"));
            None
        }
        Some(n) if n < 0 => {
            errors.push(FieldError::new(
                "phoneNumber",
                "Phone number must not be negative",
            ));
            None
        }
        Some(n) => Some(n),
    };

    match (name, age, student_class, phone_number) {
        (Some(name), Some(age), Some(student_class), Some(phone_number)) => Ok(StudentRequest {
            name,
            age,
            student_class,
            phone_number,
        }),
        _ => Err(errors),
    }
}

/// Check listing window parameters
///
/// Only negatives are rejected; there is no upper bound on `limit`.
pub fn validate_page(limit: i64, offset: i64) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if limit < 0 {
        errors.push(FieldError::new("limit", "limit must not be negative"));
    }
    if offset < 0 {
        errors.push(FieldError::new("offset", "offset must not be negative"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn required_text(
    value: Option<String>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}
