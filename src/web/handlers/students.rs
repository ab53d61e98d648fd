//! # Student Handlers
//!
//! `/student` endpoints. Every response, including framework rejections,
//! is wrapped in the `{success, data, message}` envelope.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::errors::FieldError;
use crate::models::Student;
use crate::types::{StudentPayload, StudentView};
use crate::validation::{validate_page, validate_student_payload};
use crate::web::response_types::{ApiError, ResponseWrapper};
use crate::web::state::AppState;

type ApiResult<T> = Result<Json<ResponseWrapper<T>>, ApiError>;

/// Query parameters for `GET /student/all`
#[derive(Debug, Clone, Deserialize)]
pub struct ListStudentsQuery {
    pub limit: i64,
    pub offset: i64,
    #[serde(default)]
    pub name: String,
}

fn parse_student_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        ApiError::validation(vec![FieldError::new(
            "id",
            format!("'{raw}' is not a valid student id"),
        )])
    })
}

/// Create a student: POST /student
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<Student> {
    let Json(payload) = payload?;
    let request = validate_student_payload(payload).map_err(ApiError::validation)?;

    let student = state.facade.add_student(&request).await?;
    Ok(Json(ResponseWrapper::ok(student)))
}

/// Students whose name equals `name`: GET /student/{name}
pub async fn get_students_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<StudentView>> {
    let students = state.facade.get_student_by_name(&name).await?;
    Ok(Json(ResponseWrapper::ok(students)))
}

/// Delete a student: DELETE /student/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<bool> {
    let id = parse_student_id(&raw_id)?;
    let deleted = state.facade.delete_student(id).await?;
    Ok(Json(ResponseWrapper::ok(deleted)))
}

/// Replace a student's fields: PUT /student/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> ApiResult<bool> {
    let id = parse_student_id(&raw_id)?;
    let Json(payload) = payload?;
    let request = validate_student_payload(payload).map_err(ApiError::validation)?;

    let updated = state.facade.update_student_info_by_id(&request, id).await?;
    Ok(Json(ResponseWrapper::ok(updated)))
}

/// Paginated listing: GET /student/all?limit=&offset=&name=
pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<ListStudentsQuery>, QueryRejection>,
) -> ApiResult<Vec<StudentView>> {
    let Query(query) = query?;
    validate_page(query.limit, query.offset).map_err(ApiError::validation)?;

    debug!(
        limit = query.limit,
        offset = query.offset,
        name = %query.name,
        "Listing students"
    );
    let students = state
        .facade
        .get_all_students_info(query.limit, query.offset, &query.name)
        .await?;
    Ok(Json(ResponseWrapper::ok(students)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_id() {
        assert_eq!(parse_student_id("42").unwrap(), 42);
        assert!(parse_student_id("abc").is_err());
        assert!(parse_student_id("").is_err());
    }
}
