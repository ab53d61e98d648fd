use crate::types::StudentView;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Student represents one enrolled student
/// Maps to the `student` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    /// Free-form, not checked for being numeric
    pub age: String,
    pub student_class: String,
    pub phone_number: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Student {
    /// Transfer shape without timestamps
    pub fn to_view(&self) -> StudentView {
        StudentView::from_student(self)
    }
}
