use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub roll_number: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl Student {
    /// Email as shown in forms and tables, empty when unset.
    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStudentForm {
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub csrf_token: String,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<CreateStudentForm> for CreateStudentRequest {
    fn from(form: CreateStudentForm) -> Self {
        CreateStudentRequest {
            roll_number: form.roll_number.trim().to_string(),
            name: form.name.trim().to_string(),
            email: optional(&form.email),
        }
    }
}

impl From<UpdateStudentForm> for UpdateStudentRequest {
    fn from(form: UpdateStudentForm) -> Self {
        UpdateStudentRequest {
            name: form.name.trim().to_string(),
            email: optional(&form.email),
        }
    }
}

// Service request models
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStudentRequest {
    pub roll_number: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub email: Option<String>,
}
