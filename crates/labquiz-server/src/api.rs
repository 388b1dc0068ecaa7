//! JSON request and response bodies.
//!
//! Field names match what the quiz page script sends; the shorter
//! `course`/`lab`/`question` spellings are accepted too.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    #[serde(alias = "course")]
    pub course_name: String,
    #[serde(alias = "lab")]
    pub lab_id: String,
    #[serde(alias = "question")]
    pub question_id: u32,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteRequest {
    #[serde(alias = "course")]
    pub course_name: String,
    #[serde(alias = "lab")]
    pub lab_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub success: bool,
    pub message: String,
    /// Path of the marker that was written.
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(alias = "course")]
    pub course_name: String,
    #[serde(alias = "lab")]
    pub lab_id: String,
    /// Delete every marker, not just this lab's.
    #[serde(default)]
    pub reset_all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
    pub deleted_files: Vec<String>,
    /// `null` when every deletion succeeded.
    pub errors: Option<Vec<String>>,
    /// Local-storage key the browser should clear.
    #[serde(rename = "localStorage_key")]
    pub local_storage_key: String,
}
