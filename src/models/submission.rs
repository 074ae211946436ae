use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

// Submissions are immutable: there is a create path and an admin
// list/delete path, nothing else.

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

impl ContactSubmission {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(ContactSubmission {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            company: row.get("company")?,
            subject: row.get("subject")?,
            message: row.get("message")?,
            budget: row.get("budget")?,
            timeline: row.get("timeline")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedbackSubmission {
    pub id: String,
    pub client_name: String,
    pub email: String,
    pub company: Option<String>,
    pub project_name: String,
    pub rating: i64,
    pub feedback: String,
    pub improvements: Option<String>,
    pub recommend: Option<String>,
    pub testimonial_permission: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct FeedbackForm {
    pub client_name: String,
    pub email: String,
    pub company: Option<String>,
    pub project_name: String,
    pub rating: i64,
    pub feedback: String,
    pub improvements: Option<String>,
    pub recommend: Option<String>,
    pub testimonial_permission: Option<String>,
}

impl FeedbackSubmission {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(FeedbackSubmission {
            id: row.get("id")?,
            client_name: row.get("client_name")?,
            email: row.get("email")?,
            company: row.get("company")?,
            project_name: row.get("project_name")?,
            rating: row.get("rating")?,
            feedback: row.get("feedback")?,
            improvements: row.get("improvements")?,
            recommend: row.get("recommend")?,
            testimonial_permission: row.get("testimonial_permission")?,
            created_at: row.get("created_at")?,
        })
    }
}
