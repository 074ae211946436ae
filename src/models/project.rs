use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub short_description: Option<String>,
    pub optional_link: Option<String>,
    pub full_description: Option<String>,
    pub extra_details: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct ProjectForm {
    pub name: String,
    pub image: Option<String>,
    pub short_description: Option<String>,
    pub optional_link: Option<String>,
    pub full_description: Option<String>,
    pub extra_details: Option<String>,
    pub status: String,
}

impl Project {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Project {
            id: row.get("id")?,
            name: row.get("name")?,
            image: row.get("image")?,
            short_description: row.get("short_description")?,
            optional_link: row.get("optional_link")?,
            full_description: row.get("full_description")?,
            extra_details: row.get("extra_details")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
