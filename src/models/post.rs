use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub manual_summary: Option<String>,
    pub ai_summary: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct BlogPostForm {
    pub title: String,
    pub slug: String,
    pub manual_summary: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
}

impl BlogPost {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(BlogPost {
            id: row.get("id")?,
            title: row.get("title")?,
            slug: row.get("slug")?,
            manual_summary: row.get("manual_summary")?,
            ai_summary: row.get("ai_summary")?,
            featured_image: row.get("featured_image")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
