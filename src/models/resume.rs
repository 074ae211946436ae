use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

pub const SKILL_CATEGORIES: &[&str] = &[
    "technical",
    "soft",
    "language",
    "frameworks",
    "tools",
    "other",
];

pub const SKILL_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

pub const SOCIAL_PLATFORMS: &[&str] = &[
    "linkedin",
    "github",
    "twitter",
    "portfolio",
    "instagram",
    "facebook",
    "youtube",
    "website",
];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Resume {
    pub id: String,
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct ResumeForm {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
}

impl Resume {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Resume {
            id: row.get("id")?,
            full_name: row.get("full_name")?,
            title: row.get("title")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            location: row.get("location")?,
            website: row.get("website")?,
            summary: row.get("summary")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Experience {
    pub id: String,
    pub resume_id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct ExperienceForm {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl Experience {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Experience {
            id: row.get("id")?,
            resume_id: row.get("resume_id")?,
            company: row.get("company")?,
            position: row.get("position")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            description: row.get("description")?,
            location: row.get("location")?,
            order: row.get("order")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Education {
    pub id: String,
    pub resume_id: String,
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct EducationForm {
    pub institution: String,
    pub degree: String,
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

impl Education {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Education {
            id: row.get("id")?,
            resume_id: row.get("resume_id")?,
            institution: row.get("institution")?,
            degree: row.get("degree")?,
            field: row.get("field")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            gpa: row.get("gpa")?,
            description: row.get("description")?,
            order: row.get("order")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Skill {
    pub id: String,
    pub resume_id: String,
    pub name: String,
    pub category: String,
    pub level: Option<String>,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub level: Option<String>,
}

impl Skill {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Skill {
            id: row.get("id")?,
            resume_id: row.get("resume_id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            level: row.get("level")?,
            order: row.get("order")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocialLink {
    pub id: String,
    pub resume_id: String,
    pub platform: String,
    pub url: String,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, Clone)]
pub struct SocialLinkForm {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(SocialLink {
            id: row.get("id")?,
            resume_id: row.get("resume_id")?,
            platform: row.get("platform")?,
            url: row.get("url")?,
            order: row.get("order")?,
            created_at: row.get("created_at")?,
        })
    }
}
