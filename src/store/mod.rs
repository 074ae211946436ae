use std::collections::HashMap;

use crate::models::block::{BlockPayload, BlogBlock};
use crate::models::post::{BlogPost, BlogPostForm};
use crate::models::project::{Project, ProjectForm};
use crate::models::resume::{
    Education, EducationForm, Experience, ExperienceForm, Resume, ResumeForm, Skill, SkillForm,
    SocialLink, SocialLinkForm,
};
use crate::models::submission::{
    ContactForm, ContactSubmission, FeedbackForm, FeedbackSubmission,
};
use crate::models::user::User;

pub mod sqlite;

/// Failure from a child reorder.
#[derive(Debug, PartialEq)]
pub enum ReorderError {
    /// The supplied id list is not a permutation of the parent's current
    /// children (wrong length, duplicate id, or an id owned elsewhere).
    Mismatch,
    Db(String),
}

impl std::fmt::Display for ReorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderError::Mismatch => {
                write!(f, "id list does not match the parent's children")
            }
            ReorderError::Db(e) => write!(f, "{}", e),
        }
    }
}

/// Unified data-access trait. Every database operation goes through here;
/// handlers receive an `Arc<dyn Store>` via managed state.
pub trait Store: Send + Sync {
    // ── Lifecycle ───────────────────────────────────────────────────
    fn run_migrations(&self) -> Result<(), String>;
    fn seed_defaults(&self) -> Result<(), String>;

    // ── Settings ────────────────────────────────────────────────────
    fn setting_get(&self, key: &str) -> Option<String>;
    fn setting_get_or(&self, key: &str, default: &str) -> String {
        self.setting_get(key).unwrap_or_else(|| default.to_string())
    }
    fn setting_get_bool(&self, key: &str) -> bool {
        self.setting_get(key)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
    }
    fn setting_get_i64(&self, key: &str) -> i64 {
        self.setting_get(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
    fn setting_set(&self, key: &str, value: &str) -> Result<(), String>;
    fn setting_all(&self) -> HashMap<String, String>;

    // ── Users & sessions ────────────────────────────────────────────
    fn user_get_by_id(&self, id: &str) -> Option<User>;
    fn user_get_by_username(&self, username: &str) -> Option<User>;
    fn user_create(&self, username: &str, password_hash: &str) -> Result<String, String>;
    fn session_create(
        &self,
        user_id: &str,
        session_id: &str,
        expires_at: &str,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), String>;
    fn session_get_user(&self, session_id: &str) -> Option<User>;
    fn session_delete(&self, session_id: &str) -> Result<(), String>;
    fn session_cleanup_expired(&self);

    // ── Projects ────────────────────────────────────────────────────
    fn project_find(&self, id: &str) -> Option<Project>;
    fn project_list(&self, status: Option<&str>) -> Vec<Project>;
    fn project_recent(&self, limit: i64) -> Vec<Project>;
    fn project_create(&self, form: &ProjectForm) -> Result<String, String>;
    fn project_update(&self, id: &str, form: &ProjectForm) -> Result<(), String>;
    fn project_delete(&self, id: &str) -> Result<(), String>;

    // ── Blog posts ──────────────────────────────────────────────────
    fn post_find(&self, id: &str) -> Option<BlogPost>;
    fn post_find_by_slug(&self, slug: &str) -> Option<BlogPost>;
    fn post_list(&self, status: Option<&str>) -> Vec<BlogPost>;
    fn post_recent(&self, limit: i64) -> Vec<BlogPost>;
    fn post_create(&self, form: &BlogPostForm) -> Result<String, String>;
    fn post_update(&self, id: &str, form: &BlogPostForm) -> Result<(), String>;
    fn post_set_ai_summary(&self, id: &str, summary: &str) -> Result<(), String>;
    fn post_delete(&self, id: &str) -> Result<(), String>;

    // ── Blog blocks (ordered children of a post) ────────────────────
    fn block_find(&self, id: &str) -> Option<BlogBlock>;
    fn block_list(&self, post_id: &str) -> Vec<BlogBlock>;
    /// Appends at order = 1 + max(existing, default -1).
    fn block_append(&self, post_id: &str, payload: &BlockPayload) -> Result<BlogBlock, String>;
    fn block_update_content(&self, id: &str, payload: &BlockPayload) -> Result<(), String>;
    /// Removes the row only; sibling order values are left untouched.
    fn block_delete(&self, id: &str) -> Result<(), String>;
    /// Rewrites order 0..n-1 in the given sequence. The id list must be a
    /// permutation of the post's current blocks.
    fn block_reorder(&self, post_id: &str, ids: &[String]) -> Result<(), ReorderError>;

    // ── Resume ──────────────────────────────────────────────────────
    fn resume_get(&self) -> Option<Resume>;
    fn resume_upsert(&self, form: &ResumeForm) -> Result<String, String>;
    /// Id of the resume row, creating a placeholder when none exists yet
    /// (children can be added before the resume itself is filled in).
    fn resume_get_or_create(&self) -> Result<String, String>;

    // ── Experiences ─────────────────────────────────────────────────
    fn experience_find(&self, id: &str) -> Option<Experience>;
    fn experience_list(&self, resume_id: &str) -> Vec<Experience>;
    fn experience_append(&self, resume_id: &str, form: &ExperienceForm) -> Result<String, String>;
    fn experience_update(&self, id: &str, form: &ExperienceForm) -> Result<(), String>;
    fn experience_delete(&self, id: &str) -> Result<(), String>;
    fn experience_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError>;

    // ── Education entries ───────────────────────────────────────────
    fn education_find(&self, id: &str) -> Option<Education>;
    fn education_list(&self, resume_id: &str) -> Vec<Education>;
    fn education_append(&self, resume_id: &str, form: &EducationForm) -> Result<String, String>;
    fn education_update(&self, id: &str, form: &EducationForm) -> Result<(), String>;
    fn education_delete(&self, id: &str) -> Result<(), String>;
    fn education_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError>;

    // ── Skills ──────────────────────────────────────────────────────
    fn skill_find(&self, id: &str) -> Option<Skill>;
    fn skill_list(&self, resume_id: &str) -> Vec<Skill>;
    fn skill_append(&self, resume_id: &str, form: &SkillForm) -> Result<String, String>;
    fn skill_update(&self, id: &str, form: &SkillForm) -> Result<(), String>;
    fn skill_delete(&self, id: &str) -> Result<(), String>;
    fn skill_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError>;

    // ── Social links ────────────────────────────────────────────────
    fn social_link_find(&self, id: &str) -> Option<SocialLink>;
    fn social_link_list(&self, resume_id: &str) -> Vec<SocialLink>;
    fn social_link_append(&self, resume_id: &str, form: &SocialLinkForm)
        -> Result<String, String>;
    fn social_link_update(&self, id: &str, form: &SocialLinkForm) -> Result<(), String>;
    fn social_link_delete(&self, id: &str) -> Result<(), String>;
    fn social_link_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError>;

    // ── Submissions ─────────────────────────────────────────────────
    fn contact_list(&self) -> Vec<ContactSubmission>;
    fn contact_create(&self, form: &ContactForm) -> Result<String, String>;
    fn contact_delete(&self, id: &str) -> Result<(), String>;
    fn contact_count(&self) -> i64;
    fn feedback_list(&self) -> Vec<FeedbackSubmission>;
    fn feedback_create(&self, form: &FeedbackForm) -> Result<String, String>;
    fn feedback_delete(&self, id: &str) -> Result<(), String>;
    fn feedback_count(&self) -> i64;
}
