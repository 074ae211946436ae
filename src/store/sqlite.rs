use std::collections::{HashMap, HashSet};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Row};

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

use super::{ReorderError, Store};

pub type DbPool = Pool<SqliteConnectionManager>;

/// SQLite-backed implementation of the Store trait, wrapping an r2d2 pool.
pub struct SqliteStore {
    pub pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn new_at(path: &str) -> Result<Self, String> {
        let pool = crate::db::init_pool_at(path)?;
        Ok(Self { pool })
    }

    fn row<T, F>(&self, sql: &str, args: &[&dyn rusqlite::types::ToSql], map: F) -> Option<T>
    where
        F: FnOnce(&Row) -> rusqlite::Result<T>,
    {
        let conn = self.pool.get().ok()?;
        conn.query_row(sql, args, map).ok()
    }

    fn rows<T, F>(&self, sql: &str, args: &[&dyn rusqlite::types::ToSql], map: F) -> Vec<T>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let conn = match self.pool.get() {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        let mut stmt = match conn.prepare(sql) {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        stmt.query_map(args, map)
            .map(|rows| rows.filter_map(|r| r.ok()).collect())
            .unwrap_or_default()
    }

    fn exec(&self, sql: &str, args: &[&dyn rusqlite::types::ToSql]) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute(sql, args).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn count(&self, sql: &str) -> i64 {
        self.row(sql, &[], |row| row.get(0)).unwrap_or(0)
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Order assigned to the next appended child: 1 + max(existing), or 0 when
/// the parent has no children yet.
fn next_order(
    conn: &Connection,
    table: &str,
    parent_col: &str,
    parent_id: &str,
) -> rusqlite::Result<i64> {
    conn.query_row(
        &format!(
            "SELECT COALESCE(MAX(\"order\"), -1) + 1 FROM {} WHERE {} = ?1",
            table, parent_col
        ),
        params![parent_id],
        |row| row.get(0),
    )
}

/// Rewrite the order column to 0..n-1 in the sequence given. The id list is
/// checked against the parent's current child set first: a wrong length, a
/// duplicate, or an id owned by another parent rejects the whole call, so a
/// stray id can never renumber a different parent's children.
fn reorder_rows(
    conn: &Connection,
    table: &str,
    parent_col: &str,
    parent_id: &str,
    ids: &[String],
) -> Result<(), ReorderError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id FROM {} WHERE {} = ?1",
            table, parent_col
        ))
        .map_err(|e| ReorderError::Db(e.to_string()))?;
    let existing: HashSet<String> = stmt
        .query_map(params![parent_id], |row| row.get::<_, String>(0))
        .map_err(|e| ReorderError::Db(e.to_string()))?
        .filter_map(|r| r.ok())
        .collect();

    if ids.len() != existing.len() {
        return Err(ReorderError::Mismatch);
    }
    let mut seen = HashSet::new();
    for id in ids {
        if !existing.contains(id) || !seen.insert(id.as_str()) {
            return Err(ReorderError::Mismatch);
        }
    }

    let update = format!("UPDATE {} SET \"order\" = ?1 WHERE id = ?2", table);
    for (i, id) in ids.iter().enumerate() {
        conn.execute(&update, params![i as i64, id])
            .map_err(|e| ReorderError::Db(e.to_string()))?;
    }
    Ok(())
}

impl Store for SqliteStore {
    // ── Lifecycle ───────────────────────────────────────────────────

    fn run_migrations(&self) -> Result<(), String> {
        crate::db::run_migrations(&self.pool)
    }

    fn seed_defaults(&self) -> Result<(), String> {
        crate::db::seed_defaults(&self.pool)
    }

    // ── Settings ────────────────────────────────────────────────────

    fn setting_get(&self, key: &str) -> Option<String> {
        self.row(
            "SELECT value FROM settings WHERE key = ?1",
            &[&key],
            |row| row.get(0),
        )
    }

    fn setting_set(&self, key: &str, value: &str) -> Result<(), String> {
        self.exec(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            &[&key, &value],
        )
    }

    fn setting_all(&self) -> HashMap<String, String> {
        self.rows("SELECT key, value FROM settings", &[], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .into_iter()
        .collect()
    }

    // ── Users & sessions ────────────────────────────────────────────

    fn user_get_by_id(&self, id: &str) -> Option<User> {
        self.row("SELECT * FROM users WHERE id = ?1", &[&id], User::from_row)
    }

    fn user_get_by_username(&self, username: &str) -> Option<User> {
        self.row(
            "SELECT * FROM users WHERE username = ?1",
            &[&username],
            User::from_row,
        )
    }

    fn user_create(&self, username: &str, password_hash: &str) -> Result<String, String> {
        let id = new_id();
        self.exec(
            "INSERT INTO users (id, username, password_hash) VALUES (?1, ?2, ?3)",
            &[&id, &username, &password_hash],
        )?;
        Ok(id)
    }

    fn session_create(
        &self,
        user_id: &str,
        session_id: &str,
        expires_at: &str,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), String> {
        self.exec(
            "INSERT INTO sessions (id, user_id, created_at, expires_at, ip_address, user_agent)
             VALUES (?1, ?2, CURRENT_TIMESTAMP, ?3, ?4, ?5)",
            &[&session_id, &user_id, &expires_at, &ip, &user_agent],
        )
    }

    fn session_get_user(&self, session_id: &str) -> Option<User> {
        self.row(
            "SELECT u.* FROM users u
             JOIN sessions s ON s.user_id = u.id
             WHERE s.id = ?1 AND s.expires_at > CURRENT_TIMESTAMP",
            &[&session_id],
            User::from_row,
        )
    }

    fn session_delete(&self, session_id: &str) -> Result<(), String> {
        self.exec("DELETE FROM sessions WHERE id = ?1", &[&session_id])
    }

    fn session_cleanup_expired(&self) {
        let _ = self.exec(
            "DELETE FROM sessions WHERE expires_at <= CURRENT_TIMESTAMP",
            &[],
        );
    }

    // ── Projects ────────────────────────────────────────────────────

    fn project_find(&self, id: &str) -> Option<Project> {
        self.row(
            "SELECT * FROM projects WHERE id = ?1",
            &[&id],
            Project::from_row,
        )
    }

    fn project_list(&self, status: Option<&str>) -> Vec<Project> {
        match status {
            Some(s) => self.rows(
                "SELECT * FROM projects WHERE status = ?1 ORDER BY created_at DESC",
                &[&s],
                Project::from_row,
            ),
            None => self.rows(
                "SELECT * FROM projects ORDER BY created_at DESC",
                &[],
                Project::from_row,
            ),
        }
    }

    fn project_recent(&self, limit: i64) -> Vec<Project> {
        self.rows(
            "SELECT * FROM projects WHERE status = 'published'
             ORDER BY updated_at DESC LIMIT ?1",
            &[&limit],
            Project::from_row,
        )
    }

    fn project_create(&self, form: &ProjectForm) -> Result<String, String> {
        let id = new_id();
        self.exec(
            "INSERT INTO projects
                 (id, name, image, short_description, optional_link, full_description,
                  extra_details, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            &[
                &id,
                &form.name,
                &form.image,
                &form.short_description,
                &form.optional_link,
                &form.full_description,
                &form.extra_details,
                &form.status,
            ],
        )?;
        Ok(id)
    }

    fn project_update(&self, id: &str, form: &ProjectForm) -> Result<(), String> {
        self.exec(
            "UPDATE projects SET name=?1, image=?2, short_description=?3, optional_link=?4,
                 full_description=?5, extra_details=?6, status=?7,
                 updated_at=CURRENT_TIMESTAMP
             WHERE id=?8",
            &[
                &form.name,
                &form.image,
                &form.short_description,
                &form.optional_link,
                &form.full_description,
                &form.extra_details,
                &form.status,
                &id,
            ],
        )
    }

    fn project_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM projects WHERE id = ?1", &[&id])
    }

    // ── Blog posts ──────────────────────────────────────────────────

    fn post_find(&self, id: &str) -> Option<BlogPost> {
        self.row(
            "SELECT * FROM blog_posts WHERE id = ?1",
            &[&id],
            BlogPost::from_row,
        )
    }

    fn post_find_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.row(
            "SELECT * FROM blog_posts WHERE slug = ?1",
            &[&slug],
            BlogPost::from_row,
        )
    }

    fn post_list(&self, status: Option<&str>) -> Vec<BlogPost> {
        match status {
            Some(s) => self.rows(
                "SELECT * FROM blog_posts WHERE status = ?1 ORDER BY created_at DESC",
                &[&s],
                BlogPost::from_row,
            ),
            None => self.rows(
                "SELECT * FROM blog_posts ORDER BY created_at DESC",
                &[],
                BlogPost::from_row,
            ),
        }
    }

    fn post_recent(&self, limit: i64) -> Vec<BlogPost> {
        self.rows(
            "SELECT * FROM blog_posts WHERE status = 'published'
             ORDER BY updated_at DESC LIMIT ?1",
            &[&limit],
            BlogPost::from_row,
        )
    }

    fn post_create(&self, form: &BlogPostForm) -> Result<String, String> {
        let id = new_id();
        self.exec(
            "INSERT INTO blog_posts (id, title, slug, manual_summary, featured_image, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            &[
                &id,
                &form.title,
                &form.slug,
                &form.manual_summary,
                &form.featured_image,
                &form.status,
            ],
        )?;
        Ok(id)
    }

    fn post_update(&self, id: &str, form: &BlogPostForm) -> Result<(), String> {
        self.exec(
            "UPDATE blog_posts SET title=?1, slug=?2, manual_summary=?3, featured_image=?4,
                 status=?5, updated_at=CURRENT_TIMESTAMP
             WHERE id=?6",
            &[
                &form.title,
                &form.slug,
                &form.manual_summary,
                &form.featured_image,
                &form.status,
                &id,
            ],
        )
    }

    fn post_set_ai_summary(&self, id: &str, summary: &str) -> Result<(), String> {
        self.exec(
            "UPDATE blog_posts SET ai_summary=?1, updated_at=CURRENT_TIMESTAMP WHERE id=?2",
            &[&summary, &id],
        )
    }

    fn post_delete(&self, id: &str) -> Result<(), String> {
        // blog_blocks rows go with the post via FK cascade
        self.exec("DELETE FROM blog_posts WHERE id = ?1", &[&id])
    }

    // ── Blog blocks ─────────────────────────────────────────────────

    fn block_find(&self, id: &str) -> Option<BlogBlock> {
        self.row(
            "SELECT * FROM blog_blocks WHERE id = ?1",
            &[&id],
            BlogBlock::from_row,
        )
    }

    fn block_list(&self, post_id: &str) -> Vec<BlogBlock> {
        self.rows(
            "SELECT * FROM blog_blocks WHERE post_id = ?1 ORDER BY \"order\" ASC",
            &[&post_id],
            BlogBlock::from_row,
        )
    }

    fn block_append(&self, post_id: &str, payload: &BlockPayload) -> Result<BlogBlock, String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        let order = next_order(&conn, "blog_blocks", "post_id", post_id)
            .map_err(|e| e.to_string())?;
        let id = new_id();
        conn.execute(
            "INSERT INTO blog_blocks (id, post_id, type, content, \"order\")
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, post_id, payload.kind(), payload.to_json(), order],
        )
        .map_err(|e| e.to_string())?;
        drop(conn);
        self.block_find(&id)
            .ok_or_else(|| "block missing after insert".to_string())
    }

    fn block_update_content(&self, id: &str, payload: &BlockPayload) -> Result<(), String> {
        self.exec(
            "UPDATE blog_blocks SET content = ?1 WHERE id = ?2",
            &[&payload.to_json(), &id],
        )
    }

    fn block_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM blog_blocks WHERE id = ?1", &[&id])
    }

    fn block_reorder(&self, post_id: &str, ids: &[String]) -> Result<(), ReorderError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| ReorderError::Db(e.to_string()))?;
        reorder_rows(&conn, "blog_blocks", "post_id", post_id, ids)
    }

    // ── Resume ──────────────────────────────────────────────────────

    fn resume_get(&self) -> Option<Resume> {
        self.row("SELECT * FROM resumes LIMIT 1", &[], Resume::from_row)
    }

    fn resume_upsert(&self, form: &ResumeForm) -> Result<String, String> {
        match self.resume_get() {
            Some(existing) => {
                self.exec(
                    "UPDATE resumes SET full_name=?1, title=?2, email=?3, phone=?4,
                         location=?5, website=?6, summary=?7, updated_at=CURRENT_TIMESTAMP
                     WHERE id=?8",
                    &[
                        &form.full_name,
                        &form.title,
                        &form.email,
                        &form.phone,
                        &form.location,
                        &form.website,
                        &form.summary,
                        &existing.id,
                    ],
                )?;
                Ok(existing.id)
            }
            None => {
                let id = new_id();
                self.exec(
                    "INSERT INTO resumes (id, full_name, title, email, phone, location, website, summary)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    &[
                        &id,
                        &form.full_name,
                        &form.title,
                        &form.email,
                        &form.phone,
                        &form.location,
                        &form.website,
                        &form.summary,
                    ],
                )?;
                Ok(id)
            }
        }
    }

    fn resume_get_or_create(&self) -> Result<String, String> {
        if let Some(resume) = self.resume_get() {
            return Ok(resume.id);
        }
        let id = new_id();
        self.exec(
            "INSERT INTO resumes (id, full_name, title, email)
             VALUES (?1, 'Your Name', 'Your Title', 'your.email@example.com')",
            &[&id],
        )?;
        Ok(id)
    }

    // ── Experiences ─────────────────────────────────────────────────

    fn experience_find(&self, id: &str) -> Option<Experience> {
        self.row(
            "SELECT * FROM experiences WHERE id = ?1",
            &[&id],
            Experience::from_row,
        )
    }

    fn experience_list(&self, resume_id: &str) -> Vec<Experience> {
        self.rows(
            "SELECT * FROM experiences WHERE resume_id = ?1 ORDER BY \"order\" ASC",
            &[&resume_id],
            Experience::from_row,
        )
    }

    fn experience_append(
        &self,
        resume_id: &str,
        form: &ExperienceForm,
    ) -> Result<String, String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        let order =
            next_order(&conn, "experiences", "resume_id", resume_id).map_err(|e| e.to_string())?;
        let id = new_id();
        conn.execute(
            "INSERT INTO experiences
                 (id, resume_id, company, position, start_date, end_date, description,
                  location, \"order\")
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                resume_id,
                form.company,
                form.position,
                form.start_date,
                form.end_date,
                form.description,
                form.location,
                order
            ],
        )
        .map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn experience_update(&self, id: &str, form: &ExperienceForm) -> Result<(), String> {
        self.exec(
            "UPDATE experiences SET company=?1, position=?2, start_date=?3, end_date=?4,
                 description=?5, location=?6
             WHERE id=?7",
            &[
                &form.company,
                &form.position,
                &form.start_date,
                &form.end_date,
                &form.description,
                &form.location,
                &id,
            ],
        )
    }

    fn experience_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM experiences WHERE id = ?1", &[&id])
    }

    fn experience_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| ReorderError::Db(e.to_string()))?;
        reorder_rows(&conn, "experiences", "resume_id", resume_id, ids)
    }

    // ── Education entries ───────────────────────────────────────────

    fn education_find(&self, id: &str) -> Option<Education> {
        self.row(
            "SELECT * FROM educations WHERE id = ?1",
            &[&id],
            Education::from_row,
        )
    }

    fn education_list(&self, resume_id: &str) -> Vec<Education> {
        self.rows(
            "SELECT * FROM educations WHERE resume_id = ?1 ORDER BY \"order\" ASC",
            &[&resume_id],
            Education::from_row,
        )
    }

    fn education_append(&self, resume_id: &str, form: &EducationForm) -> Result<String, String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        let order =
            next_order(&conn, "educations", "resume_id", resume_id).map_err(|e| e.to_string())?;
        let id = new_id();
        conn.execute(
            "INSERT INTO educations
                 (id, resume_id, institution, degree, field, start_date, end_date, gpa,
                  description, \"order\")
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                id,
                resume_id,
                form.institution,
                form.degree,
                form.field,
                form.start_date,
                form.end_date,
                form.gpa,
                form.description,
                order
            ],
        )
        .map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn education_update(&self, id: &str, form: &EducationForm) -> Result<(), String> {
        self.exec(
            "UPDATE educations SET institution=?1, degree=?2, field=?3, start_date=?4,
                 end_date=?5, gpa=?6, description=?7
             WHERE id=?8",
            &[
                &form.institution,
                &form.degree,
                &form.field,
                &form.start_date,
                &form.end_date,
                &form.gpa,
                &form.description,
                &id,
            ],
        )
    }

    fn education_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM educations WHERE id = ?1", &[&id])
    }

    fn education_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| ReorderError::Db(e.to_string()))?;
        reorder_rows(&conn, "educations", "resume_id", resume_id, ids)
    }

    // ── Skills ──────────────────────────────────────────────────────

    fn skill_find(&self, id: &str) -> Option<Skill> {
        self.row("SELECT * FROM skills WHERE id = ?1", &[&id], Skill::from_row)
    }

    fn skill_list(&self, resume_id: &str) -> Vec<Skill> {
        self.rows(
            "SELECT * FROM skills WHERE resume_id = ?1 ORDER BY \"order\" ASC",
            &[&resume_id],
            Skill::from_row,
        )
    }

    fn skill_append(&self, resume_id: &str, form: &SkillForm) -> Result<String, String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        let order =
            next_order(&conn, "skills", "resume_id", resume_id).map_err(|e| e.to_string())?;
        let id = new_id();
        conn.execute(
            "INSERT INTO skills (id, resume_id, name, category, level, \"order\")
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, resume_id, form.name, form.category, form.level, order],
        )
        .map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn skill_update(&self, id: &str, form: &SkillForm) -> Result<(), String> {
        self.exec(
            "UPDATE skills SET name=?1, category=?2, level=?3 WHERE id=?4",
            &[&form.name, &form.category, &form.level, &id],
        )
    }

    fn skill_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM skills WHERE id = ?1", &[&id])
    }

    fn skill_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| ReorderError::Db(e.to_string()))?;
        reorder_rows(&conn, "skills", "resume_id", resume_id, ids)
    }

    // ── Social links ────────────────────────────────────────────────

    fn social_link_find(&self, id: &str) -> Option<SocialLink> {
        self.row(
            "SELECT * FROM social_links WHERE id = ?1",
            &[&id],
            SocialLink::from_row,
        )
    }

    fn social_link_list(&self, resume_id: &str) -> Vec<SocialLink> {
        self.rows(
            "SELECT * FROM social_links WHERE resume_id = ?1 ORDER BY \"order\" ASC",
            &[&resume_id],
            SocialLink::from_row,
        )
    }

    fn social_link_append(
        &self,
        resume_id: &str,
        form: &SocialLinkForm,
    ) -> Result<String, String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        let order =
            next_order(&conn, "social_links", "resume_id", resume_id).map_err(|e| e.to_string())?;
        let id = new_id();
        conn.execute(
            "INSERT INTO social_links (id, resume_id, platform, url, \"order\")
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, resume_id, form.platform, form.url, order],
        )
        .map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn social_link_update(&self, id: &str, form: &SocialLinkForm) -> Result<(), String> {
        self.exec(
            "UPDATE social_links SET platform=?1, url=?2 WHERE id=?3",
            &[&form.platform, &form.url, &id],
        )
    }

    fn social_link_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM social_links WHERE id = ?1", &[&id])
    }

    fn social_link_reorder(&self, resume_id: &str, ids: &[String]) -> Result<(), ReorderError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| ReorderError::Db(e.to_string()))?;
        reorder_rows(&conn, "social_links", "resume_id", resume_id, ids)
    }

    // ── Submissions ─────────────────────────────────────────────────

    fn contact_list(&self) -> Vec<ContactSubmission> {
        self.rows(
            "SELECT * FROM contact_submissions ORDER BY created_at DESC",
            &[],
            ContactSubmission::from_row,
        )
    }

    fn contact_create(&self, form: &ContactForm) -> Result<String, String> {
        let id = new_id();
        self.exec(
            "INSERT INTO contact_submissions
                 (id, name, email, company, subject, message, budget, timeline)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            &[
                &id,
                &form.name,
                &form.email,
                &form.company,
                &form.subject,
                &form.message,
                &form.budget,
                &form.timeline,
            ],
        )?;
        Ok(id)
    }

    fn contact_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM contact_submissions WHERE id = ?1", &[&id])
    }

    fn contact_count(&self) -> i64 {
        self.count("SELECT COUNT(*) FROM contact_submissions")
    }

    fn feedback_list(&self) -> Vec<FeedbackSubmission> {
        self.rows(
            "SELECT * FROM feedback_submissions ORDER BY created_at DESC",
            &[],
            FeedbackSubmission::from_row,
        )
    }

    fn feedback_create(&self, form: &FeedbackForm) -> Result<String, String> {
        let id = new_id();
        self.exec(
            "INSERT INTO feedback_submissions
                 (id, client_name, email, company, project_name, rating, feedback,
                  improvements, recommend, testimonial_permission)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            &[
                &id,
                &form.client_name,
                &form.email,
                &form.company,
                &form.project_name,
                &form.rating,
                &form.feedback,
                &form.improvements,
                &form.recommend,
                &form.testimonial_permission,
            ],
        )?;
        Ok(id)
    }

    fn feedback_delete(&self, id: &str) -> Result<(), String> {
        self.exec("DELETE FROM feedback_submissions WHERE id = ?1", &[&id])
    }

    fn feedback_count(&self) -> i64 {
        self.count("SELECT COUNT(*) FROM feedback_submissions")
    }
}
