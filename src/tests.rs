#![cfg(test)]

use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use rusqlite::params;

use crate::db::{self, DbPool};
use crate::models::block::{BlockPayload, BLOCK_TYPES};
use crate::models::post::BlogPostForm;
use crate::models::project::ProjectForm;
use crate::models::resume::{ExperienceForm, ResumeForm, SkillForm, SocialLinkForm};
use crate::models::submission::{ContactForm, FeedbackForm};
use crate::pdf;
use crate::rate_limit::RateLimiter;
use crate::security::auth;
use crate::sitemap;
use crate::storage;
use crate::store::sqlite::SqliteStore;
use crate::store::{ReorderError, Store};
use crate::validate;
use crate::{ai, render};

/// Atomic counter for unique shared-cache DB names so parallel tests
/// don't collide.
static TEST_DB_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Fresh in-memory SQLite pool with migrations + seed defaults applied.
/// A named shared-cache DB lets multiple pooled connections see the same
/// data. The admin user is pre-seeded with a cost-4 bcrypt hash so
/// seed_defaults skips the expensive DEFAULT_COST hash.
fn test_pool() -> DbPool {
    let id = TEST_DB_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    let uri = format!("file:testdb_{}?mode=memory&cache=shared", id);
    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys=ON;"));
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .expect("Failed to create test pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    {
        let conn = pool.get().unwrap();
        let fast = bcrypt::hash("admin", 4).unwrap();
        conn.execute(
            "INSERT INTO users (id, username, password_hash) VALUES ('user-test', 'admin', ?1)",
            params![fast],
        )
        .unwrap();
    }
    db::seed_defaults(&pool).expect("Failed to seed defaults");
    pool
}

fn test_store() -> SqliteStore {
    SqliteStore::new(test_pool())
}

fn test_client() -> (Client, Arc<dyn Store>) {
    let store: Arc<dyn Store> = Arc::new(test_store());
    let client = Client::tracked(crate::build(store.clone())).expect("valid rocket instance");
    (client, store)
}

fn make_post(store: &dyn Store, title: &str, slug: &str, status: &str) -> String {
    store
        .post_create(&BlogPostForm {
            title: title.to_string(),
            slug: slug.to_string(),
            manual_summary: None,
            featured_image: None,
            status: status.to_string(),
        })
        .unwrap()
}

fn make_project(store: &dyn Store, name: &str, status: &str) -> String {
    store
        .project_create(&ProjectForm {
            name: name.to_string(),
            status: status.to_string(),
            ..Default::default()
        })
        .unwrap()
}

fn make_resume(store: &dyn Store) -> String {
    store
        .resume_upsert(&ResumeForm {
            full_name: "John Doe".to_string(),
            title: "Software Engineer".to_string(),
            email: "john@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            location: Some("Berlin".to_string()),
            website: None,
            summary: Some("Builds things.".to_string()),
        })
        .unwrap()
}

// ═══════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════

#[test]
fn settings_set_and_get() {
    let store = test_store();
    store.setting_set("test_key", "hello").unwrap();
    assert_eq!(store.setting_get("test_key"), Some("hello".to_string()));
}

#[test]
fn settings_get_or_default() {
    let store = test_store();
    assert_eq!(store.setting_get_or("nonexistent", "fallback"), "fallback");
    store.setting_set("exists", "val").unwrap();
    assert_eq!(store.setting_get_or("exists", "fallback"), "val");
}

#[test]
fn settings_get_bool_and_i64() {
    let store = test_store();
    store.setting_set("flag_true", "true").unwrap();
    store.setting_set("flag_one", "1").unwrap();
    store.setting_set("flag_false", "false").unwrap();
    store.setting_set("num", "42").unwrap();
    assert!(store.setting_get_bool("flag_true"));
    assert!(store.setting_get_bool("flag_one"));
    assert!(!store.setting_get_bool("flag_false"));
    assert!(!store.setting_get_bool("missing_flag"));
    assert_eq!(store.setting_get_i64("num"), 42);
    assert_eq!(store.setting_get_i64("missing"), 0);
}

#[test]
fn settings_upsert() {
    let store = test_store();
    store.setting_set("key", "first").unwrap();
    store.setting_set("key", "second").unwrap();
    assert_eq!(store.setting_get("key"), Some("second".to_string()));
}

// ═══════════════════════════════════════════════════════════
// Auth & sessions
// ═══════════════════════════════════════════════════════════

#[test]
fn password_hash_roundtrip() {
    let hash = bcrypt::hash("s3cret", 4).unwrap();
    assert!(auth::verify_password("s3cret", &hash));
    assert!(!auth::verify_password("wrong", &hash));
}

#[test]
fn session_create_and_resolve() {
    let store = test_store();
    let user = store.user_get_by_username("admin").unwrap();

    let session_id =
        auth::create_session(&store, &user.id, Some("127.0.0.1"), Some("test-agent")).unwrap();
    let resolved = store.session_get_user(&session_id).unwrap();
    assert_eq!(resolved.id, user.id);

    store.session_delete(&session_id).unwrap();
    assert!(store.session_get_user(&session_id).is_none());
}

#[test]
fn expired_session_is_rejected() {
    let store = test_store();
    let user = store.user_get_by_username("admin").unwrap();
    store
        .session_create(&user.id, "expired-session", "2000-01-01 00:00:00", None, None)
        .unwrap();
    assert!(store.session_get_user("expired-session").is_none());

    store.session_cleanup_expired();
    let conn = store.pool.get().unwrap();
    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sessions WHERE id = 'expired-session'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn unknown_session_resolves_to_none() {
    let store = test_store();
    assert!(store.session_get_user("no-such-session").is_none());
}

// ═══════════════════════════════════════════════════════════
// Projects
// ═══════════════════════════════════════════════════════════

#[test]
fn project_crud() {
    let store = test_store();

    let id = make_project(&store, "Folio", "draft");
    let project = store.project_find(&id).unwrap();
    assert_eq!(project.name, "Folio");
    assert_eq!(project.status, "draft");
    assert!(project.image.is_none());

    let mut form = ProjectForm {
        name: "Folio v2".to_string(),
        status: "published".to_string(),
        ..Default::default()
    };
    form.short_description = Some("A portfolio".to_string());
    store.project_update(&id, &form).unwrap();
    let updated = store.project_find(&id).unwrap();
    assert_eq!(updated.name, "Folio v2");
    assert_eq!(updated.status, "published");
    assert_eq!(updated.short_description.as_deref(), Some("A portfolio"));

    store.project_delete(&id).unwrap();
    assert!(store.project_find(&id).is_none());
}

#[test]
fn project_list_filters_by_status() {
    let store = test_store();
    make_project(&store, "Live", "published");
    make_project(&store, "Hidden", "draft");

    assert_eq!(store.project_list(None).len(), 2);
    let published = store.project_list(Some("published"));
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].name, "Live");
    assert_eq!(store.project_recent(6).len(), 1);
}

// ═══════════════════════════════════════════════════════════
// Blog posts
// ═══════════════════════════════════════════════════════════

#[test]
fn post_crud() {
    let store = test_store();

    let id = make_post(&store, "Hello", "hello", "draft");
    let post = store.post_find(&id).unwrap();
    assert_eq!(post.title, "Hello");
    assert_eq!(post.slug, "hello");
    assert_eq!(post.status, "draft");

    let by_slug = store.post_find_by_slug("hello").unwrap();
    assert_eq!(by_slug.id, id);

    store
        .post_update(
            &id,
            &BlogPostForm {
                title: "Updated".to_string(),
                slug: "hello".to_string(),
                manual_summary: Some("summary".to_string()),
                featured_image: None,
                status: "published".to_string(),
            },
        )
        .unwrap();
    let updated = store.post_find(&id).unwrap();
    assert_eq!(updated.title, "Updated");
    assert_eq!(updated.status, "published");
    assert_eq!(updated.manual_summary.as_deref(), Some("summary"));

    store.post_set_ai_summary(&id, "An AI summary").unwrap();
    assert_eq!(
        store.post_find(&id).unwrap().ai_summary.as_deref(),
        Some("An AI summary")
    );

    store.post_delete(&id).unwrap();
    assert!(store.post_find(&id).is_none());
}

#[test]
fn post_delete_cascades_to_blocks() {
    let store = test_store();
    let id = make_post(&store, "Cascade", "cascade", "draft");
    for kind in BLOCK_TYPES {
        let payload = BlockPayload::empty(kind).unwrap();
        store.block_append(&id, &payload).unwrap();
    }
    assert_eq!(store.block_list(&id).len(), 4);

    store.post_delete(&id).unwrap();
    assert!(store.block_list(&id).is_empty());
}

// ═══════════════════════════════════════════════════════════
// Ordered blocks
// ═══════════════════════════════════════════════════════════

#[test]
fn block_append_assigns_dense_orders() {
    let store = test_store();
    let post = make_post(&store, "Orders", "orders", "draft");

    let first = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    assert_eq!(first.order, 0);
    let second = store
        .block_append(&post, &BlockPayload::empty("image").unwrap())
        .unwrap();
    assert_eq!(second.order, 1);
    let third = store
        .block_append(&post, &BlockPayload::empty("link").unwrap())
        .unwrap();
    assert_eq!(third.order, 2);

    let orders: Vec<i64> = store.block_list(&post).iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn block_delete_leaves_sibling_orders() {
    let store = test_store();
    let post = make_post(&store, "Gaps", "gaps", "draft");
    let a = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let b = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let c = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();

    store.block_delete(&b.id).unwrap();

    let blocks = store.block_list(&post);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].id, a.id);
    assert_eq!(blocks[0].order, 0);
    assert_eq!(blocks[1].id, c.id);
    assert_eq!(blocks[1].order, 2); // gap stays until the next reorder

    // The next append continues past the gap
    let d = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    assert_eq!(d.order, 3);
}

#[test]
fn block_reorder_rewrites_dense_sequence() {
    let store = test_store();
    let post = make_post(&store, "Scenario", "scenario", "draft");
    let text = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let image = store
        .block_append(&post, &BlockPayload::empty("image").unwrap())
        .unwrap();
    let link = store
        .block_append(&post, &BlockPayload::empty("link").unwrap())
        .unwrap();

    store
        .block_reorder(
            &post,
            &[link.id.clone(), text.id.clone(), image.id.clone()],
        )
        .unwrap();

    let blocks = store.block_list(&post);
    let ids: Vec<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
    let orders: Vec<i64> = blocks.iter().map(|b| b.order).collect();
    assert_eq!(ids, vec![link.id.as_str(), text.id.as_str(), image.id.as_str()]);
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn block_reorder_rejects_foreign_ids() {
    let store = test_store();
    let post_a = make_post(&store, "A", "post-a", "draft");
    let post_b = make_post(&store, "B", "post-b", "draft");
    let own = store
        .block_append(&post_a, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let foreign = store
        .block_append(&post_b, &BlockPayload::empty("text").unwrap())
        .unwrap();

    let result = store.block_reorder(&post_a, &[foreign.id.clone()]);
    assert_eq!(result, Err(ReorderError::Mismatch));

    // Nothing moved on either side
    assert_eq!(store.block_list(&post_a)[0].id, own.id);
    assert_eq!(store.block_list(&post_a)[0].order, 0);
    assert_eq!(store.block_list(&post_b)[0].order, 0);
}

#[test]
fn block_reorder_rejects_wrong_length_and_duplicates() {
    let store = test_store();
    let post = make_post(&store, "Strict", "strict", "draft");
    let a = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let b = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();

    assert_eq!(
        store.block_reorder(&post, &[a.id.clone()]),
        Err(ReorderError::Mismatch)
    );
    assert_eq!(
        store.block_reorder(&post, &[a.id.clone(), a.id.clone()]),
        Err(ReorderError::Mismatch)
    );
    // A proper permutation still works afterwards
    store.block_reorder(&post, &[b.id.clone(), a.id.clone()]).unwrap();
}

// ═══════════════════════════════════════════════════════════
// Block payloads
// ═══════════════════════════════════════════════════════════

#[test]
fn block_payload_roundtrips() {
    let payloads = vec![
        BlockPayload::Text {
            content: "Some *markdown* text".to_string(),
        },
        BlockPayload::Image {
            url: "https://cdn.example.com/blog/blocks/x.png".to_string(),
            alt: "An image".to_string(),
            caption: "Caption".to_string(),
        },
        BlockPayload::Youtube {
            url: "https://youtube.com/watch?v=abc".to_string(),
            title: "A video".to_string(),
        },
        BlockPayload::Link {
            url: "https://example.com".to_string(),
            title: "A link".to_string(),
            description: "Worth reading".to_string(),
        },
    ];

    for payload in payloads {
        let json = payload.to_json();
        let parsed = BlockPayload::parse(payload.kind(), &json).unwrap();
        assert_eq!(parsed, payload);
    }
}

#[test]
fn block_payload_rejects_unknown_kind() {
    assert!(BlockPayload::empty("video").is_err());
    assert!(BlockPayload::parse("video", "{}").is_err());
}

#[test]
fn block_payload_defaults_missing_fields() {
    let parsed = BlockPayload::parse("image", "{}").unwrap();
    assert_eq!(
        parsed,
        BlockPayload::Image {
            url: String::new(),
            alt: String::new(),
            caption: String::new(),
        }
    );
}

#[test]
fn block_payload_image_url() {
    let with_url = BlockPayload::Image {
        url: "https://cdn.example.com/a.png".to_string(),
        alt: String::new(),
        caption: String::new(),
    };
    assert_eq!(with_url.image_url(), Some("https://cdn.example.com/a.png"));
    assert_eq!(BlockPayload::empty("image").unwrap().image_url(), None);
    assert_eq!(BlockPayload::empty("text").unwrap().image_url(), None);
}

#[test]
fn text_block_renders_markdown() {
    let html = render::markdown_to_html("# Title\n\nSome **bold** text");
    assert!(html.contains("<h1>"));
    assert!(html.contains("<strong>bold</strong>"));
}

// ═══════════════════════════════════════════════════════════
// Resume & ordered child collections
// ═══════════════════════════════════════════════════════════

#[test]
fn resume_upsert_creates_then_updates() {
    let store = test_store();
    assert!(store.resume_get().is_none());

    let id = make_resume(&store);
    let resume = store.resume_get().unwrap();
    assert_eq!(resume.id, id);
    assert_eq!(resume.full_name, "John Doe");

    let second = store
        .resume_upsert(&ResumeForm {
            full_name: "Jane Doe".to_string(),
            title: "Engineer".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(second, id); // same row, updated in place
    assert_eq!(store.resume_get().unwrap().full_name, "Jane Doe");
}

#[test]
fn resume_get_or_create_is_idempotent() {
    let store = test_store();
    let first = store.resume_get_or_create().unwrap();
    let second = store.resume_get_or_create().unwrap();
    assert_eq!(first, second);
    assert_eq!(store.resume_get().unwrap().full_name, "Your Name");
}

#[test]
fn experience_append_orders_and_update() {
    let store = test_store();
    let resume_id = make_resume(&store);

    let first = store
        .experience_append(
            &resume_id,
            &ExperienceForm {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_date: "2020-01".to_string(),
                end_date: Some("2022-06".to_string()),
                description: None,
                location: Some("Remote".to_string()),
            },
        )
        .unwrap();
    let second = store
        .experience_append(
            &resume_id,
            &ExperienceForm {
                company: "Globex".to_string(),
                position: "Senior Engineer".to_string(),
                start_date: "2022-07".to_string(),
                end_date: None,
                description: None,
                location: None,
            },
        )
        .unwrap();

    let list = store.experience_list(&resume_id);
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, first);
    assert_eq!(list[0].order, 0);
    assert_eq!(list[1].id, second);
    assert_eq!(list[1].order, 1);

    store
        .experience_update(
            &first,
            &ExperienceForm {
                company: "Acme Corp".to_string(),
                position: "Engineer".to_string(),
                start_date: "2020-01".to_string(),
                end_date: Some("2022-06".to_string()),
                description: Some("Did things".to_string()),
                location: Some("Remote".to_string()),
            },
        )
        .unwrap();
    let updated = store.experience_find(&first).unwrap();
    assert_eq!(updated.company, "Acme Corp");
    assert_eq!(updated.order, 0); // edits never touch the order

    store.experience_delete(&second).unwrap();
    assert_eq!(store.experience_list(&resume_id).len(), 1);
}

#[test]
fn skill_reorder_follows_same_rules_as_blocks() {
    let store = test_store();
    let resume_id = make_resume(&store);

    let mut ids = Vec::new();
    for name in ["Rust", "SQL", "Design"] {
        ids.push(
            store
                .skill_append(
                    &resume_id,
                    &SkillForm {
                        name: name.to_string(),
                        category: "technical".to_string(),
                        level: Some("advanced".to_string()),
                    },
                )
                .unwrap(),
        );
    }

    let reversed: Vec<String> = ids.iter().rev().cloned().collect();
    store.skill_reorder(&resume_id, &reversed).unwrap();

    let list = store.skill_list(&resume_id);
    assert_eq!(list[0].name, "Design");
    assert_eq!(list[2].name, "Rust");
    assert_eq!(
        list.iter().map(|s| s.order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    assert_eq!(
        store.skill_reorder(&resume_id, &ids[..2].to_vec()),
        Err(ReorderError::Mismatch)
    );
}

#[test]
fn social_link_crud() {
    let store = test_store();
    let resume_id = make_resume(&store);

    let id = store
        .social_link_append(
            &resume_id,
            &SocialLinkForm {
                platform: "github".to_string(),
                url: "https://github.com/johndoe".to_string(),
            },
        )
        .unwrap();
    assert_eq!(store.social_link_list(&resume_id)[0].order, 0);

    store
        .social_link_update(
            &id,
            &SocialLinkForm {
                platform: "linkedin".to_string(),
                url: "https://linkedin.com/in/johndoe".to_string(),
            },
        )
        .unwrap();
    assert_eq!(store.social_link_find(&id).unwrap().platform, "linkedin");

    store.social_link_delete(&id).unwrap();
    assert!(store.social_link_find(&id).is_none());
}

#[test]
fn resume_delete_cascades_children() {
    let store = test_store();
    let resume_id = make_resume(&store);
    store
        .skill_append(
            &resume_id,
            &SkillForm {
                name: "Rust".to_string(),
                category: "technical".to_string(),
                level: None,
            },
        )
        .unwrap();

    let conn = store.pool.get().unwrap();
    conn.execute("DELETE FROM resumes WHERE id = ?1", params![resume_id])
        .unwrap();
    drop(conn);

    assert!(store.skill_list(&resume_id).is_empty());
}

// ═══════════════════════════════════════════════════════════
// Submissions
// ═══════════════════════════════════════════════════════════

#[test]
fn contact_create_list_delete() {
    let store = test_store();

    let id = store
        .contact_create(&ContactForm {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            company: None,
            subject: "Hi".to_string(),
            message: "Hello there".to_string(),
            budget: Some("5k".to_string()),
            timeline: None,
        })
        .unwrap();

    assert_eq!(store.contact_count(), 1);
    let list = store.contact_list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].email, "alice@example.com");

    store.contact_delete(&id).unwrap();
    assert_eq!(store.contact_count(), 0);
}

#[test]
fn feedback_create_list_delete() {
    let store = test_store();

    let id = store
        .feedback_create(&FeedbackForm {
            client_name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            company: Some("Acme".to_string()),
            project_name: "Website".to_string(),
            rating: 5,
            feedback: "Great work".to_string(),
            improvements: None,
            recommend: Some("yes".to_string()),
            testimonial_permission: Some("yes".to_string()),
        })
        .unwrap();

    assert_eq!(store.feedback_count(), 1);
    assert_eq!(store.feedback_list()[0].rating, 5);

    store.feedback_delete(&id).unwrap();
    assert_eq!(store.feedback_count(), 0);
}

// ═══════════════════════════════════════════════════════════
// Validation helpers
// ═══════════════════════════════════════════════════════════

#[test]
fn email_validation() {
    assert!(validate::email("user@example.com"));
    assert!(validate::email("a.b+c@sub.domain.org"));
    assert!(!validate::email("not-an-email"));
    assert!(!validate::email("missing@tld"));
    assert!(!validate::email("two@@example.com"));
    assert!(!validate::email("spaces in@example.com"));
}

#[test]
fn slug_validation() {
    assert!(validate::slug("hello-world-2"));
    assert!(!validate::slug("Hello"));
    assert!(!validate::slug("with spaces"));
    assert!(!validate::slug("under_score"));
}

#[test]
fn year_month_validation() {
    assert!(validate::year_month("2023-06"));
    assert!(!validate::year_month("2023-6"));
    assert!(!validate::year_month("2023"));
    assert!(!validate::year_month("June 2023"));
}

#[test]
fn required_and_optional_trim() {
    assert_eq!(validate::required("  x  "), Some("x".to_string()));
    assert_eq!(validate::required("   "), None);
    assert_eq!(validate::optional(Some("  y ")), Some("y".to_string()));
    assert_eq!(validate::optional(Some("  ")), None);
    assert_eq!(validate::optional(None), None);
}

// ═══════════════════════════════════════════════════════════
// Rate limiter
// ═══════════════════════════════════════════════════════════

#[test]
fn rate_limiter_blocks_after_max() {
    let limiter = RateLimiter::new();
    let window = std::time::Duration::from_secs(60);
    for _ in 0..3 {
        assert!(limiter.check_and_record("contact:abc", 3, window));
    }
    assert!(!limiter.check_and_record("contact:abc", 3, window));
    // Other keys are unaffected
    assert!(limiter.check_and_record("contact:other", 3, window));
}

// ═══════════════════════════════════════════════════════════
// Date formatting & PDF
// ═══════════════════════════════════════════════════════════

#[test]
fn year_month_formats_as_mon_yyyy() {
    assert_eq!(pdf::format_year_month(Some("2023-06")), "Jun 2023");
    assert_eq!(pdf::format_year_month(Some("2024-01")), "Jan 2024");
    assert_eq!(pdf::format_year_month(None), "Present");
    assert_eq!(pdf::format_year_month(Some("")), "Present");
    assert_eq!(pdf::format_year_month(Some("  ")), "Present");
    // Unparseable values pass through untouched
    assert_eq!(pdf::format_year_month(Some("June 2023")), "June 2023");
}

#[test]
fn attachment_filename_replaces_whitespace() {
    assert_eq!(pdf::attachment_filename("John Doe"), "John_Doe_Resume.pdf");
    assert_eq!(
        pdf::attachment_filename("Mary  Jane  Watson"),
        "Mary_Jane_Watson_Resume.pdf"
    );
}

#[test]
fn pdf_render_produces_document() {
    let store = test_store();
    let resume_id = make_resume(&store);
    store
        .experience_append(
            &resume_id,
            &ExperienceForm {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_date: "2020-01".to_string(),
                end_date: None,
                description: Some("Shipped a lot of software over the years.".to_string()),
                location: Some("Remote".to_string()),
            },
        )
        .unwrap();
    store
        .skill_append(
            &resume_id,
            &SkillForm {
                name: "Rust".to_string(),
                category: "technical".to_string(),
                level: Some("expert".to_string()),
            },
        )
        .unwrap();

    let resume = store.resume_get().unwrap();
    let bytes = pdf::render(
        &resume,
        &store.experience_list(&resume_id),
        &store.education_list(&resume_id),
        &store.skill_list(&resume_id),
        &store.social_link_list(&resume_id),
    )
    .unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 500);
}

#[test]
fn ai_summary_cleanup() {
    assert_eq!(ai::clean_summary("Summary: A short one."), "A short one.");
    assert_eq!(ai::clean_summary("  plain text  "), "plain text");

    let long = "x".repeat(250);
    let clamped = ai::clean_summary(&long);
    assert_eq!(clamped.chars().count(), 200);
    assert!(clamped.ends_with("..."));
}

// ═══════════════════════════════════════════════════════════
// Sitemap
// ═══════════════════════════════════════════════════════════

#[test]
fn sitemap_lists_published_content_only() {
    let store = test_store();
    let post_id = make_post(&store, "Hello", "hello", "published");
    make_post(&store, "Secret", "secret-draft", "draft");
    make_project(&store, "Shown", "published");
    let draft_project = make_project(&store, "Hidden", "draft");

    // Pin the post's update time for a stable lastmod
    {
        let conn = store.pool.get().unwrap();
        conn.execute(
            "UPDATE blog_posts SET updated_at = '2024-01-01 00:00:00' WHERE id = ?1",
            params![post_id],
        )
        .unwrap();
    }

    let xml = sitemap::generate(&store);
    assert!(xml.contains("<loc>http://localhost:8000/blog/hello</loc>"));
    assert!(xml.contains("2024-01-01T00:00:00Z"));
    assert!(!xml.contains("secret-draft"));
    assert!(!xml.contains(&format!("/projects/{}", draft_project)));
    assert!(xml.contains("<loc>http://localhost:8000/resume</loc>"));
}

// ═══════════════════════════════════════════════════════════
// Object store helpers
// ═══════════════════════════════════════════════════════════

#[test]
fn object_key_derivation() {
    assert_eq!(
        storage::key_from_url("https://bucket.acc.r2.dev/blog/blocks/x.png"),
        Some("blog/blocks/x.png".to_string())
    );
    assert_eq!(storage::key_from_url("https://bucket.acc.r2.dev/"), None);
    assert_eq!(storage::key_from_url("not a url"), None);

    let key = storage::object_key("projects", "png");
    assert!(key.starts_with("projects/"));
    assert!(key.ends_with(".png"));
}

#[test]
fn image_validation_sniffs_content() {
    let png_magic = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
    assert!(storage::validate_image(png_magic).is_ok());

    let jpeg_magic = b"\xff\xd8\xff\xe0\x00\x10JFIF";
    assert!(storage::validate_image(jpeg_magic).is_ok());

    assert!(storage::validate_image(b"GIF89a trailing").is_err());
    assert!(storage::validate_image(b"plain text").is_err());

    let oversized = vec![0u8; storage::MAX_IMAGE_BYTES + 1];
    assert!(storage::validate_image(&oversized).is_err());
}

// ═══════════════════════════════════════════════════════════
// Endpoints
// ═══════════════════════════════════════════════════════════

#[test]
fn contact_endpoint_rejects_invalid_email() {
    let (client, store) = test_client();

    let response = client
        .post("/contact")
        .header(ContentType::Form)
        .body("name=Alice&email=not-an-email&subject=Hi&message=Hello")
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(store.contact_count(), 0);
}

#[test]
fn contact_endpoint_accepts_valid_submission() {
    let (client, store) = test_client();

    let response = client
        .post("/contact")
        .header(ContentType::Form)
        .body("name=Alice&email=alice%40example.com&subject=Hi&message=Hello&company=Acme")
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(store.contact_count(), 1);
    let saved = &store.contact_list()[0];
    assert_eq!(saved.email, "alice@example.com");
    assert_eq!(saved.company.as_deref(), Some("Acme"));
}

#[test]
fn feedback_endpoint_requires_valid_rating() {
    let (client, store) = test_client();

    let response = client
        .post("/feedback")
        .header(ContentType::Form)
        .body("client_name=Bob&email=bob%40example.com&project_name=Site&rating=9&feedback=Nice")
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(store.feedback_count(), 0);
}

#[test]
fn blog_detail_hides_drafts() {
    let (client, store) = test_client();
    make_post(store.as_ref(), "Draft", "draft-post", "draft");
    make_post(store.as_ref(), "Live", "live-post", "published");

    assert_eq!(
        client.get("/blog/draft-post").dispatch().status(),
        Status::NotFound
    );
    assert_eq!(
        client.get("/blog/live-post").dispatch().status(),
        Status::Ok
    );
}

#[test]
fn sitemap_endpoint_serves_xml() {
    let (client, store) = test_client();
    make_post(store.as_ref(), "Hello", "hello", "published");

    let response = client.get("/sitemap.xml").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::XML));
    let body = response.into_string().unwrap();
    assert!(body.contains("/blog/hello"));
}

#[test]
fn resume_download_not_found_without_resume() {
    let (client, _store) = test_client();
    assert_eq!(
        client.get("/resume/download").dispatch().status(),
        Status::NotFound
    );
}

#[test]
fn resume_download_returns_pdf_attachment() {
    let (client, store) = test_client();
    make_resume(store.as_ref());

    let response = client.get("/resume/download").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::PDF));
    let disposition = response
        .headers()
        .get_one("Content-Disposition")
        .unwrap()
        .to_string();
    assert_eq!(
        disposition,
        "attachment; filename=\"John_Doe_Resume.pdf\""
    );
    let body = response.into_bytes().unwrap();
    assert!(body.starts_with(b"%PDF"));
}

#[test]
fn admin_routes_redirect_without_session() {
    let (client, _store) = test_client();
    let response = client.get("/admin/requests").dispatch();
    assert_eq!(response.status(), Status::SeeOther);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("/admin/login")
    );
}

#[test]
fn login_grants_admin_access() {
    let (client, store) = test_client();
    store
        .contact_create(&ContactForm {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            company: None,
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
            budget: None,
            timeline: None,
        })
        .unwrap();

    let login = client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("username=admin&password=admin")
        .dispatch();
    assert_eq!(login.status(), Status::Ok);

    // The tracked client keeps the session cookie
    let response = client.get("/admin/requests").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().unwrap();
    assert!(body.contains("alice@example.com"));

    let bad_login = client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("username=admin&password=wrong")
        .dispatch();
    assert_eq!(bad_login.status(), Status::BadRequest);
}

#[test]
fn admin_block_reorder_endpoint_validates_membership() {
    let (client, store) = test_client();
    let post = make_post(store.as_ref(), "Reorder", "reorder", "draft");
    let a = store
        .block_append(&post, &BlockPayload::empty("text").unwrap())
        .unwrap();
    let b = store
        .block_append(&post, &BlockPayload::empty("link").unwrap())
        .unwrap();

    client
        .post("/admin/login")
        .header(ContentType::Form)
        .body("username=admin&password=admin")
        .dispatch();

    let ok = client
        .post(format!("/admin/blog/{}/blocks/reorder", post))
        .header(ContentType::JSON)
        .body(format!(
            "{{\"block_ids\": [\"{}\", \"{}\"]}}",
            b.id, a.id
        ))
        .dispatch();
    assert_eq!(ok.status(), Status::Ok);
    let blocks = store.block_list(&post);
    assert_eq!(blocks[0].id, b.id);
    assert_eq!(blocks[1].id, a.id);

    let bad = client
        .post(format!("/admin/blog/{}/blocks/reorder", post))
        .header(ContentType::JSON)
        .body("{\"block_ids\": [\"nope\"]}")
        .dispatch();
    assert_eq!(bad.status(), Status::BadRequest);
}
