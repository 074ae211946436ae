use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub type DbPool = Pool<SqliteConnectionManager>;

pub fn init_pool() -> Result<DbPool, String> {
    init_pool_at("website/db/folio.db")
}

pub fn init_pool_at(path: &str) -> Result<DbPool, String> {
    // foreign_keys is per-connection state; the init hook keeps cascade
    // deletes working on every pooled connection
    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys=ON;"));
    let pool = Pool::builder()
        .max_size(10)
        .build(manager)
        .map_err(|e| e.to_string())?;

    // WAL for concurrent reads
    let conn = pool.get().map_err(|e| e.to_string())?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")
        .map_err(|e| e.to_string())?;

    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let conn = pool.get().map_err(|e| e.to_string())?;

    conn.execute_batch(
        "
        -- Admin identity
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            created_at DATETIME NOT NULL,
            expires_at DATETIME NOT NULL,
            ip_address TEXT,
            user_agent TEXT,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        -- Settings (key-value)
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT
        );

        -- Projects
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT,
            short_description TEXT,
            optional_link TEXT,
            full_description TEXT,
            extra_details TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Blog posts
        CREATE TABLE IF NOT EXISTS blog_posts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT UNIQUE NOT NULL,
            manual_summary TEXT,
            ai_summary TEXT,
            featured_image TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Blog content blocks, one JSON payload column per row
        CREATE TABLE IF NOT EXISTS blog_blocks (
            id TEXT PRIMARY KEY,
            post_id TEXT NOT NULL,
            type TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '{}',
            \"order\" INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (post_id) REFERENCES blog_posts(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_blocks_post ON blog_blocks(post_id);

        -- Resume (a single row is meaningful; loaders take the first)
        CREATE TABLE IF NOT EXISTS resumes (
            id TEXT PRIMARY KEY,
            full_name TEXT NOT NULL,
            title TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            location TEXT,
            website TEXT,
            summary TEXT,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS experiences (
            id TEXT PRIMARY KEY,
            resume_id TEXT NOT NULL,
            company TEXT NOT NULL,
            position TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            description TEXT,
            location TEXT,
            \"order\" INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (resume_id) REFERENCES resumes(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS educations (
            id TEXT PRIMARY KEY,
            resume_id TEXT NOT NULL,
            institution TEXT NOT NULL,
            degree TEXT NOT NULL,
            field TEXT,
            start_date TEXT NOT NULL,
            end_date TEXT,
            gpa TEXT,
            description TEXT,
            \"order\" INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (resume_id) REFERENCES resumes(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS skills (
            id TEXT PRIMARY KEY,
            resume_id TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            level TEXT,
            \"order\" INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (resume_id) REFERENCES resumes(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS social_links (
            id TEXT PRIMARY KEY,
            resume_id TEXT NOT NULL,
            platform TEXT NOT NULL,
            url TEXT NOT NULL,
            \"order\" INTEGER NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (resume_id) REFERENCES resumes(id) ON DELETE CASCADE
        );

        -- Public form submissions, immutable once created
        CREATE TABLE IF NOT EXISTS contact_submissions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            company TEXT,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            budget TEXT,
            timeline TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS feedback_submissions (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL,
            email TEXT NOT NULL,
            company TEXT,
            project_name TEXT NOT NULL,
            rating INTEGER NOT NULL,
            feedback TEXT NOT NULL,
            improvements TEXT,
            recommend TEXT,
            testimonial_permission TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        ",
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

pub fn seed_defaults(pool: &DbPool) -> Result<(), String> {
    let conn = pool.get().map_err(|e| e.to_string())?;

    let defaults = vec![
        // General
        ("site_name", "Folio"),
        ("site_url", "http://localhost:8000"),
        // Security
        ("session_expiry_hours", "24"),
        ("login_rate_limit", "5"),
        ("form_rate_limit", "5"),
        ("security_turnstile_enabled", "false"),
        ("security_turnstile_secret_key", ""),
        // Object storage (S3-compatible / R2)
        ("storage_account_id", ""),
        ("storage_bucket", ""),
        ("storage_access_key", ""),
        ("storage_secret_key", ""),
        ("storage_public_base", ""),
        // AI summary generation
        ("ai_cloudflare_account_id", ""),
        ("ai_cloudflare_api_token", ""),
        ("ai_cloudflare_model", "@cf/meta/llama-3-8b-instruct"),
    ];

    for (key, value) in defaults {
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
    }

    // Seed the admin account if no user exists yet
    let user_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(|e| e.to_string())?;

    if user_count == 0 {
        // Default password: "admin" -- must be changed after first login
        let hash = bcrypt::hash("admin", bcrypt::DEFAULT_COST).map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO users (id, username, password_hash) VALUES (?1, 'admin', ?2)",
            params![uuid::Uuid::new_v4().to_string(), hash],
        )
        .map_err(|e| e.to_string())?;
    }

    Ok(())
}
