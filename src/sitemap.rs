use chrono::Utc;

use crate::store::Store;

/// (path, priority, changefreq) for the fixed public routes.
const STATIC_PAGES: &[(&str, &str, &str)] = &[
    ("", "1.0", "weekly"),
    ("/about", "0.8", "monthly"),
    ("/projects", "0.9", "weekly"),
    ("/blog", "0.9", "daily"),
    ("/contact", "0.7", "monthly"),
    ("/feedback", "0.6", "monthly"),
    ("/resume", "0.8", "monthly"),
];

/// Generate sitemap.xml content: static routes plus one entry per
/// published blog post and published project. Drafts never appear.
pub fn generate(store: &dyn Store) -> String {
    let site_url = store.setting_get_or("site_url", "http://localhost:8000");
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, priority, changefreq) in STATIC_PAGES {
        xml.push_str(&format!(
            "  <url><loc>{}{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{}</priority></url>\n",
            site_url, path, now, changefreq, priority
        ));
    }

    for post in store.post_list(Some("published")) {
        let lastmod = post.updated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        xml.push_str(&format!(
            "  <url><loc>{}/blog/{}</loc><lastmod>{}</lastmod><changefreq>monthly</changefreq><priority>0.7</priority></url>\n",
            site_url, post.slug, lastmod
        ));
    }

    for project in store.project_list(Some("published")) {
        let lastmod = project.updated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        xml.push_str(&format!(
            "  <url><loc>{}/projects/{}</loc><lastmod>{}</lastmod><changefreq>monthly</changefreq><priority>0.8</priority></url>\n",
            site_url, project.id, lastmod
        ));
    }

    xml.push_str("</urlset>\n");
    xml
}
