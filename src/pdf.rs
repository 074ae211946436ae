use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::models::resume::{Education, Experience, Resume, Skill, SocialLink};
use crate::validate;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 18.0;
const PT_TO_MM: f32 = 0.352_778;

/// Format a stored `YYYY-MM` date as "Mon YYYY"; a missing date renders
/// as "Present". Anything else passes through untouched.
pub fn format_year_month(value: Option<&str>) -> String {
    let raw = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return "Present".to_string(),
    };

    if validate::year_month(raw) {
        let year: i32 = raw[..4].parse().unwrap_or(0);
        let month: u32 = raw[5..].parse().unwrap_or(0);
        if let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, 1) {
            return date.format("%b %Y").to_string();
        }
    }
    raw.to_string()
}

fn date_range(start: &str, end: Option<&str>) -> String {
    format!(
        "{} - {}",
        format_year_month(Some(start)),
        format_year_month(end)
    )
}

/// Download filename derived from the person's name: whitespace runs
/// become underscores.
pub fn attachment_filename(full_name: &str) -> String {
    let joined = full_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_Resume.pdf", joined)
}

/// Linear PDF writer: a cursor walks down the page and a new page is
/// started whenever the next line would pass the bottom margin. No
/// layout solving beyond that.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// distance from the top edge, in mm
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, String> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| e.to_string())?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| e.to_string())?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfWriter {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN,
        })
    }

    fn ensure(&mut self, needed: f32) {
        if self.y + needed > PAGE_H - MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = MARGIN;
        }
    }

    fn line_height(size: f32) -> f32 {
        size * 1.3 * PT_TO_MM
    }

    /// Rough Helvetica advance estimate, good enough for wrapping and
    /// centering at fixed margins.
    fn text_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5 * PT_TO_MM
    }

    fn line_at(&mut self, text: &str, size: f32, bold: bool, x: f32) {
        let height = Self::line_height(size);
        self.ensure(height);
        self.y += height;
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_H - self.y), font);
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        self.line_at(text, size, bold, MARGIN);
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool) {
        let x = ((PAGE_W - Self::text_width(text, size)) / 2.0).max(MARGIN);
        self.line_at(text, size, bold, x);
    }

    /// Word-wrap a block of text inside the margins, honoring embedded
    /// newlines as paragraph breaks.
    fn wrapped(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        let usable = PAGE_W - 2.0 * MARGIN - indent;
        let max_chars = ((usable / (size * 0.5 * PT_TO_MM)) as usize).max(8);
        for paragraph in text.split('\n') {
            for line in wrap_text(paragraph, max_chars) {
                self.line_at(&line, size, bold, MARGIN + indent);
            }
        }
    }

    fn rule(&mut self) {
        self.ensure(2.0);
        self.y += 1.0;
        let y = PAGE_H - self.y;
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(y)), false),
                (Point::new(Mm(PAGE_W - MARGIN), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(line);
        self.y += 1.5;
    }

    fn space(&mut self, mm: f32) {
        self.y += mm;
    }

    fn heading(&mut self, title: &str) {
        self.text(title, 14.0, true);
        self.rule();
    }

    fn finish(self) -> Result<Vec<u8>, String> {
        self.doc.save_to_bytes().map_err(|e| e.to_string())
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render the resume and its four ordered child collections into a PDF.
/// Sections appear in a fixed order; collections are taken in the order
/// the store returns them (their "order" columns).
pub fn render(
    resume: &Resume,
    experiences: &[Experience],
    educations: &[Education],
    skills: &[Skill],
    social_links: &[SocialLink],
) -> Result<Vec<u8>, String> {
    let mut w = PdfWriter::new("Resume")?;

    // Header
    w.centered(&resume.full_name, 24.0, true);
    w.centered(&resume.title, 16.0, false);
    w.space(3.0);

    // Contact line
    let mut contact = vec![format!("Email: {}", resume.email)];
    if let Some(phone) = resume.phone.as_deref().filter(|s| !s.is_empty()) {
        contact.push(format!("Phone: {}", phone));
    }
    if let Some(location) = resume.location.as_deref().filter(|s| !s.is_empty()) {
        contact.push(format!("Location: {}", location));
    }
    if let Some(website) = resume.website.as_deref().filter(|s| !s.is_empty()) {
        contact.push(format!("Website: {}", website));
    }
    w.centered(&contact.join(" | "), 10.0, false);

    // Social links line
    if !social_links.is_empty() {
        let social = social_links
            .iter()
            .map(|link| format!("{}: {}", link.platform, link.url))
            .collect::<Vec<_>>()
            .join(" | ");
        w.centered(&social, 10.0, false);
    }

    w.space(6.0);

    if let Some(summary) = resume.summary.as_deref() {
        if !summary.is_empty() {
            w.heading("PROFESSIONAL SUMMARY");
            w.wrapped(summary, 11.0, false, 0.0);
            w.space(6.0);
        }
    }

    if !experiences.is_empty() {
        w.heading("PROFESSIONAL EXPERIENCE");
        for (i, exp) in experiences.iter().enumerate() {
            if i > 0 {
                w.space(3.0);
            }
            w.text(&exp.position, 12.0, true);
            w.text(&exp.company, 11.0, true);
            let range = date_range(&exp.start_date, exp.end_date.as_deref());
            let meta = match exp.location.as_deref() {
                Some(location) => format!("{} | {}", location, range),
                None => range,
            };
            w.text(&meta, 10.0, false);
            if let Some(description) = exp.description.as_deref() {
                if !description.is_empty() {
                    w.space(1.5);
                    w.wrapped(description, 10.0, false, 0.0);
                }
            }
        }
        w.space(6.0);
    }

    if !educations.is_empty() {
        w.heading("EDUCATION");
        for (i, edu) in educations.iter().enumerate() {
            if i > 0 {
                w.space(3.0);
            }
            w.text(&edu.degree, 12.0, true);
            if let Some(field) = edu.field.as_deref() {
                if !field.is_empty() {
                    w.text(field, 11.0, false);
                }
            }
            w.text(&edu.institution, 11.0, true);
            let mut meta = date_range(&edu.start_date, edu.end_date.as_deref());
            if let Some(gpa) = edu.gpa.as_deref() {
                if !gpa.is_empty() {
                    meta.push_str(&format!(" | GPA: {}", gpa));
                }
            }
            w.text(&meta, 10.0, false);
            if let Some(description) = edu.description.as_deref() {
                if !description.is_empty() {
                    w.space(1.5);
                    w.wrapped(description, 10.0, false, 0.0);
                }
            }
        }
        w.space(6.0);
    }

    if !skills.is_empty() {
        w.heading("SKILLS");
        for (category, entries) in group_skills(skills) {
            let label = format!("{}:", category.replace('_', " ").to_uppercase());
            w.text(&label, 11.0, true);
            let names = entries
                .iter()
                .map(|skill| match skill.level.as_deref() {
                    Some(level) if !level.is_empty() => format!("{} ({})", skill.name, level),
                    _ => skill.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            w.wrapped(&names, 10.0, false, 7.0);
            w.space(1.5);
        }
    }

    w.finish()
}

/// Group skills by category, keeping first-seen category order and the
/// per-category ordering the rows arrived in.
fn group_skills(skills: &[Skill]) -> Vec<(String, Vec<&Skill>)> {
    let mut groups: Vec<(String, Vec<&Skill>)> = Vec::new();
    for skill in skills {
        match groups.iter_mut().find(|(cat, _)| *cat == skill.category) {
            Some((_, entries)) => entries.push(skill),
            None => groups.push((skill.category.clone(), vec![skill])),
        }
    }
    groups
}
