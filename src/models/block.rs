use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// The closed set of block variant tags, as stored in the `type` column.
pub const BLOCK_TYPES: &[&str] = &["text", "image", "youtube", "link"];

/// Per-variant payload of a blog content block. The variant tag lives in the
/// block row's `type` column; the fields are serialized as one JSON document
/// in its `content` column. Every (de)serialization path matches
/// exhaustively, so adding a variant forces every boundary to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockPayload {
    Text {
        content: String,
    },
    Image {
        url: String,
        alt: String,
        caption: String,
    },
    Youtube {
        url: String,
        title: String,
    },
    Link {
        url: String,
        title: String,
        description: String,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TextFields {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ImageFields {
    #[serde(default)]
    url: String,
    #[serde(default)]
    alt: String,
    #[serde(default)]
    caption: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct YoutubeFields {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LinkFields {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

impl BlockPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            BlockPayload::Text { .. } => "text",
            BlockPayload::Image { .. } => "image",
            BlockPayload::Youtube { .. } => "youtube",
            BlockPayload::Link { .. } => "link",
        }
    }

    /// The empty payload a freshly added block starts with.
    /// Unknown tags are rejected here, before anything reaches the store.
    pub fn empty(kind: &str) -> Result<Self, String> {
        match kind {
            "text" => Ok(BlockPayload::Text {
                content: String::new(),
            }),
            "image" => Ok(BlockPayload::Image {
                url: String::new(),
                alt: String::new(),
                caption: String::new(),
            }),
            "youtube" => Ok(BlockPayload::Youtube {
                url: String::new(),
                title: String::new(),
            }),
            "link" => Ok(BlockPayload::Link {
                url: String::new(),
                title: String::new(),
                description: String::new(),
            }),
            other => Err(format!("Invalid block type: {}", other)),
        }
    }

    /// Decode a payload column against its row's variant tag. Missing fields
    /// default to empty strings; a malformed document is an error.
    pub fn parse(kind: &str, raw: &str) -> Result<Self, String> {
        match kind {
            "text" => serde_json::from_str::<TextFields>(raw)
                .map(|f| BlockPayload::Text { content: f.content })
                .map_err(|e| e.to_string()),
            "image" => serde_json::from_str::<ImageFields>(raw)
                .map(|f| BlockPayload::Image {
                    url: f.url,
                    alt: f.alt,
                    caption: f.caption,
                })
                .map_err(|e| e.to_string()),
            "youtube" => serde_json::from_str::<YoutubeFields>(raw)
                .map(|f| BlockPayload::Youtube {
                    url: f.url,
                    title: f.title,
                })
                .map_err(|e| e.to_string()),
            "link" => serde_json::from_str::<LinkFields>(raw)
                .map(|f| BlockPayload::Link {
                    url: f.url,
                    title: f.title,
                    description: f.description,
                })
                .map_err(|e| e.to_string()),
            other => Err(format!("Invalid block type: {}", other)),
        }
    }

    pub fn to_json(&self) -> String {
        let value = match self {
            BlockPayload::Text { content } => json!({ "content": content }),
            BlockPayload::Image { url, alt, caption } => {
                json!({ "url": url, "alt": alt, "caption": caption })
            }
            BlockPayload::Youtube { url, title } => json!({ "url": url, "title": title }),
            BlockPayload::Link {
                url,
                title,
                description,
            } => json!({ "url": url, "title": title, "description": description }),
        };
        value.to_string()
    }

    /// URL of the stored blob for image payloads, if one is set.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            BlockPayload::Image { url, .. } if !url.is_empty() => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlogBlock {
    pub id: String,
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub order: i64,
    pub created_at: NaiveDateTime,
}

impl BlogBlock {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(BlogBlock {
            id: row.get("id")?,
            post_id: row.get("post_id")?,
            kind: row.get("type")?,
            content: row.get("content")?,
            order: row.get("order")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn payload(&self) -> Result<BlockPayload, String> {
        BlockPayload::parse(&self.kind, &self.content)
    }
}
