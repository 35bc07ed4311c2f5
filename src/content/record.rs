//! Content records and the typed blog / testimonial views over them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::frontmatter::{FrontMatter, MetaValue, Metadata};
use super::markdown;
use crate::helpers::parse_date;

/// File extensions stripped from a file name to form its slug
const CONTENT_EXTENSIONS: &[&str] = &[".md", ".markdown"];

/// Length of a generated blog summary, in characters
const SUMMARY_LEN: usize = 160;

/// Derive a slug from a manifest file name
pub fn slug_from_filename(filename: &str) -> String {
    CONTENT_EXTENSIONS
        .iter()
        .find_map(|ext| filename.strip_suffix(ext))
        .unwrap_or(filename)
        .to_string()
}

/// A parsed content document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    /// Stable key derived from the file name
    pub slug: String,
    /// Decoded front-matter
    pub metadata: Metadata,
    /// Document text after the metadata block, trimmed
    pub body: String,
}

impl ContentRecord {
    /// Build a record from a file name and its raw text
    pub fn from_document(filename: &str, raw: &str) -> Self {
        let FrontMatter { metadata, body } = FrontMatter::parse(raw);
        Self {
            slug: slug_from_filename(filename),
            metadata,
            body: body.trim().to_string(),
        }
    }

    /// Look up a metadata value
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }
}

/// Remove a key and render it as text, whatever its decoded type
fn take_text(metadata: &mut Metadata, key: &str) -> Option<String> {
    metadata.shift_remove(key).map(|value| match value {
        MetaValue::Text(s) => s,
        other => other.to_string(),
    })
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Slug (file name without extension)
    pub slug: String,

    /// Post title, falls back to the slug
    pub title: String,

    /// Publication date as written
    pub date: Option<String>,

    /// Post category
    pub category: Option<String>,

    /// Post tags
    pub tags: Vec<String>,

    /// Icon selector for the card
    pub icon: Option<String>,

    /// Cover image URL
    pub image: Option<String>,

    /// Card teaser text
    pub preview: Option<String>,

    /// Headline figure shown on the card
    pub metric: Option<String>,

    /// Markdown body
    pub content: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: Metadata,
}

impl From<ContentRecord> for BlogPost {
    fn from(record: ContentRecord) -> Self {
        let ContentRecord {
            slug,
            mut metadata,
            body,
        } = record;

        let tags = match metadata.shift_remove("tags") {
            Some(MetaValue::List(tags)) => tags,
            Some(MetaValue::Text(tag)) if !tag.is_empty() => vec![tag],
            Some(MetaValue::Number(n)) => vec![MetaValue::Number(n).to_string()],
            _ => Vec::new(),
        };

        // The slug and body are authoritative over same-named metadata
        metadata.shift_remove("slug");
        metadata.shift_remove("content");

        Self {
            title: take_text(&mut metadata, "title").unwrap_or_else(|| slug.clone()),
            date: take_text(&mut metadata, "date"),
            category: take_text(&mut metadata, "category"),
            icon: take_text(&mut metadata, "icon"),
            image: take_text(&mut metadata, "image"),
            preview: take_text(&mut metadata, "preview"),
            metric: take_text(&mut metadata, "metric"),
            tags,
            slug,
            content: body,
            extra: metadata,
        }
    }
}

impl BlogPost {
    /// Parsed publication date
    pub fn published(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Card teaser: the `preview` field, or the start of the first paragraph
    pub fn summary(&self) -> String {
        match &self.preview {
            Some(preview) if !preview.trim().is_empty() => preview.trim().to_string(),
            _ => markdown::excerpt(&self.content, SUMMARY_LEN),
        }
    }

    /// Get the previous post in a list
    pub fn prev<'a>(&self, posts: &'a [BlogPost]) -> Option<&'a BlogPost> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next post in a list
    pub fn next<'a>(&self, posts: &'a [BlogPost]) -> Option<&'a BlogPost> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

/// A client testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Slug (file name without extension)
    pub slug: String,

    /// Display position
    pub id: Option<i64>,

    /// Client name
    pub name: Option<String>,

    /// Client role, e.g. "Beta Client"
    pub role: Option<String>,

    /// Portrait URL
    pub photo: Option<String>,

    /// External profile link
    pub linkedin: Option<String>,

    /// Short highlight badge
    pub highlight: Option<String>,

    /// Quote text
    pub text: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: Metadata,
}

impl From<ContentRecord> for Testimonial {
    fn from(record: ContentRecord) -> Self {
        let ContentRecord {
            slug,
            mut metadata,
            body,
        } = record;

        let id = metadata.get("id").and_then(MetaValue::as_i64);
        // Non-integral ids stay visible in `extra`
        if id.is_some() {
            metadata.shift_remove("id");
        }
        metadata.shift_remove("slug");
        metadata.shift_remove("text");

        Self {
            name: take_text(&mut metadata, "name"),
            role: take_text(&mut metadata, "role"),
            photo: take_text(&mut metadata, "photo"),
            linkedin: take_text(&mut metadata, "linkedin"),
            highlight: take_text(&mut metadata, "highlight"),
            id,
            slug,
            text: body,
            extra: metadata,
        }
    }
}
