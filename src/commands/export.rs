//! Export the loaded collections as JSON for the site front-end

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{markdown, BlogPost, Testimonial};
use crate::Folio;

/// Site identity block of the export
#[derive(Debug, Serialize)]
pub struct SiteMeta<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub description: &'a str,
}

/// Keys computed for every exported blog entry
const COMPUTED_KEYS: &[&str] = &["summary", "html"];

/// A blog post with its card summary and rendered body
#[derive(Debug, Serialize)]
pub struct BlogEntry {
    #[serde(flatten)]
    pub post: BlogPost,
    pub summary: String,
    pub html: String,
}

impl BlogEntry {
    /// Build an entry; computed keys replace same-named custom fields
    pub fn new(post: &BlogPost) -> Self {
        let mut post = post.clone();
        for key in COMPUTED_KEYS {
            post.extra.shift_remove(*key);
        }
        Self {
            summary: post.summary(),
            html: markdown::render_html(&post.content),
            post,
        }
    }
}

/// Everything the home, all-blogs and all-testimonials views need
#[derive(Debug, Serialize)]
pub struct SiteExport<'a> {
    pub site: SiteMeta<'a>,
    pub blogs: Vec<BlogEntry>,
    pub testimonials: &'a [Testimonial],
}

/// Load both collections and write them as JSON to `output`, or stdout
pub async fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let (blogs, testimonials) =
        tokio::join!(folio.load_blogs(), folio.load_testimonials());

    let json = to_json(folio, &blogs, &testimonials)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &json)?;
            tracing::info!(
                "Exported {} blogs and {} testimonials to {:?}",
                blogs.len(),
                testimonials.len(),
                path
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Serialize loaded collections
pub fn to_json(folio: &Folio, blogs: &[BlogPost], testimonials: &[Testimonial]) -> Result<String> {
    let export = SiteExport {
        site: SiteMeta {
            title: &folio.config.title,
            author: &folio.config.author,
            description: &folio.config.description,
        },
        blogs: blogs.iter().map(BlogEntry::new).collect(),
        testimonials,
    };

    Ok(serde_json::to_string_pretty(&export)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRecord;
    use tempfile::TempDir;

    fn write(dir: &Path, path: &str, content: &str) {
        let full = dir.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "public/blog/manifest.json", r#"{"blogs": ["a.md"]}"#);
        write(
            dir.path(),
            "public/blog/a.md",
            "---\ntitle: Alpha\ntags: x\n---\nFirst paragraph.\n",
        );
        write(
            dir.path(),
            "public/testimonials/manifest.json",
            r#"{"testimonials": ["t.md"]}"#,
        );
        write(dir.path(), "public/testimonials/t.md", "---\nid: 1\n---\nNice.\n");

        let folio = Folio::new(dir.path()).unwrap();
        let out = dir.path().join("out/site.json");
        run(&folio, Some(out.as_path())).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["site"]["title"], "Portfolio");
        assert_eq!(json["blogs"][0]["slug"], "a");
        assert_eq!(json["blogs"][0]["tags"][0], "x");
        assert_eq!(json["blogs"][0]["summary"], "First paragraph.");
        assert_eq!(json["blogs"][0]["html"], "<p>First paragraph.</p>\n");
        assert_eq!(json["testimonials"][0]["text"], "Nice.");
    }

    #[tokio::test]
    async fn test_custom_fields_do_not_duplicate_computed_keys() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let post = BlogPost::from(ContentRecord::from_document(
            "a.md",
            "---\nsummary: mine\nhtml: raw\nmood: calm\n---\nBody\n",
        ));

        let json = to_json(&folio, &[post], &[]).unwrap();
        assert_eq!(json.matches("\"summary\"").count(), 1);
        assert_eq!(json.matches("\"html\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blogs"][0]["summary"], "Body");
        assert_eq!(value["blogs"][0]["html"], "<p>Body</p>\n");
        assert_eq!(value["blogs"][0]["mood"], "calm");
    }

    #[tokio::test]
    async fn test_export_empty_site() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let json = to_json(&folio, &[], &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["blogs"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["testimonials"].as_array().map(Vec::len), Some(0));
    }
}
