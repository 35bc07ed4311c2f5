//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use crate::content::ContentRecord;
use crate::helpers::parse_date_or_epoch;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,

    /// Base root all collections are fetched from: an http(s) URL, a
    /// `file://` URL or a local directory
    pub content_root: String,

    // Collections; fields left out keep that collection's defaults
    #[serde(deserialize_with = "blog_collection")]
    pub blog: CollectionConfig,
    #[serde(deserialize_with = "testimonials_collection")]
    pub testimonials: CollectionConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            description: String::new(),
            content_root: "public".to_string(),
            blog: CollectionConfig::blog(),
            testimonials: CollectionConfig::testimonials(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Where a collection lives under the content root and how it is ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Directory under the content root
    pub dir: String,
    /// Manifest file name inside `dir`
    pub manifest: String,
    /// Manifest key holding the list of file names
    pub key: String,
    /// Display order
    pub sort: SortOrder,
}

/// A collection section as written in `_config.yml`
#[derive(Debug, Default, Deserialize)]
struct CollectionOverride {
    dir: Option<String>,
    manifest: Option<String>,
    key: Option<String>,
    sort: Option<SortOrder>,
}

impl CollectionOverride {
    fn apply(self, base: CollectionConfig) -> CollectionConfig {
        CollectionConfig {
            dir: self.dir.unwrap_or(base.dir),
            manifest: self.manifest.unwrap_or(base.manifest),
            key: self.key.unwrap_or(base.key),
            sort: self.sort.unwrap_or(base.sort),
        }
    }
}

fn blog_collection<'de, D>(deserializer: D) -> std::result::Result<CollectionConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let overlay = Option::<CollectionOverride>::deserialize(deserializer)?;
    Ok(overlay.unwrap_or_default().apply(CollectionConfig::blog()))
}

fn testimonials_collection<'de, D>(
    deserializer: D,
) -> std::result::Result<CollectionConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let overlay = Option::<CollectionOverride>::deserialize(deserializer)?;
    Ok(overlay.unwrap_or_default().apply(CollectionConfig::testimonials()))
}

fn default_manifest() -> String {
    "manifest.json".to_string()
}

impl CollectionConfig {
    /// Blog posts: `blog/manifest.json` keyed by `blogs`, newest first
    pub fn blog() -> Self {
        Self {
            dir: "blog".to_string(),
            manifest: default_manifest(),
            key: "blogs".to_string(),
            sort: SortOrder::DateDesc,
        }
    }

    /// Testimonials: `testimonials/manifest.json`, ascending by id
    pub fn testimonials() -> Self {
        Self {
            dir: "testimonials".to_string(),
            manifest: default_manifest(),
            key: "testimonials".to_string(),
            sort: SortOrder::IdAsc,
        }
    }

    /// Path of the manifest relative to the content root
    pub fn manifest_path(&self) -> String {
        format!("{}/{}", self.dir.trim_matches('/'), self.manifest)
    }

    /// Path of a document relative to the content root
    pub fn document_path(&self, filename: &str) -> String {
        format!("{}/{}", self.dir.trim_matches('/'), filename)
    }
}

/// Ordering applied to an assembled collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent `date` first; undated content last
    DateDesc,
    /// Oldest `date` first; undated content first
    DateAsc,
    /// Ascending numeric `id`; a missing id counts as zero
    IdAsc,
    /// Keep manifest order
    Manifest,
}

impl SortOrder {
    /// Compare two records under this order
    pub fn compare(&self, a: &ContentRecord, b: &ContentRecord) -> Ordering {
        match self {
            SortOrder::DateDesc => date_key(b).cmp(&date_key(a)),
            SortOrder::DateAsc => date_key(a).cmp(&date_key(b)),
            SortOrder::IdAsc => id_key(a).total_cmp(&id_key(b)),
            SortOrder::Manifest => Ordering::Equal,
        }
    }

    /// Stable in-place sort
    pub fn sort(&self, records: &mut [ContentRecord]) {
        if *self != SortOrder::Manifest {
            records.sort_by(|a, b| self.compare(a, b));
        }
    }
}

fn date_key(record: &ContentRecord) -> chrono::NaiveDateTime {
    parse_date_or_epoch(record.get("date").and_then(|v| v.as_str()))
}

fn id_key(record: &ContentRecord) -> f64 {
    record.get("id").and_then(|v| v.as_f64()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(slug: &str, raw: &str) -> ContentRecord {
        ContentRecord::from_document(&format!("{}.md", slug), raw)
    }

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_root, "public");
        assert_eq!(config.blog.manifest_path(), "blog/manifest.json");
        assert_eq!(config.blog.sort, SortOrder::DateDesc);
        assert_eq!(config.testimonials.key, "testimonials");
        assert_eq!(config.testimonials.sort, SortOrder::IdAsc);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Fin Portfolio
content_root: https://raw.githubusercontent.com/someone/site/master/public
blog:
  dir: posts
  key: posts
  sort: manifest
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Fin Portfolio");
        assert_eq!(config.blog.dir, "posts");
        assert_eq!(config.blog.manifest, "manifest.json");
        assert_eq!(config.blog.sort, SortOrder::Manifest);
        assert_eq!(config.blog.document_path("a.md"), "posts/a.md");
        assert_eq!(config.testimonials, CollectionConfig::testimonials());
    }

    #[test]
    fn test_partial_collection_keeps_its_defaults() {
        let yaml = "testimonials:\n  dir: quotes\n  key: quotes\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.testimonials.dir, "quotes");
        assert_eq!(config.testimonials.key, "quotes");
        assert_eq!(config.testimonials.manifest, "manifest.json");
        assert_eq!(config.testimonials.sort, SortOrder::IdAsc);
        assert_eq!(config.blog, CollectionConfig::blog());

        let config: SiteConfig = serde_yaml::from_str("testimonials:\n  sort: manifest\n").unwrap();
        assert_eq!(config.testimonials.dir, "testimonials");
        assert_eq!(config.testimonials.key, "testimonials");
        assert_eq!(config.testimonials.sort, SortOrder::Manifest);

        let config: SiteConfig = serde_yaml::from_str("blog:\n  dir: posts\n").unwrap();
        assert_eq!(config.blog.key, "blogs");
        assert_eq!(config.blog.sort, SortOrder::DateDesc);
    }

    #[test]
    fn test_date_desc_puts_undated_last() {
        let mut records = vec![
            record("undated", "---\ntitle: None\n---\nx\n"),
            record("old", "---\ndate: Mar 1, 2023\n---\nx\n"),
            record("new", "---\ndate: Jan 1, 2024\n---\nx\n"),
        ];
        SortOrder::DateDesc.sort(&mut records);
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_id_asc_treats_missing_as_zero() {
        let mut records = vec![
            record("three", "---\nid: 3\n---\nx\n"),
            record("one", "---\nid: 1\n---\nx\n"),
            record("none", "no metadata"),
            record("two", "---\nid: 2\n---\nx\n"),
        ];
        SortOrder::IdAsc.sort(&mut records);
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["none", "one", "two", "three"]);
    }

    #[test]
    fn test_manifest_order_is_kept() {
        let mut records = vec![
            record("b", "---\nid: 2\n---\nx\n"),
            record("a", "---\nid: 1\n---\nx\n"),
        ];
        SortOrder::Manifest.sort(&mut records);
        assert_eq!(records[0].slug, "b");
    }
}
