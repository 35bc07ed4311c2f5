//! Content loader - fetches manifests and documents and assembles collections
//!
//! Every load starts from scratch: the manifest is fetched, then every
//! listed document concurrently, and whatever loaded is sorted. Failures
//! are logged and leave the collection empty or partial; nothing here
//! returns an error.

use futures::future::join_all;
use std::sync::Arc;

use super::source::ContentSource;
use super::{BlogPost, ContentRecord, Testimonial};
use crate::config::{CollectionConfig, SiteConfig};

/// Loads content collections from a content source
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    blog: CollectionConfig,
    testimonials: CollectionConfig,
}

impl ContentLoader {
    /// Create a loader with the default collection layout
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            blog: CollectionConfig::blog(),
            testimonials: CollectionConfig::testimonials(),
        }
    }

    /// Create a loader using the collection layout of a site config
    pub fn with_config(source: Arc<dyn ContentSource>, config: &SiteConfig) -> Self {
        Self {
            source,
            blog: config.blog.clone(),
            testimonials: config.testimonials.clone(),
        }
    }

    /// Fetch the file names listed in a collection's manifest
    ///
    /// An unreachable or malformed manifest yields an empty list.
    pub async fn load_manifest(&self, collection: &CollectionConfig) -> Vec<String> {
        let path = collection.manifest_path();

        let text = match self.source.fetch_text(&path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to fetch {} manifest: {}", collection.dir, e);
                return Vec::new();
            }
        };

        let manifest: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "Malformed {} manifest at {}: {}",
                    collection.dir,
                    self.source.locate(&path),
                    e
                );
                return Vec::new();
            }
        };

        let Some(entries) = manifest.get(&collection.key).and_then(|v| v.as_array()) else {
            tracing::warn!(
                "Manifest {} has no `{}` list",
                self.source.locate(&path),
                collection.key
            );
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(name) => Some(name.to_string()),
                None => {
                    tracing::warn!("Skipping non-string manifest entry {}", entry);
                    None
                }
            })
            .collect()
    }

    /// Fetch and parse one document, or `None` if it could not be fetched
    pub async fn fetch_record(
        &self,
        collection: &CollectionConfig,
        filename: &str,
    ) -> Option<ContentRecord> {
        match self
            .source
            .fetch_text(&collection.document_path(filename))
            .await
        {
            Ok(raw) => Some(ContentRecord::from_document(filename, &raw)),
            Err(e) => {
                tracing::warn!("Failed to load {} {}: {}", collection.dir, filename, e);
                None
            }
        }
    }

    /// Load a whole collection, in display order
    pub async fn load_collection(&self, collection: &CollectionConfig) -> Vec<ContentRecord> {
        let filenames = self.load_manifest(collection).await;
        if filenames.is_empty() {
            return Vec::new();
        }

        let fetches = filenames
            .iter()
            .map(|filename| self.fetch_record(collection, filename));
        let mut records: Vec<ContentRecord> =
            join_all(fetches).await.into_iter().flatten().collect();

        collection.sort.sort(&mut records);

        tracing::info!(
            "Loaded {} of {} {} documents",
            records.len(),
            filenames.len(),
            collection.dir
        );

        records
    }

    /// Load all blog posts
    pub async fn load_blogs(&self) -> Vec<BlogPost> {
        self.load_collection(&self.blog)
            .await
            .into_iter()
            .map(BlogPost::from)
            .collect()
    }

    /// Load all testimonials
    pub async fn load_testimonials(&self) -> Vec<Testimonial> {
        self.load_collection(&self.testimonials)
            .await
            .into_iter()
            .map(Testimonial::from)
            .collect()
    }
}
