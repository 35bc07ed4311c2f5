//! folio-rs: content pipeline for a personal-finance portfolio site
//!
//! Blog posts and testimonials are markdown documents with a small
//! front-matter block, listed in a per-collection `manifest.json` under a
//! content root (a local directory or a remote static host). This crate
//! fetches, parses and orders them for the site's views.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{source_for, BlogPost, ContentLoader, Testimonial};

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    loader: ContentLoader,
}

impl Folio {
    /// Create a new Folio instance from a directory, reading `_config.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(config, base_dir))
    }

    /// Create a Folio instance from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(config: config::SiteConfig, base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source = source_for(&config.content_root, &base_dir);
        let loader = ContentLoader::with_config(source, &config);

        Self {
            config,
            base_dir,
            loader,
        }
    }

    /// Point the instance at another content root
    pub fn with_content_root(self, root: impl Into<String>) -> Self {
        let mut config = self.config;
        config.content_root = root.into();
        Self::with_config(config, self.base_dir)
    }

    /// The loader backing this instance
    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Load all blog posts, newest first
    pub async fn load_blogs(&self) -> Vec<BlogPost> {
        self.loader.load_blogs().await
    }

    /// Load all testimonials, in display order
    pub async fn load_testimonials(&self) -> Vec<Testimonial> {
        self.loader.load_testimonials().await
    }

    /// Load the blog collection and pick one post by slug
    pub async fn find_blog(&self, slug: &str) -> Option<BlogPost> {
        self.load_blogs().await.into_iter().find(|p| p.slug == slug)
    }
}
