//! Content module - front-matter documents, their sources, and the loader

mod frontmatter;
pub mod loader;
pub mod markdown;
mod record;
pub mod source;

pub use frontmatter::{decode_value, FrontMatter, MetaValue, Metadata};
pub use loader::ContentLoader;
pub use markdown::{Block, MarkdownRenderer};
pub use record::{slug_from_filename, BlogPost, ContentRecord, Testimonial};
pub use source::{source_for, ContentSource, DirSource, FetchError, HttpSource};
