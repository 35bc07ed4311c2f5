//! Configuration module

mod site;

pub use site::CollectionConfig;
pub use site::SiteConfig;
pub use site::SortOrder;
