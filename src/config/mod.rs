//! Configuration module

mod site;

pub use site::ListingOrder;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
