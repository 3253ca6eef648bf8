//! Helper functions for page templates

mod url;

pub use url::*;
