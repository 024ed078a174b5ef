//! Validated URL and resource-area types.

mod api_url;
mod area;

pub use api_url::ApiUrl;
pub use area::{Area, AreaPaths};
