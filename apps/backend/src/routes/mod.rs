//! HTTP handlers, one module per resource.

pub mod import;
pub mod items;
pub mod sessions;
pub mod stats;
