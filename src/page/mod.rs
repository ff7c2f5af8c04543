//! Page composition: content, configuration, navigation and the mounted page.

pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod landing;
pub(crate) mod nav;
