pub mod api;
pub mod config;
pub mod download;
pub mod image;
pub mod logging;
pub mod url;
