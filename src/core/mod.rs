pub mod config;
pub mod download;
pub mod manifest;
