//! MNIST dataset fetcher
//!
//! This library provides the download, extraction and placement logic behind
//! the `mnist-fetch` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
