//! Durable cache storage

mod json_file;

pub use json_file::JsonFileStore;
