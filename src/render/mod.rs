//! Rendering module for serializing extracted documents.

mod json;

pub use json::{to_json, write_json_file, JsonFormat};
