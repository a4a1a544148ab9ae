//! Input validation helpers shared by the API surface and the client.

mod filename;

pub use filename::{pdf_filename, sanitize_filename};
