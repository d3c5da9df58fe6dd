pub mod content;
pub mod providers;

pub use content::{DocumentRole, InlineDocument, UploadedDocument};
