//! Request-scoped document buffers and their inline representation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Which side of the comparison a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Rfq,
    Proposal,
}

impl DocumentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentRole::Rfq => "rfq",
            DocumentRole::Proposal => "proposal",
        }
    }
}

/// A file buffered fully in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub role: DocumentRole,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Derive the inline content block submitted to the provider.
    pub fn to_inline(&self) -> InlineDocument {
        InlineDocument {
            mime_type: self.mime_type.clone(),
            data: STANDARD.encode(&self.bytes),
        }
    }
}

/// Base64 payload plus media type, the unit sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineDocument {
    pub mime_type: String,
    pub data: String,
}
