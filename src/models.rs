//! Persisted company record.

use serde::{Deserialize, Serialize};

/// Minimal projection of a bureau company profile.
///
/// `id` is the bureau CNPJ, so saving the same company twice replaces the
/// earlier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
