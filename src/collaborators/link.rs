//! What the link prompt hands back.

use crate::store::ResourceError;

/// Raw values from the link prompt's two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSubmission {
    pub url: String,
    pub display_name: String,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLink {
    pub url: String,
    /// The display name when one was given, otherwise the URL.
    pub title: String,
}

impl LinkSubmission {
    pub fn new(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
        }
    }

    /// Rejects a blank URL; a non-empty display name is used verbatim.
    pub fn validate(self) -> Result<ValidLink, ResourceError> {
        if self.url.trim().is_empty() {
            return Err(ResourceError::EmptyInput);
        }
        let title = if self.display_name.is_empty() {
            self.url.clone()
        } else {
            self.display_name
        };
        Ok(ValidLink {
            url: self.url,
            title,
        })
    }
}
