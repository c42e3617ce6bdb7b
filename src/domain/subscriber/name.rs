use derive_more::Display;
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::FieldError;

const MIN_GRAPHEMES: usize = 2;
const MAX_GRAPHEMES: usize = 100;

/// A sanitized subscriber name: trimmed, internal whitespace collapsed,
/// restricted to letters, spaces, hyphens and apostrophes.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Name(String);

impl Name {
    pub fn parse(value: String) -> Result<Self, Vec<FieldError>> {
        let name = value.split_whitespace().collect::<Vec<_>>().join(" ");

        if name.is_empty() {
            return Err(vec![FieldError::new("name", "Name is required")]);
        }

        let mut errors = Vec::new();
        let length = name.graphemes(true).count();
        if length < MIN_GRAPHEMES {
            errors.push(FieldError::new(
                "name",
                "Name must be at least 2 characters long",
            ));
        }
        if length > MAX_GRAPHEMES {
            errors.push(FieldError::new(
                "name",
                "Name is too long (maximum 100 characters)",
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
        {
            errors.push(FieldError::new("name", "Name contains invalid characters"));
        }

        if errors.is_empty() {
            Ok(Self(name))
        } else {
            Err(errors)
        }
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
