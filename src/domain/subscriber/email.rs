use derive_more::Display;
use validator::validate_email;

use crate::domain::FieldError;

const MAX_LENGTH: usize = 255;

/// A canonical subscriber email: trimmed, lowercased, `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", _0)]
pub struct Email(String);

impl Email {
    /// Sanitizes the raw input before validating, so `" ANN@Example.com "`
    /// and `"ann@example.com"` parse to the same value.
    pub fn parse(value: String) -> Result<Self, Vec<FieldError>> {
        let email = value.trim().to_lowercase();

        if email.is_empty() {
            return Err(vec![FieldError::new("email", "Email is required")]);
        }

        let mut errors = Vec::new();
        if !validate_email(&email) || !has_dotted_domain(&email) {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
        if email.chars().count() > MAX_LENGTH {
            errors.push(FieldError::new("email", "Email address is too long"));
        }

        if errors.is_empty() {
            Ok(Self(email))
        } else {
            Err(errors)
        }
    }
}

// `validate_email` follows the HTML5 grammar, which admits bare hosts like
// `user@localhost`; the waitlist only wants fully qualified domains.
fn has_dotted_domain(email: &str) -> bool {
    email.rsplit_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain
                .rsplit_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
