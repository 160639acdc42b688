use super::error::ValidationError;

pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Raw form values as typed by the visitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.message.trim())
    }
}

/// Checks, in order: required fields, e-mail shape, message length.
pub fn validate(fields: &ContactFields) -> Result<(), ValidationError> {
    if fields.name.is_empty() || fields.email.is_empty() || fields.message.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !is_valid_email(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    let len = fields.message.chars().count();
    if len < MESSAGE_MIN_CHARS {
        return Err(ValidationError::MessageTooShort);
    }
    if len > MESSAGE_MAX_CHARS {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain part with text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // any dot with a non-empty label before it and text after it
    domain
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.co.ao"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.b@c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn trimming_happens_before_required_check() {
        let raw = ContactFields::new("   ", "a@b.c", "hello world!");
        assert_eq!(validate(&raw.trimmed()), Err(ValidationError::MissingField));
    }

    #[test]
    fn errors_render_visitor_copy() {
        assert_eq!(
            ValidationError::MessageTooShort.to_string(),
            "A mensagem deve ter pelo menos 10 caracteres."
        );
    }
}
