use thiserror::Error;

/// Rejections shown to the visitor; the form stays editable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Por favor, preencha todos os campos.")]
    MissingField,
    #[error("Por favor, insira um email válido.")]
    InvalidEmail,
    #[error("A mensagem deve ter pelo menos 10 caracteres.")]
    MessageTooShort,
    #[error("A mensagem não pode exceder 1000 caracteres.")]
    MessageTooLong,
}

/// A deep link that could not be opened. Logged, never shown.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("pop-up blocked")]
    Blocked,
    #[error("navigation failed: {0}")]
    Navigation(String),
}

/// The best-effort client IP lookup failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Unexpected host failure while a submission was in flight.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{context}: {detail}")]
pub struct SubmitError {
    pub context: &'static str,
    pub detail: String,
}

impl SubmitError {
    pub fn new(context: &'static str, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}
