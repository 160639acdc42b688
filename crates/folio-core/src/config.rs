//! Contact form configuration.
//!
//! The controller receives a `ContactConfig` at construction. Pages can
//! override any subset of the defaults with a JSON object whose keys use the
//! field names below; missing keys keep their default.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Destination WhatsApp number, digits only with country code.
    pub whatsapp: String,
    pub email_primary: String,
    /// Copied on every e-mail draft.
    pub email_secondary: String,
    /// 0 disables auto-closing the instruction panel.
    pub auto_close_instructions_ms: u32,
    pub show_confetti: bool,
    pub enable_auto_whatsapp: bool,
    pub enable_auto_email: bool,
    pub whatsapp_delay_ms: u32,
    pub email_delay_ms: u32,
    pub success_message_delay_ms: u32,
    /// Longest wait for the client IP before the e-mail goes out without it.
    pub ip_lookup_timeout_ms: u32,
    /// BCP 47 locale for timestamps.
    pub locale: String,
    /// IANA time zone for timestamps.
    pub time_zone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp: "244933170799".to_string(),
            email_primary: "eldissonev@gmail.com".to_string(),
            email_secondary: "evilonga.mentoria33@gmail.com".to_string(),
            auto_close_instructions_ms: 15_000,
            show_confetti: true,
            enable_auto_whatsapp: true,
            enable_auto_email: true,
            whatsapp_delay_ms: 500,
            email_delay_ms: 1_500,
            success_message_delay_ms: 2_000,
            ip_lookup_timeout_ms: 3_000,
            locale: "pt-AO".to_string(),
            time_zone: "Africa/Luanda".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of deep-link channels that will be opened.
    pub fn channel_count(&self) -> usize {
        usize::from(self.enable_auto_whatsapp) + usize::from(self.enable_auto_email)
    }
}
