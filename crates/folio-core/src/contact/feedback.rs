//! Visitor-facing feedback: status banners, the instruction panel and the
//! live character counter.

use super::validate::MESSAGE_MAX_CHARS;
use crate::config::ContactConfig;

pub const SUCCESS_TEXT: &str = "✅ WhatsApp e Email abertos! Por favor, envie as mensagens.";
pub const FAILURE_TEXT: &str =
    "❌ Ocorreu um erro. Tente novamente ou entre em contato diretamente.";
pub const EMAIL_HINT_TEXT: &str = "Email inválido. Exemplo: nome@exemplo.com";
pub const BUSY_LABEL_HTML: &str = "<i class=\"fas fa-spinner fa-spin\"></i> Preparando envio...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Info,
    Warning,
}

impl BannerKind {
    pub fn class_name(self) -> &'static str {
        match self {
            BannerKind::Success => "form-message form-success",
            BannerKind::Error => "form-message form-error",
            BannerKind::Info => "form-message form-info",
            BannerKind::Warning => "form-message form-warning",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(self) -> &'static str {
        match self {
            BannerKind::Success => "check-circle",
            BannerKind::Error => "exclamation-circle",
            BannerKind::Info => "info-circle",
            BannerKind::Warning => "exclamation-triangle",
        }
    }

    /// Success banners stay until replaced; the rest can be closed.
    pub fn dismissible(self) -> bool {
        self != BannerKind::Success
    }

    pub fn auto_dismiss_ms(self) -> Option<u32> {
        match self {
            BannerKind::Success => None,
            BannerKind::Error => Some(8_000),
            BannerKind::Info | BannerKind::Warning => Some(5_000),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstructionStep {
    pub number: usize,
    pub title_html: &'static str,
    pub hint: &'static str,
}

pub const POPUP_NOTE: &str =
    "As abas abrirão automaticamente. Se bloquear pop-ups, permita para este site.";

/// One step per enabled channel, WhatsApp first, then a closing step.
pub fn instruction_steps(config: &ContactConfig) -> Vec<InstructionStep> {
    let mut steps = Vec::with_capacity(3);
    if config.enable_auto_whatsapp {
        steps.push(InstructionStep {
            number: steps.len() + 1,
            title_html: "<strong>WhatsApp</strong> abrirá automaticamente",
            hint: "A mensagem já está pré-preenchida - apenas clique \"Enviar\"",
        });
    }
    if config.enable_auto_email {
        steps.push(InstructionStep {
            number: steps.len() + 1,
            title_html: "<strong>Email</strong> abrirá automaticamente",
            hint: "Revise e clique em \"Enviar\" no seu cliente de email",
        });
    }
    steps.push(InstructionStep {
        number: steps.len() + 1,
        title_html: "Volte para esta página",
        hint: "O formulário será limpo automaticamente",
    });
    steps
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterTone {
    Ok,
    Near,
    Over,
}

impl CounterTone {
    pub fn for_count(count: usize) -> Self {
        if count > MESSAGE_MAX_CHARS {
            CounterTone::Over
        } else if count > 800 {
            CounterTone::Near
        } else {
            CounterTone::Ok
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CounterTone::Ok => "#4CAF50",
            CounterTone::Near => "#ff9800",
            CounterTone::Over => "#ff4444",
        }
    }
}

pub fn counter_text(count: usize) -> String {
    format!("{count}/{MESSAGE_MAX_CHARS} caracteres")
}

/// How a host should render the submit timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `dd/mm/yyyy hh:mm`
    Short,
    /// day, month name, year and time with seconds
    Long,
}

impl TimestampStyle {
    /// `Intl.DateTimeFormat` options for this style.
    pub fn intl_options(self, time_zone: &str) -> serde_json::Value {
        let mut opts = serde_json::json!({
            "timeZone": time_zone,
            "day": "2-digit",
            "year": "numeric",
            "hour": "2-digit",
            "minute": "2-digit",
        });
        match self {
            TimestampStyle::Short => {
                opts["month"] = "2-digit".into();
            }
            TimestampStyle::Long => {
                opts["month"] = "long".into();
                opts["second"] = "2-digit".into();
            }
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_numbered_per_enabled_channel() {
        let mut cfg = ContactConfig::default();
        let steps = instruction_steps(&cfg);
        assert_eq!(steps.iter().map(|s| s.number).collect::<Vec<_>>(), [1, 2, 3]);

        cfg.enable_auto_whatsapp = false;
        let steps = instruction_steps(&cfg);
        assert_eq!(steps.len(), 2);
        assert!(steps[0].title_html.contains("Email"));
        assert_eq!(steps[1].number, 2);

        cfg.enable_auto_email = false;
        assert_eq!(instruction_steps(&cfg).len(), 1);
    }

    #[test]
    fn counter_tone_thresholds() {
        assert_eq!(CounterTone::for_count(800), CounterTone::Ok);
        assert_eq!(CounterTone::for_count(801), CounterTone::Near);
        assert_eq!(CounterTone::for_count(1000), CounterTone::Near);
        assert_eq!(CounterTone::for_count(1001), CounterTone::Over);
        assert_eq!(counter_text(42), "42/1000 caracteres");
    }

    #[test]
    fn banner_dismissal_rules() {
        assert!(!BannerKind::Success.dismissible());
        assert_eq!(BannerKind::Success.auto_dismiss_ms(), None);
        assert_eq!(BannerKind::Error.auto_dismiss_ms(), Some(8_000));
        assert_eq!(BannerKind::Warning.auto_dismiss_ms(), Some(5_000));
    }

    #[test]
    fn long_timestamps_include_seconds() {
        let opts = TimestampStyle::Long.intl_options("Africa/Luanda");
        assert_eq!(opts["month"], "long");
        assert_eq!(opts["second"], "2-digit");
        assert_eq!(opts["timeZone"], "Africa/Luanda");
        assert!(TimestampStyle::Short.intl_options("UTC").get("second").is_none());
    }
}
