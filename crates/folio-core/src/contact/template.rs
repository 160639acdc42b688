use super::validate::ContactFields;
use crate::config::ContactConfig;

pub const IP_PLACEHOLDER: &str = "Não disponível";
const SIGNATURE: &str = "ELDISSONE VILONGA";

/// Where the submission came from, as reported by the browser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageOrigin {
    pub host: String,
    pub url: String,
    pub user_agent: String,
}

/// Everything captured at submit time; dropped once both links are built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    pub fields: ContactFields,
    /// Short local time, `dd/mm/yyyy hh:mm`.
    pub timestamp: String,
    /// Long local time with the month name and seconds.
    pub timestamp_long: String,
    pub origin: PageOrigin,
    pub client_ip: Option<String>,
}

impl ContactSubmission {
    /// Chat-app rendering, WhatsApp markup (`*bold*`, `_italic_`).
    pub fn chat_message(&self) -> String {
        let f = &self.fields;
        format!(
            "📱 *CONTATO DO PORTFÓLIO - {SIGNATURE}* 📱\n\n\
             👤 *Nome:* {}\n\
             📧 *Email:* {}\n\n\
             💬 *Mensagem:*\n{}\n\n\
             📅 *Data/Hora:* {}\n\
             🌍 *Enviado de:* {}\n\n\
             _Esta mensagem foi enviada automaticamente do seu portfólio online._",
            f.name, f.email, f.message, self.timestamp, self.origin.host
        )
    }

    pub fn email_draft(&self, config: &ContactConfig) -> EmailDraft {
        let f = &self.fields;
        let ip = self.client_ip.as_deref().unwrap_or(IP_PLACEHOLDER);
        EmailDraft {
            to: config.email_primary.clone(),
            cc: config.email_secondary.clone(),
            subject: format!("📬 Contato Portfólio: {}", f.name),
            body: format!(
                "CONTATO DO PORTFÓLIO - {SIGNATURE}\n\n\
                 Nome: {}\n\
                 Email: {}\n\
                 Data: {}\n\
                 IP: {}\n\
                 Navegador: {}\n\n\
                 Mensagem:\n{}\n\n\
                 ---\n\
                 Este email foi enviado automaticamente do seu portfólio online.\n\
                 URL: {}\n\
                 Responda diretamente para: {}\n",
                f.name,
                f.email,
                self.timestamp_long,
                ip,
                self.origin.user_agent,
                f.message,
                self.origin.url,
                f.email
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailDraft {
    pub to: String,
    pub cc: String,
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// `mailto:` link with cc, subject and body pre-filled.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?cc={}&subject={}&body={}",
            self.to,
            encode_uri_component(&self.cc),
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }
}

/// `wa.me` deep link opening a chat with `number`, `text` pre-filled.
pub fn whatsapp_url(number: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", number, encode_uri_component(text))
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// byte-wise over UTF-8, like the browser's `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(ip: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            fields: ContactFields::new("Ana", "ana@example.com", "Olá, tudo bem?"),
            timestamp: "18/10/2026 14:05".to_string(),
            timestamp_long: "18 de outubro de 2026 14:05:09".to_string(),
            origin: PageOrigin {
                host: "folio.example".to_string(),
                url: "https://folio.example/#contact".to_string(),
                user_agent: "TestAgent/1.0".to_string(),
            },
            client_ip: ip.map(str::to_string),
        }
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("it's(ok)!*~"), "it's(ok)!*~");
        assert_eq!(encode_uri_component("ç"), "%C3%A7");
        assert_eq!(encode_uri_component("📬"), "%F0%9F%93%AC");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
    }

    #[test]
    fn chat_message_embeds_fields_and_origin() {
        let text = submission(None).chat_message();
        assert!(text.contains("*Nome:* Ana"));
        assert!(text.contains("*Email:* ana@example.com"));
        assert!(text.contains("Olá, tudo bem?"));
        assert!(text.contains("18/10/2026 14:05"));
        assert!(text.contains("*Enviado de:* folio.example"));
    }

    #[test]
    fn email_draft_falls_back_to_placeholder_ip() {
        let cfg = ContactConfig::default();
        let draft = submission(None).email_draft(&cfg);
        assert_eq!(draft.to, cfg.email_primary);
        assert_eq!(draft.cc, cfg.email_secondary);
        assert_eq!(draft.subject, "📬 Contato Portfólio: Ana");
        assert!(draft.body.contains("IP: Não disponível"));
        assert!(draft.body.contains("Navegador: TestAgent/1.0"));
        assert!(draft.body.contains("Responda diretamente para: ana@example.com"));

        let draft = submission(Some("203.0.113.9")).email_draft(&cfg);
        assert!(draft.body.contains("IP: 203.0.113.9"));
    }

    #[test]
    fn links_have_expected_shape() {
        let url = whatsapp_url("244933170799", "oi tudo");
        assert_eq!(url, "https://wa.me/244933170799?text=oi%20tudo");

        let draft = EmailDraft {
            to: "to@x.y".to_string(),
            cc: "cc@x.y".to_string(),
            subject: "Hi there".to_string(),
            body: "a&b".to_string(),
        };
        assert_eq!(
            draft.mailto_url(),
            "mailto:to@x.y?cc=cc%40x.y&subject=Hi%20there&body=a%26b"
        );
    }
}
