//! Submission flow of the contact form.
//!
//! `Idle → Validating → AwaitingExternalDispatch → ShowingFeedback`, with a
//! fall back to `Idle` when validation fails. The controller owns no DOM;
//! every side effect goes through a [`FormHost`].

use super::celebrate::Delay;
use super::error::{DispatchError, LookupError, SubmitError, ValidationError};
use super::feedback::{
    instruction_steps, BannerKind, InstructionStep, TimestampStyle, FAILURE_TEXT, SUCCESS_TEXT,
};
use super::template::{whatsapp_url, ContactSubmission, PageOrigin};
use super::validate::{validate, ContactFields};
use crate::config::ContactConfig;
use crate::task::{join, race, Either};
use std::cell::Cell;

/// Delay before the submit control is restored, whatever the outcome.
pub const RESTORE_SUBMIT_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    AwaitingExternalDispatch,
    ShowingFeedback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Email,
}

/// Per-channel result of one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub opened: Vec<Channel>,
    pub failed: Vec<Channel>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationError),
    Completed(DispatchReport),
    Failed(SubmitError),
}

/// Browser-side capabilities the flow needs.
#[allow(async_fn_in_trait)]
pub trait FormHost: Delay {
    fn show_banner(&self, kind: BannerKind, text: &str);
    fn show_instructions(
        &self,
        steps: &[InstructionStep],
        auto_close_ms: u32,
    ) -> Result<(), SubmitError>;
    /// Disable the submit control and show the busy label.
    fn set_busy(&self) -> Result<(), SubmitError>;
    /// Re-enable the submit control after `delay_ms`, fire-and-forget.
    fn schedule_restore(&self, delay_ms: u32);
    fn open(&self, url: &str) -> Result<(), DispatchError>;
    async fn client_ip(&self) -> Result<String, LookupError>;
    fn origin(&self) -> PageOrigin;
    fn timestamp(&self, style: TimestampStyle) -> String;
    fn reset_form(&self) -> Result<(), SubmitError>;
    fn remove_counter(&self);
    /// Fire-and-forget celebration; must never fail.
    fn celebrate(&self);
}

pub struct ContactController {
    config: ContactConfig,
    phase: Cell<FormPhase>,
}

impl ContactController {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            phase: Cell::new(FormPhase::Idle),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Phase of the most recent submission.
    pub fn phase(&self) -> FormPhase {
        self.phase.get()
    }

    fn enter(&self, phase: FormPhase) {
        log::debug!("[contact] {:?} -> {:?}", self.phase.get(), phase);
        self.phase.set(phase);
    }

    /// Run one submission to completion. Never panics on host failures:
    /// unexpected errors become a generic banner.
    pub async fn submit<H: FormHost>(&self, host: &H, raw: &ContactFields) -> SubmitOutcome {
        self.enter(FormPhase::Validating);
        let fields = raw.trimmed();
        if let Err(e) = validate(&fields) {
            log::info!("[contact] rejected: {:?}", e);
            host.show_banner(BannerKind::Error, &e.to_string());
            self.enter(FormPhase::Idle);
            return SubmitOutcome::Rejected(e);
        }

        let result = self.dispatch(host, fields).await;
        host.schedule_restore(RESTORE_SUBMIT_MS);
        match result {
            Ok(report) => {
                log::info!(
                    "[contact] done: opened={:?} failed={:?}",
                    report.opened,
                    report.failed
                );
                SubmitOutcome::Completed(report)
            }
            Err(e) => {
                log::error!("[contact] submit error: {}", e);
                host.show_banner(BannerKind::Error, FAILURE_TEXT);
                self.enter(FormPhase::Idle);
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn dispatch<H: FormHost>(
        &self,
        host: &H,
        fields: ContactFields,
    ) -> Result<DispatchReport, SubmitError> {
        host.set_busy()?;
        self.enter(FormPhase::AwaitingExternalDispatch);

        let cfg = &self.config;
        let submission = ContactSubmission {
            fields,
            timestamp: host.timestamp(TimestampStyle::Short),
            timestamp_long: host.timestamp(TimestampStyle::Long),
            origin: host.origin(),
            client_ip: None,
        };
        host.show_instructions(&instruction_steps(cfg), cfg.auto_close_instructions_ms)?;

        // both delays count from this instant; only the e-mail waits on the IP
        let whatsapp = async {
            if !cfg.enable_auto_whatsapp {
                return None;
            }
            host.sleep(cfg.whatsapp_delay_ms).await;
            let url = whatsapp_url(&cfg.whatsapp, &submission.chat_message());
            Some(open_channel(host, Channel::WhatsApp, &url))
        };
        let email = async {
            if !cfg.enable_auto_email {
                return None;
            }
            let (client_ip, ()) =
                join(self.lookup_ip(host), host.sleep(cfg.email_delay_ms)).await;
            let draft = ContactSubmission {
                client_ip,
                ..submission.clone()
            }
            .email_draft(cfg);
            Some(open_channel(host, Channel::Email, &draft.mailto_url()))
        };
        let (whatsapp, email) = join(whatsapp, email).await;

        let mut settled = [
            (cfg.whatsapp_delay_ms, whatsapp),
            (cfg.email_delay_ms, email),
        ];
        settled.sort_by_key(|(delay, _)| *delay);
        let mut report = DispatchReport::default();
        for (channel, opened) in settled.into_iter().filter_map(|(_, r)| r) {
            if opened {
                report.opened.push(channel);
            } else {
                report.failed.push(channel);
            }
        }

        host.sleep(cfg.success_message_delay_ms).await;
        self.enter(FormPhase::ShowingFeedback);
        host.show_banner(BannerKind::Success, SUCCESS_TEXT);
        if cfg.show_confetti {
            host.celebrate();
        }
        host.reset_form()?;
        host.remove_counter();
        Ok(report)
    }

    /// Best-effort client IP, given up on after `ip_lookup_timeout_ms`.
    async fn lookup_ip<H: FormHost>(&self, host: &H) -> Option<String> {
        match race(host.client_ip(), host.sleep(self.config.ip_lookup_timeout_ms)).await {
            Either::Left(Ok(ip)) => Some(ip),
            Either::Left(Err(e)) => {
                log::debug!("[contact] ip lookup failed: {}", e);
                None
            }
            Either::Right(()) => {
                log::info!(
                    "[contact] ip lookup timed out after {}ms",
                    self.config.ip_lookup_timeout_ms
                );
                None
            }
        }
    }
}

/// `true` when the link opened; failures are logged and swallowed.
fn open_channel<H: FormHost>(host: &H, channel: Channel, url: &str) -> (Channel, bool) {
    match host.open(url) {
        Ok(()) => (channel, true),
        Err(e) => {
            log::warn!("[contact] could not open {:?}: {}", channel, e);
            (channel, false)
        }
    }
}
