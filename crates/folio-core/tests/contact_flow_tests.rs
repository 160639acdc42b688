// End-to-end submission flow against an in-memory host with a virtual clock.

use folio_core::contact::*;
use folio_core::task::join;
use folio_core::ContactConfig;
use std::cell::{Cell, RefCell};
use std::future::{poll_fn, Future};
use std::pin::pin;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Banner(BannerKind, String),
    Instructions(usize, u32),
    Busy,
    Restore(u32),
    Open(String),
    Reset,
    CounterRemoved,
    Celebrate,
}

#[derive(Clone, Debug, Default)]
enum IpReply {
    Found(String),
    #[default]
    Offline,
    Stalled,
}

#[derive(Default)]
struct MockHost {
    now: Cell<u32>,
    deadlines: RefCell<Vec<u32>>,
    events: RefCell<Vec<(u32, Event)>>,
    ip: IpReply,
    blocked_prefix: Option<&'static str>,
    fail_busy: bool,
}

impl MockHost {
    fn with_ip(ip: &str) -> Self {
        Self {
            ip: IpReply::Found(ip.to_string()),
            ..Self::default()
        }
    }

    fn push(&self, e: Event) {
        self.events.borrow_mut().push((self.now.get(), e));
    }

    fn opens(&self) -> Vec<(u32, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|(t, e)| match e {
                Event::Open(url) => Some((*t, url.clone())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, want: &Event) -> usize {
        self.events.borrow().iter().filter(|(_, e)| e == want).count()
    }

    fn banners(&self) -> Vec<(u32, BannerKind, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|(t, e)| match e {
                Event::Banner(k, s) => Some((*t, *k, s.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Delay for MockHost {
    async fn sleep(&self, ms: u32) {
        let deadline = self.now.get() + ms;
        self.deadlines.borrow_mut().push(deadline);
        poll_fn(|_| {
            if self.now.get() >= deadline {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

struct NoopWake;

impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

/// Poll `fut` to completion, jumping the clock to the next pending deadline
/// whenever it stalls.
fn run<F: Future>(host: &MockHost, fut: F) -> F::Output {
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);
    let mut fut = pin!(fut);
    loop {
        if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
            return out;
        }
        let now = host.now.get();
        let next = host.deadlines.borrow().iter().copied().filter(|&d| d > now).min();
        match next {
            Some(t) => host.now.set(t),
            None => panic!("flow stalled at {now}ms with no timer pending"),
        }
    }
}

impl FormHost for MockHost {
    fn show_banner(&self, kind: BannerKind, text: &str) {
        self.push(Event::Banner(kind, text.to_string()));
    }

    fn show_instructions(
        &self,
        steps: &[InstructionStep],
        auto_close_ms: u32,
    ) -> Result<(), SubmitError> {
        self.push(Event::Instructions(steps.len(), auto_close_ms));
        Ok(())
    }

    fn set_busy(&self) -> Result<(), SubmitError> {
        if self.fail_busy {
            return Err(SubmitError::new("submit button", "detached"));
        }
        self.push(Event::Busy);
        Ok(())
    }

    fn schedule_restore(&self, delay_ms: u32) {
        self.push(Event::Restore(delay_ms));
    }

    fn open(&self, url: &str) -> Result<(), DispatchError> {
        self.push(Event::Open(url.to_string()));
        match self.blocked_prefix {
            Some(p) if url.starts_with(p) => Err(DispatchError::Blocked),
            _ => Ok(()),
        }
    }

    async fn client_ip(&self) -> Result<String, LookupError> {
        match &self.ip {
            IpReply::Found(ip) => Ok(ip.clone()),
            IpReply::Offline => Err(LookupError::Request("offline".to_string())),
            IpReply::Stalled => std::future::pending().await,
        }
    }

    fn origin(&self) -> PageOrigin {
        PageOrigin {
            host: "folio.test".to_string(),
            url: "https://folio.test/".to_string(),
            user_agent: "MockAgent".to_string(),
        }
    }

    fn timestamp(&self, style: TimestampStyle) -> String {
        match style {
            TimestampStyle::Short => "18/10/2026 09:30".to_string(),
            TimestampStyle::Long => "18 de outubro de 2026 09:30:00".to_string(),
        }
    }

    fn reset_form(&self) -> Result<(), SubmitError> {
        self.push(Event::Reset);
        Ok(())
    }

    fn remove_counter(&self) {
        self.push(Event::CounterRemoved);
    }

    fn celebrate(&self) {
        self.push(Event::Celebrate);
    }
}

fn fields(message: &str) -> ContactFields {
    ContactFields::new("Maria", "maria@example.com", message)
}

#[test]
fn opens_both_channels_on_schedule() {
    let host = MockHost::default();
    let ctl = ContactController::new(ContactConfig::default());
    let outcome = run(&host, ctl.submit(&host, &fields("Gostaria de falar consigo.")));

    assert_eq!(
        outcome,
        SubmitOutcome::Completed(DispatchReport {
            opened: vec![Channel::WhatsApp, Channel::Email],
            failed: vec![],
        })
    );
    let opens = host.opens();
    assert_eq!(opens.len(), 2);
    assert_eq!(opens[0].0, 500);
    assert!(opens[0].1.starts_with("https://wa.me/244933170799?text="));
    assert_eq!(opens[1].0, 1500);
    assert!(opens[1].1.starts_with("mailto:eldissonev@gmail.com?cc="));

    let banners = host.banners();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0], (3500, BannerKind::Success, SUCCESS_TEXT.to_string()));
    assert_eq!(host.count(&Event::Instructions(3, 15_000)), 1);
    assert_eq!(host.count(&Event::Celebrate), 1);
    assert_eq!(host.count(&Event::Reset), 1);
    assert_eq!(host.count(&Event::CounterRemoved), 1);
    assert_eq!(host.count(&Event::Restore(RESTORE_SUBMIT_MS)), 1);
    assert_eq!(ctl.phase(), FormPhase::ShowingFeedback);
}

#[test]
fn message_length_bounds() {
    let ctl = ContactController::new(ContactConfig::default());
    for (len, expected) in [
        (9, Some(ValidationError::MessageTooShort)),
        (10, None),
        (1000, None),
        (1001, Some(ValidationError::MessageTooLong)),
    ] {
        let host = MockHost::default();
        let outcome = run(&host, ctl.submit(&host, &fields(&"é".repeat(len))));
        match expected {
            Some(err) => {
                assert_eq!(outcome, SubmitOutcome::Rejected(err), "len {len}");
                assert!(host.opens().is_empty());
                assert_eq!(host.count(&Event::Restore(RESTORE_SUBMIT_MS)), 0);
                assert_eq!(ctl.phase(), FormPhase::Idle);
            }
            None => assert!(matches!(outcome, SubmitOutcome::Completed(_)), "len {len}"),
        }
    }
}

#[test]
fn rejections_show_the_validation_message() {
    let host = MockHost::default();
    let ctl = ContactController::new(ContactConfig::default());
    let raw = ContactFields::new("Maria", "maria@example", "mensagem longa o bastante");
    let outcome = run(&host, ctl.submit(&host, &raw));
    assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidEmail));
    assert_eq!(
        host.banners(),
        vec![(
            0,
            BannerKind::Error,
            "Por favor, insira um email válido.".to_string()
        )]
    );
}

#[test]
fn fields_are_trimmed_before_templating() {
    let host = MockHost::default();
    let ctl = ContactController::new(ContactConfig::default());
    let raw = ContactFields::new("  Maria ", " maria@example.com\n", "  mensagem de teste  ");
    run(&host, ctl.submit(&host, &raw));
    let chat = &host.opens()[0].1;
    assert!(chat.contains(&encode_uri_component("*Nome:* Maria\n")));
    assert!(chat.contains(&encode_uri_component("\nmensagem de teste\n")));
}

#[test]
fn channel_order_follows_configured_delays() {
    let host = MockHost::default();
    let cfg = ContactConfig {
        whatsapp_delay_ms: 800,
        email_delay_ms: 0,
        ..ContactConfig::default()
    };
    let ctl = ContactController::new(cfg);
    run(&host, ctl.submit(&host, &fields("mensagem qualquer")));
    let opens = host.opens();
    assert_eq!(opens[0].0, 0);
    assert!(opens[0].1.starts_with("mailto:"));
    assert_eq!(opens[1].0, 800);
    assert!(opens[1].1.starts_with("https://wa.me/"));
}

#[test]
fn disabled_channels_and_confetti_are_skipped() {
    let host = MockHost::default();
    let cfg = ContactConfig {
        enable_auto_whatsapp: false,
        show_confetti: false,
        ..ContactConfig::default()
    };
    let ctl = ContactController::new(cfg);
    let outcome = run(&host, ctl.submit(&host, &fields("só por email, obrigado")));
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(DispatchReport {
            opened: vec![Channel::Email],
            failed: vec![],
        })
    );
    assert_eq!(host.count(&Event::Celebrate), 0);
    assert_eq!(host.count(&Event::Instructions(2, 15_000)), 1);
}

#[test]
fn a_blocked_channel_does_not_stop_the_other() {
    let host = MockHost {
        blocked_prefix: Some("https://wa.me/"),
        ..MockHost::default()
    };
    let ctl = ContactController::new(ContactConfig::default());
    let outcome = run(&host, ctl.submit(&host, &fields("mensagem de teste")));
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(DispatchReport {
            opened: vec![Channel::Email],
            failed: vec![Channel::WhatsApp],
        })
    );
    assert_eq!(host.opens().len(), 2);
    assert_eq!(host.banners()[0].1, BannerKind::Success);
}

#[test]
fn email_carries_ip_when_lookup_succeeds() {
    let ctl = ContactController::new(ContactConfig::default());

    let host = MockHost::with_ip("198.51.100.4");
    run(&host, ctl.submit(&host, &fields("mensagem de teste")));
    let mailto = &host.opens()[1].1;
    assert!(mailto.contains(&encode_uri_component("IP: 198.51.100.4")));

    let host = MockHost::default();
    run(&host, ctl.submit(&host, &fields("mensagem de teste")));
    let mailto = &host.opens()[1].1;
    assert!(mailto.contains(&encode_uri_component("IP: Não disponível")));
}

#[test]
fn overlapping_submissions_each_open_every_channel() {
    let host = MockHost::default();
    let ctl = ContactController::new(ContactConfig::default());
    let first = fields("primeira mensagem");
    let second = fields("segunda mensagem");
    let (a, b) = run(
        &host,
        join(ctl.submit(&host, &first), ctl.submit(&host, &second)),
    );
    assert!(matches!(a, SubmitOutcome::Completed(_)));
    assert!(matches!(b, SubmitOutcome::Completed(_)));

    let at: Vec<u32> = host.opens().iter().map(|(t, _)| *t).collect();
    assert_eq!(at, [500, 500, 1500, 1500]);
    assert_eq!(host.count(&Event::Busy), 2);
    assert_eq!(host.count(&Event::Restore(RESTORE_SUBMIT_MS)), 2);
    assert_eq!(host.count(&Event::Reset), 2);
}

#[test]
fn a_stalled_ip_lookup_only_delays_the_email() {
    let host = MockHost {
        ip: IpReply::Stalled,
        ..MockHost::default()
    };
    let ctl = ContactController::new(ContactConfig::default());
    let outcome = run(&host, ctl.submit(&host, &fields("mensagem de teste")));
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(DispatchReport {
            opened: vec![Channel::WhatsApp, Channel::Email],
            failed: vec![],
        })
    );

    assert_eq!(host.events.borrow()[1], (0, Event::Instructions(3, 15_000)));
    let opens = host.opens();
    assert_eq!(opens[0].0, 500);
    assert!(opens[0].1.starts_with("https://wa.me/"));
    assert_eq!(opens[1].0, 3_000);
    assert!(opens[1].1.contains(&encode_uri_component("IP: Não disponível")));
    assert_eq!(host.banners()[0].0, 5_000);
    assert_eq!(host.count(&Event::Restore(RESTORE_SUBMIT_MS)), 1);
}

#[test]
fn a_slow_ip_lookup_holds_the_email_until_it_answers() {
    struct SlowIp(MockHost);
    // same host, but the lookup takes 2.5 s
    impl Delay for SlowIp {
        async fn sleep(&self, ms: u32) {
            self.0.sleep(ms).await
        }
    }
    impl FormHost for SlowIp {
        fn show_banner(&self, kind: BannerKind, text: &str) {
            self.0.show_banner(kind, text)
        }
        fn show_instructions(&self, s: &[InstructionStep], ms: u32) -> Result<(), SubmitError> {
            self.0.show_instructions(s, ms)
        }
        fn set_busy(&self) -> Result<(), SubmitError> {
            self.0.set_busy()
        }
        fn schedule_restore(&self, ms: u32) {
            self.0.schedule_restore(ms)
        }
        fn open(&self, url: &str) -> Result<(), DispatchError> {
            self.0.open(url)
        }
        async fn client_ip(&self) -> Result<String, LookupError> {
            self.0.sleep(2_500).await;
            Ok("203.0.113.7".to_string())
        }
        fn origin(&self) -> PageOrigin {
            self.0.origin()
        }
        fn timestamp(&self, style: TimestampStyle) -> String {
            self.0.timestamp(style)
        }
        fn reset_form(&self) -> Result<(), SubmitError> {
            self.0.reset_form()
        }
        fn remove_counter(&self) {
            self.0.remove_counter()
        }
        fn celebrate(&self) {
            self.0.celebrate()
        }
    }

    let host = SlowIp(MockHost::default());
    let ctl = ContactController::new(ContactConfig::default());
    run(&host.0, ctl.submit(&host, &fields("mensagem de teste")));
    let opens = host.0.opens();
    assert_eq!(opens[0].0, 500);
    assert_eq!(opens[1].0, 2_500);
    assert!(opens[1].1.contains(&encode_uri_component("IP: 203.0.113.7")));
}

#[test]
fn host_failures_surface_a_generic_error_and_still_restore() {
    let host = MockHost {
        fail_busy: true,
        ..MockHost::default()
    };
    let ctl = ContactController::new(ContactConfig::default());
    let outcome = run(&host, ctl.submit(&host, &fields("mensagem de teste")));
    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmitError::new("submit button", "detached"))
    );
    assert!(host.opens().is_empty());
    assert_eq!(
        host.banners(),
        vec![(0, BannerKind::Error, FAILURE_TEXT.to_string())]
    );
    assert_eq!(host.count(&Event::Restore(RESTORE_SUBMIT_MS)), 1);
    assert_eq!(ctl.phase(), FormPhase::Idle);
}
