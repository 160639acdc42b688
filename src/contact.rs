//! DOM side of the contact form.

use crate::confetti::{BrowserClock, ConfettiLoader};
use crate::constants::*;
use crate::dom;
use crate::timer::{self, SubmissionTimers, Timeout};
use folio_core::contact::{
    celebrate, counter_text, is_valid_email, BannerKind, ContactController, ContactFields,
    CounterTone, Delay, DispatchError, FormHost, InstructionStep, LookupError, PageOrigin,
    SubmitError, TimestampStyle, BUSY_LABEL_HTML, EMAIL_HINT_TEXT, POPUP_NOTE,
};
use folio_core::ContactConfig;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Deserialize)]
struct IpReply {
    ip: String,
}

fn js_err(context: &'static str) -> impl Fn(JsValue) -> SubmitError {
    move |e| SubmitError::new(context, format!("{:?}", e))
}

pub struct DomFormHost {
    form: web::HtmlFormElement,
    submit: Option<web::HtmlButtonElement>,
    idle_label: String,
    locale: String,
    time_zone: String,
    timers: RefCell<SubmissionTimers>,
}

impl DomFormHost {
    pub fn new(form: web::HtmlFormElement, config: &ContactConfig) -> Self {
        let submit = form
            .query_selector(SUBMIT_BUTTON)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok());
        let idle_label = submit.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        Self {
            form,
            submit,
            idle_label,
            locale: config.locale.clone(),
            time_zone: config.time_zone.clone(),
            timers: RefCell::new(SubmissionTimers::default()),
        }
    }

    fn document(&self) -> Option<web::Document> {
        self.form.owner_document()
    }

    fn field(&self, selector: &str) -> String {
        let Ok(Some(el)) = self.form.query_selector(selector) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.field(NAME_INPUT),
            email: self.field(EMAIL_INPUT),
            message: self.field(MESSAGE_INPUT),
        }
    }

    fn fade_out_all(&self, selector: &str, fade_ms: u32) {
        for el in dom::elements(self.form.query_selector_all(selector)) {
            if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
                dom::fade_and_remove(&el, fade_ms);
            }
        }
    }

    fn build_banner(&self, kind: BannerKind, text: &str) -> Result<web::HtmlElement, JsValue> {
        let document = self
            .document()
            .ok_or_else(|| JsValue::from_str("form is detached"))?;
        let banner = document
            .create_element("div")?
            .dyn_into::<web::HtmlElement>()?;
        banner.set_class_name(kind.class_name());
        let close = if kind.dismissible() {
            "<button type=\"button\" class=\"close-message\">&times;</button>"
        } else {
            ""
        };
        banner.set_inner_html(&format!(
            "<i class=\"fas fa-{}\"></i><span>{}</span>{}",
            kind.icon(),
            text,
            close
        ));
        self.form.append_child(&banner)?;
        Ok(banner)
    }

    fn counter(&self) -> Option<web::HtmlElement> {
        if let Some(existing) = dom::html(self.form.query_selector(CHAR_COUNTER)) {
            return Some(existing);
        }
        let group = self
            .form
            .query_selector(MESSAGE_INPUT)
            .ok()
            .flatten()?
            .parent_element()?;
        let counter = self
            .document()?
            .create_element("div")
            .ok()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        counter.set_class_name("char-counter");
        group.append_child(&counter).ok()?;
        Some(counter)
    }

    /// Live `N/1000` counter under the message field.
    pub fn update_counter(&self) {
        let count = self.fields().message.chars().count();
        if let Some(counter) = self.counter() {
            counter.set_text_content(Some(&counter_text(count)));
            dom::set_style(&counter, "color", CounterTone::for_count(count).color());
        }
    }
}

impl Delay for DomFormHost {
    async fn sleep(&self, ms: u32) {
        timer::sleep(ms).await;
    }
}

impl FormHost for DomFormHost {
    fn show_banner(&self, kind: BannerKind, text: &str) {
        self.fade_out_all(BANNER, BANNER_FADE_MS);
        let banner = match self.build_banner(kind, text) {
            Ok(b) => b,
            Err(e) => {
                log::error!("[contact] banner: {:?}", e);
                return;
            }
        };
        if let Ok(Some(close)) = banner.query_selector(".close-message") {
            let target = banner.clone();
            dom::on(&close, "click", move || {
                dom::fade_and_remove(&target, BANNER_FADE_MS)
            });
        }
        let dismiss = kind.auto_dismiss_ms().and_then(|ms| {
            Timeout::start(ms, move || {
                if banner.is_connected() {
                    dom::fade_and_remove(&banner, BANNER_FADE_MS);
                }
            })
        });
        self.timers.borrow_mut().replace_banner(dismiss);
    }

    fn show_instructions(
        &self,
        steps: &[InstructionStep],
        auto_close_ms: u32,
    ) -> Result<(), SubmitError> {
        self.fade_out_all(INSTRUCTIONS, STALE_INSTRUCTIONS_FADE_MS);
        let document = self
            .document()
            .ok_or_else(|| SubmitError::new("instructions", "form is detached"))?;
        let panel = document
            .create_element("div")
            .map_err(js_err("instructions"))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| SubmitError::new("instructions", "not an HTML element"))?;
        panel.set_class_name("form-instructions");

        let steps_html: String = steps
            .iter()
            .map(|s| {
                format!(
                    "<div class=\"step\"><span class=\"step-number\">{}</span><p>{}</p><small>{}</small></div>",
                    s.number, s.title_html, s.hint
                )
            })
            .collect();
        panel.set_inner_html(&format!(
            "<div class=\"instructions-header\">\
               <i class=\"fas fa-info-circle\"></i>\
               <h4>📋 Instruções de Envio</h4>\
               <button type=\"button\" class=\"close-instructions\">&times;</button>\
             </div>\
             <div class=\"steps\">{steps_html}</div>\
             <div class=\"note\"><i class=\"fas fa-lightbulb\"></i><p>{POPUP_NOTE}</p></div>"
        ));
        self.form
            .append_child(&panel)
            .map_err(js_err("instructions"))?;

        if let Ok(Some(close)) = panel.query_selector(".close-instructions") {
            let target = panel.clone();
            dom::on(&close, "click", move || {
                dom::fade_and_remove(&target, INSTRUCTIONS_FADE_MS)
            });
        }
        let auto_close = (auto_close_ms > 0)
            .then(|| {
                Timeout::start(auto_close_ms, move || {
                    if panel.is_connected() {
                        dom::fade_and_remove(&panel, INSTRUCTIONS_FADE_MS);
                    }
                })
            })
            .flatten();
        self.timers.borrow_mut().replace_instructions(auto_close);
        Ok(())
    }

    fn set_busy(&self) -> Result<(), SubmitError> {
        let button = self
            .submit
            .as_ref()
            .ok_or_else(|| SubmitError::new("submit button", "missing"))?;
        button.set_inner_html(BUSY_LABEL_HTML);
        button.set_disabled(true);
        Ok(())
    }

    fn schedule_restore(&self, delay_ms: u32) {
        let Some(button) = self.submit.clone() else {
            return;
        };
        let label = self.idle_label.clone();
        let handle = Timeout::start(delay_ms, move || {
            button.set_inner_html(&label);
            button.set_disabled(false);
        });
        self.timers.borrow_mut().track_restore(handle);
    }

    fn open(&self, url: &str) -> Result<(), DispatchError> {
        let window = web::window().ok_or_else(|| DispatchError::Navigation("no window".into()))?;
        match window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(DispatchError::Blocked),
            Err(e) => Err(DispatchError::Navigation(format!("{:?}", e))),
        }
    }

    async fn client_ip(&self) -> Result<String, LookupError> {
        let response = gloo_net::http::Request::get(IP_LOOKUP_URL)
            .send()
            .await
            .map_err(|e| LookupError::Request(e.to_string()))?;
        if !response.ok() {
            return Err(LookupError::Request(format!("HTTP {}", response.status())));
        }
        let reply: IpReply = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;
        Ok(reply.ip)
    }

    fn origin(&self) -> PageOrigin {
        let Some(window) = web::window() else {
            return PageOrigin::default();
        };
        let location = window.location();
        PageOrigin {
            host: location.hostname().unwrap_or_default(),
            url: location.href().unwrap_or_default(),
            user_agent: window.navigator().user_agent().unwrap_or_default(),
        }
    }

    fn timestamp(&self, style: TimestampStyle) -> String {
        let options = js_sys::JSON::parse(&style.intl_options(&self.time_zone).to_string())
            .unwrap_or(JsValue::UNDEFINED);
        js_sys::Date::new_0()
            .to_locale_string(&self.locale, &options)
            .into()
    }

    fn reset_form(&self) -> Result<(), SubmitError> {
        self.form.reset();
        Ok(())
    }

    fn remove_counter(&self) {
        if let Ok(Some(counter)) = self.form.query_selector(CHAR_COUNTER) {
            counter.remove();
        }
    }

    fn celebrate(&self) {
        spawn_local(async {
            let fired = celebrate(&*ConfettiLoader::shared(), &BrowserClock).await;
            log::debug!("[confetti] {} bursts", fired);
        });
    }
}

/// Page override from `<script type="application/json" id="contact-config">`.
fn load_config(document: &web::Document) -> ContactConfig {
    let Some(text) = document
        .get_element_by_id(CONTACT_CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return ContactConfig::default();
    };
    match ContactConfig::from_json(&text) {
        Ok(cfg) => {
            log::info!("[contact] config override loaded");
            cfg
        }
        Err(e) => {
            log::warn!("[contact] ignoring invalid #{}: {}", CONTACT_CONFIG_ID, e);
            ContactConfig::default()
        }
    }
}

fn wire_live_validation(host: &Rc<DomFormHost>) {
    if let Ok(Some(email)) = host.form.query_selector(EMAIL_INPUT) {
        let host = host.clone();
        dom::on(&email, "blur", move || {
            let value = host.fields().email;
            if !value.is_empty() && !is_valid_email(&value) {
                host.show_banner(BannerKind::Error, EMAIL_HINT_TEXT);
            }
        });
    }
    if let Ok(Some(message)) = host.form.query_selector(MESSAGE_INPUT) {
        let host = host.clone();
        dom::on(&message, "input", move || host.update_counter());
    }
}

pub fn wire(document: &web::Document) {
    let Some(form) = document
        .get_element_by_id(CONTACT_FORM_ID)
        .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
    else {
        log::error!("[contact] #{} not found", CONTACT_FORM_ID);
        return;
    };
    let config = load_config(document);
    let host = Rc::new(DomFormHost::new(form.clone(), &config));
    let controller = Rc::new(ContactController::new(config));
    wire_live_validation(&host);

    dom::on_event(&form, "submit", move |ev: web::Event| {
        ev.prevent_default();
        let host = host.clone();
        let controller = controller.clone();
        spawn_local(async move {
            let fields = host.fields();
            let outcome = controller.submit(&*host, &fields).await;
            log::debug!("[contact] outcome: {:?}", outcome);
        });
    });
    log::info!("[contact] form wired");
}
