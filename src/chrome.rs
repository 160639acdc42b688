//! Page chrome: loading screen, mobile menu, back-to-top, skill card hover
//! and the staggered project card reveals.

use crate::constants::*;
use crate::dom;
use folio_core::chrome::{back_to_top_visible, MenuState, Reveal, RevealAction};
use folio_core::constants::{
    CARD_HOVER_SCALE, CARD_HOVER_SEC, REVEAL_OFFSET_PX, REVEAL_SEC, REVEAL_START,
};
use folio_core::{Ease, Marker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire(document: &web::Document) {
    wire_loading_screen(document);
    wire_menu(document);
    wire_back_to_top(document);
    wire_skill_cards(document);
    wire_project_reveals(document);
}

fn wire_loading_screen(document: &web::Document) {
    let Some(screen) = dom::html(document.query_selector(LOADING_SCREEN)) else {
        return;
    };
    let dismiss = move || {
        dom::after(LOADING_HOLD_MS, move || {
            dom::set_style(
                &screen,
                "transition",
                &format!("opacity {}ms ease", LOADING_FADE_MS),
            );
            dom::set_style(&screen, "opacity", "0");
            dom::after(LOADING_FADE_MS, move || {
                _ = screen.class_list().add_1("hidden");
            });
        });
    };
    dom::on_page_load(document, dismiss);
}

fn apply_bar_styles(toggle: &web::Element, menu: &MenuState) {
    let bars = dom::elements(toggle.query_selector_all("span"));
    for (bar, style) in bars.iter().zip(menu.bar_styles()) {
        if let Some(bar) = bar.dyn_ref::<web::HtmlElement>() {
            dom::set_style(bar, "transform", style.transform);
            dom::set_style(bar, "opacity", style.opacity);
        }
    }
}

fn wire_menu(document: &web::Document) {
    let (Some(toggle), Some(nav)) = (
        document.get_element_by_id(MENU_TOGGLE_ID),
        document.get_element_by_id(NAV_MENU_ID),
    ) else {
        log::debug!("[chrome] no mobile menu on this page");
        return;
    };
    let menu = Rc::new(RefCell::new(MenuState::default()));

    {
        let (menu, toggle_el, nav) = (menu.clone(), toggle.clone(), nav.clone());
        dom::on(&toggle, "click", move || {
            let open = menu.borrow_mut().toggle();
            _ = toggle_el.class_list().toggle_with_force("active", open);
            _ = nav.class_list().toggle_with_force("active", open);
            apply_bar_styles(&toggle_el, &menu.borrow());
        });
    }

    for link in dom::elements(document.query_selector_all(NAV_LINK)) {
        let (menu, toggle, nav) = (menu.clone(), toggle.clone(), nav.clone());
        dom::on(&link, "click", move || {
            menu.borrow_mut().close();
            _ = toggle.class_list().remove_1("active");
            _ = nav.class_list().remove_1("active");
            apply_bar_styles(&toggle, &menu.borrow());
        });
    }
}

fn wire_back_to_top(document: &web::Document) {
    let (Some(button), Some(window)) = (document.get_element_by_id(BACK_TO_TOP_ID), web::window())
    else {
        return;
    };
    let sync = {
        let button = button.clone();
        move || {
            _ = button
                .class_list()
                .toggle_with_force("visible", back_to_top_visible(dom::scroll_y()));
        }
    };
    sync();
    dom::on(&window, "scroll", sync);

    let target = window.clone();
    dom::on(&button, "click", move || {
        let opts = web::ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(web::ScrollBehavior::Smooth);
        target.scroll_to_with_scroll_to_options(&opts);
    });
}

fn wire_skill_cards(document: &web::Document) {
    let transition = format!("transform {}s {}", CARD_HOVER_SEC, Ease::Power2Out.css());
    for card in dom::elements(document.query_selector_all(SKILL_CARD)) {
        let Ok(card) = card.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        dom::set_style(&card, "transition", &transition);
        let enter = card.clone();
        dom::on(&card, "mouseenter", move || {
            dom::set_style(&enter, "transform", &format!("scale({})", CARD_HOVER_SCALE));
        });
        let leave = card.clone();
        dom::on(&card, "mouseleave", move || {
            dom::set_style(&leave, "transform", "scale(1)");
        });
    }
}

struct RevealCard {
    reveal: Reveal,
    el: web::HtmlElement,
}

impl RevealCard {
    fn show(&self, action: RevealAction) {
        let ease = Ease::default().css();
        match action {
            RevealAction::Play => {
                dom::set_style(
                    &self.el,
                    "transition",
                    &format!("opacity {0}s {1}, transform {0}s {1}", REVEAL_SEC, ease),
                );
                dom::set_style(
                    &self.el,
                    "transition-delay",
                    &format!("{}s", self.reveal.delay_sec()),
                );
                dom::set_style(&self.el, "opacity", "1");
                dom::set_style(&self.el, "transform", "translateY(0)");
            }
            RevealAction::Reverse => {
                dom::set_style(&self.el, "transition-delay", "0s");
                self.hide();
            }
        }
    }

    fn hide(&self) {
        dom::set_style(&self.el, "opacity", "0");
        dom::set_style(
            &self.el,
            "transform",
            &format!("translateY({}px)", REVEAL_OFFSET_PX),
        );
    }
}

fn update_reveals(cards: &mut [RevealCard], remeasure: bool) {
    let (_, viewport_h) = dom::viewport_size();
    let scroll = dom::scroll_y() as f32;
    for card in cards.iter_mut() {
        if remeasure {
            card.reveal
                .refresh(Some(dom::element_layout(&card.el)), viewport_h as f32);
        }
        if let Some(action) = card.reveal.update(scroll) {
            card.show(action);
        }
    }
}

fn wire_project_reveals(document: &web::Document) {
    let start = match REVEAL_START.parse::<Marker>() {
        Ok(m) => m,
        Err(e) => {
            log::error!("[chrome] reveal marker: {}", e);
            return;
        }
    };
    let cards: Vec<RevealCard> = dom::elements(document.query_selector_all(PROJECT_CARD))
        .into_iter()
        .filter_map(|el| el.dyn_into::<web::HtmlElement>().ok())
        .enumerate()
        .map(|(i, el)| RevealCard {
            reveal: Reveal::new(i, start),
            el,
        })
        .collect();
    if cards.is_empty() {
        return;
    }
    for card in &cards {
        card.hide();
    }
    let cards = Rc::new(RefCell::new(cards));
    update_reveals(&mut cards.borrow_mut(), true);

    let Some(window) = web::window() else {
        return;
    };
    let on_scroll = cards.clone();
    dom::on(&window, "scroll", move || {
        update_reveals(&mut on_scroll.borrow_mut(), false);
    });
    // images and fonts arriving later move every card
    let on_load = cards.clone();
    dom::on_page_load(document, move || {
        update_reveals(&mut on_load.borrow_mut(), true);
    });
    dom::on(&window, "resize", move || {
        update_reveals(&mut cards.borrow_mut(), true);
    });
}
