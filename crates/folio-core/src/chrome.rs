//! State for the page chrome: mobile menu, back-to-top control and the
//! project card reveals.

use crate::constants::{BACK_TO_TOP_THRESHOLD_PX, REVEAL_STAGGER_SEC};
use crate::scroll::{Marker, TriggerLayout};

/// Inline style for one of the three menu icon bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarStyle {
    pub transform: &'static str,
    pub opacity: &'static str,
}

const BAR_REST: BarStyle = BarStyle {
    transform: "none",
    opacity: "1",
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Open: outer bars cross into an X and the middle one fades out.
    pub fn bar_styles(&self) -> [BarStyle; 3] {
        if !self.open {
            return [BAR_REST; 3];
        }
        [
            BarStyle {
                transform: "rotate(45deg) translate(6px, 6px)",
                opacity: "1",
            },
            BarStyle {
                transform: "none",
                opacity: "0",
            },
            BarStyle {
                transform: "rotate(-45deg) translate(8px, -6px)",
                opacity: "1",
            },
        ]
    }
}

#[inline]
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD_PX
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Play,
    Reverse,
}

/// Play-once-per-entry reveal: plays when scrolling past the start marker,
/// reverses when scrolling back above it, and plays again on re-entry.
#[derive(Clone, Debug)]
pub struct Reveal {
    pub index: usize,
    start: Marker,
    threshold: Option<f32>,
    entered: bool,
}

impl Reveal {
    pub fn new(index: usize, start: Marker) -> Self {
        Self {
            index,
            start,
            threshold: None,
            entered: false,
        }
    }

    pub fn delay_sec(&self) -> f32 {
        self.index as f32 * REVEAL_STAGGER_SEC
    }

    pub fn refresh(&mut self, layout: Option<TriggerLayout>, viewport_height: f32) {
        self.threshold = layout.map(|l| self.start.scroll_offset(l, viewport_height));
    }

    pub fn update(&mut self, scroll: f32) -> Option<RevealAction> {
        let threshold = self.threshold?;
        let inside = scroll >= threshold;
        match (self.entered, inside) {
            (false, true) => {
                self.entered = true;
                Some(RevealAction::Play)
            }
            (true, false) => {
                self.entered = false;
                Some(RevealAction::Reverse)
            }
            _ => None,
        }
    }
}
