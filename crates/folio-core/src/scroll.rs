//! Scroll-linked property bindings.
//!
//! A binding maps the scroll position inside a trigger element's start/end
//! markers to progress in `[0, 1]` and interpolates its target properties
//! from the values they had at registration to the binding's destination.
//! Bindings are independent: several may drive the same property and the
//! last one to write in a frame wins.

use crate::motion::Ease;
use crate::scene::{PropertyKey, Scene};
use smallvec::SmallVec;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MarkerError {
    #[error("marker `{0}` needs an element edge and a viewport edge")]
    Shape(String),
    #[error("unknown marker edge `{0}`")]
    Edge(String),
}

/// A position along an element or along the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Fraction of the height from the top, `0.8` for `80%`.
    Fraction(f32),
}

impl Edge {
    #[inline]
    pub fn fraction(self) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
            Edge::Fraction(f) => f,
        }
    }
}

impl FromStr for Edge {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => s
                .strip_suffix('%')
                .and_then(|n| n.parse::<f32>().ok())
                .map(|pct| Edge::Fraction(pct / 100.0))
                .ok_or_else(|| MarkerError::Edge(s.to_string())),
        }
    }
}

/// `"<element edge> <viewport edge>"`, e.g. `"top center"`: the marker is
/// reached when the element edge meets the viewport edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub element: Edge,
    pub viewport: Edge,
}

impl FromStr for Marker {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(el), Some(vp), None) => Ok(Marker {
                element: el.parse()?,
                viewport: vp.parse()?,
            }),
            _ => Err(MarkerError::Shape(s.to_string())),
        }
    }
}

/// Document-relative geometry of a trigger element, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerLayout {
    pub top: f32,
    pub height: f32,
}

impl Marker {
    /// Scroll offset at which this marker is reached.
    pub fn scroll_offset(&self, layout: TriggerLayout, viewport_height: f32) -> f32 {
        layout.top + self.element.fraction() * layout.height
            - self.viewport.fraction() * viewport_height
    }
}

#[derive(Clone, Debug)]
pub struct ScrollBinding {
    pub trigger: String,
    pub start: Marker,
    pub end: Marker,
    pub scrub: f32,
    pub ease: Ease,
    pub targets: SmallVec<[(PropertyKey, f32); 3]>,
}

impl ScrollBinding {
    pub fn new(trigger: &str, start: &str, end: &str) -> Result<Self, MarkerError> {
        Ok(Self {
            trigger: trigger.to_string(),
            start: start.parse()?,
            end: end.parse()?,
            scrub: 0.0,
            ease: Ease::default(),
            targets: SmallVec::new(),
        })
    }

    /// Seconds the animated value lags behind raw scroll progress.
    pub fn scrub(mut self, seconds: f32) -> Self {
        self.scrub = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn to(mut self, key: PropertyKey, value: f32) -> Self {
        self.targets.push((key, value));
        self
    }
}

/// Raw progress of `scroll` through `[start, end]`.
pub fn progress(scroll: f32, start: f32, end: f32) -> f32 {
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
}

const SETTLE_EPSILON: f32 = 1.0e-4;

struct Track {
    binding: ScrollBinding,
    from: SmallVec<[f32; 3]>,
    range: Option<(f32, f32)>,
    progress: f32,
    applied: Option<f32>,
}

impl Track {
    fn apply(&mut self, scene: &mut Scene) {
        let eased = self.binding.ease.apply(self.progress);
        for ((key, to), from) in self.binding.targets.iter().zip(&self.from) {
            scene.set(*key, from + (to - from) * eased);
        }
        self.applied = Some(self.progress);
    }
}

#[derive(Default)]
pub struct ScrollAnimator {
    tracks: Vec<Track>,
}

impl ScrollAnimator {
    /// Register a binding; start values are captured from `scene` now.
    /// The binding stays inert until the next `refresh`.
    pub fn register(&mut self, binding: ScrollBinding, scene: &Scene) {
        let from = binding.targets.iter().map(|(k, _)| scene.get(*k)).collect();
        self.tracks.push(Track {
            binding,
            from,
            range: None,
            progress: 0.0,
            applied: None,
        });
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Recompute every binding's scroll range from current layout.
    ///
    /// `measure` resolves a trigger selector to its layout; bindings whose
    /// trigger cannot be measured become inert. A binding that has never
    /// written jumps straight to its current progress.
    pub fn refresh<F>(&mut self, mut measure: F, viewport_height: f32, scroll: f32)
    where
        F: FnMut(&str) -> Option<TriggerLayout>,
    {
        for track in &mut self.tracks {
            track.range = measure(&track.binding.trigger).map(|layout| {
                (
                    track.binding.start.scroll_offset(layout, viewport_height),
                    track.binding.end.scroll_offset(layout, viewport_height),
                )
            });
            match track.range {
                Some((start, end)) if track.applied.is_none() => {
                    track.progress = progress(scroll, start, end);
                }
                Some(_) => {}
                None => log::warn!(
                    "[scroll] trigger `{}` not found; binding inert",
                    track.binding.trigger
                ),
            }
        }
    }

    /// Move smoothed progress toward the scroll position and write every
    /// binding whose progress changed.
    pub fn update(&mut self, scroll: f32, dt: f32, scene: &mut Scene) {
        for track in &mut self.tracks {
            let Some((start, end)) = track.range else {
                continue;
            };
            let raw = progress(scroll, start, end);
            track.progress = smooth(track.progress, raw, track.binding.scrub, dt);
            let changed = track
                .applied
                .map_or(true, |p| (p - track.progress).abs() > f32::EPSILON);
            if changed {
                track.apply(scene);
            }
        }
    }
}

/// Exponential catch-up that settles within roughly `scrub` seconds.
fn smooth(current: f32, target: f32, scrub: f32, dt: f32) -> f32 {
    if scrub <= 0.0 {
        return target;
    }
    let alpha = 1.0 - (-dt.max(0.0) * 4.0 / scrub).exp();
    let next = current + (target - current) * alpha;
    if (target - next).abs() < SETTLE_EPSILON {
        target
    } else {
        next
    }
}
