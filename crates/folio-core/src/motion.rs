//! Time-based property tweens.
//!
//! Tweens address single scalars (`PropertyKey`). Starting a tween on a key
//! that already has one in flight replaces it, starting from the property's
//! current value, so bursts of pointer events collapse to the latest target.

use crate::scene::{PropertyKey, Scene};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    Power1Out,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Equivalent CSS timing function, for DOM transitions.
    pub fn css(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::Power1Out => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Ease::Power2Out => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            Ease::Power2InOut => "cubic-bezier(0.645, 0.045, 0.355, 1)",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ScalarTween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub ease: Ease,
}

impl ScalarTween {
    pub fn value(&self) -> f32 {
        let p = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from + (self.to - self.from) * self.ease.apply(p)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Registry of in-flight tweens, at most one per property.
#[derive(Default)]
pub struct Tweens {
    active: FnvHashMap<PropertyKey, ScalarTween>,
}

impl Tweens {
    /// Tween `key` from its current value to `target`.
    pub fn to(&mut self, scene: &Scene, key: PropertyKey, target: f32, duration: f32, ease: Ease) {
        self.active.insert(
            key,
            ScalarTween {
                from: scene.get(key),
                to: target,
                duration: duration.max(0.0),
                elapsed: 0.0,
                ease,
            },
        );
    }

    /// Advance every tween by `dt` seconds and write the results into `scene`.
    pub fn advance(&mut self, dt: f32, scene: &mut Scene) {
        let dt = dt.max(0.0);
        for (key, tween) in self.active.iter_mut() {
            tween.elapsed = (tween.elapsed + dt).min(tween.duration);
            scene.set(*key, tween.value());
        }
        self.active.retain(|_, t| !t.finished());
    }

    pub fn get(&self, key: PropertyKey) -> Option<&ScalarTween> {
        self.active.get(&key)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Axis, ObjectId, Property};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ROT_X: PropertyKey = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::X);

    fn scene() -> Scene {
        Scene::bootstrap(&mut StdRng::seed_from_u64(3))
    }

    #[test]
    fn eases_hit_their_endpoints() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out, Ease::Power2InOut] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
        assert!(Ease::Power2Out.apply(0.5) > Ease::Power1Out.apply(0.5));
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tween_reaches_target_and_retires() {
        let mut s = scene();
        let mut tweens = Tweens::default();
        tweens.to(&s, ROT_X, 0.1, 1.0, Ease::Power1Out);
        tweens.advance(0.5, &mut s);
        let mid = s.get(ROT_X);
        assert!(mid > 0.0 && mid < 0.1);
        tweens.advance(0.6, &mut s);
        assert!((s.get(ROT_X) - 0.1).abs() < 1e-6);
        assert!(tweens.is_empty());
    }

    #[test]
    fn newer_tween_overrides_in_flight_one() {
        let mut s = scene();
        let mut tweens = Tweens::default();
        tweens.to(&s, ROT_X, 1.0, 1.0, Ease::Linear);
        tweens.advance(0.5, &mut s);
        tweens.to(&s, ROT_X, -1.0, 1.0, Ease::Linear);
        assert_eq!(tweens.len(), 1);
        let t = tweens.get(ROT_X).copied().unwrap();
        assert!((t.from - 0.5).abs() < 1e-6);
        assert_eq!(t.to, -1.0);
        tweens.advance(2.0, &mut s);
        assert_eq!(s.get(ROT_X), -1.0);
    }

    #[test]
    fn zero_duration_snaps() {
        let mut s = scene();
        let mut tweens = Tweens::default();
        tweens.to(&s, ROT_X, 0.3, 0.0, Ease::Linear);
        tweens.advance(0.0, &mut s);
        assert_eq!(s.get(ROT_X), 0.3);
        assert!(tweens.is_empty());
    }
}
