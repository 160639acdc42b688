//! Pointer-driven parallax for the hero scene.

use crate::constants::{LIGHT_SWAY, PARALLAX_TILT, PARALLAX_TWEEN_SEC};
use crate::motion::{Ease, Tweens};
use crate::scene::{Axis, ObjectId, Property, PropertyKey, Scene};
use glam::{Vec2, Vec3};

const TILT_X: PropertyKey = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::X);
const TILT_Y: PropertyKey = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::Y);

/// Targets derived from a normalized pointer position (`[-1, 1]`, +y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    /// Rotation (x, y) the primary body eases toward.
    pub tilt: Vec2,
    /// Point-light (x, y) offsets; the second light mirrors the first.
    pub key_light: Vec2,
    pub fill_light: Vec2,
}

impl Parallax {
    pub fn from_pointer(n: Vec2) -> Self {
        let sway = Vec2::new(n.x * LIGHT_SWAY[0], n.y * LIGHT_SWAY[1]);
        Self {
            tilt: Vec2::new(n.y * PARALLAX_TILT, n.x * PARALLAX_TILT),
            key_light: sway,
            fill_light: -sway,
        }
    }

    /// Queue the tilt tween and move both point lights immediately.
    pub fn apply(&self, scene: &mut Scene, tweens: &mut Tweens) {
        tweens.to(scene, TILT_X, self.tilt.x, PARALLAX_TWEEN_SEC, Ease::Power1Out);
        tweens.to(scene, TILT_Y, self.tilt.y, PARALLAX_TWEEN_SEC, Ease::Power1Out);

        for (light, offset) in [
            (&mut scene.lights.key_point, self.key_light),
            (&mut scene.lights.fill_point, self.fill_light),
        ] {
            let z = light.position().map_or(0.0, |p| p.z);
            light.set_position(Vec3::new(offset.x, offset.y, z));
        }
    }
}
