//! Hero scene graph: the primary body, its wire shell, six orbiting
//! satellites and the light rig, plus the per-frame updater.

use crate::constants::*;
use crate::geometry::Shape;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Addressable scene objects for tweens and scroll bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectId {
    Primary,
    Shell,
    Satellite(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    Rotation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One animatable scalar: `object.property.axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub object: ObjectId,
    pub property: Property,
    pub axis: Axis,
}

impl PropertyKey {
    pub const fn new(object: ObjectId, property: Property, axis: Axis) -> Self {
        Self {
            object,
            property,
            axis,
        }
    }
}

/// Surface description handed to the renderer.
///
/// `color` is linear RGB. `opacity < 1` is blended; `wireframe` draws edges
/// only.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub emissive: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    pub fn glossy(hex: u32, metalness: f32, roughness: f32, clearcoat: f32) -> Self {
        Self {
            color: linear_rgb(hex),
            metalness,
            roughness,
            clearcoat,
            emissive: 0.0,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub fn wire(hex: u32, opacity: f32) -> Self {
        Self {
            color: linear_rgb(hex),
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
            emissive: 0.0,
            opacity,
            wireframe: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl SceneObject {
    fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    /// World transform. Euler angles apply in X, Y, Z order.
    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }

    fn vector_mut(&mut self, property: Property) -> &mut Vec3 {
        match property {
            Property::Position => &mut self.position,
            Property::Rotation => &mut self.rotation,
        }
    }

    fn vector(&self, property: Property) -> Vec3 {
        match property {
            Property::Position => self.position,
            Property::Rotation => self.rotation,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Satellite {
    pub body: SceneObject,
    pub phase: f32,
    pub radius: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum LightKind {
    Ambient,
    Directional { position: Vec3 },
    Point { position: Vec3, range: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Ambient => None,
            LightKind::Directional { position } | LightKind::Point { position, .. } => {
                Some(position)
            }
        }
    }

    /// Moves a positioned light; ambient lights ignore this.
    pub fn set_position(&mut self, p: Vec3) {
        match &mut self.kind {
            LightKind::Ambient => {}
            LightKind::Directional { position } | LightKind::Point { position, .. } => {
                *position = p
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightRig {
    pub ambient: Light,
    pub key: Light,
    pub fill: Light,
    pub key_point: Light,
    pub fill_point: Light,
}

impl LightRig {
    fn studio() -> Self {
        Self {
            ambient: Light {
                kind: LightKind::Ambient,
                color: linear_rgb(WHITE),
                intensity: AMBIENT_INTENSITY,
            },
            key: Light {
                kind: LightKind::Directional {
                    position: KEY_LIGHT_POS,
                },
                color: linear_rgb(WHITE),
                intensity: KEY_LIGHT_INTENSITY,
            },
            fill: Light {
                kind: LightKind::Directional {
                    position: FILL_LIGHT_POS,
                },
                color: linear_rgb(ACCENT_COLOR),
                intensity: FILL_LIGHT_INTENSITY,
            },
            key_point: Light {
                kind: LightKind::Point {
                    position: KEY_POINT_POS,
                    range: POINT_LIGHT_RANGE,
                },
                color: linear_rgb(PRIMARY_COLOR),
                intensity: KEY_POINT_PULSE[0],
            },
            fill_point: Light {
                kind: LightKind::Point {
                    position: FILL_POINT_POS,
                    range: POINT_LIGHT_RANGE,
                },
                color: linear_rgb(ACCENT_COLOR),
                intensity: FILL_POINT_PULSE[0],
            },
        }
    }
}

/// Frame-counted scene clock. Time advances by a fixed step per animation
/// frame, so animation speed follows the display refresh rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SceneClock {
    steps: u64,
}

impl SceneClock {
    pub fn advance(&mut self) -> f32 {
        self.steps += 1;
        self.time()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn time(&self) -> f32 {
        (self.steps as f64 * TIME_STEP) as f32
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub primary: SceneObject,
    pub shell: SceneObject,
    pub satellites: Vec<Satellite>,
    pub lights: LightRig,
    pub clock: SceneClock,
}

impl Scene {
    /// Build the fixed hero scene. Satellite speeds are drawn from `rng`.
    pub fn bootstrap<R: Rng>(rng: &mut R) -> Self {
        let mut primary = SceneObject::new(
            Shape::Icosahedron {
                radius: PRIMARY_RADIUS,
                detail: BODY_DETAIL,
            },
            Material::glossy(PRIMARY_COLOR, 0.7, 0.2, 0.8),
        );
        primary.material.emissive = 0.1;
        let shell = SceneObject::new(
            Shape::Icosahedron {
                radius: SHELL_RADIUS,
                detail: BODY_DETAIL,
            },
            Material::wire(ACCENT_COLOR, SHELL_OPACITY),
        );

        let families = [
            Shape::Tetrahedron {
                radius: TETRA_RADIUS,
            },
            Shape::Octahedron {
                radius: OCTA_RADIUS,
            },
            Shape::Dodecahedron {
                radius: DODECA_RADIUS,
            },
        ];
        let satellites = (0..SATELLITE_COUNT)
            .map(|i| {
                let color = if i % 2 == 0 {
                    PRIMARY_COLOR
                } else {
                    ACCENT_COLOR
                };
                let phase = i as f32 / SATELLITE_COUNT as f32 * TAU;
                let mut body = SceneObject::new(
                    families[i % families.len()],
                    Material::glossy(color, 0.6, 0.3, 0.7),
                );
                body.position = Vec3::new(phase.cos() * ORBIT_RADIUS, 0.0, phase.sin() * ORBIT_RADIUS);
                Satellite {
                    body,
                    phase,
                    radius: ORBIT_RADIUS,
                    speed: SPEED_MIN + rng.gen::<f32>() * SPEED_SPAN,
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "[scene] bootstrap: {} satellites, speeds={:?}",
            satellites.len(),
            satellites.iter().map(|s| s.speed).collect::<Vec<_>>()
        );

        Self {
            primary,
            shell,
            satellites,
            lights: LightRig::studio(),
            clock: SceneClock::default(),
        }
    }

    /// One animation frame of the continuous motion.
    pub fn tick(&mut self) {
        let t = self.clock.advance();

        self.primary.rotation.x = t * PRIMARY_SPIN[0];
        self.primary.rotation.y = t * PRIMARY_SPIN[1];
        self.shell.rotation.x = t * SHELL_SPIN[0];
        self.shell.rotation.y = t * SHELL_SPIN[1];

        for (i, sat) in self.satellites.iter_mut().enumerate() {
            sat.phase += t * PHASE_RATE * sat.speed;
            let angle = sat.phase + t;
            sat.body.position.x = angle.cos() * sat.radius;
            sat.body.position.z = angle.sin() * sat.radius;
            sat.body.position.y = (t * sat.speed + i as f32).sin() * BOB_AMPLITUDE;
            sat.body.rotation.x = t * sat.speed;
            sat.body.rotation.y = t * sat.speed * SATELLITE_SPIN_Y_RATIO;
        }

        self.lights.key_point.intensity = pulse(KEY_POINT_PULSE, t);
        self.lights.fill_point.intensity = pulse(FILL_POINT_PULSE, t);
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        match id {
            ObjectId::Primary => Some(&self.primary),
            ObjectId::Shell => Some(&self.shell),
            ObjectId::Satellite(i) => self.satellites.get(i).map(|s| &s.body),
        }
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        match id {
            ObjectId::Primary => Some(&mut self.primary),
            ObjectId::Shell => Some(&mut self.shell),
            ObjectId::Satellite(i) => self.satellites.get_mut(i).map(|s| &mut s.body),
        }
    }

    /// Current value of an animatable scalar; unknown satellites read as 0.
    pub fn get(&self, key: PropertyKey) -> f32 {
        self.object(key.object)
            .map(|o| o.vector(key.property)[key.axis.index()])
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, key: PropertyKey, value: f32) {
        if let Some(o) = self.object_mut(key.object) {
            o.vector_mut(key.property)[key.axis.index()] = value;
        }
    }

    /// Every drawable object in draw order (opaque first, shell last).
    pub fn drawables(&self) -> impl Iterator<Item = &SceneObject> {
        std::iter::once(&self.primary)
            .chain(self.satellites.iter().map(|s| &s.body))
            .chain(std::iter::once(&self.shell))
    }
}

#[inline]
fn pulse([base, rate, depth]: [f32; 3], t: f32) -> f32 {
    base + (t * rate).sin() * depth
}

/// sRGB hex color to linear RGB.
pub fn linear_rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}
