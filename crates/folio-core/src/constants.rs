use glam::Vec3;

// Shared scene tuning constants consumed by the web front-end.

// Camera
pub const CAMERA_FOV_DEG: f32 = 65.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 5.0;

// Primary body and its wire shell
pub const PRIMARY_RADIUS: f32 = 1.4;
pub const SHELL_RADIUS: f32 = 1.45;
pub const BODY_DETAIL: u32 = 2;
pub const SHELL_OPACITY: f32 = 0.3;

// Satellites
pub const SATELLITE_COUNT: usize = 6;
pub const ORBIT_RADIUS: f32 = 2.5;
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_SPAN: f32 = 0.5; // speed in [SPEED_MIN, SPEED_MIN + SPEED_SPAN)
pub const TETRA_RADIUS: f32 = 0.4;
pub const OCTA_RADIUS: f32 = 0.3;
pub const DODECA_RADIUS: f32 = 0.35;

// Render loop
pub const TIME_STEP: f64 = 0.005; // scene time added per animation frame
pub const PRIMARY_SPIN: [f32; 2] = [0.1, 0.15];
pub const SHELL_SPIN: [f32; 2] = [-0.08, -0.12];
pub const PHASE_RATE: f32 = 0.05;
pub const BOB_AMPLITUDE: f32 = 0.5;
pub const SATELLITE_SPIN_Y_RATIO: f32 = 0.7;

// Point light pulsation: base + sin(t * rate) * depth
pub const KEY_POINT_PULSE: [f32; 3] = [0.8, 2.0, 0.2];
pub const FILL_POINT_PULSE: [f32; 3] = [0.6, 2.5, 0.2];

// Palette
pub const PRIMARY_COLOR: u32 = 0x6c63ff;
pub const ACCENT_COLOR: u32 = 0xff6584;
pub const WHITE: u32 = 0xffffff;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const KEY_LIGHT_POS: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const KEY_LIGHT_INTENSITY: f32 = 1.2;
pub const FILL_LIGHT_POS: Vec3 = Vec3::new(-5.0, 3.0, 2.0);
pub const FILL_LIGHT_INTENSITY: f32 = 0.5;
pub const POINT_LIGHT_RANGE: f32 = 10.0;
pub const KEY_POINT_POS: Vec3 = Vec3::new(3.0, 2.0, 1.0);
pub const FILL_POINT_POS: Vec3 = Vec3::new(-3.0, -1.0, 2.0);

// Pointer parallax
pub const PARALLAX_TILT: f32 = 0.1; // radians per normalized pointer unit
pub const PARALLAX_TWEEN_SEC: f32 = 1.0;
pub const LIGHT_SWAY: [f32; 2] = [3.0, 2.0]; // x, y offsets per normalized unit

// Page chrome
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
pub const CARD_HOVER_SCALE: f32 = 1.05;
pub const CARD_HOVER_SEC: f32 = 0.3;
pub const REVEAL_OFFSET_PX: f32 = 50.0;
pub const REVEAL_SEC: f32 = 0.8;
pub const REVEAL_STAGGER_SEC: f32 = 0.2;
pub const REVEAL_START: &str = "top 80%";
