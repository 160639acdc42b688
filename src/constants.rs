// DOM hooks and web-side timings. Scene and motion tuning lives in
// `folio_core::constants`.

// Hero canvas; the scene is skipped when it is absent
pub const CANVAS_ID: &str = "webgl";

// Backing store scale cap (devicePixelRatio)
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Longest frame delta fed to tweens and scrub (seconds), e.g. after a hidden tab
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Loading screen: hold after `load`, then fade out
pub const LOADING_SCREEN: &str = ".loading-screen";
pub const LOADING_HOLD_MS: u32 = 1_000;
pub const LOADING_FADE_MS: u32 = 500;

// Navigation chrome
pub const MENU_TOGGLE_ID: &str = "menuToggle";
pub const NAV_MENU_ID: &str = "navMenu";
pub const NAV_LINK: &str = ".nav-link";
pub const BACK_TO_TOP_ID: &str = "backToTop";
pub const SKILL_CARD: &str = ".skill-card";
pub const PROJECT_CARD: &str = ".project-card";

// Scroll sections that drive the hero
pub const SECTION_ONE: &str = ".section-one";
pub const SECTION_TWO: &str = ".section-two";
pub const SECTION_THREE: &str = ".section-three";
pub const SECTION_FOUR: &str = ".section-four";
pub const SECTION_SCRUB_SEC: f32 = 1.5;
pub const SATELLITE_SCRUB_SEC: f32 = 1.0;

// Contact form markup
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const CONTACT_CONFIG_ID: &str = "contact-config";
pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
pub const NAME_INPUT: &str = "input[name=\"name\"]";
pub const EMAIL_INPUT: &str = "input[name=\"email\"]";
pub const MESSAGE_INPUT: &str = "textarea[name=\"message\"]";
pub const CHAR_COUNTER: &str = ".char-counter";
pub const BANNER: &str = ".form-message";
pub const INSTRUCTIONS: &str = ".form-instructions";
pub const STYLE_ELEMENT_ID: &str = "contact-form-styles";

// Fade-out before removal (ms)
pub const BANNER_FADE_MS: u32 = 300;
pub const INSTRUCTIONS_FADE_MS: u32 = 300;
pub const STALE_INSTRUCTIONS_FADE_MS: u32 = 100;

// Best-effort client IP lookup
pub const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
