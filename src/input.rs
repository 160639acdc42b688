use glam::Vec2;

/// Viewport pixels to `[-1, 1]` on both axes, +y up.
#[inline]
pub fn normalized_pointer(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height * 2.0 - 1.0))
}

#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64, cap: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(cap)
    } else {
        1.0
    }
}

/// Canvas backing store size for a CSS size at the given pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let w = (css_width * pixel_ratio).floor().max(1.0) as u32;
    let h = (css_height * pixel_ratio).floor().max(1.0) as u32;
    (w, h)
}

/// Document-relative top of an element from its viewport rect.
#[inline]
pub fn document_top(rect_top: f64, scroll_y: f64) -> f32 {
    (rect_top + scroll_y) as f32
}

/// `setTimeout` delay argument; delays past `i32::MAX` would wrap negative
/// and fire at once.
#[inline]
pub fn timeout_ms(ms: u32) -> i32 {
    ms.min(i32::MAX as u32) as i32
}

/// Whether `document.readyState` means `load` has already fired.
#[inline]
pub fn page_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}
