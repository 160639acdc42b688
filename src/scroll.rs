//! Scroll bindings for the hero: which page section drives which property.

use crate::constants::*;
use crate::dom;
use folio_core::{
    Axis, Ease, MarkerError, ObjectId, Property, PropertyKey, Scene, ScrollAnimator,
    ScrollBinding,
};
use std::f32::consts::PI;
use web_sys as web;

const fn primary(property: Property, axis: Axis) -> PropertyKey {
    PropertyKey::new(ObjectId::Primary, property, axis)
}

/// The page's section bindings, in registration order.
pub fn page_bindings(satellites: usize) -> Result<Vec<ScrollBinding>, MarkerError> {
    use Axis::{X, Y, Z};
    use Property::{Position, Rotation};

    let mut lift = ScrollBinding::new(SECTION_TWO, "top center", "bottom center")?
        .scrub(SATELLITE_SCRUB_SEC);
    for i in 0..satellites {
        lift = lift.to(PropertyKey::new(ObjectId::Satellite(i), Position, Y), 1.5);
    }

    Ok(vec![
        ScrollBinding::new(SECTION_ONE, "top top", "bottom top")?
            .scrub(SECTION_SCRUB_SEC)
            .ease(Ease::Power2Out)
            .to(primary(Rotation, Y), 2.0 * PI),
        ScrollBinding::new(SECTION_TWO, "top center", "bottom center")?
            .scrub(SECTION_SCRUB_SEC)
            .to(primary(Position, X), 2.0)
            .to(primary(Position, Y), -1.0),
        ScrollBinding::new(SECTION_THREE, "top center", "bottom center")?
            .scrub(SECTION_SCRUB_SEC)
            .to(primary(Rotation, X), 1.5 * PI)
            .to(primary(Rotation, Y), 2.5 * PI),
        ScrollBinding::new(SECTION_FOUR, "top center", "bottom bottom")?
            .scrub(SECTION_SCRUB_SEC)
            .to(primary(Position, X), 0.0)
            .to(primary(Position, Y), -2.0)
            .to(primary(Position, Z), 3.0),
        lift,
    ])
}

/// Register every page binding against the freshly built scene.
pub fn build_animator(scene: &Scene) -> Result<ScrollAnimator, MarkerError> {
    let mut animator = ScrollAnimator::default();
    for binding in page_bindings(scene.satellites.len())? {
        animator.register(binding, scene);
    }
    log::info!("[scroll] {} bindings registered", animator.len());
    Ok(animator)
}

/// Re-measure every trigger against the current layout.
pub fn refresh(animator: &mut ScrollAnimator, document: &web::Document) {
    let (_, viewport_h) = dom::viewport_size();
    animator.refresh(
        |selector| dom::measure(document, selector),
        viewport_h as f32,
        dom::scroll_y() as f32,
    );
}
