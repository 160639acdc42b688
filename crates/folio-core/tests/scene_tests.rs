// Scene bootstrap and per-frame motion, driven the way the render loop does.

use folio_core::constants::*;
use folio_core::{
    Axis, Ease, ObjectId, Property, PropertyKey, Scene, ScrollAnimator, ScrollBinding,
    TriggerLayout,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::{PI, TAU};

fn scene(seed: u64) -> Scene {
    Scene::bootstrap(&mut StdRng::seed_from_u64(seed))
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn satellites_start_evenly_spaced_on_the_orbit() {
    let s = scene(5);
    assert_eq!(s.satellites.len(), 6);
    for (i, sat) in s.satellites.iter().enumerate() {
        let phase = i as f32 / 6.0 * TAU;
        assert!(close(sat.phase, phase), "phase {i}");
        assert!(close(sat.body.position.x, phase.cos() * 2.5));
        assert_eq!(sat.body.position.y, 0.0);
        assert!(close(sat.body.position.z, phase.sin() * 2.5));
        assert!((0.5..1.0).contains(&sat.speed), "speed {}", sat.speed);
    }
}

#[test]
fn satellite_shapes_and_colors_alternate() {
    use folio_core::Shape;
    let s = scene(5);
    let kinds: Vec<_> = s
        .satellites
        .iter()
        .map(|sat| match sat.body.shape {
            Shape::Tetrahedron { .. } => 't',
            Shape::Octahedron { .. } => 'o',
            Shape::Dodecahedron { .. } => 'd',
            Shape::Icosahedron { .. } => 'i',
        })
        .collect();
    assert_eq!(kinds, ['t', 'o', 'd', 't', 'o', 'd']);
    assert_eq!(s.satellites[0].body.material.color, s.primary.material.color);
    assert_ne!(s.satellites[1].body.material.color, s.primary.material.color);
}

#[test]
fn body_rotation_depends_only_on_frame_count() {
    let mut a = scene(1);
    let mut b = scene(99);
    for _ in 0..200 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.clock.steps(), 200);
    assert!(close(a.clock.time(), 1.0));
    assert!(close(a.primary.rotation.x, 0.1));
    assert!(close(a.primary.rotation.y, 0.15));
    assert!(close(a.shell.rotation.x, -0.08));
    assert!(close(a.shell.rotation.y, -0.12));
    assert_eq!(a.primary.rotation, b.primary.rotation);
}

#[test]
fn satellite_phase_accumulates_per_frame() {
    let mut s = scene(21);
    let sat0 = s.satellites[2].clone();
    let mut expected_phase = sat0.phase;
    for _ in 0..50 {
        s.tick();
        expected_phase += s.clock.time() * 0.05 * sat0.speed;
    }
    let t = s.clock.time();
    let sat = &s.satellites[2];
    assert!(close(sat.phase, expected_phase));
    let angle = expected_phase + t;
    assert!(close(sat.body.position.x, angle.cos() * 2.5));
    assert!(close(sat.body.position.z, angle.sin() * 2.5));
    assert!(close(sat.body.position.y, (t * sat0.speed + 2.0).sin() * 0.5));
    assert!(close(sat.body.rotation.y, t * sat0.speed * 0.7));
}

#[test]
fn point_lights_pulse_around_their_base() {
    let mut s = scene(3);
    for _ in 0..123 {
        s.tick();
    }
    let t = s.clock.time();
    assert!(close(s.lights.key_point.intensity, 0.8 + (t * 2.0).sin() * 0.2));
    assert!(close(s.lights.fill_point.intensity, 0.6 + (t * 2.5).sin() * 0.2));
    assert_eq!(s.lights.ambient.intensity, AMBIENT_INTENSITY);
}

#[test]
fn scroll_binding_drives_a_satellite_after_refresh() {
    let mut s = scene(8);
    let key = PropertyKey::new(ObjectId::Satellite(0), Property::Position, Axis::Y);
    let mut animator = ScrollAnimator::default();
    animator.register(
        ScrollBinding::new("#section-two", "top bottom", "bottom top")
            .unwrap()
            .ease(Ease::Linear)
            .to(key, 1.5),
        &s,
    );

    // inert until measured
    animator.update(5000.0, 0.016, &mut s);
    assert_eq!(s.get(key), 0.0);

    let layout = TriggerLayout {
        top: 1000.0,
        height: 600.0,
    };
    // start = 1000 - 800 = 200, end = 1600
    animator.refresh(|sel| (sel == "#section-two").then_some(layout), 800.0, 0.0);
    animator.update(900.0, 0.016, &mut s);
    assert!(close(s.get(key), 0.75));
    animator.update(2000.0, 0.016, &mut s);
    assert!(close(s.get(key), 1.5));
}

#[test]
fn unmeasurable_triggers_leave_bindings_inert() {
    let mut s = scene(8);
    let key = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::Y);
    let mut animator = ScrollAnimator::default();
    animator.register(
        ScrollBinding::new("#missing", "top top", "bottom bottom")
            .unwrap()
            .to(key, TAU),
        &s,
    );
    animator.refresh(|_| None, 800.0, 0.0);
    animator.update(400.0, 0.016, &mut s);
    assert_eq!(s.get(key), 0.0);
}

#[test]
fn scrubbed_binding_lags_behind_scroll() {
    let mut s = scene(2);
    let key = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::X);
    let mut animator = ScrollAnimator::default();
    animator.register(
        ScrollBinding::new("#section-three", "top top", "bottom top")
            .unwrap()
            .scrub(1.5)
            .ease(Ease::Linear)
            .to(key, 1.5 * PI),
        &s,
    );
    let layout = TriggerLayout {
        top: 0.0,
        height: 1000.0,
    };
    animator.refresh(|_| Some(layout), 800.0, 0.0);
    animator.update(1000.0, 0.1, &mut s);
    let first = s.get(key);
    assert!(first > 0.0 && first < 1.5 * PI);
    for _ in 0..200 {
        animator.update(1000.0, 0.1, &mut s);
    }
    assert!(close(s.get(key), 1.5 * PI));
}

#[test]
fn later_writer_wins_over_the_frame_update() {
    let mut s = scene(4);
    let key = PropertyKey::new(ObjectId::Primary, Property::Rotation, Axis::Y);
    let mut animator = ScrollAnimator::default();
    animator.register(
        ScrollBinding::new("#section-one", "top top", "bottom top")
            .unwrap()
            .ease(Ease::Linear)
            .to(key, TAU),
        &s,
    );
    animator.refresh(
        |_| {
            Some(TriggerLayout {
                top: 0.0,
                height: 1000.0,
            })
        },
        800.0,
        0.0,
    );
    s.tick();
    animator.update(500.0, 0.016, &mut s);
    assert!(close(s.primary.rotation.y, PI));
    // next frame: scroll unchanged, so the spin owns the property again
    s.tick();
    animator.update(500.0, 0.016, &mut s);
    assert!(close(s.primary.rotation.y, s.clock.time() * PRIMARY_SPIN[1]));
}
