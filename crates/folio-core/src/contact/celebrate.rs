//! Confetti celebration as an injectable capability.
//!
//! The particle effect is a remote script that may or may not be present.
//! Callers ask the capability to become ready and silently skip the effect
//! when it cannot.

use serde::Serialize;

pub const CONFETTI_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/canvas-confetti@1.5.1/dist/confetti.browser.min.js";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CelebrationState {
    #[default]
    Unavailable,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    pub y: f32,
}

/// Options for one confetti burst, serialized with the effect's own keys.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    pub origin: Origin,
    pub colors: Vec<&'static str>,
}

/// Waits on the host's clock.
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn sleep(&self, ms: u32);
}

#[allow(async_fn_in_trait)]
pub trait Celebration {
    fn state(&self) -> CelebrationState;
    /// Load the effect if needed. `false` when it cannot be made ready.
    async fn ensure_ready(&self) -> bool;
    fn fire(&self, burst: &ConfettiBurst);
}

/// Center burst, two side bursts after 250 ms, a wide finale at 500 ms.
pub fn burst_schedule() -> Vec<(u32, ConfettiBurst)> {
    let center = Origin { x: None, y: 0.6 };
    vec![
        (
            0,
            ConfettiBurst {
                particle_count: 100,
                spread: 70.0,
                angle: None,
                origin: center,
                colors: vec!["#6c63ff", "#ff6584", "#ffffff"],
            },
        ),
        (
            250,
            ConfettiBurst {
                particle_count: 50,
                spread: 55.0,
                angle: Some(60.0),
                origin: Origin { x: Some(0.0), y: 0.6 },
                colors: vec!["#6c63ff"],
            },
        ),
        (
            250,
            ConfettiBurst {
                particle_count: 50,
                spread: 55.0,
                angle: Some(120.0),
                origin: Origin { x: Some(1.0), y: 0.6 },
                colors: vec!["#ff6584"],
            },
        ),
        (
            500,
            ConfettiBurst {
                particle_count: 150,
                spread: 100.0,
                angle: None,
                origin: Origin { x: None, y: 0.5 },
                colors: vec!["#6c63ff", "#ff6584", "#4CAF50", "#2196F3"],
            },
        ),
    ]
}

/// Fire the burst schedule, or do nothing if the effect never gets ready.
/// Returns the number of bursts fired.
pub async fn celebrate<C, D>(effect: &C, clock: &D) -> usize
where
    C: Celebration,
    D: Delay,
{
    if !effect.ensure_ready().await {
        log::info!("[confetti] effect unavailable, skipping");
        return 0;
    }
    let mut elapsed = 0;
    let mut fired = 0;
    for (at, burst) in burst_schedule() {
        if at > elapsed {
            clock.sleep(at - elapsed).await;
            elapsed = at;
        }
        effect.fire(&burst);
        fired += 1;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bursts_serialize_with_effect_keys() {
        let schedule = burst_schedule();
        let side = serde_json::to_value(&schedule[1].1).unwrap();
        assert_eq!(side["particleCount"], 50);
        assert_eq!(side["angle"], 60.0);
        assert_eq!(side["origin"]["x"], 0.0);

        let center = serde_json::to_value(&schedule[0].1).unwrap();
        assert!(center.get("angle").is_none());
        assert!(center["origin"].get("x").is_none());
    }

    #[test]
    fn schedule_is_time_ordered() {
        let at: Vec<u32> = burst_schedule().iter().map(|(t, _)| *t).collect();
        assert!(at.windows(2).all(|w| w[0] <= w[1]));
    }
}
