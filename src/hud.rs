//! Plain read-outs for the UI layer

use crate::sim::SessionState;

/// Strings the HUD shows after each frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudReadout {
    pub speed: String,
    pub score: String,
    /// One decimal, e.g. "12.3s"
    pub time: String,
    pub health: String,
    /// CSS width for the nitro bar, e.g. "85%"
    pub boost_width: String,
    pub drift: String,
}

/// Percentage of a 0..=1 value, rounded
fn percent(value: f32) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

impl HudReadout {
    pub fn from_session(state: &SessionState) -> Self {
        let vehicle = &state.vehicle;
        Self {
            speed: (vehicle.speed().round() as i64).to_string(),
            score: state.score.to_string(),
            time: format!("{:.1}s", state.elapsed_time),
            health: percent(vehicle.health),
            boost_width: percent(vehicle.boost),
            drift: (vehicle.drift_score.round() as i64).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;
    use glam::Vec2;

    #[test]
    fn test_fresh_session_readout() {
        let state = SessionState::new(&mut seeded_rng(1));
        let hud = HudReadout::from_session(&state);

        assert_eq!(hud.speed, "0");
        assert_eq!(hud.score, "0");
        assert_eq!(hud.time, "0.0s");
        assert_eq!(hud.health, "100%");
        assert_eq!(hud.boost_width, "100%");
        assert_eq!(hud.drift, "0");
    }

    #[test]
    fn test_rounding() {
        let mut state = SessionState::new(&mut seeded_rng(2));
        state.vehicle.vel = Vec2::new(30.0, 40.4);
        state.vehicle.health = 0.426;
        state.vehicle.boost = 0.004;
        state.vehicle.drift_score = 12.6;
        state.elapsed_time = 7.26;
        state.score = 300;

        let hud = HudReadout::from_session(&state);
        assert_eq!(hud.speed, "50");
        assert_eq!(hud.score, "300");
        assert_eq!(hud.time, "7.3s");
        assert_eq!(hud.health, "43%");
        assert_eq!(hud.boost_width, "0%");
        assert_eq!(hud.drift, "13");
    }
}
