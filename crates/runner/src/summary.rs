//! Session statistics gathered from drained events.

use flight_core::{FrameOutcome, SimEvent};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub frames: u32,
    pub skipped_frames: u32,
    pub steps: u32,
    pub shots: u32,
    pub explosions: u32,
    pub kills: u32,
    pub rating: f64,
    pub cargo_jettisoned: u32,
    pub player_dead: bool,
    pub player_jumped: bool,
}

impl Summary {
    pub fn record_frame(&mut self, outcome: FrameOutcome) {
        self.frames += 1;
        match outcome {
            FrameOutcome::Skipped => self.skipped_frames += 1,
            FrameOutcome::Stepped { steps } => self.steps += steps,
        }
    }

    pub fn record_events(&mut self, events: &[SimEvent]) {
        for event in events {
            match event {
                SimEvent::ProjectileSpawned { .. } => self.shots += 1,
                SimEvent::Explosion { .. } => self.explosions += 1,
                SimEvent::CombatRatingGained { amount } => {
                    self.kills += 1;
                    self.rating += amount;
                }
                SimEvent::CargoJettisoned { quantity, .. } => self.cargo_jettisoned += quantity,
                SimEvent::PlayerDead | SimEvent::PlayerDestroyed => self.player_dead = true,
                SimEvent::PlayerBrokeHyperspace => self.player_jumped = true,
                SimEvent::HookTriggered { .. }
                | SimEvent::MapRevealed { .. }
                | SimEvent::ScreenShake { .. }
                | SimEvent::FactionStandingChanged { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_accumulate_rating() {
        let mut summary = Summary::default();
        summary.record_events(&[
            SimEvent::CombatRatingGained { amount: 1.5 },
            SimEvent::CombatRatingGained { amount: 2.0 },
            SimEvent::PlayerDead,
        ]);
        assert_eq!(summary.kills, 2);
        assert_eq!(summary.rating, 3.5);
        assert!(summary.player_dead);
    }

    #[test]
    fn frames_count_steps() {
        let mut summary = Summary::default();
        summary.record_frame(FrameOutcome::Skipped);
        summary.record_frame(FrameOutcome::Stepped { steps: 3 });
        assert_eq!((summary.frames, summary.skipped_frames, summary.steps), (2, 1, 3));
    }
}
