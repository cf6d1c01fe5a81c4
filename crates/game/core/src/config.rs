//! Simulation tunables.
//!
//! Every constant the pilot lifecycle depends on lives in [`SimConfig`]. The
//! defaults reproduce the stock flight model; content packs may override any
//! subset through `config.toml` (missing keys fall back to the defaults).

/// Hyperspace alignment tolerance, in degrees.
const MAX_DIR_ERR_DEGREES: f64 = 0.1;

/// Simulation configuration constants and tunable parameters.
///
/// All durations are seconds of simulation time, all angles are radians.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Registry storage grows in chunks of this many slots.
    pub registry_chunk: usize,

    /// Non-player pilots become disabled below this fraction of armour.
    pub disable_armour_fraction: f64,
    /// Fraction of velocity bled per second while disabled.
    pub disabled_velocity_decay: f64,

    /// Time spent spooling up once aligned for a jump.
    pub hyperspace_engine_delay: f64,
    /// Time spent in transit before arrival or removal.
    pub hyperspace_fly_delay: f64,
    /// Multiplier over regular thrust while in transit.
    pub hyperspace_thrust_factor: f64,
    /// Fuel consumed by one jump.
    pub hyperspace_fuel: f64,
    /// Speed below which a jumping pilot counts as stopped.
    pub min_vel_err: f64,
    /// Heading error below which a pilot counts as aligned.
    pub max_dir_err: f64,

    /// Base delay between death and removal.
    pub death_base_delay: f64,
    /// The final explosion fires this long before removal.
    pub final_explosion_lead: f64,
    /// Spacing between secondary explosions right after death.
    pub explosion_cadence: f64,
    /// Chance that a secondary explosion is medium rather than small.
    pub medium_explosion_chance: f64,

    /// Screen shake per second of afterburner use.
    pub afterburner_shake: f64,
    /// Screen shake per unit of relative armour damage taken by the player.
    pub damage_shake: f64,

    /// Largest single step the frame stepper will take.
    pub min_stable_step: f64,
    /// Real frame times above this are treated as a stall and skipped once.
    pub stall_threshold: f64,

    /// Maximum spawn offset of fleet members around the fleet origin.
    pub fleet_spread: f64,
}

impl SimConfig {
    pub const DEFAULT_REGISTRY_CHUNK: usize = 32;
    pub const DEFAULT_DISABLE_ARMOUR_FRACTION: f64 = 0.3;
    pub const DEFAULT_DISABLED_VELOCITY_DECAY: f64 = 0.10;
    pub const DEFAULT_HYPERSPACE_ENGINE_DELAY: f64 = 3.0;
    pub const DEFAULT_HYPERSPACE_FLY_DELAY: f64 = 5.0;
    pub const DEFAULT_HYPERSPACE_THRUST_FACTOR: f64 = 5.0;
    pub const DEFAULT_HYPERSPACE_FUEL: f64 = 100.0;
    pub const DEFAULT_MIN_VEL_ERR: f64 = 1.0;
    pub const DEFAULT_DEATH_BASE_DELAY: f64 = 1.0;
    pub const DEFAULT_FINAL_EXPLOSION_LEAD: f64 = 0.2;
    pub const DEFAULT_EXPLOSION_CADENCE: f64 = 0.1;
    pub const DEFAULT_MEDIUM_EXPLOSION_CHANCE: f64 = 0.2;
    pub const DEFAULT_AFTERBURNER_SHAKE: f64 = 25.0;
    pub const DEFAULT_DAMAGE_SHAKE: f64 = 100.0;
    pub const DEFAULT_MIN_STABLE_STEP: f64 = 1.0 / 30.0;
    pub const DEFAULT_STALL_THRESHOLD: f64 = 0.25;
    pub const DEFAULT_FLEET_SPREAD: f64 = 75.0;

    pub fn new() -> Self {
        Self {
            registry_chunk: Self::DEFAULT_REGISTRY_CHUNK,
            disable_armour_fraction: Self::DEFAULT_DISABLE_ARMOUR_FRACTION,
            disabled_velocity_decay: Self::DEFAULT_DISABLED_VELOCITY_DECAY,
            hyperspace_engine_delay: Self::DEFAULT_HYPERSPACE_ENGINE_DELAY,
            hyperspace_fly_delay: Self::DEFAULT_HYPERSPACE_FLY_DELAY,
            hyperspace_thrust_factor: Self::DEFAULT_HYPERSPACE_THRUST_FACTOR,
            hyperspace_fuel: Self::DEFAULT_HYPERSPACE_FUEL,
            min_vel_err: Self::DEFAULT_MIN_VEL_ERR,
            max_dir_err: MAX_DIR_ERR_DEGREES.to_radians(),
            death_base_delay: Self::DEFAULT_DEATH_BASE_DELAY,
            final_explosion_lead: Self::DEFAULT_FINAL_EXPLOSION_LEAD,
            explosion_cadence: Self::DEFAULT_EXPLOSION_CADENCE,
            medium_explosion_chance: Self::DEFAULT_MEDIUM_EXPLOSION_CHANCE,
            afterburner_shake: Self::DEFAULT_AFTERBURNER_SHAKE,
            damage_shake: Self::DEFAULT_DAMAGE_SHAKE,
            min_stable_step: Self::DEFAULT_MIN_STABLE_STEP,
            stall_threshold: Self::DEFAULT_STALL_THRESHOLD,
            fleet_spread: Self::DEFAULT_FLEET_SPREAD,
        }
    }

    /// Seconds between death and removal for a hull with the given maxima.
    ///
    /// Bigger ships burn longer: `base + sqrt(10 * armour_max * shield_max) ms`.
    pub fn death_delay(&self, armour_max: f64, shield_max: f64) -> f64 {
        self.death_base_delay + (10.0 * armour_max * shield_max).max(0.0).sqrt() / 1000.0
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_delay_grows_with_hull() {
        let config = SimConfig::new();
        assert_eq!(config.death_delay(0.0, 0.0), 1.0);
        // sqrt(10 * 100 * 1000) = 1000 ms
        assert!((config.death_delay(100.0, 1000.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn alignment_tolerance_is_a_tenth_of_a_degree() {
        let config = SimConfig::default();
        assert!((config.max_dir_err - 0.1_f64.to_radians()).abs() < 1e-12);
    }
}
