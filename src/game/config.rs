use super::constants::{
  ANALOG_TURN_COOLDOWN_MS, BASE_SPEED, INITIAL_AI, ORB_COUNT, TICK_MS, TURN_COOLDOWN_MS,
  WORLD_SIZE,
};
use super::types::OrbTier;

/// Growth and score awarded for one orb of a given tier.
#[derive(Debug, Clone, Copy)]
pub struct OrbReward {
  pub growth: usize,
  pub score: i64,
}

/// Tuning for one game session, loaded once at world creation.
#[derive(Debug, Clone)]
pub struct WorldConfig {
  pub world_size: f64,
  pub tick_ms: f64,
  pub initial_ai: usize,
  pub orb_count: usize,
  pub keyboard_cooldown_ms: f64,
  pub analog_cooldown_ms: f64,
  pub base_speed: f64,
  pub common: OrbReward,
  pub uncommon: OrbReward,
  pub rare: OrbReward,
  /// Fixed seed for reproducible runs; `None` draws one from entropy.
  pub seed: Option<u64>,
}

impl Default for WorldConfig {
  fn default() -> Self {
    Self {
      world_size: WORLD_SIZE,
      tick_ms: TICK_MS,
      initial_ai: INITIAL_AI,
      orb_count: ORB_COUNT,
      keyboard_cooldown_ms: TURN_COOLDOWN_MS,
      analog_cooldown_ms: ANALOG_TURN_COOLDOWN_MS,
      base_speed: BASE_SPEED,
      common: OrbReward {
        growth: 4,
        score: 10,
      },
      uncommon: OrbReward {
        growth: 6,
        score: 25,
      },
      rare: OrbReward {
        growth: 10,
        score: 50,
      },
      seed: None,
    }
  }
}

impl WorldConfig {
  pub fn reward(&self, tier: OrbTier) -> OrbReward {
    match tier {
      OrbTier::Common => self.common,
      OrbTier::Uncommon => self.uncommon,
      OrbTier::Rare => self.rare,
    }
  }
}
