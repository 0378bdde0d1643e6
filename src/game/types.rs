use super::constants::PARTICLE_LIFE;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbTier {
  Common,
  Uncommon,
  Rare,
}

impl OrbTier {
  /// Rarity roll: 2% rare, 5% uncommon, rest common.
  pub fn roll(rng: &mut impl Rng) -> Self {
    let roll: f64 = rng.gen();
    if roll < 0.02 {
      OrbTier::Rare
    } else if roll < 0.07 {
      OrbTier::Uncommon
    } else {
      OrbTier::Common
    }
  }

  pub fn radius(self) -> f64 {
    match self {
      OrbTier::Common => 5.0,
      OrbTier::Uncommon => 7.0,
      OrbTier::Rare => 9.0,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Orb {
  pub position: Vec2,
  pub tier: OrbTier,
  pub radius: f64,
}

impl Orb {
  pub fn spawn(rng: &mut impl Rng, world_size: f64) -> Self {
    let tier = OrbTier::roll(rng);
    Self {
      position: Vec2 {
        x: rng.gen::<f64>() * world_size,
        y: rng.gen::<f64>() * world_size,
      },
      tier,
      radius: tier.radius(),
    }
  }
}

/// Cosmetic spark spawned on consumption and death events; decays over a
/// fixed tick count and never affects collision results.
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
  pub position: Vec2,
  pub velocity: Vec2,
  pub life: u32,
}

impl Particle {
  pub fn spawn(rng: &mut impl Rng, at: Vec2) -> Self {
    Self {
      position: at,
      velocity: Vec2 {
        x: rng.gen_range(-2.0..2.0),
        y: rng.gen_range(-2.0..2.0),
      },
      life: PARTICLE_LIFE,
    }
  }

  pub fn update(&mut self) {
    if self.life == 0 {
      return;
    }
    self.position.x += self.velocity.x;
    self.position.y += self.velocity.y;
    self.life -= 1;
  }
}

/// Diagnostic for the most recent death resolved by the player's head.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DeathCause {
  SelfTailCollision { segment: usize },
  PlayerHitEnemyTail { enemy_color: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SerpentSnapshot {
  pub id: String,
  pub color: String,
  pub is_player: bool,
  pub alive: bool,
  pub score: i64,
  pub heading: Vec2,
  pub segments: Vec<Vec2>,
  pub eat_waves: Vec<f64>,
  pub glow_ticks: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
  pub clock_ms: f64,
  pub camera: Vec2,
  pub death_cause: Option<DeathCause>,
  pub orbs: Vec<Orb>,
  pub particles: Vec<Particle>,
  pub serpents: Vec<SerpentSnapshot>,
}
