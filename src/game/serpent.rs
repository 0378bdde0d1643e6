use super::constants::{EAT_WAVE_SPEED, ENEMY_NECK_GAP, PLAYER_COLOR, STARTING_TARGET_LENGTH};
use super::math::{player_neck_skip, random_cardinal, wrap};
use super::steering::Brain;
use super::types::Vec2;
use rand::Rng;
use std::collections::VecDeque;
use uuid::Uuid;

/// A growable chain of segment points, index 0 = head. The player is the
/// serpent with no brain; everything else is AI-steered.
#[derive(Debug, Clone)]
pub struct Serpent {
  pub id: String,
  pub segments: VecDeque<Vec2>,
  pub heading: Vec2,
  pub speed: f64,
  pub skill: f64,
  pub brain: Option<Brain>,
  pub color: &'static str,
  pub alive: bool,
  pub score: i64,
  pub target_length: usize,
  pub eat_waves: Vec<f64>,
  pub glow_ticks: u32,
  pub last_turn_ms: Option<f64>,
}

impl Serpent {
  pub fn player(position: Vec2, base_speed: f64, rng: &mut impl Rng) -> Self {
    Self::new(position, None, 1.0, base_speed + 1.0 / 60.0, PLAYER_COLOR, rng)
  }

  pub fn ai(position: Vec2, brain: Brain, base_speed: f64, rng: &mut impl Rng) -> Self {
    let skill = rng.gen_range(0.2..0.9);
    let speed = base_speed * (0.5 + skill * 0.5);
    Self::new(position, Some(brain), skill, speed, brain.color(), rng)
  }

  fn new(
    position: Vec2,
    brain: Option<Brain>,
    skill: f64,
    speed: f64,
    color: &'static str,
    rng: &mut impl Rng,
  ) -> Self {
    let mut segments = VecDeque::new();
    segments.push_back(position);
    Self {
      id: Uuid::new_v4().to_string(),
      segments,
      heading: random_cardinal(rng),
      speed,
      skill,
      brain,
      color,
      alive: true,
      score: 0,
      target_length: STARTING_TARGET_LENGTH,
      eat_waves: Vec::new(),
      glow_ticks: 0,
      last_turn_ms: None,
    }
  }

  pub fn is_player(&self) -> bool {
    self.brain.is_none()
  }

  pub fn head(&self) -> Vec2 {
    self.segments[0]
  }

  pub fn length(&self) -> usize {
    self.segments.len()
  }

  /// Leading segments ignored by self-bite checks: speed-aware for the
  /// player, a fixed neck gap for AI.
  pub fn neck_skip(&self) -> usize {
    if self.is_player() {
      player_neck_skip(self.speed)
    } else {
      ENEMY_NECK_GAP
    }
  }

  /// One tick of motion: prepend the wrapped next head, drop the tail
  /// unless the chain is still growing toward `target_length`.
  pub fn advance(&mut self, world_size: f64) {
    if !self.alive {
      return;
    }
    let head = self.head();
    let next = Vec2 {
      x: wrap(head.x + self.heading.x * self.speed, world_size),
      y: wrap(head.y + self.heading.y * self.speed, world_size),
    };
    self.segments.push_front(next);
    if self.segments.len() > self.target_length {
      self.segments.pop_back();
    }

    let len = self.segments.len() as f64;
    for wave in &mut self.eat_waves {
      *wave += EAT_WAVE_SPEED;
    }
    self.eat_waves.retain(|wave| *wave < len);
    self.glow_ticks = self.glow_ticks.saturating_sub(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand_pcg::Pcg64Mcg;

  fn make_player(x: f64, y: f64) -> Serpent {
    let mut rng = Pcg64Mcg::seed_from_u64(11);
    Serpent::player(Vec2 { x, y }, 1.2, &mut rng)
  }

  #[test]
  fn advance_keeps_coordinates_inside_world_bounds() {
    let mut serpent = make_player(3999.5, 0.2);
    serpent.heading = Vec2 { x: 1.0, y: -1.0 };
    for _ in 0..200 {
      serpent.advance(4000.0);
      for seg in &serpent.segments {
        assert!(seg.x >= 0.0 && seg.x < 4000.0);
        assert!(seg.y >= 0.0 && seg.y < 4000.0);
      }
    }
  }

  #[test]
  fn chain_grows_one_segment_per_tick_up_to_target() {
    let mut serpent = make_player(100.0, 100.0);
    serpent.heading = Vec2 { x: 1.0, y: 0.0 };
    let mut previous = serpent.length();
    for _ in 0..STARTING_TARGET_LENGTH + 5 {
      serpent.advance(4000.0);
      assert!(serpent.length() >= previous);
      assert!(serpent.length() <= serpent.target_length);
      previous = serpent.length();
    }
    assert_eq!(serpent.length(), STARTING_TARGET_LENGTH);
  }

  #[test]
  fn eat_waves_travel_down_the_chain_and_expire() {
    let mut serpent = make_player(100.0, 100.0);
    serpent.heading = Vec2 { x: 1.0, y: 0.0 };
    serpent.target_length = 4;
    for _ in 0..10 {
      serpent.advance(4000.0);
    }
    serpent.eat_waves.push(0.0);
    serpent.advance(4000.0);
    assert_eq!(serpent.eat_waves, vec![EAT_WAVE_SPEED]);
    for _ in 0..10 {
      serpent.advance(4000.0);
    }
    assert!(serpent.eat_waves.is_empty());
  }

  #[test]
  fn glow_counts_down_without_underflow() {
    let mut serpent = make_player(100.0, 100.0);
    serpent.glow_ticks = 2;
    serpent.advance(4000.0);
    serpent.advance(4000.0);
    serpent.advance(4000.0);
    assert_eq!(serpent.glow_ticks, 0);
  }

  #[test]
  fn dead_serpents_do_not_move() {
    let mut serpent = make_player(100.0, 100.0);
    serpent.alive = false;
    serpent.advance(4000.0);
    assert_eq!(serpent.length(), 1);
    assert_eq!(serpent.head(), Vec2 { x: 100.0, y: 100.0 });
  }

  #[test]
  fn ai_speed_scales_with_skill() {
    let mut rng = Pcg64Mcg::seed_from_u64(5);
    let serpent = Serpent::ai(Vec2 { x: 0.0, y: 0.0 }, Brain::Gather, 1.2, &mut rng);
    assert!(serpent.skill >= 0.2 && serpent.skill < 0.9);
    assert_eq!(serpent.speed, 1.2 * (0.5 + serpent.skill * 0.5));
    assert!(!serpent.is_player());
  }
}
