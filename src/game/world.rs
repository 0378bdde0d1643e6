use super::config::WorldConfig;
use super::constants::{
  DEATH_BURST_PARTICLES, EAT_BURST_PARTICLES, GLOW_TICKS, PICKUP_RADIUS, TAIL_KILL_RADIUS,
  TAIL_KILL_SKIP,
};
use super::math::{random_point, seg_radius, torus_dist};
use super::serpent::Serpent;
use super::steering::{steer, Brain};
use super::turn::{propose_heading, TurnSource};
use super::types::{DeathCause, Orb, OrbTier, Particle, SerpentSnapshot, Vec2, WorldSnapshot};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

const STARTING_BRAINS: [Brain; 3] = [Brain::Gather, Brain::Hunt, Brain::Coward];

/// Aggregate root for one game session. The player is `serpents[0]` for
/// the whole session; dead AI serpents are removed and replaced, the dead
/// player persists and freezes the world.
#[derive(Debug)]
pub struct World {
  pub config: WorldConfig,
  pub orbs: Vec<Orb>,
  pub serpents: Vec<Serpent>,
  pub particles: Vec<Particle>,
  pub camera: Vec2,
  pub death_cause: Option<DeathCause>,
  pub clock_ms: f64,
  pub rng: Pcg64Mcg,
}

impl World {
  pub fn new(config: WorldConfig) -> Self {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = Pcg64Mcg::seed_from_u64(seed);

    let mut orbs = Vec::with_capacity(config.orb_count);
    for _ in 0..config.orb_count {
      orbs.push(Orb::spawn(&mut rng, config.world_size));
    }

    let center = Vec2 {
      x: config.world_size / 2.0,
      y: config.world_size / 2.0,
    };
    let mut serpents = vec![Serpent::player(center, config.base_speed, &mut rng)];
    for i in 0..config.initial_ai {
      let position = random_point(&mut rng, config.world_size);
      serpents.push(Serpent::ai(
        position,
        STARTING_BRAINS[i % STARTING_BRAINS.len()],
        config.base_speed,
        &mut rng,
      ));
    }

    tracing::info!(
      seed,
      orbs = orbs.len(),
      serpents = serpents.len(),
      "world created"
    );

    Self {
      config,
      orbs,
      serpents,
      particles: Vec::new(),
      camera: center,
      death_cause: None,
      clock_ms: 0.0,
      rng,
    }
  }

  pub fn player(&self) -> &Serpent {
    debug_assert!(self.serpents[0].is_player(), "player must stay at index 0");
    &self.serpents[0]
  }

  /// Route a desired heading through the Turn Admission Gate, with the
  /// cooldown selected by the input source. Uses the simulation clock.
  pub fn apply_turn(&mut self, desired: Vec2, source: TurnSource) -> bool {
    let cooldown_ms = match source {
      TurnSource::Keyboard => self.config.keyboard_cooldown_ms,
      TurnSource::Analog => self.config.analog_cooldown_ms,
    };
    let now_ms = self.clock_ms;
    let world_size = self.config.world_size;
    propose_heading(&mut self.serpents[0], desired, now_ms, cooldown_ms, world_size)
  }

  /// One fixed timestep: steering, advancement, collision resolution,
  /// camera. A no-op once the player is dead; the clock does not advance.
  pub fn tick(&mut self) {
    if !self.player().alive {
      return;
    }
    self.clock_ms += self.config.tick_ms;

    // steering decisions against the immutable world, applied after
    let world_size = self.config.world_size;
    let mut decisions: Vec<(usize, Vec2)> = Vec::new();
    for index in 1..self.serpents.len() {
      if !self.serpents[index].alive {
        continue;
      }
      if let Some(heading) = steer(index, &self.serpents, &self.orbs, world_size, &mut self.rng) {
        decisions.push((index, heading));
      }
    }
    for (index, heading) in decisions {
      self.serpents[index].heading = heading;
    }

    for serpent in &mut self.serpents {
      serpent.advance(world_size);
    }
    for particle in &mut self.particles {
      particle.update();
    }
    self.particles.retain(|particle| particle.life > 0);

    self.handle_collisions();

    self.camera = self.player().head();
  }

  /// The single per-tick authority over scores, growth and death. Order
  /// is load-bearing: pickups, enemy-head-into-player-tail, tail bites,
  /// then population maintenance.
  pub fn handle_collisions(&mut self) {
    let world_size = self.config.world_size;
    let head = self.player().head();

    // 1. pickup consumption, player head only
    let mut eaten: Vec<Orb> = Vec::new();
    let mut i = self.orbs.len();
    while i > 0 {
      i -= 1;
      if torus_dist(head, self.orbs[i].position, world_size) < PICKUP_RADIUS {
        eaten.push(self.orbs.remove(i));
      }
    }
    for orb in eaten {
      let reward = self.config.reward(orb.tier);
      let player = &mut self.serpents[0];
      player.target_length += reward.growth;
      player.score += reward.score;
      player.speed = self.config.base_speed + player.length() as f64 / 60.0;
      player.glow_ticks = GLOW_TICKS;
      player.eat_waves.push(0.0);
      tracing::debug!(tier = ?orb.tier, score = player.score, "orb consumed");
      let sparks = EAT_BURST_PARTICLES
        + match orb.tier {
          OrbTier::Rare => 12,
          OrbTier::Uncommon => 6,
          OrbTier::Common => 0,
        };
      for _ in 0..sparks {
        self.particles.push(Particle::spawn(&mut self.rng, orb.position));
      }
    }
    while self.orbs.len() < self.config.orb_count {
      let orb = Orb::spawn(&mut self.rng, world_size);
      self.orbs.push(orb);
    }

    // 2. enemy head running into the player's tail
    let player_segments: Vec<Vec2> = self.serpents[0].segments.iter().copied().collect();
    let mut growth_award = 0usize;
    let mut score_award = 0i64;
    let mut bursts: Vec<Vec2> = Vec::new();
    for serpent in self.serpents.iter_mut().skip(1) {
      if !serpent.alive {
        continue;
      }
      let enemy_head = serpent.head();
      for seg in player_segments.iter().skip(TAIL_KILL_SKIP) {
        if torus_dist(enemy_head, *seg, world_size) < TAIL_KILL_RADIUS {
          serpent.alive = false;
          growth_award += serpent.length() / 2;
          score_award += serpent.score;
          bursts.push(enemy_head);
          tracing::debug!(id = %serpent.id, brain = ?serpent.brain, "enemy ran into player tail");
          break;
        }
      }
    }

    // 3. player head against every living serpent's body beyond its neck skip
    let player_radius = seg_radius(self.serpents[0].length());
    let mut hits: Vec<(usize, usize)> = Vec::new();
    for (index, serpent) in self.serpents.iter().enumerate() {
      if !serpent.alive {
        continue;
      }
      let thresh = player_radius + seg_radius(serpent.length()) + 1.0;
      for (seg_index, seg) in serpent.segments.iter().enumerate().skip(serpent.neck_skip()) {
        if torus_dist(head, *seg, world_size) < thresh {
          hits.push((index, seg_index));
          break;
        }
      }
    }
    for (index, seg_index) in hits {
      let serpent = &mut self.serpents[index];
      serpent.alive = false;
      if index == 0 {
        // the player earns nothing from its own death
        self.death_cause = Some(DeathCause::SelfTailCollision { segment: seg_index });
        tracing::debug!(segment = seg_index, "player bit its own tail");
      } else {
        growth_award += serpent.length() / 2;
        score_award += serpent.score;
        bursts.push(serpent.head());
        self.death_cause = Some(DeathCause::PlayerHitEnemyTail {
          enemy_color: serpent.color.to_string(),
        });
        tracing::debug!(id = %serpent.id, brain = ?serpent.brain, "player head struck enemy body");
      }
    }

    let player = &mut self.serpents[0];
    player.target_length += growth_award;
    player.score += score_award;
    for at in bursts {
      for _ in 0..DEATH_BURST_PARTICLES {
        self.particles.push(Particle::spawn(&mut self.rng, at));
      }
    }

    // 4. population maintenance
    self.serpents.retain(|serpent| serpent.alive || serpent.is_player());
    while self.serpents.len() < self.config.initial_ai + 1 {
      let position = random_point(&mut self.rng, world_size);
      let brain = Brain::random(&mut self.rng);
      let serpent = Serpent::ai(position, brain, self.config.base_speed, &mut self.rng);
      tracing::debug!(id = %serpent.id, ?brain, "respawned ai serpent");
      self.serpents.push(serpent);
    }
  }

  /// Read-only copy of the world for the presentation layer.
  pub fn snapshot(&self) -> WorldSnapshot {
    WorldSnapshot {
      clock_ms: self.clock_ms,
      camera: self.camera,
      death_cause: self.death_cause.clone(),
      orbs: self.orbs.clone(),
      particles: self.particles.clone(),
      serpents: self
        .serpents
        .iter()
        .map(|serpent| SerpentSnapshot {
          id: serpent.id.clone(),
          color: serpent.color.to_string(),
          is_player: serpent.is_player(),
          alive: serpent.alive,
          score: serpent.score,
          heading: serpent.heading,
          segments: serpent.segments.iter().copied().collect(),
          eat_waves: serpent.eat_waves.clone(),
          glow_ticks: serpent.glow_ticks,
        })
        .collect(),
    }
  }
}
