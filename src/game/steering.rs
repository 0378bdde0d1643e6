use super::constants::{COWARD_COLOR, COWARD_FLEE_RANGE, GATHER_COLOR, HUNT_COLOR};
use super::math::{player_neck_skip, random_point, torus_delta, torus_dist, unit_from_angle};
use super::serpent::Serpent;
use super::types::{Orb, Vec2};
use rand::Rng;
use serde::Serialize;

/// AI behavior tag; each variant maps to a target-selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Brain {
  Gather,
  Hunt,
  Coward,
}

impl Brain {
  pub fn random(rng: &mut impl Rng) -> Self {
    match rng.gen_range(0..3) {
      0 => Brain::Gather,
      1 => Brain::Hunt,
      _ => Brain::Coward,
    }
  }

  pub fn color(self) -> &'static str {
    match self {
      Brain::Gather => GATHER_COLOR,
      Brain::Hunt => HUNT_COLOR,
      Brain::Coward => COWARD_COLOR,
    }
  }
}

/// One steering decision for the serpent at `index`. Returns the new
/// heading, or `None` when the serpent skips its thinking tick. The player
/// is always `serpents[0]`.
///
/// Avoidance of the player's tail wins over goal-seeking and gets no
/// wobble; goal headings are perturbed by skill-scaled angular noise.
pub fn steer(
  index: usize,
  serpents: &[Serpent],
  orbs: &[Orb],
  world_size: f64,
  rng: &mut impl Rng,
) -> Option<Vec2> {
  let serpent = &serpents[index];
  let brain = serpent.brain?;
  if rng.gen::<f64>() > serpent.skill {
    return None;
  }

  let player = &serpents[0];
  let head = serpent.head();
  let avoid_thresh = 10.0 + (1.0 - serpent.skill) * 20.0;
  let player_safe = player_neck_skip(player.speed);
  for seg in player.segments.iter().skip(player_safe) {
    if torus_dist(head, *seg, world_size) < avoid_thresh {
      let away = torus_delta(*seg, head, world_size);
      let angle = away.y.atan2(away.x);
      return Some(unit_from_angle(angle));
    }
  }

  let target = select_target(brain, index, serpents, orbs, world_size, rng);
  let to_target = torus_delta(head, target, world_size);
  let angle = to_target.y.atan2(to_target.x);
  let wobble = (1.0 - serpent.skill) * 0.5;
  let offset = rng.gen_range(-wobble..=wobble);
  Some(unit_from_angle(angle + offset))
}

fn select_target(
  brain: Brain,
  index: usize,
  serpents: &[Serpent],
  orbs: &[Orb],
  world_size: f64,
  rng: &mut impl Rng,
) -> Vec2 {
  let serpent = &serpents[index];
  let player = &serpents[0];
  let head = serpent.head();
  match brain {
    Brain::Gather => gather_target(head, orbs, world_size, rng),
    Brain::Hunt => {
      if rng.gen_bool(0.5) {
        player.head()
      } else {
        nearest_other_head(index, serpents, head, world_size).unwrap_or_else(|| player.head())
      }
    }
    Brain::Coward => {
      let player_head = player.head();
      let range = torus_dist(head, player_head, world_size);
      if player.length() > serpent.length() && range < COWARD_FLEE_RANGE {
        let toward = torus_delta(head, player_head, world_size);
        Vec2 {
          x: head.x - toward.x,
          y: head.y - toward.y,
        }
      } else {
        gather_target(head, orbs, world_size, rng)
      }
    }
  }
}

fn gather_target(head: Vec2, orbs: &[Orb], world_size: f64, rng: &mut impl Rng) -> Vec2 {
  let mut nearest: Option<(Vec2, f64)> = None;
  for orb in orbs {
    let range = torus_dist(head, orb.position, world_size);
    match nearest {
      Some((_, best)) if range >= best => {}
      _ => nearest = Some((orb.position, range)),
    }
  }
  match nearest {
    Some((position, _)) => position,
    None => random_point(rng, world_size),
  }
}

fn nearest_other_head(
  index: usize,
  serpents: &[Serpent],
  head: Vec2,
  world_size: f64,
) -> Option<Vec2> {
  let mut nearest: Option<(Vec2, f64)> = None;
  for (other_index, other) in serpents.iter().enumerate() {
    if other_index == index || !other.alive {
      continue;
    }
    let range = torus_dist(head, other.head(), world_size);
    match nearest {
      Some((_, best)) if range >= best => {}
      _ => nearest = Some((other.head(), range)),
    }
  }
  nearest.map(|(position, _)| position)
}
