use super::constants::REVERSAL_DOT_LIMIT;
use super::math::{dot, length, normalize, seg_radius, torus_dist, wrap};
use super::serpent::Serpent;
use super::types::Vec2;

/// Which device produced a turn request; selects the cooldown duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSource {
  Keyboard,
  Analog,
}

/// Boundary validation for raw vectors arriving from input resolvers.
pub fn parse_direction(value: Vec2) -> Option<Vec2> {
  if !value.x.is_finite() || !value.y.is_finite() {
    return None;
  }
  let normalized = normalize(value);
  if length(normalized) == 0.0 {
    return None;
  }
  Some(normalized)
}

/// The only path by which a controlled serpent's heading mutates.
///
/// Rejects, in order: turns inside the cooldown window, near-exact
/// reversals, and turns whose predicted next head position would land on
/// the serpent's own tail beyond the neck-skip prefix. On acceptance the
/// heading is applied and the turn time recorded.
pub fn propose_heading(
  serpent: &mut Serpent,
  desired: Vec2,
  now_ms: f64,
  cooldown_ms: f64,
  world_size: f64,
) -> bool {
  if let Some(last) = serpent.last_turn_ms {
    if now_ms - last <= cooldown_ms {
      tracing::trace!(now_ms, last, cooldown_ms, "turn rejected by cooldown");
      return false;
    }
  }

  if dot(desired, serpent.heading) < REVERSAL_DOT_LIMIT {
    tracing::trace!("turn rejected as reversal");
    return false;
  }

  let head = serpent.head();
  let next = Vec2 {
    x: wrap(head.x + desired.x * serpent.speed, world_size),
    y: wrap(head.y + desired.y * serpent.speed, world_size),
  };
  if would_bite_tail(next, serpent, world_size) {
    tracing::trace!("turn rejected as predicted self-bite");
    return false;
  }

  serpent.heading = desired;
  serpent.last_turn_ms = Some(now_ms);
  true
}

fn would_bite_tail(next: Vec2, serpent: &Serpent, world_size: f64) -> bool {
  // +1 for the glow buffer around the body
  let thresh = seg_radius(serpent.length()) + 1.0;
  for seg in serpent.segments.iter().skip(serpent.neck_skip()) {
    if torus_dist(next, *seg, world_size) < thresh {
      return true;
    }
  }
  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand_pcg::Pcg64Mcg;

  const WORLD: f64 = 4000.0;

  fn make_serpent() -> Serpent {
    let mut rng = Pcg64Mcg::seed_from_u64(21);
    let mut serpent = Serpent::player(Vec2 { x: 500.0, y: 500.0 }, 1.2, &mut rng);
    serpent.heading = Vec2 { x: 1.0, y: 0.0 };
    serpent
  }

  #[test]
  fn parse_direction_rejects_non_finite_and_zero_vectors() {
    assert!(parse_direction(Vec2 {
      x: f64::NAN,
      y: 0.0
    })
    .is_none());
    assert!(parse_direction(Vec2 {
      x: f64::INFINITY,
      y: 1.0
    })
    .is_none());
    assert!(parse_direction(Vec2 { x: 0.0, y: 0.0 }).is_none());
    let parsed = parse_direction(Vec2 { x: 3.0, y: 0.0 }).expect("valid vector");
    assert_eq!((parsed.x, parsed.y), (1.0, 0.0));
  }

  #[test]
  fn exact_reversal_is_never_admitted() {
    let mut serpent = make_serpent();
    for tick in 0..100 {
      let now = tick as f64 * 1000.0;
      assert!(!propose_heading(
        &mut serpent,
        Vec2 { x: -1.0, y: 0.0 },
        now,
        60.0,
        WORLD,
      ));
    }
    assert_eq!(serpent.heading, Vec2 { x: 1.0, y: 0.0 });
  }

  #[test]
  fn spamming_the_same_turn_is_throttled_by_the_cooldown() {
    let mut serpent = make_serpent();
    let tick_ms = 16.6;
    let cooldown_ms = 60.0;
    let mut accepted = 0;
    for tick in 0..12 {
      let now = tick as f64 * tick_ms;
      if propose_heading(&mut serpent, Vec2 { x: 0.0, y: 1.0 }, now, cooldown_ms, WORLD) {
        accepted += 1;
      }
    }
    // 12 ticks cover ~200ms; one acceptance per ~4-tick cooldown window
    assert_eq!(accepted, 3);
  }

  #[test]
  fn first_turn_is_exempt_from_the_cooldown() {
    let mut serpent = make_serpent();
    assert!(serpent.last_turn_ms.is_none());
    assert!(propose_heading(
      &mut serpent,
      Vec2 { x: 0.0, y: 1.0 },
      0.0,
      100.0,
      WORLD,
    ));
    assert_eq!(serpent.last_turn_ms, Some(0.0));
  }

  #[test]
  fn predicted_self_bite_rejects_the_turn() {
    let mut serpent = make_serpent();
    serpent.speed = 8.0; // neck skip of 8
    serpent.target_length = 20;
    serpent.segments.clear();
    for i in 0..20 {
      serpent.segments.push_back(Vec2 {
        x: 500.0 - i as f64,
        y: 500.0,
      });
    }
    // steering +y predicts a head at (500, 508); park segment 15 there,
    // beyond the neck skip of 8
    serpent.segments[15] = Vec2 { x: 500.0, y: 508.0 };
    assert!(!propose_heading(
      &mut serpent,
      Vec2 { x: 0.0, y: 1.0 },
      0.0,
      0.0,
      WORLD,
    ));
    assert_eq!(serpent.heading, Vec2 { x: 1.0, y: 0.0 });

    // turning away from the tail is still allowed
    assert!(propose_heading(
      &mut serpent,
      Vec2 { x: 0.0, y: -1.0 },
      0.0,
      0.0,
      WORLD,
    ));
  }

  #[test]
  fn short_serpent_cannot_bite_inside_its_neck_skip() {
    let mut serpent = make_serpent();
    // every own segment falls inside the speed-derived skip window
    assert!(propose_heading(
      &mut serpent,
      Vec2 { x: 0.0, y: 1.0 },
      0.0,
      0.0,
      WORLD,
    ));
  }
}
