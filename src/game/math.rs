use super::constants::{NECK_SKIP_CAP, SAFE_DISTANCE};
use super::types::Vec2;
use rand::Rng;

/// Toroidal normalization; keeps every coordinate in `[0, size)`.
pub fn wrap(value: f64, size: f64) -> f64 {
  ((value % size) + size) % size
}

/// Shortest displacement from `from` to `to` on the torus.
pub fn torus_delta(from: Vec2, to: Vec2, size: f64) -> Vec2 {
  let half = size / 2.0;
  let mut dx = to.x - from.x;
  let mut dy = to.y - from.y;
  if dx > half {
    dx -= size;
  } else if dx < -half {
    dx += size;
  }
  if dy > half {
    dy -= size;
  } else if dy < -half {
    dy += size;
  }
  Vec2 { x: dx, y: dy }
}

pub fn torus_dist(a: Vec2, b: Vec2, size: f64) -> f64 {
  let delta = torus_delta(a, b, size);
  (delta.x * delta.x + delta.y * delta.y).sqrt()
}

pub fn length(v: Vec2) -> f64 {
  (v.x * v.x + v.y * v.y).sqrt()
}

pub fn normalize(v: Vec2) -> Vec2 {
  let len = length(v);
  if !len.is_finite() || len == 0.0 {
    return Vec2 { x: 0.0, y: 0.0 };
  }
  Vec2 {
    x: v.x / len,
    y: v.y / len,
  }
}

pub fn dot(a: Vec2, b: Vec2) -> f64 {
  a.x * b.x + a.y * b.y
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

/// Half the body width for a chain of the given length; the lethality
/// radius for head-to-body checks.
pub fn seg_radius(segment_count: usize) -> f64 {
  3.0 + segment_count as f64 / 60.0
}

/// How many leading segments self-bite checks ignore. Each body link is
/// roughly one tick of travel, so the window scales inversely with speed;
/// capped so arbitrarily long serpents can still die.
pub fn player_neck_skip(speed: f64) -> usize {
  let links = (SAFE_DISTANCE / speed).round() as usize;
  links.min(NECK_SKIP_CAP)
}

/// Snap any vector to the nearest 4-way cardinal direction.
pub fn snap_to_cardinal(v: Vec2) -> Vec2 {
  if v.x.abs() > v.y.abs() {
    Vec2 {
      x: if v.x < 0.0 { -1.0 } else { 1.0 },
      y: 0.0,
    }
  } else {
    Vec2 {
      x: 0.0,
      y: if v.y < 0.0 { -1.0 } else { 1.0 },
    }
  }
}

pub fn unit_from_angle(angle: f64) -> Vec2 {
  Vec2 {
    x: angle.cos(),
    y: angle.sin(),
  }
}

pub fn random_point(rng: &mut impl Rng, size: f64) -> Vec2 {
  Vec2 {
    x: rng.gen::<f64>() * size,
    y: rng.gen::<f64>() * size,
  }
}

pub fn random_cardinal(rng: &mut impl Rng) -> Vec2 {
  let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
  if rng.gen_bool(0.5) {
    Vec2 { x: sign, y: 0.0 }
  } else {
    Vec2 { x: 0.0, y: sign }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrap_normalizes_negative_and_overflowing_values() {
    assert_eq!(wrap(-1.0, 4000.0), 3999.0);
    assert_eq!(wrap(4001.0, 4000.0), 1.0);
    assert_eq!(wrap(0.0, 4000.0), 0.0);
    assert_eq!(wrap(3999.5, 4000.0), 3999.5);
  }

  #[test]
  fn torus_dist_crosses_the_seam() {
    let a = Vec2 { x: 1.0, y: 0.0 };
    let b = Vec2 { x: 3999.0, y: 0.0 };
    assert_eq!(torus_dist(a, b, 4000.0), 2.0);

    let c = Vec2 { x: 100.0, y: 3998.0 };
    let d = Vec2 { x: 100.0, y: 3.0 };
    assert_eq!(torus_dist(c, d, 4000.0), 5.0);
  }

  #[test]
  fn torus_delta_points_the_short_way_around() {
    let from = Vec2 { x: 3999.0, y: 0.0 };
    let to = Vec2 { x: 1.0, y: 0.0 };
    let delta = torus_delta(from, to, 4000.0);
    assert_eq!(delta.x, 2.0);
    assert_eq!(delta.y, 0.0);
  }

  #[test]
  fn snap_to_cardinal_picks_dominant_axis() {
    let snapped = snap_to_cardinal(Vec2 { x: 3.0, y: -1.0 });
    assert_eq!((snapped.x, snapped.y), (1.0, 0.0));
    let snapped = snap_to_cardinal(Vec2 { x: -0.5, y: 2.0 });
    assert_eq!((snapped.x, snapped.y), (0.0, 1.0));
    let snapped = snap_to_cardinal(Vec2 { x: 0.2, y: -0.9 });
    assert_eq!((snapped.x, snapped.y), (0.0, -1.0));
  }

  #[test]
  fn neck_skip_scales_with_speed_and_caps() {
    assert_eq!(player_neck_skip(8.0), 8);
    assert_eq!(player_neck_skip(0.5), NECK_SKIP_CAP);
    assert_eq!(player_neck_skip(64.0), 1);
  }

  #[test]
  fn seg_radius_grows_with_length() {
    assert_eq!(seg_radius(0), 3.0);
    assert_eq!(seg_radius(60), 4.0);
    assert!(seg_radius(120) > seg_radius(60));
  }

  #[test]
  fn normalize_handles_degenerate_vectors() {
    let zero = normalize(Vec2 { x: 0.0, y: 0.0 });
    assert_eq!((zero.x, zero.y), (0.0, 0.0));
    let unit = normalize(Vec2 { x: 0.0, y: -3.0 });
    assert_eq!((unit.x, unit.y), (0.0, -1.0));
  }

  #[test]
  fn lerp_interpolates() {
    assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    assert_eq!(lerp(2.0, 2.0, 0.9), 2.0);
  }
}
