use neon_serpent_core::game::config::WorldConfig;
use neon_serpent_core::game::math::{snap_to_cardinal, unit_from_angle};
use neon_serpent_core::game::turn::TurnSource;
use neon_serpent_core::session::Session;
use rand::Rng;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Headless soak runner: one session, a scripted driver feeding cardinal
/// turns through the gate, and a JSON summary at the end.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let mut config = WorldConfig::default();
  if let Some(seed) = env::var("WORLD_SEED").ok().and_then(|value| value.parse().ok()) {
    config.seed = Some(seed);
  }
  if let Some(count) = env::var("INITIAL_AI").ok().and_then(|value| value.parse().ok()) {
    config.initial_ai = count;
  }
  if let Some(count) = env::var("ORB_COUNT").ok().and_then(|value| value.parse().ok()) {
    config.orb_count = count;
  }
  let max_ticks: u64 = env::var("RUN_TICKS")
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(3600);
  let tick_ms = config.tick_ms;

  let session = Session::new(config);
  session.start();

  let driver_session = Arc::clone(&session);
  let driver = tokio::spawn(async move {
    let mut interval = tokio::time::interval(Duration::from_millis(300));
    loop {
      interval.tick().await;
      if !driver_session.is_running() {
        break;
      }
      let angle = rand::thread_rng().gen::<f64>() * std::f64::consts::PI * 2.0;
      let direction = snap_to_cardinal(unit_from_angle(angle));
      driver_session
        .submit_turn(direction, TurnSource::Keyboard)
        .await;
    }
  });

  let mut updates = session.subscribe();
  let mut last_logged_tick = 0u64;
  loop {
    if updates.changed().await.is_err() {
      break;
    }
    let snapshot = updates.borrow_and_update().clone();
    let ticks = (snapshot.clock_ms / tick_ms).round() as u64;
    if ticks >= last_logged_tick + 300 {
      last_logged_tick = ticks;
      let player = &snapshot.serpents[0];
      tracing::info!(
        ticks,
        score = player.score,
        length = player.segments.len(),
        serpents = snapshot.serpents.len(),
        "simulation progress"
      );
    }
    if !snapshot.serpents[0].alive {
      tracing::info!(ticks, "player died, ending run");
      break;
    }
    if ticks >= max_ticks {
      tracing::info!(ticks, "tick budget reached, ending run");
      session.stop();
      break;
    }
  }
  driver.abort();

  let snapshot = session.latest();
  let player = &snapshot.serpents[0];
  let summary = serde_json::json!({
    "ticks": (snapshot.clock_ms / tick_ms).round() as u64,
    "score": player.score,
    "length": player.segments.len(),
    "alive": player.alive,
    "death_cause": snapshot.death_cause.clone(),
  });
  println!("{}", serde_json::to_string_pretty(&summary)?);

  Ok(())
}
