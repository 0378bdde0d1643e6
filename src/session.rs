use crate::game::config::WorldConfig;
use crate::game::turn::{parse_direction, TurnSource};
use crate::game::types::{Vec2, WorldSnapshot};
use crate::game::world::World;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::sync::Mutex;

/// Ticks one world at fixed cadence and publishes a snapshot after every
/// tick. Turn requests arrive asynchronously and are applied at tick
/// boundaries through the admission gate, latest request winning.
#[derive(Debug)]
pub struct Session {
  state: Mutex<SessionState>,
  running: AtomicBool,
  stopped: AtomicBool,
  snapshot_tx: watch::Sender<Arc<WorldSnapshot>>,
}

#[derive(Debug)]
struct SessionState {
  world: World,
  pending_turn: Option<(Vec2, TurnSource)>,
}

impl Session {
  pub fn new(config: WorldConfig) -> Arc<Self> {
    let world = World::new(config);
    let (snapshot_tx, _) = watch::channel(Arc::new(world.snapshot()));
    Arc::new(Self {
      state: Mutex::new(SessionState {
        world,
        pending_turn: None,
      }),
      running: AtomicBool::new(false),
      stopped: AtomicBool::new(false),
      snapshot_tx,
    })
  }

  /// Spawn the tick task. Idempotent while running; a stopped session
  /// never ticks again.
  pub fn start(self: &Arc<Self>) {
    if self.stopped.load(Ordering::SeqCst) {
      return;
    }
    if self
      .running
      .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
      .is_err()
    {
      return;
    }

    let session = Arc::clone(self);
    tokio::spawn(async move {
      let tick_ms = {
        let state = session.state.lock().await;
        state.world.config.tick_ms
      };
      tracing::info!(tick_ms, "session started");
      let mut interval = tokio::time::interval(Duration::from_secs_f64(tick_ms / 1000.0));
      loop {
        interval.tick().await;
        if session.stopped.load(Ordering::SeqCst) {
          break;
        }
        if !session.step().await {
          break;
        }
      }
      session.running.store(false, Ordering::SeqCst);
      tracing::info!("session stopped");
    });
  }

  /// One tick boundary: apply the pending turn, tick the world, publish.
  /// Returns false once the player is dead.
  pub(crate) async fn step(&self) -> bool {
    let mut state = self.state.lock().await;
    if let Some((desired, source)) = state.pending_turn.take() {
      state.world.apply_turn(desired, source);
    }
    state.world.tick();
    let snapshot = Arc::new(state.world.snapshot());
    let alive = state.world.player().alive;
    drop(state);
    self.snapshot_tx.send_replace(snapshot);
    alive
  }

  /// Store a desired heading for the next tick boundary. Invalid vectors
  /// are dropped at this boundary.
  pub async fn submit_turn(&self, desired: Vec2, source: TurnSource) {
    let Some(direction) = parse_direction(desired) else {
      tracing::trace!(?desired, "dropped unusable turn request");
      return;
    };
    let mut state = self.state.lock().await;
    state.pending_turn = Some((direction, source));
  }

  pub fn subscribe(&self) -> watch::Receiver<Arc<WorldSnapshot>> {
    self.snapshot_tx.subscribe()
  }

  pub fn latest(&self) -> Arc<WorldSnapshot> {
    self.snapshot_tx.borrow().clone()
  }

  pub async fn score(&self) -> i64 {
    let state = self.state.lock().await;
    state.world.player().score
  }

  pub fn is_running(&self) -> bool {
    self.running.load(Ordering::SeqCst)
  }

  pub fn stop(&self) {
    self.stopped.store(true, Ordering::SeqCst);
  }
}
