pub const WORLD_SIZE: f64 = 4000.0;
pub const TICK_MS: f64 = 1000.0 / 60.0;
pub const INITIAL_AI: usize = 6;
pub const ORB_COUNT: usize = 350;
pub const TURN_COOLDOWN_MS: f64 = 100.0;
pub const ANALOG_TURN_COOLDOWN_MS: f64 = 20.0;
pub const BASE_SPEED: f64 = 1.2;
pub const STARTING_TARGET_LENGTH: usize = 6;
// "safe" tail distance used to size the self-bite ignore window
pub const SAFE_DISTANCE: f64 = 64.0;
pub const NECK_SKIP_CAP: usize = 60;
pub const ENEMY_NECK_GAP: usize = 4;
pub const REVERSAL_DOT_LIMIT: f64 = -0.9;
pub const PICKUP_RADIUS: f64 = 10.0;
pub const TAIL_KILL_RADIUS: f64 = 8.0;
pub const TAIL_KILL_SKIP: usize = 8;
pub const COWARD_FLEE_RANGE: f64 = 300.0;
pub const GLOW_TICKS: u32 = 30;
pub const EAT_WAVE_SPEED: f64 = 0.5;
pub const PARTICLE_LIFE: u32 = 30;
pub const EAT_BURST_PARTICLES: usize = 6;
pub const DEATH_BURST_PARTICLES: usize = 12;

pub const PLAYER_COLOR: &str = "#00eaff";
pub const GATHER_COLOR: &str = "#6cff6c";
pub const HUNT_COLOR: &str = "#ff4b4b";
pub const COWARD_COLOR: &str = "#ffcf1b";
