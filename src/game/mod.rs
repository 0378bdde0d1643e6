pub mod config;
pub mod constants;
pub mod math;
pub mod serpent;
pub mod steering;
pub mod turn;
pub mod types;
pub mod world;
