pub mod api;
pub mod config;
pub mod consts;
pub mod dissonance;
pub mod error;
pub mod optimizer;
pub mod ratio;
pub mod scale;
pub mod scorer;
pub mod targets;
pub mod temperaments;
// cmd and reports are binary modules (declared in main.rs).
