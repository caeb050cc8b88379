//! Viper - a grid-arena snake game behind hot-swappable renderer plugins
//!
//! This library provides:
//! - Core simulation (game module): snake, food, per-tick engine and the
//!   session state machine
//! - Bounded input buffering (input module)
//! - The renderer contract and plugin ABI (render module)
//! - Dynamic backend loading and hot-swap (loader module)
//! - The fixed-timestep main loop (runtime module)
//!
//! Renderer backends live in their own cdylib crates under backends/ and are
//! only ever reached through the render contract.

pub mod game;
pub mod input;
pub mod loader;
pub mod metrics;
pub mod render;
pub mod runtime;
