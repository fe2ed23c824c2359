//! Core Lorenz attractor simulation and render loop.
//!
//! Main components:
//! - [`attractor`] — per-instance state and the explicit Euler step.
//! - [`projection`] — mapping attractor coordinates onto a pixel viewport.
//! - [`animation`] — the frame loop driving many attractors on one display.
//! - [`display`] — display surface and frame clock capabilities.
//! - [`config`] — parameters, session settings, palette and speed tables.
//! - [`error`] — configuration and acquisition errors.
//! - [`types`] — pixels, colors and regions.

pub mod animation;
pub mod attractor;
pub mod config;
pub mod display;
pub mod error;
pub mod projection;
pub mod types;
