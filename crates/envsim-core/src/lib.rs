//! Configuration, tracking, and orchestration for the envsim simulation.
//!
//! This crate turns the world crate's building blocks into a runnable
//! simulation: it loads configuration, supplies the concrete tracker stack,
//! and drives the tick loop.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `envsim-config.yaml` into
//!   strongly-typed structs.
//! - [`observability`] -- [`DebouncedTracker`] and the event sinks it
//!   delivers to.
//! - [`simulation`] -- [`Simulation`], the tick/environment/report facade.
//! - [`runner`] -- The bounded run loop and end-of-run logging.
//!
//! [`DebouncedTracker`]: observability::DebouncedTracker
//! [`Simulation`]: simulation::Simulation

pub mod config;
pub mod observability;
pub mod runner;
pub mod simulation;
