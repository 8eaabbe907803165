//! Python bindings
//!
//! A Python driver builds a simulation from a dict, runs it and reads the
//! summary back as a dict. No simulation logic lives here.

pub mod orchestrator;
pub mod types;
