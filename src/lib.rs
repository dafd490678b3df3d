//! Eventmatch - compatibility scoring and local event suggestions for a demo dating app
//!
//! This library scores how well two profiles fit together and turns
//! Eventbrite-shaped event records into the events the app suggests after a match.
//! It also hosts the events proxy endpoint and the client-side session state machine.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{infer_category, normalize, score, CompatibilityEngine};
pub use self::models::{CompatibilityResult, EventCategory, NormalizedEvent, Profile, RawEvent};
