// Core algorithm exports
pub mod catalog;
pub mod categorize;
pub mod compatibility;
pub mod formatter;
pub mod session;

pub use catalog::{fallback_events, mock_users, synthesize_events};
pub use categorize::infer_category;
pub use compatibility::{score, CityProximity, CompatibilityEngine, ProximityEstimator};
pub use formatter::{normalize, normalize_json};
pub use session::{reduce, Action, Effect, ProfilePatch, Screen, SessionState, Transition};
