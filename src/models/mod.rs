// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityResult, EventCategory, EventOrigin, Match, NormalizedEvent, Profile, RawEvent,
    ScoringWeights, SwipeDirection,
};
pub use requests::{CompatibilityRequest, EventsQuery};
pub use responses::{CompatibilityResponse, ErrorResponse, EventsResponse, HealthResponse, Pagination};
