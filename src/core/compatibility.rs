use crate::models::{CompatibilityResult, EventCategory, Profile, ScoringWeights};
use std::collections::BTreeSet;

/// Estimates how close two profiles live, on a 0-100 scale
///
/// Stands in for real geolocation. Implementations must return 100 for
/// identical cities and stay deterministic.
pub trait ProximityEstimator {
    fn proximity(&self, current: &Profile, candidate: &Profile) -> f64;
}

/// City-equality proximity: 100 for the same city, a fixed placeholder otherwise
#[derive(Debug, Clone, Copy)]
pub struct CityProximity {
    different_city: f64,
}

impl CityProximity {
    pub const SAME_CITY: f64 = 100.0;
    pub const DEFAULT_DIFFERENT_CITY: f64 = 85.0;
    const MIN_DIFFERENT_CITY: f64 = 50.0;
    const MAX_DIFFERENT_CITY: f64 = 99.0;

    /// The placeholder is clamped into [50, 99]
    pub fn new(different_city: f64) -> Self {
        let different_city = if different_city.is_finite() {
            different_city.clamp(Self::MIN_DIFFERENT_CITY, Self::MAX_DIFFERENT_CITY)
        } else {
            Self::DEFAULT_DIFFERENT_CITY
        };
        Self { different_city }
    }

    pub fn different_city(&self) -> f64 {
        self.different_city
    }
}

impl Default for CityProximity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIFFERENT_CITY)
    }
}

impl ProximityEstimator for CityProximity {
    fn proximity(&self, current: &Profile, candidate: &Profile) -> f64 {
        if current.city == candidate.city {
            Self::SAME_CITY
        } else {
            self.different_city
        }
    }
}

/// Scores a pairing of two profiles
///
/// # Sub-scores
/// 1. Interest overlap: shared tags over the union of tags
/// 2. Event alignment: shared tags among the six event categories
/// 3. Proximity: delegated to a [`ProximityEstimator`]
#[derive(Debug, Clone)]
pub struct CompatibilityEngine<P = CityProximity> {
    weights: ScoringWeights,
    proximity: P,
}

impl CompatibilityEngine<CityProximity> {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            proximity: CityProximity::default(),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl Default for CompatibilityEngine<CityProximity> {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

impl<P: ProximityEstimator> CompatibilityEngine<P> {
    pub fn with_proximity(weights: ScoringWeights, proximity: P) -> Self {
        Self { weights, proximity }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `candidate` from the point of view of `current`
    pub fn score(&self, current: &Profile, candidate: &Profile) -> CompatibilityResult {
        let overlap = interest_overlap(&current.interests, &candidate.interests);
        let alignment = event_alignment(&current.interests, &candidate.interests, overlap);
        let proximity = match self.proximity.proximity(current, candidate) {
            p if p.is_nan() => 0.0,
            p => p.clamp(0.0, 100.0),
        };

        let overall = (f64::from(overlap) * self.weights.interest_overlap
            + f64::from(alignment) * self.weights.event_alignment
            + proximity * self.weights.proximity)
            .round()
            .clamp(0.0, 100.0);

        CompatibilityResult {
            overall_score: overall as u8,
            interest_overlap_score: overlap,
            event_alignment_score: alignment,
            proximity_score: proximity,
        }
    }
}

/// Score a pairing with the default weights and city proximity
pub fn score(current: &Profile, candidate: &Profile) -> CompatibilityResult {
    CompatibilityEngine::with_default_weights().score(current, candidate)
}

/// Shared tags over the union of both sets, 0-100; zero for an empty union
pub fn interest_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> u8 {
    let union = a.union(b).count();
    if union == 0 {
        return 0;
    }
    percent(a.intersection(b).count(), union)
}

/// Shared event categories out of the six, 0-100
///
/// Falls back to `overlap` when the two sets share no category.
pub fn event_alignment(a: &BTreeSet<String>, b: &BTreeSet<String>, overlap: u8) -> u8 {
    let common = EventCategory::ALL
        .iter()
        .filter(|category| a.contains(category.as_str()) && b.contains(category.as_str()))
        .count();

    if common == 0 {
        overlap
    } else {
        percent(common, EventCategory::ALL.len())
    }
}

/// Tags present in both profiles, in sorted order
pub fn mutual_interests(current: &Profile, candidate: &Profile) -> Vec<String> {
    current
        .interests
        .intersection(&candidate.interests)
        .cloned()
        .collect()
}

#[inline]
fn percent(part: usize, whole: usize) -> u8 {
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
