//! Distance ranking — the primary public API.
//!
//! Given a validated origin and a batch of candidates, computes the
//! great-circle distance to each and returns them nearest-first.
//! Candidates with missing or out-of-range coordinates are dropped and
//! counted, never fatal: incomplete records are expected noise in
//! service feeds.

use crate::geo::{haversine_km, GeoError, GeoPoint};
use log::warn;
use serde::Serialize;

/// An opaque payload paired with an optional position.
///
/// The payload passes through ranking untouched.
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub payload: T,
    pub location: Option<GeoPoint>,
}

impl<T> Candidate<T> {
    /// A candidate at a known position.
    pub fn at(payload: T, location: GeoPoint) -> Self {
        Self { payload, location: Some(location) }
    }

    /// A candidate from feed fields where either coordinate may be absent.
    pub fn from_parts(payload: T, lat: Option<f64>, lon: Option<f64>) -> Self {
        let location = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        };
        Self { payload, location }
    }

    /// A candidate with no position. Always skipped by ranking.
    pub fn unlocated(payload: T) -> Self {
        Self { payload, location: None }
    }
}

/// A candidate paired with its computed distance from the origin.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<T> {
    pub payload: T,
    pub distance_km: f64,
}

/// Ranking output: entries nearest-first, plus how many candidates were
/// dropped for missing or invalid coordinates.
///
/// The skip count is part of the contract so callers can tell "nothing
/// nearby" apart from "the feed is full of bad records".
#[derive(Debug, Clone, Serialize)]
pub struct Ranking<T> {
    pub entries: Vec<RankedCandidate<T>>,
    pub skipped: usize,
}

impl<T> Ranking<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The closest entry, if any.
    pub fn nearest(&self) -> Option<&RankedCandidate<T>> {
        self.entries.first()
    }
}

/// The ranker. Origin is validated once at construction; ranking itself
/// cannot fail.
///
/// Ordering is ascending by distance. Ties keep their input order:
/// `Vec::sort_by` is a stable sort and `f64::total_cmp` is a total
/// order over the finite distances produced here.
#[derive(Debug)]
pub struct Ranker {
    origin: GeoPoint,
    limit: Option<usize>,
    max_distance_km: Option<f64>,
}

impl Ranker {
    /// Create a ranker for the given origin.
    ///
    /// Fails with [`GeoError::InvalidCoordinate`] if the origin is out of
    /// range; a bad origin would make every distance silently wrong.
    pub fn new(origin: GeoPoint) -> Result<Self, GeoError> {
        origin.validate()?;
        Ok(Self { origin, limit: None, max_distance_km: None })
    }

    /// Keep only the closest `limit` entries. Zero yields an empty ranking.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Drop entries farther than `km` from the origin.
    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Rank a batch of candidates by distance from the origin.
    pub fn rank<T>(&self, candidates: impl IntoIterator<Item = Candidate<T>>) -> Ranking<T> {
        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for candidate in candidates {
            let point = match candidate.location {
                Some(point) if point.is_valid() => point,
                other => {
                    skipped += 1;
                    match other {
                        Some(point) => warn!("skipping candidate with out-of-range coordinates {}", point),
                        None => warn!("skipping candidate with no coordinates"),
                    }
                    continue;
                }
            };

            let distance_km = haversine_km(self.origin, point);
            if let Some(max) = self.max_distance_km {
                if distance_km > max {
                    continue;
                }
            }
            entries.push(RankedCandidate { payload: candidate.payload, distance_km });
        }

        entries.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }

        Ranking { entries, skipped }
    }
}

/// One-shot form: rank `candidates` around `origin`, optionally keeping
/// only the closest `limit`.
pub fn rank_by_distance<T>(
    origin: GeoPoint,
    candidates: impl IntoIterator<Item = Candidate<T>>,
    limit: Option<usize>,
) -> Result<Ranking<T>, GeoError> {
    let mut ranker = Ranker::new(origin)?;
    if let Some(limit) = limit {
        ranker = ranker.with_limit(limit);
    }
    Ok(ranker.rank(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ORIGIN: GeoPoint = GeoPoint { lat: 3.1390, lon: 101.6869 };

    fn kl_candidates() -> Vec<Candidate<u32>> {
        vec![
            Candidate::at(1, GeoPoint::new(3.1589, 101.7144)),
            Candidate::at(2, GeoPoint::new(3.1439, 101.6988)),
            Candidate::at(3, GeoPoint::new(1.3521, 103.8198)), // Singapore
            Candidate::at(4, GeoPoint::new(3.1426, 101.7074)),
        ]
    }

    fn ids<T: Copy>(ranking: &Ranking<T>) -> Vec<T> {
        ranking.entries.iter().map(|e| e.payload).collect()
    }

    #[test]
    fn test_sorted_ascending() {
        let ranking = rank_by_distance(ORIGIN, kl_candidates(), None).unwrap();
        assert_eq!(ranking.len(), 4);
        for pair in ranking.entries.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        assert_eq!(ids(&ranking), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_distances_finite_and_non_negative() {
        let ranking = rank_by_distance(ORIGIN, kl_candidates(), None).unwrap();
        for entry in &ranking.entries {
            assert!(entry.distance_km.is_finite());
            assert!(entry.distance_km >= 0.0);
        }
    }

    #[test]
    fn test_origin_equals_candidate() {
        let ranking = rank_by_distance(ORIGIN, vec![Candidate::at("here", ORIGIN)], None).unwrap();
        assert_abs_diff_eq!(ranking.nearest().unwrap().distance_km, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_limit_truncates_after_sort() {
        let ranking = rank_by_distance(ORIGIN, kl_candidates(), Some(2)).unwrap();
        assert_eq!(ids(&ranking), vec![2, 4]);
    }

    #[test]
    fn test_limit_zero_yields_empty() {
        let ranking = rank_by_distance(ORIGIN, kl_candidates(), Some(0)).unwrap();
        assert!(ranking.is_empty());
        assert_eq!(ranking.skipped, 0);
    }

    #[test]
    fn test_empty_candidates() {
        let ranking = rank_by_distance::<u32>(ORIGIN, vec![], None).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_invalid_and_missing_candidates_skipped() {
        let candidates = vec![
            Candidate::from_parts(1, Some(3.15), Some(101.70)),
            Candidate::from_parts(2, None, Some(101.69)),
            Candidate::at(3, GeoPoint::new(95.0, 101.0)),
            Candidate::unlocated(4),
        ];
        let ranking = rank_by_distance(ORIGIN, candidates, None).unwrap();
        assert_eq!(ids(&ranking), vec![1]);
        assert_eq!(ranking.skipped, 3);
    }

    #[test]
    fn test_invalid_origin_is_fatal() {
        let err = Ranker::new(GeoPoint::new(95.0, 101.6869)).unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate { .. }));
        assert!(rank_by_distance(GeoPoint::new(0.0, -200.0), kl_candidates(), None).is_err());
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Same point twice: bitwise-equal distances.
        let spot = GeoPoint::new(3.15, 101.70);
        let candidates = vec![
            Candidate::at("first", spot),
            Candidate::at("second", spot),
            Candidate::at("third", spot),
        ];
        let ranking = rank_by_distance(ORIGIN, candidates, None).unwrap();
        assert_eq!(ids(&ranking), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_equidistant_east_west_keep_input_order() {
        // Mirrored longitudes at the origin's latitude rank identically.
        let candidates = vec![
            Candidate::at("east", GeoPoint::new(0.0, 1.0)),
            Candidate::at("west", GeoPoint::new(0.0, -1.0)),
        ];
        let ranking = rank_by_distance(GeoPoint::new(0.0, 0.0), candidates, None).unwrap();
        assert_eq!(ids(&ranking), vec!["east", "west"]);
    }

    #[test]
    fn test_max_distance_cut() {
        let ranking = Ranker::new(ORIGIN)
            .unwrap()
            .with_max_distance_km(10.0)
            .rank(kl_candidates());
        // Singapore (~316 km) is cut, the three KL spots remain.
        assert_eq!(ids(&ranking), vec![2, 4, 1]);
        assert_eq!(ranking.skipped, 0);
    }

    #[test]
    fn test_radius_and_limit_compose() {
        let ranking = Ranker::new(ORIGIN)
            .unwrap()
            .with_max_distance_km(10.0)
            .with_limit(1)
            .rank(kl_candidates());
        assert_eq!(ids(&ranking), vec![2]);
    }

    #[test]
    fn test_payload_passes_through_unmodified() {
        #[derive(Debug, PartialEq, Clone)]
        struct Opaque {
            name: String,
            tag: u64,
        }
        let payload = Opaque { name: "clinic".into(), tag: 7 };
        let ranking =
            rank_by_distance(ORIGIN, vec![Candidate::at(payload.clone(), ORIGIN)], None).unwrap();
        assert_eq!(ranking.entries[0].payload, payload);
    }
}
