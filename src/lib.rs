//! Meridian Locator — nearest-service ranking for public service directories.
//!
//! The core is a pure, stateless distance ranker: give it an origin and a
//! batch of candidate locations and it returns them nearest-first by
//! haversine great-circle distance, with malformed records dropped and
//! counted. Around it sit the service record model, an in-memory
//! directory, search filters, and terminal presentation helpers.

pub mod geo;
pub mod ranker;
pub mod registry;
pub mod report;
pub mod search;
pub mod service;

pub use geo::{haversine_km, GeoError, GeoPoint, EARTH_RADIUS_KM};
pub use ranker::{rank_by_distance, Candidate, RankedCandidate, Ranker, Ranking};
pub use registry::{RegistryError, RegistryStats, ServiceRegistry};
pub use search::{text_search, Query, ServiceFilter};
pub use service::{Service, ServiceCategory};
