//! Terminal presentation for ranking results.
//!
//! Formatting lives here, not in the ranker: consumers decide how a
//! distance reads ("850m" vs "0.85 km"), the ranker only computes it.

use crate::geo::GeoPoint;
use crate::ranker::Ranking;
use crate::service::Service;

/// Human distance: meters below one kilometer, otherwise kilometers
/// with one decimal.
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0}m", km * 1000.0)
    } else {
        format!("{:.1}km", km)
    }
}

/// Hemisphere-suffixed coordinate display, e.g. "3.1390°N, 101.6869°E".
pub fn format_coords(lat: f64, lon: f64) -> String {
    let ns = if lat < 0.0 { 'S' } else { 'N' };
    let ew = if lon < 0.0 { 'W' } else { 'E' };
    format!("{:.4}\u{B0}{}, {:.4}\u{B0}{}", lat.abs(), ns, lon.abs(), ew)
}

/// Render the nearest-services panel for the terminal.
pub fn render_nearest_panel(origin: GeoPoint, ranking: &Ranking<&Service>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "  \u{1F4CD} Nearest services to {}\n",
        format_coords(origin.lat, origin.lon)
    ));

    if ranking.is_empty() {
        out.push_str("  (no services with usable coordinates)\n");
    }

    for (i, entry) in ranking.entries.iter().enumerate() {
        let service = entry.payload;
        out.push_str(&format!(
            "  {:>2}. {}  [{}]  {} away\n",
            i + 1,
            service.name,
            service.category,
            format_distance_km(entry.distance_km)
        ));
        if !service.address.is_empty() {
            out.push_str(&format!("      {}\n", service.address));
        }
    }

    if ranking.skipped > 0 {
        out.push_str(&format!(
            "  \u{26A0} {} service(s) skipped: missing or invalid coordinates\n",
            ranking.skipped
        ));
    }

    out
}
