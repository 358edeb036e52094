use chrono::Utc;
use clap::Parser;
use meridian_locator::geo::GeoPoint;
use meridian_locator::ranker::Ranker;
use meridian_locator::registry::ServiceRegistry;
use meridian_locator::report::{format_coords, render_nearest_panel};
use meridian_locator::search::{matches_text, Query, ServiceFilter};
use meridian_locator::service::{Service, ServiceCategory};
use serde::Serialize;
use std::path::PathBuf;

/// Meridian Locator — nearest-service ranking for public service directories.
///
/// Ranks a directory of service providers by great-circle distance from a
/// point, with optional category, rating, and free-text filtering.
///
/// Examples:
///   meridian --lat 3.1390 --lon 101.6869
///   meridian --lat 3.1390 --lon 101.6869 --limit 5 --category clinic
///   meridian --services directory.json --lat 1.3521 --lon 103.8198 --radius-km 10
///   meridian --services directory.json --stats
#[derive(Parser)]
#[command(name = "meridian", version, about, long_about = None)]
struct Cli {
    /// Origin latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Origin longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// JSON file with an array of service records.
    /// Defaults to the built-in demo directory.
    #[arg(long)]
    services: Option<PathBuf>,

    /// Keep only the closest N results.
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Drop results farther than this many kilometers.
    #[arg(long)]
    radius_km: Option<f64>,

    /// Only services in this category (e.g. clinic, "food bank").
    #[arg(long, value_parser = parse_category)]
    category: Option<ServiceCategory>,

    /// Free-text filter across name, category, and address.
    #[arg(long, short = 'q')]
    search: Option<String>,

    /// Only services rated at least this highly.
    #[arg(long)]
    min_rating: Option<f64>,

    /// Include services that are not yet approved.
    #[arg(long)]
    all: bool,

    /// Print directory statistics instead of ranking.
    #[arg(long)]
    stats: bool,
}

fn parse_category(s: &str) -> Result<ServiceCategory, String> {
    s.parse()
}

/// JSON report printed to stdout.
#[derive(Serialize)]
struct RankReport<'a> {
    origin: OriginInfo,
    generated_at: String,
    directory_size: usize,
    matched: usize,
    skipped: usize,
    results: Vec<RankedService<'a>>,
}

#[derive(Serialize)]
struct OriginInfo {
    latitude: f64,
    longitude: f64,
    formatted: String,
}

#[derive(Serialize)]
struct RankedService<'a> {
    #[serde(flatten)]
    service: &'a Service,
    distance_km: f64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // ── Load the directory ──────────────────────────────────────

    let registry = match &cli.services {
        Some(path) => ServiceRegistry::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => {
            eprintln!("  (no --services file given; using the built-in demo directory)");
            ServiceRegistry::builtin_demo()
        }
    };

    // ── Stats mode ──────────────────────────────────────────────

    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&registry.stats()).unwrap());
        return;
    }

    // ── Resolve the origin ──────────────────────────────────────

    let (lat, lon) = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            eprintln!("Error: No origin specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  meridian --lat 3.1390 --lon 101.6869");
            eprintln!("  meridian --services directory.json --lat 1.3521 --lon 103.8198 -n 5");
            eprintln!("  meridian --services directory.json --stats");
            std::process::exit(1);
        }
    };

    let origin = GeoPoint::new(lat, lon);
    let mut ranker = Ranker::new(origin).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if let Some(limit) = cli.limit {
        ranker = ranker.with_limit(limit);
    }
    if let Some(radius) = cli.radius_km {
        ranker = ranker.with_max_distance_km(radius);
    }

    // ── Filter the directory ────────────────────────────────────

    let mut query = Query::new();
    if !cli.all {
        query = query.with(ServiceFilter::ApprovedOnly);
    }
    if let Some(category) = cli.category {
        query = query.with(ServiceFilter::Category(category));
    }
    if let Some(min) = cli.min_rating {
        query = query.with(ServiceFilter::MinRating(min));
    }

    let text = cli.search.as_deref().unwrap_or("");
    let matched: Vec<&Service> = query
        .apply(registry.services())
        .into_iter()
        .filter(|s| matches_text(text, s))
        .collect();

    // ── Rank ────────────────────────────────────────────────────

    let ranking = ranker.rank(matched.iter().map(|s| s.candidate()));

    // Panel to stderr, JSON to stdout.
    eprint!("{}", render_nearest_panel(origin, &ranking));

    let report = RankReport {
        origin: OriginInfo {
            latitude: origin.lat,
            longitude: origin.lon,
            formatted: format_coords(origin.lat, origin.lon),
        },
        generated_at: Utc::now().to_rfc3339(),
        directory_size: registry.len(),
        matched: matched.len(),
        skipped: ranking.skipped,
        results: ranking
            .entries
            .iter()
            .map(|e| RankedService { service: e.payload, distance_km: e.distance_km })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
