//! In-memory service directory.
//!
//! Owns the service list for a run: loaded from a JSON export, built
//! from a caller-supplied vec, or seeded with the built-in demo set.
//! Ids are assigned sequentially on insert, feed-style.

use crate::service::{Service, ServiceCategory};
use log::info;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Directory load errors.
#[derive(Debug)]
pub enum RegistryError {
    Read(String),
    Parse(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "Cannot read services file: {}", msg),
            Self::Parse(msg) => write!(f, "Cannot parse services file: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// The service directory.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: Vec<Service>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list. Entries without an id get one assigned.
    pub fn from_services(services: Vec<Service>) -> Self {
        let mut registry = Self::new();
        for service in services {
            registry.add(service);
        }
        registry
    }

    /// Load a directory from a JSON array of service records.
    pub fn load_from_file(path: &Path) -> Result<Self, RegistryError> {
        let data = fs::read_to_string(path).map_err(|e| RegistryError::Read(e.to_string()))?;
        let services: Vec<Service> =
            serde_json::from_str(&data).map_err(|e| RegistryError::Parse(e.to_string()))?;
        info!("loaded {} services from {}", services.len(), path.display());
        Ok(Self::from_services(services))
    }

    /// Add a service, assigning the next id if it has none.
    /// Returns the service's id.
    pub fn add(&mut self, mut service: Service) -> u64 {
        let id = service.id.unwrap_or(self.services.len() as u64 + 1);
        service.id = Some(id);
        self.services.push(service);
        id
    }

    /// Remove a service by id. Returns true if it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.services.len();
        self.services.retain(|s| s.id != Some(id));
        self.services.len() < before
    }

    /// Mark a service as approved. Returns true if it existed.
    pub fn approve(&mut self, id: u64) -> bool {
        match self.services.iter_mut().find(|s| s.id == Some(id)) {
            Some(service) => {
                service.is_approved = true;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == Some(id))
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn approved(&self) -> Vec<&Service> {
        self.services.iter().filter(|s| s.is_approved).collect()
    }

    pub fn by_category(&self, category: ServiceCategory) -> Vec<&Service> {
        self.services.iter().filter(|s| s.category == category).collect()
    }

    pub fn stats(&self) -> RegistryStats {
        let total = self.services.len();
        let approved = self.services.iter().filter(|s| s.is_approved).count();

        let mut categories: Vec<String> = Vec::new();
        for service in &self.services {
            let label = service.category.to_string();
            if !categories.contains(&label) {
                categories.push(label);
            }
        }

        let average_rating = if total > 0 {
            self.services.iter().map(|s| s.rating).sum::<f64>() / total as f64
        } else {
            0.0
        };

        RegistryStats { total, approved, pending: total - approved, categories, average_rating }
    }
}

/// Directory-wide statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub categories: Vec<String>,
    pub average_rating: f64,
}

// ─── Built-in demo dataset ──────────────────────────────────────

struct DemoService {
    name: &'static str,
    category: ServiceCategory,
    description: &'static str,
    address: &'static str,
    lat: f64,
    lon: f64,
    phone: &'static str,
    email: &'static str,
    hours: &'static str,
}

const DEMO_SERVICES: &[DemoService] = &[
    DemoService {
        name: "Community Food Bank Malaysia",
        category: ServiceCategory::FoodBank,
        description: "Providing food assistance to families in need across Malaysia",
        address: "123 Jalan Tun Razak, Kuala Lumpur, Malaysia",
        lat: 3.1390, lon: 101.6869,
        phone: "+60 3-1234 5678",
        email: "foodbank@community.my",
        hours: "Mon-Fri 9AM-5PM, Sat 10AM-2PM",
    },
    DemoService {
        name: "Hope Shelter KL",
        category: ServiceCategory::Shelter,
        description: "Emergency shelter for homeless individuals in Kuala Lumpur",
        address: "456 Jalan Bukit Bintang, Kuala Lumpur, Malaysia",
        lat: 3.1426, lon: 101.7074,
        phone: "+60 3-1234 5679",
        email: "hope@shelter.my",
        hours: "24/7",
    },
    DemoService {
        name: "Health First Clinic Malaysia",
        category: ServiceCategory::Clinic,
        description: "Free medical consultations for low-income families",
        address: "789 Jalan Petaling, Kuala Lumpur, Malaysia",
        lat: 3.1439, lon: 101.6988,
        phone: "+60 3-1234 5680",
        email: "health@clinic.my",
        hours: "Mon-Sat 8AM-6PM",
    },
    DemoService {
        name: "Green Earth Recycling Malaysia",
        category: ServiceCategory::RecyclingCenter,
        description: "Recycling center for paper, plastic, and electronics",
        address: "321 Jalan Ampang, Kuala Lumpur, Malaysia",
        lat: 3.1589, lon: 101.7144,
        phone: "+60 3-1234 5681",
        email: "green@recycling.my",
        hours: "Mon-Fri 8AM-8PM, Sat-Sun 9AM-5PM",
    },
    DemoService {
        name: "Skills Development Center Malaysia",
        category: ServiceCategory::Education,
        description: "Free skills training and education programs",
        address: "654 Jalan Sultan, Kuala Lumpur, Malaysia",
        lat: 3.1457, lon: 101.6942,
        phone: "+60 3-1234 5682",
        email: "skills@education.my",
        hours: "Mon-Fri 9AM-7PM, Sat 9AM-3PM",
    },
];

impl ServiceRegistry {
    /// The built-in demo directory: five approved Kuala Lumpur services.
    pub fn builtin_demo() -> Self {
        let services = DEMO_SERVICES
            .iter()
            .map(|d| Service {
                id: None,
                name: d.name.to_string(),
                category: d.category,
                description: d.description.to_string(),
                address: d.address.to_string(),
                latitude: Some(d.lat),
                longitude: Some(d.lon),
                phone: Some(d.phone.to_string()),
                email: Some(d.email.to_string()),
                hours: Some(d.hours.to_string()),
                rating: 0.0,
                is_approved: true,
                created_at: None,
            })
            .collect();
        Self::from_services(services)
    }
}
