//! Address → coordinate resolution.
//!
//! There is no real geocoder behind this seam. [`SimulatedGeoResolver`]
//! looks for a known locality name inside the address and jitters its
//! coordinate; anything unrecognized lands near the region center.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use netfeas_core::{normalize_text, Coordinate, LocalitiesFile};

/// Resolves a free-text address. Never fails.
pub trait GeoResolver: Send + Sync {
    fn resolve(&self, address: &str) -> Coordinate;
}

/// Always answers the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeoResolver(pub Coordinate);

impl GeoResolver for FixedGeoResolver {
    fn resolve(&self, _address: &str) -> Coordinate {
        self.0
    }
}

/// Jitter in degrees around a recognized locality.
pub const LOCALITY_JITTER_DEG: f64 = 0.005;
/// Jitter in degrees around the region center.
pub const CENTER_JITTER_DEG: f64 = 0.03;

pub struct SimulatedGeoResolver {
    /// Normalized name and coordinate, longest name first.
    localities: Vec<(String, Coordinate)>,
    center: Coordinate,
    locality_jitter: f64,
    center_jitter: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedGeoResolver {
    #[must_use]
    pub fn new(table: &LocalitiesFile) -> Self {
        Self::with_rng(table, StdRng::from_os_rng())
    }

    /// Reproducible resolver: the same seed yields the same jitter sequence.
    #[must_use]
    pub fn with_seed(table: &LocalitiesFile, seed: u64) -> Self {
        Self::with_rng(table, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(&LocalitiesFile::builtin())
    }

    fn with_rng(table: &LocalitiesFile, rng: StdRng) -> Self {
        let mut localities: Vec<(String, Coordinate)> = table
            .localities
            .iter()
            .map(|l| (normalize_text(&l.name), l.coordinate()))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        // Stable sort keeps table order among names of equal length.
        localities.sort_by_key(|(name, _)| std::cmp::Reverse(name.chars().count()));

        Self {
            localities,
            center: table.center(),
            locality_jitter: LOCALITY_JITTER_DEG,
            center_jitter: CENTER_JITTER_DEG,
            rng: Mutex::new(rng),
        }
    }

    /// Overrides both jitter radii, in degrees. Zero disables jitter.
    #[must_use]
    pub fn with_jitter(mut self, locality_deg: f64, center_deg: f64) -> Self {
        self.locality_jitter = locality_deg.abs();
        self.center_jitter = center_deg.abs();
        self
    }

    fn match_locality(&self, address: &str) -> Option<Coordinate> {
        let haystack = normalize_text(address);
        self.localities
            .iter()
            .find(|(name, _)| haystack.contains(name.as_str()))
            .map(|(_, coordinate)| *coordinate)
    }

    fn jitter(&self, base: Coordinate, radius: f64) -> Coordinate {
        if radius <= 0.0 {
            return base;
        }
        let mut rng = self.rng.lock();
        Coordinate::new(
            base.latitude + rng.random_range(-radius..=radius),
            base.longitude + rng.random_range(-radius..=radius),
        )
    }
}

impl GeoResolver for SimulatedGeoResolver {
    fn resolve(&self, address: &str) -> Coordinate {
        if let Some(coordinate) = self.match_locality(address) {
            self.jitter(coordinate, self.locality_jitter)
        } else {
            tracing::debug!(address, "no known locality in address, using region center");
            self.jitter(self.center, self.center_jitter)
        }
    }
}

#[cfg(test)]
mod tests {
    use netfeas_core::localities::DEFAULT_REGION_CENTER;
    use netfeas_core::Locality;

    use super::*;

    fn exact() -> SimulatedGeoResolver {
        SimulatedGeoResolver::with_seed(&LocalitiesFile::builtin(), 7).with_jitter(0.0, 0.0)
    }

    #[test]
    fn known_locality_resolves_to_its_coordinate() {
        let c = exact().resolve("Dakar, Guédiawaye, Golf Sud, Rue 4");
        assert_eq!(c, Coordinate::new(14.776_4, -17.402_7));
    }

    #[test]
    fn matching_ignores_case_and_accents() {
        let c = exact().resolve("MEDINA rue 11");
        assert_eq!(c, Coordinate::new(14.684_0, -17.451_0));
    }

    #[test]
    fn longest_name_wins() {
        let c = exact().resolve("Dakar Plateau, avenue Pompidou");
        assert_eq!(c, Coordinate::new(14.669_3, -17.437_8));
        let c = exact().resolve("Grand Yoff, Arafat");
        assert_eq!(c, Coordinate::new(14.736_1, -17.452_4));
    }

    #[test]
    fn unknown_address_falls_back_to_center() {
        assert_eq!(exact().resolve("somewhere else"), DEFAULT_REGION_CENTER);
    }

    #[test]
    fn jitter_stays_within_radius() {
        let resolver = SimulatedGeoResolver::with_seed(&LocalitiesFile::builtin(), 42);
        for _ in 0..100 {
            let c = resolver.resolve("nowhere in particular");
            assert!((c.latitude - DEFAULT_REGION_CENTER.latitude).abs() <= CENTER_JITTER_DEG);
            assert!((c.longitude - DEFAULT_REGION_CENTER.longitude).abs() <= CENTER_JITTER_DEG);
            let c = resolver.resolve("Pikine");
            assert!((c.latitude - 14.754_5).abs() <= LOCALITY_JITTER_DEG);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SimulatedGeoResolver::with_seed(&LocalitiesFile::builtin(), 9);
        let b = SimulatedGeoResolver::with_seed(&LocalitiesFile::builtin(), 9);
        for address in ["Yoff", "unknown", "Rufisque, Keury Souf"] {
            assert_eq!(a.resolve(address), b.resolve(address));
        }
    }

    #[test]
    fn custom_table_and_center_are_used() {
        let table = LocalitiesFile {
            default_center: Some(Coordinate::new(12.5, -16.3)),
            localities: vec![Locality {
                name: "Lyndiane".to_string(),
                latitude: 14.1,
                longitude: -16.1,
            }],
        };
        let resolver = SimulatedGeoResolver::with_seed(&table, 1).with_jitter(0.0, 0.0);
        assert_eq!(
            resolver.resolve("quartier Lyndiane"),
            Coordinate::new(14.1, -16.1)
        );
        assert_eq!(resolver.resolve("Dakar"), Coordinate::new(12.5, -16.3));
    }
}
