//! Locality table used by the simulated geocoder.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::network::Coordinate;
use crate::ConfigError;

/// Dakar, used when an address names no known locality.
pub const DEFAULT_REGION_CENTER: Coordinate = Coordinate::new(14.716_7, -17.467_7);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Locality {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalitiesFile {
    #[serde(default)]
    pub default_center: Option<Coordinate>,
    pub localities: Vec<Locality>,
}

impl LocalitiesFile {
    /// Built-in table covering the Dakar region and the main secondary cities.
    #[must_use]
    pub fn builtin() -> Self {
        let table: &[(&str, f64, f64)] = &[
            ("Dakar Plateau", 14.669_3, -17.437_8),
            ("Plateau", 14.669_3, -17.437_8),
            ("Médina", 14.684_0, -17.451_0),
            ("Fann", 14.692_4, -17.465_6),
            ("Point E", 14.696_7, -17.461_4),
            ("Mermoz", 14.706_0, -17.474_5),
            ("Sacré-Coeur", 14.718_1, -17.466_5),
            ("Ouakam", 14.723_6, -17.489_3),
            ("Ngor", 14.749_9, -17.514_5),
            ("Yoff", 14.758_4, -17.473_4),
            ("Almadies", 14.745_0, -17.520_0),
            ("Grand Yoff", 14.736_1, -17.452_4),
            ("HLM", 14.710_6, -17.443_0),
            ("Parcelles Assainies", 14.766_7, -17.433_3),
            ("Pikine", 14.754_5, -17.390_6),
            ("Guédiawaye", 14.776_4, -17.402_7),
            ("Thiaroye", 14.751_3, -17.371_7),
            ("Keur Massar", 14.780_6, -17.316_4),
            ("Rufisque", 14.715_3, -17.273_4),
            ("Diamniadio", 14.723_9, -17.182_2),
            ("Thiès", 14.791_0, -16.935_9),
            ("Mbour", 14.420_2, -16.964_5),
            ("Saint-Louis", 16.017_9, -16.489_6),
            ("Kaolack", 14.151_5, -16.072_6),
            ("Ziguinchor", 12.558_9, -16.272_2),
            ("Touba", 14.866_7, -15.883_3),
        ];
        Self {
            default_center: Some(DEFAULT_REGION_CENTER),
            localities: table
                .iter()
                .map(|&(name, latitude, longitude)| Locality {
                    name: name.to_string(),
                    latitude,
                    longitude,
                })
                .collect(),
        }
    }

    /// Declared default center, or [`DEFAULT_REGION_CENTER`].
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.default_center.unwrap_or(DEFAULT_REGION_CENTER)
    }
}

/// Load and validate a locality table from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_localities(path: &Path) -> Result<LocalitiesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LocalitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_localities(&content)
}

fn parse_localities(content: &str) -> Result<LocalitiesFile, ConfigError> {
    let file: LocalitiesFile = serde_yaml::from_str(content)?;
    validate_localities(&file)?;
    Ok(file)
}

fn validate_localities(file: &LocalitiesFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for locality in &file.localities {
        if locality.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "locality name must be non-empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&locality.latitude)
            || !(-180.0..=180.0).contains(&locality.longitude)
        {
            return Err(ConfigError::Validation(format!(
                "locality '{}' has out-of-range coordinates ({}, {})",
                locality.name, locality.latitude, locality.longitude
            )));
        }

        if !seen.insert(locality.name.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate locality name: '{}'",
                locality.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_table_passes_validation() {
        let file = LocalitiesFile::builtin();
        assert!(validate_localities(&file).is_ok());
        assert!(!file.localities.is_empty());
        assert_eq!(file.center(), DEFAULT_REGION_CENTER);
    }

    #[test]
    fn parse_localities_reads_yaml() {
        let yaml = "\
default_center:
  latitude: 33.57
  longitude: -7.59
localities:
  - name: Maarif
    latitude: 33.58
    longitude: -7.63
";
        let file = parse_localities(yaml).expect("valid yaml");
        assert_eq!(file.localities.len(), 1);
        assert_eq!(file.center(), Coordinate::new(33.57, -7.59));
    }

    #[test]
    fn missing_default_center_falls_back_to_region_center() {
        let yaml = "localities:\n  - name: Yoff\n    latitude: 14.75\n    longitude: -17.47\n";
        let file = parse_localities(yaml).expect("valid yaml");
        assert_eq!(file.center(), DEFAULT_REGION_CENTER);
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let yaml = "\
localities:
  - name: Pikine
    latitude: 14.75
    longitude: -17.39
  - name: PIKINE
    latitude: 14.76
    longitude: -17.38
";
        let err = parse_localities(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let yaml = "localities:\n  - name: Nowhere\n    latitude: 95.0\n    longitude: 0.0\n";
        assert!(matches!(
            parse_localities(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_localities_reports_missing_file() {
        let err = load_localities(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::LocalitiesFileIo { .. }));
    }

    #[test]
    fn load_localities_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "localities:\n  - name: Mbao\n    latitude: 14.73\n    longitude: -17.33"
        )
        .expect("write");
        let loaded = load_localities(file.path()).expect("load");
        assert_eq!(loaded.localities[0].name, "Mbao");
    }
}
