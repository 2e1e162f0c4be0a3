//! Parsing of the delimiter-separated training table.
//!
//! The first row is the header. Columns are located by name, so order does
//! not matter, and names are matched case- and accent-insensitively with a
//! few English aliases (`Quartier` or `Quarter`, `Voie` or `Street`, ...).

use csv::{ReaderBuilder, Trim};

use netfeas_core::{AddressInput, CapacityValue, FeasibilityClass};

use crate::error::ClassifierError;
use crate::normalize::normalize_text;

/// One usable training record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub input: AddressInput,
    pub class: FeasibilityClass,
    /// Label text exactly as written in the table.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub rows: Vec<TrainingRow>,
    /// Data rows dropped because their label was empty or unrecognized.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Province,
    Commune,
    Quarter,
    Way,
    Zone,
    Capacity,
    Label,
}

impl Column {
    const REQUIRED: [Column; 7] = [
        Column::Province,
        Column::Commune,
        Column::Quarter,
        Column::Way,
        Column::Zone,
        Column::Capacity,
        Column::Label,
    ];

    fn display_name(self) -> &'static str {
        match self {
            Column::Province => "Province",
            Column::Commune => "Commune",
            Column::Quarter => "Quartier",
            Column::Way => "Voie",
            Column::Zone => "Zone",
            Column::Capacity => "Capacité",
            Column::Label => "Faisabilité",
        }
    }

    fn from_header(header: &str) -> Option<Self> {
        let key: String = normalize_text(header)
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "province" | "region" => Some(Column::Province),
            "commune" | "city" | "ville" => Some(Column::Commune),
            "quartier" | "quarter" | "district" => Some(Column::Quarter),
            "voie" | "way" | "street" | "rue" => Some(Column::Way),
            "zone" => Some(Column::Zone),
            "capacite" | "capacity" => Some(Column::Capacity),
            "faisabilite" | "feasibility" | "label" | "statut" => Some(Column::Label),
            _ => None,
        }
    }
}

/// Parse a feasibility label, tolerating French and English spellings.
#[must_use]
pub fn parse_label(raw: &str) -> Option<FeasibilityClass> {
    let label = normalize_text(&raw.replace(['_', '-'], " "));
    match label.as_str() {
        "non faisable" | "infaisable" | "not feasible" | "unfeasible" | "nonfeasible"
        | "notfeasible" | "non" | "no" => Some(FeasibilityClass::NotFeasible),
        "faisable" | "feasible" | "oui" | "yes" => Some(FeasibilityClass::Feasible),
        other if other.contains("etud") || other.contains("study") => {
            Some(FeasibilityClass::RequiresStudy)
        }
        _ => None,
    }
}

/// Pick the delimiter that occurs most often in the header line.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    [b';', b'\t', b',']
        .into_iter()
        .max_by_key(|&d| header.bytes().filter(|&b| b == d).count())
        .filter(|&d| header.bytes().any(|b| b == d))
        .unwrap_or(b',')
}

/// Parse the training table into usable rows.
///
/// # Errors
///
/// - [`ClassifierError::Csv`] if the text is not valid delimited data.
/// - [`ClassifierError::MissingColumn`] if a required column is absent.
pub fn parse_training_table(content: &str) -> Result<ParsedTable, ClassifierError> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut positions = [None; 7];
    for (idx, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header) {
            let slot = &mut positions[column as usize];
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
    }
    for column in Column::REQUIRED {
        if positions[column as usize].is_none() {
            return Err(ClassifierError::MissingColumn(column.display_name()));
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let field = |column: Column| -> String {
            positions[column as usize]
                .and_then(|idx| record.get(idx))
                .unwrap_or_default()
                .to_string()
        };

        let label = field(Column::Label);
        let Some(class) = parse_label(&label) else {
            tracing::debug!(
                line = line + 2,
                label = %label,
                "skipping row with unrecognized label"
            );
            skipped += 1;
            continue;
        };

        let zone = field(Column::Zone);
        let capacity = field(Column::Capacity);
        rows.push(TrainingRow {
            input: AddressInput {
                province: field(Column::Province),
                commune: field(Column::Commune),
                quarter: field(Column::Quarter),
                way: field(Column::Way),
                zone: (!zone.is_empty()).then_some(zone),
                capacity: (!capacity.is_empty()).then(|| CapacityValue::Text(capacity)),
            },
            class,
            label,
        });
    }

    Ok(ParsedTable { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEMICOLON_TABLE: &str = "\
Province;Commune;Quartier;Voie;Zone;Capacité;Faisabilité
Dakar;Plateau;Centre;Avenue Pompidou;Z1;32;Faisable
Dakar;Pikine;Thiaroye;Rue 10;Z4;;Non faisable
Thiès;Thiès Nord;Cité Lamy;Rue 3;;8;Étude technique
Dakar;Yoff;Layène;Rue 22;Z2;16;???
";

    #[test]
    fn parses_semicolon_table_with_accented_headers() {
        let parsed = parse_training_table(SEMICOLON_TABLE).expect("parse");
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.skipped, 1);

        let first = &parsed.rows[0];
        assert_eq!(first.input.commune, "Plateau");
        assert_eq!(first.input.way, "Avenue Pompidou");
        assert_eq!(first.input.zone.as_deref(), Some("Z1"));
        assert_eq!(first.class, FeasibilityClass::Feasible);
        assert_eq!(first.label, "Faisable");

        assert!(parsed.rows[1].input.capacity.is_none());
        assert_eq!(parsed.rows[1].class, FeasibilityClass::NotFeasible);
        assert!(parsed.rows[2].input.zone.is_none());
        assert_eq!(parsed.rows[2].class, FeasibilityClass::RequiresStudy);
    }

    #[test]
    fn parses_comma_table_with_english_headers_in_any_order() {
        let table = "feasibility,street,district,city,province,zone,capacity\n\
                     Feasible,Rue 1,Medina,Dakar,Dakar,Z1,10\n";
        let parsed = parse_training_table(table).expect("parse");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].input.quarter, "Medina");
        assert_eq!(parsed.rows[0].input.way, "Rue 1");
    }

    #[test]
    fn tab_delimiter_is_detected() {
        let table = "Province\tCommune\tQuartier\tVoie\tZone\tCapacité\tFaisabilité\n\
                     Dakar\tFann\tPoint E\tRue A\tZ1\t4\tfaisable\n";
        let parsed = parse_training_table(table).expect("parse");
        assert_eq!(parsed.rows[0].input.quarter, "Point E");
    }

    #[test]
    fn missing_label_column_is_an_error() {
        let table = "Province;Commune;Quartier;Voie;Zone;Capacité\nDakar;Fann;Point E;Rue A;Z1;4\n";
        let err = parse_training_table(table).unwrap_err();
        assert!(matches!(err, ClassifierError::MissingColumn("Faisabilité")));
    }

    #[test]
    fn short_rows_default_missing_fields_to_empty() {
        let table = "Province;Commune;Quartier;Voie;Zone;Capacité;Faisabilité\n\
                     Dakar;Fann;;;;;faisable\n";
        let parsed = parse_training_table(table).expect("parse");
        assert_eq!(parsed.rows[0].input.quarter, "");
        assert!(parsed.rows[0].input.capacity.is_none());
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let table = "\u{feff}Province;Commune;Quartier;Voie;Zone;Capacité;Faisabilité\n\
                     Dakar;Fann;Point E;Rue A;Z1;4;Faisable\n";
        assert_eq!(parse_training_table(table).expect("parse").rows.len(), 1);
    }

    #[test]
    fn label_parsing_distinguishes_negation() {
        use FeasibilityClass::{Feasible, NotFeasible, RequiresStudy};

        assert_eq!(parse_label("Non faisable"), Some(NotFeasible));
        assert_eq!(parse_label("NON_FAISABLE"), Some(NotFeasible));
        assert_eq!(parse_label("Faisable"), Some(Feasible));
        assert_eq!(parse_label("À étudier"), Some(RequiresStudy));
        assert_eq!(parse_label("requires study"), Some(RequiresStudy));
        assert_eq!(parse_label(""), None);
        assert_eq!(parse_label("peut-être"), None);
    }
}
