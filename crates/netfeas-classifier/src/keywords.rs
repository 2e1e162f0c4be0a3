//! Geographic keyword heuristic fed to the classifier as one feature.

use crate::normalize::normalize_text;

/// Address vocabulary weights, keyed on accent-folded lowercase words.
///
/// Positive values mark dense, already-cabled urban fabric; negative values
/// mark rural or informal areas where the network rarely reaches.
pub(crate) const GEO_KEYWORDS: &[(&str, f64)] = &[
    // Urban signals
    ("centre", 0.3),
    ("centreville", 0.4),
    ("cite", 0.3),
    ("residence", 0.3),
    ("immeuble", 0.4),
    ("avenue", 0.3),
    ("boulevard", 0.3),
    ("plateau", 0.2),
    ("hlm", 0.3),
    ("sicap", 0.4),
    ("lotissement", 0.1),
    ("corniche", 0.2),
    // Rural or informal signals
    ("village", -0.5),
    ("brousse", -0.6),
    ("piste", -0.5),
    ("hameau", -0.5),
    ("rural", -0.5),
    ("champ", -0.4),
    ("foret", -0.5),
    ("carriere", -0.4),
    ("extension", -0.3),
    ("irregulier", -0.4),
    ("periurbain", -0.3),
];

/// Score address text with the keyword table.
///
/// Splits on anything that is not alphanumeric, sums matching weights and
/// clamps to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn geographic_keyword_score(text: &str) -> f64 {
    let normalized = normalize_text(text);
    let mut score = 0.0_f64;
    for word in normalized.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if let Some(&(_, weight)) = GEO_KEYWORDS.iter().find(|(kw, _)| *kw == word) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_returns_zero() {
        assert!(geographic_keyword_score("").abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert!(geographic_keyword_score("Rue 12 x Rue 15").abs() < f64::EPSILON);
    }

    #[test]
    fn urban_keyword_is_positive() {
        let score = geographic_keyword_score("Cité Keur Gorgui, Immeuble B");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn rural_keyword_is_negative() {
        let score = geographic_keyword_score("Village de Ndiakhirate, piste latérale");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn accents_are_folded_before_lookup() {
        assert!(geographic_keyword_score("Forêt classée") < 0.0);
        assert!(geographic_keyword_score("Résidence") > 0.0);
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "village brousse piste hameau rural champ foret";
        let score = geographic_keyword_score(text);
        assert!((score + 1.0).abs() < f64::EPSILON, "got {score}");
    }
}
