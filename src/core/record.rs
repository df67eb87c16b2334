//! # Treatment Record Model
//!
//! The typed row of the record store. Date cells are kept verbatim as
//! written so a delete-by-rewrite round-trips the sheet losslessly; they
//! are parsed on demand through `core::dates`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serde::{Deserialize, Serialize};

/// Treatment choices offered by the editor, matching the product's fixed
/// vaccine list.
pub const TREATMENT_CHOICES: [&str; 8] = [
    "Karma (DHPP)",
    "Kuduz",
    "Bronşin",
    "Lösemi",
    "İç Parazit",
    "Dış Parazit",
    "Lyme",
    "Muayene/Kontrol",
];

/// One row of the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    /// Free-text pet identifier; case/spacing variants are distinct subjects
    pub subject_name: String,
    /// Vaccine name or check-up label
    pub treatment_type: String,
    /// Date the treatment was administered, as stored
    pub applied_date: String,
    /// Date the next occurrence is due; empty for one-off check-ups
    pub next_due_date: String,
    /// Optional weight measurement in kg, one decimal of precision
    pub weight_kg: Option<f64>,
}

impl TreatmentRecord {
    /// Weight formatted for display, or a dash when absent.
    pub fn weight_display(&self) -> String {
        match self.weight_kg {
            Some(kg) => format!("{kg:.1} kg"),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_display() {
        let mut record = TreatmentRecord {
            subject_name: "Max".to_string(),
            treatment_type: "Kuduz".to_string(),
            applied_date: "2025-06-01".to_string(),
            next_due_date: "2026-05-27".to_string(),
            weight_kg: Some(12.5),
        };
        assert_eq!(record.weight_display(), "12.5 kg");

        record.weight_kg = None;
        assert_eq!(record.weight_display(), "-");

        record.weight_kg = Some(7.0);
        assert_eq!(record.weight_display(), "7.0 kg");
    }

    #[test]
    fn test_treatment_choices_contains_product_list() {
        assert!(TREATMENT_CHOICES.contains(&"Kuduz"));
        assert!(TREATMENT_CHOICES.contains(&"Karma (DHPP)"));
        assert!(TREATMENT_CHOICES.contains(&"Muayene/Kontrol"));
        assert_eq!(TREATMENT_CHOICES.len(), 8);
    }
}
