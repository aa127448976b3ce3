use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::StudentCategory;
use crate::core::error::{AppError, FieldErrors, Result};

/// Documents every student may submit regardless of category
pub const COMMON_DOCUMENTS: &[&str] = &["id_photo", "medical_certificate", "proof_of_residency"];

/// Stored paths of scanned admission documents
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct StudentDocuments {
    pub id_photo: Option<String>,
    pub birth_certificate: Option<String>,
    pub report_card: Option<String>,
    pub permanent_record: Option<String>,
    pub good_moral_certificate: Option<String>,
    pub certificate_of_completion: Option<String>,
    pub honorable_dismissal: Option<String>,
    pub transcript_of_records: Option<String>,
    pub subject_descriptions: Option<String>,
    pub previous_school_id: Option<String>,
    pub clearance: Option<String>,
    pub readmission_slip: Option<String>,
    pub grade_slip: Option<String>,
    pub medical_certificate: Option<String>,
    pub proof_of_residency: Option<String>,
}

impl StudentDocuments {
    /// `(field, value)` for every document slot, in column order
    pub fn fields(&self) -> [(&'static str, Option<&str>); 15] {
        [
            ("id_photo", self.id_photo.as_deref()),
            ("birth_certificate", self.birth_certificate.as_deref()),
            ("report_card", self.report_card.as_deref()),
            ("permanent_record", self.permanent_record.as_deref()),
            ("good_moral_certificate", self.good_moral_certificate.as_deref()),
            ("certificate_of_completion", self.certificate_of_completion.as_deref()),
            ("honorable_dismissal", self.honorable_dismissal.as_deref()),
            ("transcript_of_records", self.transcript_of_records.as_deref()),
            ("subject_descriptions", self.subject_descriptions.as_deref()),
            ("previous_school_id", self.previous_school_id.as_deref()),
            ("clearance", self.clearance.as_deref()),
            ("readmission_slip", self.readmission_slip.as_deref()),
            ("grade_slip", self.grade_slip.as_deref()),
            ("medical_certificate", self.medical_certificate.as_deref()),
            ("proof_of_residency", self.proof_of_residency.as_deref()),
        ]
    }

    /// Number of submitted documents
    pub fn submitted(&self) -> usize {
        self.fields().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Document columns a student of `category` may not hold
    pub fn inapplicable_to(category: StudentCategory) -> Vec<&'static str> {
        Self::default()
            .fields()
            .into_iter()
            .map(|(field, _)| field)
            .filter(|field| !applies_to(field, category))
            .collect()
    }

    /// Reject documents that do not apply to `category`
    pub fn check_applicable(&self, category: StudentCategory) -> Result<()> {
        let mut errors = FieldErrors::new();

        for (field, value) in self.fields() {
            if value.is_none() || applies_to(field, category) {
                continue;
            }
            errors.insert(
                field.to_string(),
                vec![format!("{} does not apply to {} students", field, category)],
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn applies_to(field: &str, category: StudentCategory) -> bool {
    COMMON_DOCUMENTS.contains(&field) || category.specific_documents().contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_documents_apply_to_everyone() {
        let docs = StudentDocuments {
            id_photo: Some("students/1/id.jpg".to_string()),
            medical_certificate: Some("students/1/med.jpg".to_string()),
            ..Default::default()
        };
        for category in StudentCategory::ALL {
            assert!(docs.check_applicable(category).is_ok(), "{}", category);
        }
    }

    #[test]
    fn test_foreign_document_is_rejected_per_field() {
        let docs = StudentDocuments {
            honorable_dismissal: Some("a.jpg".to_string()),
            readmission_slip: Some("b.jpg".to_string()),
            report_card: Some("c.jpg".to_string()),
            ..Default::default()
        };

        match docs.check_applicable(StudentCategory::Freshman) {
            Err(AppError::Validation(fields)) => {
                assert_eq!(
                    fields.keys().collect::<Vec<_>>(),
                    vec!["honorable_dismissal", "readmission_slip"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(StudentDocuments {
            honorable_dismissal: Some("a.jpg".to_string()),
            ..Default::default()
        }
        .check_applicable(StudentCategory::Transferee)
        .is_ok());
    }

    #[test]
    fn test_inapplicable_columns_per_category() {
        let regular = StudentDocuments::inapplicable_to(StudentCategory::Regular);
        assert!(regular.contains(&"honorable_dismissal"));
        assert!(regular.contains(&"birth_certificate"));
        assert!(!regular.contains(&"clearance"));
        assert!(!regular.contains(&"id_photo"));
        assert_eq!(regular.len(), 15 - COMMON_DOCUMENTS.len() - 2);

        let transferee = StudentDocuments::inapplicable_to(StudentCategory::Transferee);
        assert!(!transferee.contains(&"honorable_dismissal"));
        assert!(transferee.contains(&"clearance"));
    }

    #[test]
    fn test_submitted_count() {
        assert_eq!(StudentDocuments::default().submitted(), 0);
        let docs = StudentDocuments {
            clearance: Some("x".to_string()),
            grade_slip: Some("y".to_string()),
            ..Default::default()
        };
        assert_eq!(docs.submitted(), 2);
    }
}
