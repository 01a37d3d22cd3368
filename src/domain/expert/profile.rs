//! Expert profile value object.

use serde::{Deserialize, Serialize};

use super::ExpertError;
use crate::domain::foundation::ExpertId;

/// Upper bound accepted for years of experience.
pub const MAX_YEARS_EXPERIENCE: u32 = 50;

/// Identity and background of a panel member.
///
/// `badge_number`, `name` and `institution` are required and together
/// determine the [`ExpertId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertProfile {
    pub badge_number: String,
    pub name: String,
    pub institution: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub research_field: String,
    #[serde(default)]
    pub years_experience: u32,
}

impl ExpertProfile {
    /// Creates a profile, trimming text fields.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a required field is blank or experience
    ///   exceeds [`MAX_YEARS_EXPERIENCE`]
    pub fn new(
        badge_number: &str,
        name: &str,
        institution: &str,
        title: &str,
        research_field: &str,
        years_experience: u32,
    ) -> Result<Self, ExpertError> {
        let required = [
            ("badge_number", badge_number),
            ("name", name),
            ("institution", institution),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ExpertError::validation(field, "cannot be empty"));
            }
        }
        if years_experience > MAX_YEARS_EXPERIENCE {
            return Err(ExpertError::validation(
                "years_experience",
                format!("must be at most {}", MAX_YEARS_EXPERIENCE),
            ));
        }

        Ok(Self {
            badge_number: badge_number.trim().to_string(),
            name: name.trim().to_string(),
            institution: institution.trim().to_string(),
            title: title.trim().to_string(),
            research_field: research_field.trim().to_string(),
            years_experience,
        })
    }

    /// Id derived from the identity fields.
    pub fn expert_id(&self) -> ExpertId {
        ExpertId::derive(&self.badge_number, &self.name, &self.institution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_fields() {
        let profile =
            ExpertProfile::new(" E-7 ", " Zhang Min ", "Fudan University", "Professor", "CS", 12)
                .unwrap();
        assert_eq!(profile.badge_number, "E-7");
        assert_eq!(profile.name, "Zhang Min");
    }

    #[test]
    fn blank_institution_is_rejected() {
        let err = ExpertProfile::new("E-7", "Zhang Min", "  ", "", "", 0).unwrap_err();
        assert!(matches!(err, ExpertError::ValidationFailed { field, .. } if field == "institution"));
    }

    #[test]
    fn excessive_experience_is_rejected() {
        assert!(ExpertProfile::new("E-7", "Zhang Min", "Fudan", "", "", 51).is_err());
        assert!(ExpertProfile::new("E-7", "Zhang Min", "Fudan", "", "", 50).is_ok());
    }

    #[test]
    fn id_ignores_optional_fields() {
        let a = ExpertProfile::new("E-7", "Zhang Min", "Fudan", "Professor", "AI", 10).unwrap();
        let b = ExpertProfile::new("E-7", "Zhang Min", "Fudan", "Lecturer", "HCI", 3).unwrap();
        assert_eq!(a.expert_id(), b.expert_id());
    }
}
