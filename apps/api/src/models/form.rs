use serde::Deserialize;

use crate::errors::AppError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// The seven fields collected by the cold email form.
/// Missing JSON fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub job_description: String,
    pub your_name: String,
    pub your_experience: String,
    pub your_skills: String,
    pub company_name: String,
    /// Optional; passed through unchanged.
    pub recruiter_name: String,
    /// Optional; passed through unchanged.
    pub platform: String,
}

impl FormInput {
    /// Names of required fields that are empty or whitespace-only, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("job_description", &self.job_description),
            ("your_name", &self.your_name),
            ("your_experience", &self.your_experience),
            ("your_skills", &self.your_skills),
            ("company_name", &self.company_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Gate run before any provider call. Produces a single user-facing error.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(AppError::Validation(format!(
            "{REQUIRED_FIELDS_MESSAGE} Missing: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> FormInput {
        FormInput {
            job_description: "We need a marketing lead with 5 years experience in SEO."
                .to_string(),
            your_name: "Jane Doe".to_string(),
            your_experience: "5 years in marketing".to_string(),
            your_skills: "SEO, Content Strategy".to_string(),
            company_name: "Acme Corp".to_string(),
            recruiter_name: String::new(),
            platform: "LinkedIn".to_string(),
        }
    }

    #[test]
    fn test_complete_form_passes_with_optional_fields_empty() {
        let mut form = complete_form();
        form.platform.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let clear: [fn(&mut FormInput); 5] = [
            |f| f.job_description.clear(),
            |f| f.your_name.clear(),
            |f| f.your_experience.clear(),
            |f| f.your_skills.clear(),
            |f| f.company_name.clear(),
        ];
        for (i, clear_field) in clear.iter().enumerate() {
            let mut form = complete_form();
            clear_field(&mut form);
            assert_eq!(form.missing_fields().len(), 1, "field #{i}");
            assert!(matches!(form.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = complete_form();
        form.your_name = "   \t".to_string();
        assert_eq!(form.missing_fields(), vec!["your_name"]);
    }

    #[test]
    fn test_error_message_lists_missing_fields() {
        let err = FormInput::default().validate().unwrap_err();
        let AppError::Validation(message) = err else {
            panic!("expected validation error");
        };
        assert!(message.starts_with(REQUIRED_FIELDS_MESSAGE));
        assert!(message.contains(
            "job_description, your_name, your_experience, your_skills, company_name"
        ));
    }

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let form: FormInput = serde_json::from_value(serde_json::json!({
            "your_name": "Jane Doe"
        }))
        .unwrap();
        assert_eq!(form.your_name, "Jane Doe");
        assert!(form.recruiter_name.is_empty());
        assert_eq!(form.missing_fields().len(), 4);
    }
}
