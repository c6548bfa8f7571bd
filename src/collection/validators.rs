use super::draft::FormDraft;
use super::styles::StyleChoice;
use crate::common::{ValidationResult, Validator};

/// A draft can be added once it has a name and a style
pub struct DraftValidator;

impl Validator<FormDraft> for DraftValidator {
    fn validate(&self, data: &FormDraft) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Name is required");
        }

        if data.effective_style().is_empty() {
            let message = if data.style == StyleChoice::Custom {
                "Enter a custom style"
            } else {
                "Style is required"
            };
            result.add_error("style", message);
        }

        result
    }
}
