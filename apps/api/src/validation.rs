use validator::{Validate, ValidationErrors};

use crate::notify::SubmissionError;

/// Runs the form's `validator` rules, flattening field errors into one message.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), SubmissionError> {
    form.validate()
        .map_err(|errors| SubmissionError::Invalid(describe(&errors)))
}

/// "field: message; field: message", sorted by field name.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", e.code));
                    format!("{field}: {message}")
                })
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(email(message = "not an email"))]
        email: String,
    }

    #[test]
    fn test_valid_form_passes() {
        let form = Sample {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_messages_are_sorted_and_joined() {
        let form = Sample {
            name: "A".to_string(),
            email: "nope".to_string(),
        };
        let err = validate_form(&form).unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Invalid("email: not an email; name: too short".to_string())
        );
    }
}
