//! Input Completeness Tracker
//!
//! Advisory only: the result annotates a feature payload, it never blocks
//! processing.

use serde::Serialize;

use crate::form::FormSubmission;

/// Percentage at or above which a submission counts as complete
pub const COMPLETE_THRESHOLD: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessResult {
    pub filled_count: usize,
    pub total_count: usize,
    pub percentage: u32,
    pub is_complete: bool,
    pub warning_message: Option<String>,
}

/// Count supplied inputs against the declared total for a feature.
///
/// A field counts when it is a file or a non-blank string; hidden fields
/// (`_` prefix) are ignored. The count is capped at `total_count`.
pub fn assess(form: &FormSubmission, total_count: usize) -> CompletenessResult {
    let filled_count = form.filled_count().min(total_count);
    let percentage = percentage(filled_count, total_count);
    let is_complete = percentage >= COMPLETE_THRESHOLD;

    let warning_message = (!is_complete).then(|| {
        format!(
            "⚠️ You provided {} out of {} inputs ({}%). This analysis is generated based on the available data. For more accurate and personalized results, consider providing additional inputs.",
            filled_count, total_count, percentage
        )
    });

    CompletenessResult {
        filled_count,
        total_count,
        percentage,
        is_complete,
        warning_message,
    }
}

/// `round(filled / total * 100)` with halves rounded up, 100 for an empty schema
fn percentage(filled: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((filled * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(filled: usize, blank: usize) -> FormSubmission {
        let mut form = FormSubmission::new();
        for i in 0..filled {
            form.push_text(format!("input_{}", i), "value");
        }
        for i in filled..filled + blank {
            form.push_text(format!("input_{}", i), "   ");
        }
        form
    }

    #[test]
    fn test_one_of_nine() {
        let result = assess(&form_with(1, 8), 9);
        assert_eq!(result.filled_count, 1);
        assert_eq!(result.percentage, 11);
        assert!(!result.is_complete);
        let warning = result.warning_message.unwrap();
        assert!(warning.contains("You provided 1 out of 9 inputs (11%)"));
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 5 / 8 = 62.5
        assert_eq!(assess(&form_with(5, 3), 8).percentage, 63);
        // 2 / 3 = 66.67
        assert_eq!(assess(&form_with(2, 1), 3).percentage, 67);
        // 1 / 9 = 11.1
        assert_eq!(assess(&form_with(1, 0), 9).percentage, 11);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = assess(&form_with(4, 1), 5);
        assert_eq!(result.percentage, 80);
        assert!(result.is_complete);
        assert!(result.warning_message.is_none());

        let result = assess(&form_with(3, 1), 4);
        assert_eq!(result.percentage, 75);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_hidden_fields_and_files() {
        let mut form = FormSubmission::new();
        form.push_text("_targetLanguages", "es,fr");
        form.push_text("input_0", "Tokyo");
        form.push_file(
            "input_2",
            crate::form::UploadedFile::from_bytes("sat.png", "image/png", b"png"),
        );
        let result = assess(&form, 9);
        assert_eq!(result.filled_count, 2);
    }

    #[test]
    fn test_count_capped_at_total() {
        let result = assess(&form_with(12, 0), 7);
        assert_eq!(result.filled_count, 7);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(assess(&FormSubmission::new(), 0).percentage, 100);
    }
}
