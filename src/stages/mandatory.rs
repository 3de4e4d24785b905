use crate::error::ValidationError;
use crate::sheet::Sheet;
use crate::stages::Stage;

/// Fields that must be populated in every row, in checking order.
pub const MANDATORY_FIELDS: [&str; 4] = ["type", "id", "name", "hosts"];

/// Confirms no mandatory field is empty in any row.
///
/// Reports the first offending field in [`MANDATORY_FIELDS`] order; row
/// identity is not part of the report. Runs after normalization, so
/// whitespace-only cells count as empty.
pub struct MandatoryFieldChecker;

impl Stage for MandatoryFieldChecker {
    fn name(&self) -> &str {
        "mandatory"
    }

    fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError> {
        for field in MANDATORY_FIELDS {
            let Some(index) = sheet.column_index(field) else {
                // Schema validation runs first; a missing column is its call.
                continue;
            };

            let has_empty = sheet
                .rows()
                .iter()
                .any(|row| row.get(index).map(String::as_str).unwrap_or("").is_empty());

            if has_empty {
                return Err(ValidationError::EmptyMandatoryField(field));
            }
        }

        Ok(())
    }
}
