use crate::error::ValidationError;
use crate::sheet::Sheet;
use crate::stages::Stage;
use log::debug;

fn trim_in_place(cell: &mut String) -> bool {
    let trimmed = cell.trim();
    if trimmed.len() == cell.len() {
        return false;
    }
    *cell = trimmed.to_string();
    true
}

/// Strips leading and trailing whitespace from every cell. Headers are left
/// untouched. Idempotent; cannot fail.
pub struct RowNormalizer;

impl Stage for RowNormalizer {
    fn name(&self) -> &str {
        "normalize"
    }

    fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError> {
        let mut trimmed_cells = 0;
        for row in sheet.rows_mut() {
            for cell in row.iter_mut() {
                if trim_in_place(cell) {
                    trimmed_cells += 1;
                }
            }
        }

        if trimmed_cells > 0 {
            debug!("Trimmed surrounding whitespace from {} cells", trimmed_cells);
        }

        Ok(())
    }
}
