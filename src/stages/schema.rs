use crate::error::ValidationError;
use crate::sheet::Sheet;
use crate::stages::Stage;
use std::collections::HashSet;

/// The exact column set an input sheet must carry, in reporting order.
/// `cmbd ci name` keeps the spelling used by the existing input sheets.
pub const EXPECTED_COLUMNS: [&str; 26] = [
    "type",
    "id",
    "name",
    "hosts",
    "ipv4",
    "ipv6",
    "city name",
    "country iso code",
    "country name",
    "latitude",
    "longitude",
    "geo.name",
    "location id",
    "site id",
    "site name",
    "site uid",
    "site category",
    "cmbd ci name",
    "cmdb ci uid",
    "cmdb ci parent name",
    "cmdb ci parent uid",
    "cmdb event category",
    "mode",
    "timeout",
    "wait",
    "tags",
];

/// Confirms the sheet's column set matches [`EXPECTED_COLUMNS`] exactly.
///
/// Missing columns are reported before unexpected ones: the first missing
/// name in expected order wins, then all unexpected names sorted.
pub struct SchemaValidator;

impl Stage for SchemaValidator {
    fn name(&self) -> &str {
        "schema"
    }

    fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError> {
        let present: HashSet<&str> = sheet.headers().iter().map(String::as_str).collect();

        for column in EXPECTED_COLUMNS {
            if !present.contains(column) {
                return Err(ValidationError::MissingColumn(column.to_string()));
            }
        }

        let mut unexpected: Vec<&str> = sheet
            .headers()
            .iter()
            .map(String::as_str)
            .filter(|h| !EXPECTED_COLUMNS.contains(h))
            .collect();

        if !unexpected.is_empty() {
            unexpected.sort_unstable();
            unexpected.dedup();
            return Err(ValidationError::UnexpectedColumns(unexpected.join(", ")));
        }

        Ok(())
    }
}
