pub mod address;
pub mod mandatory;
pub mod normalize;
pub mod schema;

pub use address::AddressValidator;
pub use mandatory::MandatoryFieldChecker;
pub use normalize::RowNormalizer;
pub use schema::SchemaValidator;

use crate::error::ValidationError;
use crate::sheet::Sheet;

/// One step in the validation pipeline.
///
/// Stages never touch the filesystem and never terminate the process; they
/// inspect (or rewrite) the batch in place and report the first problem found.
pub trait Stage {
    fn name(&self) -> &str;
    fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError>;
}
