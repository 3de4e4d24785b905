pub mod cli;
pub mod error;
pub mod master;
pub mod pipeline;
pub mod render;
pub mod sheet;
pub mod stages;

pub use cli::Cli;
pub use error::ValidationError;
pub use master::MasterRecord;
pub use pipeline::{generate, GenerateOptions, Pipeline, RunStats};
pub use render::{render_document, MonitorRow};
pub use sheet::Sheet;
pub use stages::{
    AddressValidator, MandatoryFieldChecker, RowNormalizer, SchemaValidator, Stage,
};
