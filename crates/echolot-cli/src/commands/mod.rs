//! Command implementations.

pub mod build;
pub mod commons;
pub mod info;
pub mod sign;
pub mod validate;

pub use self::build::{build_record, execute_build};
pub use self::commons::{execute_build_from_commons, ingest, IngestOutcome};
pub use self::info::{execute_info, manifest_info};
pub use self::sign::{execute_sign, sign_asset, SignPlan};
pub use self::validate::{check_record, execute_validate, load_shapes};
