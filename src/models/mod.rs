mod ecosystem;
mod output;
mod package_record;

pub use ecosystem::Ecosystem;
pub use output::{
    ExtraData, FileReport, Header, OUTPUT_FORMAT_VERSION, Output, SystemEnvironment,
};
pub use package_record::{PackageRecord, UNRESOLVED_VERSION};
