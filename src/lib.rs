pub mod cancel;
pub mod cli;
pub mod extract;
pub mod models;
pub mod scanner;

pub use cancel::CancelFlag;
pub use models::{
    Ecosystem, ExtraData, FileReport, Header, OUTPUT_FORMAT_VERSION, Output, PackageRecord,
    SystemEnvironment, UNRESOLVED_VERSION,
};
pub use scanner::{ProcessResult, count, process};
