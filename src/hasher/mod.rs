mod manifest;
mod run;

pub use manifest::{MANIFEST_FILE_NAME, ManifestRecord, ManifestWriter, manifest_path};
pub use run::{FileOutcome, HashReport, SkipReason, USAGE, run, run_from_args, run_recursive};
