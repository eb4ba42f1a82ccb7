//! File operation checking
//!
//! Read/Write/Edit targets are tested by substring and suffix, not by
//! directory: `config/.env` is blocked and `config/.env.sample` is not.

use crate::output::Verdict;
use crate::rules::secrets::{ENV_FILE_PATH, SAMPLE_SUFFIX};

/// Marker that identifies an environment file path
const ENV_MARKER: &str = ".env";

/// Check a file path against the environment file rule
pub fn check_path(file_path: &str) -> Verdict {
    if is_env_file(file_path) {
        return Verdict::block(ENV_FILE_PATH.id, ENV_FILE_PATH.reason);
    }
    Verdict::Allow
}

/// True when the path refers to an environment file other than a sample
pub fn is_env_file(file_path: &str) -> bool {
    file_path.contains(ENV_MARKER) && !file_path.ends_with(SAMPLE_SUFFIX)
}
