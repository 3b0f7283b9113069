use thiserror::Error;

use crate::parse::ParseError;

/// Unified error type covering condition parsing and JSON encoding.
///
/// Evaluation itself never fails; errors only come from turning text into
/// conditions or records into JSON.
#[derive(Debug, Error)]
pub enum FieldwiseError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}
