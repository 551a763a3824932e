//! Process exit codes

use whoop::prelude::WhoopError;

/// Generic failure: bad arguments, io errors
const EXIT_FAILURE: i32 = 1;
/// Server returned an error status
const EXIT_API: i32 = 2;
/// Rate limit reached, locally or by the server
const EXIT_RATE_LIMIT: i32 = 3;
/// Could not reach the server
const EXIT_NETWORK: i32 = 4;
/// Response did not match the expected shape
const EXIT_DECODE: i32 = 5;

/// Maps an error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WhoopError>()
        .map_or(EXIT_FAILURE, |err| match err {
            WhoopError::RateLimitExceeded { .. } => EXIT_RATE_LIMIT,
            WhoopError::ApiError { .. } => EXIT_API,
            WhoopError::Http { .. } => EXIT_NETWORK,
            WhoopError::Deserialization { .. } => EXIT_DECODE,
            _ => EXIT_FAILURE,
        })
}
