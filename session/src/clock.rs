//! Wall-clock access that works on both native and wasm targets.
//!
//! Time-sensitive operations elsewhere in the crate take the current time as
//! an explicit `now_ms` parameter in their `*_at` forms; this module only
//! supplies the real clock for the public entry points.

use web_time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}
