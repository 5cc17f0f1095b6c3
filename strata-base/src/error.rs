// Almost everything that can go wrong in this engine is misuse — schema
// violations, bad ids, appending null where none is allowed — and none of it
// has a recovery path, so those conditions log and panic through `fatal!` /
// `require!` below. The one seam worth a Result is `Catalog::print`, whose
// writer can fail; `Error` captures such a failure with a backtrace and logs
// it into the tracing system at the point of capture.

use backtrace_error::DynBacktraceError;
use tracing::error;

#[cfg(test)]
use test_log::test;

#[derive(Debug)]
pub struct Error(#[allow(dead_code)] DynBacktraceError);
pub type Result<T> = std::result::Result<T, Error>;

impl<E: std::error::Error + Send + Sync + 'static> From<E> for Error {
    fn from(source: E) -> Error {
        error!(target: "strata", "{:?}", source);
        Error(DynBacktraceError::from(source))
    }
}

/// Abort the current operation with a diagnostic. Every misuse condition in
/// the engine is fatal; there is no partial recovery.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        ::tracing::error!(target: "strata", $($arg)*);
        panic!($($arg)*)
    }};
}

/// `fatal!` unless the condition holds.
#[macro_export]
macro_rules! require {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::fatal!($($arg)*);
        }
    };
}

#[test]
fn test_writer_error_capture() {
    let failed = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "writer gone");
    let _captured = Error::from(failed);
}
