//! Output encoding and exit status.

use jpfund_core::{ErrorRecord, FinancialRecord, Result};
use serde::Serialize;
use std::io::{self, Write};

/// Process outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success,
    Failure,
}

impl Status {
    pub(crate) const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Write `value` as one JSON line and flush.
pub(crate) fn write_json_line<W: Write>(out: &mut W, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Write an error record to `err` and report failure.
pub(crate) fn fail<W: Write>(err: &mut W, record: &ErrorRecord) -> Status {
    if let Err(e) = write_json_line(err, record) {
        tracing::error!(error = %e, "failed to write error record");
    }
    Status::Failure
}

/// Emit the outcome of a fetch for `symbol`.
///
/// Success goes to `out`, failure to `err` as an [`ErrorRecord`].
pub(crate) fn report<O: Write, E: Write>(
    result: Result<FinancialRecord>,
    symbol: &str,
    out: &mut O,
    err: &mut E,
) -> Status {
    match result {
        Ok(record) => match write_json_line(out, &record) {
            Ok(()) => Status::Success,
            Err(e) => fail(err, &ErrorRecord::for_symbol(symbol, e.to_string())),
        },
        Err(e) => fail(err, &ErrorRecord::retrieval(symbol, &e)),
    }
}
