//! Output helpers.

use std::{fmt, io::Write};

use crate::{CoreError, Result};

/// Write a CRLF-terminated line.
pub(crate) fn write_line(sink: &mut dyn Write, line: fmt::Arguments<'_>) -> Result<()> {
    sink.write_fmt(format_args!("{line}\r\n"))
        .map_err(|e| CoreError::Output { source: e })
}
