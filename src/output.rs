// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serialized console output.
//!
//! Every write takes the sink's lock, emits one complete line and flushes
//! before releasing it, so lines from concurrent threads never interleave.

use crate::config::ColorMode;
use crate::error::Result;
use colored::Color;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};

const RESET: &str = "\x1b[0m";
const WARN_COLOR: Color = Color::Yellow;

static GLOBAL_SINK: OnceLock<OutputSink> = OnceLock::new();

pub struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
    use_color: bool,
}

impl OutputSink {
    pub fn new(writer: Box<dyn Write + Send>, use_color: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            use_color,
        }
    }

    pub fn stdout(color: ColorMode) -> Self {
        Self::new(Box::new(io::stdout()), color.use_color())
    }

    /// Process-wide sink on stdout. The first caller fixes the color mode.
    pub fn global() -> &'static OutputSink {
        Self::init_global(ColorMode::Auto)
    }

    /// Install the process-wide sink with an explicit color mode.
    ///
    /// Has no effect if the global sink already exists.
    pub fn init_global(color: ColorMode) -> &'static OutputSink {
        GLOBAL_SINK.get_or_init(|| Self::stdout(color))
    }

    /// Write `message` followed by a newline.
    pub fn write_line(&self, message: &str) -> Result<()> {
        self.emit(format_args!("{message}\n"))
    }

    /// Write `message` highlighted as a warning, resetting the style afterwards.
    pub fn write_warn(&self, message: &str) -> Result<()> {
        if self.use_color {
            let color = WARN_COLOR.to_fg_str();
            self.emit(format_args!("\x1b[{color}m{message}{RESET}\n"))
        } else {
            self.emit(format_args!("{message}\n"))
        }
    }

    fn emit(&self, line: fmt::Arguments<'_>) -> Result<()> {
        // Poisoning only means another writer panicked mid-line; the stream is still usable.
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_fmt(line)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSink")
            .field("use_color", &self.use_color)
            .finish_non_exhaustive()
    }
}

/// Print an informational line through the global sink.
pub fn print_info(message: &str) -> Result<()> {
    OutputSink::global().write_line(message)
}

/// Print a highlighted warning line through the global sink.
pub fn print_warn(message: &str) -> Result<()> {
    OutputSink::global().write_warn(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::SharedBuffer;

    #[test]
    fn write_line_appends_newline() {
        let buffer = SharedBuffer::new();
        let sink = OutputSink::new(Box::new(buffer.clone()), true);

        sink.write_line("hello").unwrap();
        sink.write_line("").unwrap();

        assert_eq!(buffer.contents(), "hello\n\n");
    }

    #[test]
    fn write_warn_wraps_in_yellow_and_resets() {
        let buffer = SharedBuffer::new();
        let sink = OutputSink::new(Box::new(buffer.clone()), true);

        sink.write_warn("careful").unwrap();
        sink.write_line("plain").unwrap();

        assert_eq!(buffer.contents(), "\x1b[33mcareful\x1b[0m\nplain\n");
    }

    #[test]
    fn write_warn_without_color_is_plain() {
        let buffer = SharedBuffer::new();
        let sink = OutputSink::new(Box::new(buffer.clone()), false);

        sink.write_warn("careful").unwrap();

        assert_eq!(buffer.contents(), "careful\n");
    }

    #[test]
    fn write_failure_propagates() {
        struct BrokenPipe;

        impl Write for BrokenPipe {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = OutputSink::new(Box::new(BrokenPipe), false);
        let err = sink.write_line("lost").unwrap_err();
        match err {
            crate::error::GiltError::Io(io_err) => {
                assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe)
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn flushes_after_every_write() {
        let buffer = SharedBuffer::new();
        let sink = OutputSink::new(Box::new(buffer.clone()), false);

        sink.write_line("one").unwrap();
        sink.write_warn("two").unwrap();

        assert_eq!(buffer.flush_count(), 2);
    }
}
