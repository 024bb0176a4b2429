use crate::domain::error::AtLinkResult;

/// Sink for human-readable session results. Diagnostics go through this
/// trait rather than a fixed console stream so drivers and tests can
/// substitute their own sink.
pub trait OutputWriter {
    fn write_message(&self, message: &str) -> AtLinkResult<()>;
    fn write_error(&self, message: &str) -> AtLinkResult<()>;
}

/// Console writer: results on stdout, errors on stderr.
pub struct ConsoleWriter {
    quiet: bool,
}

impl ConsoleWriter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_message(&self, message: &str) -> AtLinkResult<()> {
        if !self.quiet {
            println!("{}", message);
        }
        Ok(())
    }

    fn write_error(&self, message: &str) -> AtLinkResult<()> {
        eprintln!("{}", message);
        Ok(())
    }
}
