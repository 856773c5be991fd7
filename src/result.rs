use core::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// Error type
#[derive(Debug)]
pub enum Error<E: Sized + Debug> {
    /// No presence on wire
    NoPresence,
    PortError(E),
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::PortError(e)
    }
}

/// Timing table of the wrong length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityError {
    pub expected: usize,
    pub found: usize,
}

impl Display for ArityError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "expected {} timing values, got {}",
            self.expected, self.found
        )
    }
}
