use embedded_time::{clock, ConversionError};

pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller passed a value the dynamics cannot integrate.
    InvalidArgument,
    /// A vehicle was described with missing or impossible constants.
    Configuration,
    /// The host clock failed while driving the simulation.
    Clock,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("motor {index} value {value} is outside [0, 1]")]
    MotorOutOfRange { index: usize, value: f64 },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("parameter `{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("parameter `{0}` was never set")]
    MissingParameter(&'static str),

    #[error("clock error: {0:?}")]
    Clock(clock::Error),

    #[error("time conversion error: {0:?}")]
    Time(ConversionError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTimeStep(_) | Error::MotorOutOfRange { .. } | Error::NonFinite(_) => {
                ErrorKind::InvalidArgument
            }
            Error::InvalidParameter { .. } | Error::MissingParameter(_) => {
                ErrorKind::Configuration
            }
            Error::Clock(_) | Error::Time(_) => ErrorKind::Clock,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}
