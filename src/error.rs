use thiserror::Error;

/// Rejected input quantity. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field}: expected a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field}: value must be finite")]
    NotFinite { field: &'static str },

    #[error("{field}: must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field}: must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field}: efficiency must lie in (0, 1], got {value}")]
    EfficiencyOutOfRange { field: &'static str, value: f64 },

    #[error("{field}: zero would divide by zero")]
    DivisionByZero { field: &'static str },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::NotNumeric { field, .. }
            | InputError::NotFinite { field }
            | InputError::NotPositive { field, .. }
            | InputError::Negative { field, .. }
            | InputError::EfficiencyOutOfRange { field, .. }
            | InputError::DivisionByZero { field } => field,
        }
    }

    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, InputError::DivisionByZero { .. })
    }
}

/// Failures of a full calculator run, including its console and chart collaborators.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("input stream ended before {0} was entered")]
    UnexpectedEof(&'static str),

    #[error("no value for {0}")]
    MissingInput(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field })
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NotPositive { field, value })
    }
}

/// Positive quantity that ends up in a denominator.
pub(crate) fn positive_divisor(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value == 0.0 {
        return Err(InputError::DivisionByZero { field });
    }
    positive(field, value)
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::Negative { field, value })
    }
}

pub(crate) fn efficiency(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value == 0.0 {
        return Err(InputError::DivisionByZero { field });
    }
    if finite(field, value)? > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(InputError::EfficiencyOutOfRange { field, value })
    }
}
