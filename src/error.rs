/// Error type for split calculations
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    #[error("cannot split a check between zero people")]
    DivisionByZero,
}

/// Error type for loading a [`SplitConfig`](crate::config::SplitConfig)
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Load(Box::new(e))
    }
}
