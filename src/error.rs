use thiserror::Error;

/// Failures outside the listing scan itself. Each maps to a fixed exit
/// code so scripts can tell argument problems from network problems; the
/// scan never fails, it just finds nothing.
#[derive(Debug, Error)]
pub enum ChkError {
    #[error("{0}: programme ID isn't eight characters")]
    BadPid(String),
    #[error("{0}: time isn't yyyy/mm/dd-hh:mm")]
    BadTime(String),
    #[error("network error")]
    Network,
    #[error("couldn't get: {0}")]
    Fetch(String),
}

impl ChkError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ChkError::BadPid(_) => 4,
            ChkError::BadTime(_) => 5,
            ChkError::Network => 6,
            ChkError::Fetch(_) => 7,
        }
    }
}
