use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "next"),
            Direction::Backward => write!(f, "previous"),
        }
    }
}

// Every variant is a normal navigation boundary, never a fatal fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("no {0} element")]
    NoSuchElement(Direction),
    #[error("illegal cursor state: {0}")]
    IllegalState(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CursorError::NoSuchElement(Direction::Forward).to_string(),
            "no next element"
        );
        assert_eq!(
            CursorError::NoSuchElement(Direction::Backward).to_string(),
            "no previous element"
        );
        assert_eq!(
            CursorError::IllegalState("nothing returned yet").to_string(),
            "illegal cursor state: nothing returned yet"
        );
    }
}
