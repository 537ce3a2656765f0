use thiserror::Error;

/// Failures that stop a session from starting.
/// Mismatches, ignored clicks and timer expiry are normal control flow, not errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// The word pool cannot fill a round.
    #[error("word pool has {available} usable pairs but a round needs {required}")]
    InsufficientData { required: usize, available: usize },

    /// The word list was not valid JSON or had the wrong shape.
    #[error("failed to parse word list: {0}")]
    WordList(#[source] serde_json::Error),

    /// The config override was not valid JSON or had the wrong shape.
    #[error("failed to parse game config: {0}")]
    Config(#[source] serde_json::Error),

    /// The config parsed but describes an unplayable game.
    #[error("invalid game config: {0}")]
    InvalidConfig(&'static str),

    /// A controller runs one session; a new session needs a new controller.
    #[error("session already started")]
    SessionAlreadyStarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_both_counts() {
        let err = GameError::InsufficientData { required: 5, available: 3 };
        assert_eq!(err.to_string(), "word pool has 3 usable pairs but a round needs 5");
    }
}
