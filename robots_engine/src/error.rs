//! Error types for parsing and driving robot scripts.

use thiserror::Error;

/// Result type for simulation operations.
pub type SimulationResult<T> = std::result::Result<T, SimulationError>;

/// Errors that can occur while reading an input or saving a replay.
///
/// Every parse error carries the 1-based line number of the offending line.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The input has no grid size line.
    #[error("input is empty: expected a grid size line")]
    EmptyInput,

    /// The grid size line is not two non-negative integers.
    #[error("line {line}: invalid grid size {content:?}, expected \"<maxX> <maxY>\"")]
    InvalidGridSize {
        /// Line number.
        line: usize,
        /// The raw line.
        content: String,
    },

    /// A robot start line is not `x y bearing`.
    #[error("line {line}: invalid start position {content:?}, expected \"<x> <y> <bearing>\"")]
    InvalidPosition {
        /// Line number.
        line: usize,
        /// The raw line.
        content: String,
    },

    /// A bearing outside of N, E, S and W.
    #[error("line {line}: invalid bearing {bearing:?}, must be N, E, S, or W")]
    InvalidBearing {
        /// Line number.
        line: usize,
        /// The rejected bearing.
        bearing: String,
    },

    /// An instruction character outside of L, R and F.
    #[error("line {line}: invalid instruction {instruction:?}, must be F, L, or R")]
    InvalidInstruction {
        /// Line number.
        line: usize,
        /// The rejected character.
        instruction: char,
    },

    /// A robot start line with no instruction line after it.
    #[error("line {line}: robot has no instruction line")]
    MissingInstructions {
        /// Line number of the start position.
        line: usize,
    },

    /// A robot that starts outside the grid.
    #[error("line {line}: start position ({x}, {y}) is outside the grid")]
    StartOutOfBounds {
        /// Line number.
        line: usize,
        /// Start x coordinate.
        x: i64,
        /// Start y coordinate.
        y: i64,
    },

    /// The replay file could not be written.
    #[error("failed to write replay: {0}")]
    Replay(#[from] std::io::Error),

    /// The replay could not be serialized.
    #[error("failed to serialize replay: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SimulationError {
    /// The input line the error refers to, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidGridSize { line, .. }
            | Self::InvalidPosition { line, .. }
            | Self::InvalidBearing { line, .. }
            | Self::InvalidInstruction { line, .. }
            | Self::MissingInstructions { line }
            | Self::StartOutOfBounds { line, .. } => Some(*line),
            Self::EmptyInput | Self::Replay(_) | Self::Serialize(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_displaying_an_invalid_instruction_the_line_and_character_are_included() {
        let err = SimulationError::InvalidInstruction {
            line: 4,
            instruction: 'X',
        };
        let msg = format!("{err}");

        assert!(msg.contains("line 4"));
        assert!(msg.contains("'X'"));
    }

    #[test]
    fn when_displaying_an_invalid_grid_size_the_raw_line_is_included() {
        let err = SimulationError::InvalidGridSize {
            line: 1,
            content: "5 three".to_string(),
        };

        assert!(format!("{err}").contains("\"5 three\""));
    }

    #[test]
    fn when_an_error_comes_from_a_parsed_line_its_line_number_is_available() {
        assert_eq!(SimulationError::MissingInstructions { line: 7 }.line(), Some(7));
        assert_eq!(SimulationError::EmptyInput.line(), None);
    }
}
