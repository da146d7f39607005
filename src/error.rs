// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error handling for tile execution

use std::fmt;

/// Error codes for engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Ok = 0,
    Invalid = 1,
    TypeError = 2,
    IndexError = 3,
    ExecutionError = 4,
    NotImplemented = 5,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Ok => write!(f, "OK"),
            Code::Invalid => write!(f, "Invalid"),
            Code::TypeError => write!(f, "Type error"),
            Code::IndexError => write!(f, "Index error"),
            Code::ExecutionError => write!(f, "Execution error"),
            Code::NotImplemented => write!(f, "Not implemented"),
        }
    }
}

/// Main error type for tile execution operations
#[derive(thiserror::Error, Debug)]
pub enum TilexError {
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Invalid operation: {0}")]
    Invalid(String),

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Index out of bounds: {0}")]
    IndexError(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Generic error with code {code}: {message}")]
    Generic { code: Code, message: String },
}

impl TilexError {
    /// Create a new error with a specific code and message
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        TilexError::Generic {
            code,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> Code {
        match self {
            TilexError::Arrow(_) => Code::ExecutionError,
            TilexError::Invalid(_) => Code::Invalid,
            TilexError::TypeError(_) => Code::TypeError,
            TilexError::IndexError(_) => Code::IndexError,
            TilexError::NotImplemented(_) => Code::NotImplemented,
            TilexError::Generic { code, .. } => *code,
        }
    }
}

/// Type alias for Results using TilexError
pub type TilexResult<T> = Result<T, TilexError>;
