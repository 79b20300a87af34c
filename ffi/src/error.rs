// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::result::Result as StdResult;

/// Errors returned while fetching or encoding a loan.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("indexer returned errors: {0}")]
    GraphQl(String),
    #[error("response does not contain data")]
    MissingData,
    #[error("loan id must not be empty")]
    EmptyLoanId,
    #[error("loan not found: {0}")]
    LoanNotFound(String),
    #[error("loan record does not match the schema: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// Alias for Results returned by this crate.
pub type Result<T> = StdResult<T, Error>;

impl Error {
    pub(crate) fn invalid_field(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Prefixes the field path of an [Error::InvalidField] with its parent.
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            Self::InvalidField { field, reason } => Self::InvalidField {
                field: format!("{parent}.{field}"),
                reason,
            },
            other => other,
        }
    }
}
