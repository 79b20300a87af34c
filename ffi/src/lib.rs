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

//! Fetches Starport loans from a GraphQL indexer and ABI encodes them as the
//! return data of `encodeLoan(Loan) returns (Loan)`, ready for Forge FFI calls.

#![deny(rustdoc::broken_intra_doc_links)]

mod error;
pub mod indexer;
pub mod loan;

pub use error::{Error, Result};
pub use indexer::{IndexedLoan, IndexerClient, DEFAULT_INDEXER_URL};
pub use loan::{decode_loan, encode_loan, encode_loan_hex, Loan, SpentItem, Terms};
