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

//! A minimal client for the loan GraphQL indexer.

use crate::{Error, Result};
use reqwest::IntoUrl;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Endpoint of a locally running indexer.
pub const DEFAULT_INDEXER_URL: &str = "http://localhost:4000/graphql";

/// Query selecting every field of the loan whose id equals `$id`.
pub const LOAN_BY_ID_QUERY: &str = r#"query LoanById($id: String!) {
  loans(where: { id_eq: $id }) {
    id
    start
    custodian
    borrower
    issuer
    originator
    collateral {
      itemType
      token
      identifier
      amount
    }
    debt {
      itemType
      token
      identifier
      amount
    }
    terms {
      status
      statusData
      pricing
      pricingData
      settlement
      settlementData
    }
  }
}"#;

/// Numeric value as served by the indexer, either a JSON number or a string.
///
/// Strings are decimal unless prefixed with `0x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Loan record in the shape returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedLoan {
    #[serde(default)]
    pub id: Option<String>,
    pub start: Quantity,
    pub custodian: String,
    pub borrower: String,
    pub issuer: String,
    pub originator: String,
    pub collateral: Vec<IndexedItem>,
    pub debt: Vec<IndexedItem>,
    pub terms: IndexedTerms,
}

/// Spent item in the shape returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedItem {
    pub item_type: Quantity,
    pub token: String,
    pub identifier: Quantity,
    pub amount: Quantity,
}

/// Loan terms in the shape returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedTerms {
    pub status: String,
    pub status_data: String,
    pub pricing: String,
    pub pricing_data: String,
    pub settlement: String,
    pub settlement_data: String,
}

#[derive(Debug, Serialize)]
struct Request<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Serialize)]
struct LoanByIdVariables<'a> {
    id: &'a str,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoansData {
    loans: Vec<serde_json::Value>,
}

/// Client for the loan indexer.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl IndexerClient {
    /// Creates a new client for the given GraphQL endpoint.
    pub fn new<U: IntoUrl>(endpoint: U) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into_url()?,
        })
    }

    /// Sets a timeout for the whole request. Without it, requests wait indefinitely.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, ..self })
    }

    async fn post_query<V: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<R> {
        let request = Request { query, variables };
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;
        // GraphQL servers may report errors with a 4xx status, keep their messages
        let status = resp.error_for_status_ref().err();
        let resp: Response<R> = match (resp.json::<Response<R>>().await, status) {
            (Ok(resp), _) if !resp.errors.is_empty() => {
                let messages: Vec<_> = resp.errors.into_iter().map(|e| e.message).collect();
                return Err(Error::GraphQl(messages.join("; ")));
            }
            (_, Some(err)) | (Err(err), None) => return Err(err.into()),
            (Ok(resp), None) => resp,
        };
        resp.data.ok_or(Error::MissingData)
    }

    /// Fetches the loan whose id equals `id` exactly.
    ///
    /// Only the first match is returned. An empty result is reported as
    /// [Error::LoanNotFound].
    pub async fn loan_by_id(&self, id: &str) -> Result<IndexedLoan> {
        if id.is_empty() {
            return Err(Error::EmptyLoanId);
        }
        debug!(endpoint = %self.endpoint, id, "querying indexer for loan");

        let data: LoansData = self
            .post_query(LOAN_BY_ID_QUERY, LoanByIdVariables { id })
            .await?;
        debug!(matches = data.loans.len(), "indexer responded");

        let record = data
            .loans
            .into_iter()
            .next()
            .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;
        let loan: IndexedLoan = serde_json::from_value(record)?;
        info!(id = loan.id.as_deref().unwrap_or(id), "fetched loan");

        Ok(loan)
    }
}
