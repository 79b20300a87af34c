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

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Indexer record of the loan with id `0x1`.
pub fn scenario_record() -> Value {
    json!({
        "id": "0x1",
        "issuer": "0xCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC",
        "originator": "0xDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDDD",
        "start": "1000",
        "terms": {
            "pricing": "0x0",
            "pricingData": "0x",
            "settlement": "0x0",
            "settlementData": "0x",
            "status": "0x0",
            "statusData": "0x"
        },
        "custodian": "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        "collateral": [],
        "borrower": "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB",
        "debt": [{
            "token": "0xEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEE",
            "itemType": 1,
            "identifier": "0",
            "amount": "5"
        }]
    })
}

/// Responds to the loan query for `id` with the given GraphQL response body.
pub async fn mount_response(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "id": id } })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Responds to the loan query for `id` with the given loans.
pub async fn mount_loans(server: &MockServer, id: &str, loans: Vec<Value>) {
    let body = json!({ "data": { "loans": loans } });
    mount_response(server, id, ResponseTemplate::new(200).set_body_json(body)).await;
}

pub fn endpoint(server: &MockServer) -> String {
    format!("{}{GRAPHQL_PATH}", server.uri())
}
