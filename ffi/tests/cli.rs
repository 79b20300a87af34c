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

use alloy_primitives::{hex, uint};
use alloy_sol_types::SolValue;
use fetch_loan::Loan;
use test_log::test;
use tokio::process::Command;
use wiremock::MockServer;

mod common;

const EXE_PATH: &str = env!("CARGO_BIN_EXE_fetch-loan");

async fn run(server: &MockServer, loan_id: &str) -> std::process::Output {
    let output = Command::new(EXE_PATH)
        .env_clear()
        .env("INDEXER_URL", common::endpoint(server))
        .arg(loan_id)
        .output()
        .await
        .unwrap();
    println!("{:#?}", &output);
    output
}

#[test(tokio::test)]
async fn prints_encoded_loan() {
    let server = MockServer::start().await;
    common::mount_loans(&server, "0x1", vec![common::scenario_record()]).await;

    let output = run(&server, "0x1").await;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("0x"));
    assert!(!stdout.ends_with('\n'));

    let encoded = hex::decode(stdout.strip_prefix("0x").unwrap()).unwrap();
    let loan = Loan::abi_decode(&encoded, true).unwrap();
    assert_eq!(loan.start, uint!(1000_U256));
    assert_eq!(loan.debt.len(), 1);
    assert_eq!(loan.debt[0].amount, uint!(5_U256));
}

#[test(tokio::test)]
async fn fails_for_unknown_loan() {
    let server = MockServer::start().await;
    common::mount_loans(&server, "0x2", vec![]).await;

    let output = run(&server, "0x2").await;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("loan not found: 0x2"));
}

#[test(tokio::test)]
async fn requires_loan_id() {
    let output = Command::new(EXE_PATH).env_clear().output().await.unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
