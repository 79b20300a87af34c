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

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use fetch_loan::{encode_loan_hex, IndexerClient, Loan, DEFAULT_INDEXER_URL};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Fetch a loan from the indexer and print it as ABI encoded `Loan` return data.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Id of the loan, matched exactly
    loan_id: String,

    /// URL of the GraphQL indexer
    #[arg(long, env = "INDEXER_URL", default_value = DEFAULT_INDEXER_URL)]
    indexer_url: Url,

    /// Request timeout in seconds, waits indefinitely if not set
    #[arg(long, env = "INDEXER_TIMEOUT")]
    timeout: Option<u64>,
}

/// Run the CLI.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout only carries the encoded loan.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut client = IndexerClient::new(args.indexer_url)?;
    if let Some(secs) = args.timeout {
        client = client.with_timeout(Duration::from_secs(secs))?;
    }

    let indexed = client
        .loan_by_id(&args.loan_id)
        .await
        .with_context(|| format!("failed to fetch loan {}", args.loan_id))?;
    let loan = Loan::try_from(indexed).context("failed to convert indexed loan")?;

    let output = encode_loan_hex(&loan);
    info!(
        id = %args.loan_id,
        bytes = (output.len() - 2) / 2,
        "encoded loan"
    );

    // Forge test FFI calls expect hex encoded bytes sent to stdout
    print!("{output}");
    std::io::stdout()
        .flush()
        .context("failed to flush stdout buffer")?;
    Ok(())
}
