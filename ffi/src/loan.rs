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

//! The loan schema and its ABI encoding.

use crate::{
    indexer::{IndexedItem, IndexedLoan, IndexedTerms, Quantity},
    Error, Result,
};
use alloy_primitives::{hex, Address, Bytes, U160, U256};
use alloy_sol_types::{sol, SolCall, SolValue};

sol! {
    /// Seaport item transferred as collateral or debt.
    #[derive(Debug, PartialEq, Eq)]
    struct SpentItem {
        uint8 itemType;
        address token;
        uint256 identifier;
        uint256 amount;
    }

    /// Hooks and their data governing the life of a loan.
    #[derive(Debug, PartialEq, Eq)]
    struct Terms {
        address status;
        bytes statusData;
        address pricing;
        bytes pricingData;
        address settlement;
        bytes settlementData;
    }

    /// Starport loan.
    #[derive(Debug, PartialEq, Eq)]
    struct Loan {
        uint256 start;
        address custodian;
        address borrower;
        address issuer;
        address originator;
        SpentItem[] collateral;
        SpentItem[] debt;
        Terms terms;
    }

    /// Pure helper returning its argument, which fixes the return data layout.
    function encodeLoan(Loan loan) external pure returns (Loan);
}

/// ABI encodes the loan as the return data of `encodeLoan`.
pub fn encode_loan(loan: &Loan) -> Vec<u8> {
    loan.abi_encode()
}

/// Returns [encode_loan] as a `0x` prefixed hex string.
pub fn encode_loan_hex(loan: &Loan) -> String {
    hex::encode_prefixed(encode_loan(loan))
}

/// Decodes the return data of `encodeLoan`.
pub fn decode_loan(data: &[u8]) -> Result<Loan> {
    Ok(encodeLoanCall::abi_decode_returns(data, true)?._0)
}

fn parse_uint(field: &str, value: &Quantity) -> Result<U256> {
    let text = match value {
        Quantity::Number(n) => return Ok(U256::from(*n)),
        Quantity::Text(s) => s.trim(),
    };
    let (digits, radix) = match text.strip_prefix("0x") {
        Some(digits) => (digits, 16),
        None => (text, 10),
    };
    if digits.is_empty() {
        return Err(Error::invalid_field(field, "empty"));
    }
    // ruint would otherwise skip `_` separators
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::invalid_field(field, format!("invalid digit in {text:?}")));
    }
    U256::from_str_radix(digits, radix.into()).map_err(|err| Error::invalid_field(field, err))
}

fn parse_u8(field: &str, value: &Quantity) -> Result<u8> {
    let value = parse_uint(field, value)?;
    if value > U256::from(u8::MAX) {
        return Err(Error::invalid_field(field, format!("{value} exceeds uint8")));
    }
    Ok(value.to::<u8>())
}

/// Parses a hex address. Short forms like `0x0` are left padded to 20 bytes.
fn parse_address(field: &str, value: &str) -> Result<Address> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| Error::invalid_field(field, "missing 0x prefix"))?;
    if digits.is_empty() {
        return Err(Error::invalid_field(field, "empty address"));
    }
    if digits.len() > 40 {
        return Err(Error::invalid_field(field, "longer than 20 bytes"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::invalid_field(field, "non-hex character"));
    }
    let value =
        U160::from_str_radix(digits, 16).map_err(|err| Error::invalid_field(field, err))?;
    Ok(Address::from(value.to_be_bytes::<20>()))
}

fn parse_bytes(field: &str, value: &str) -> Result<Bytes> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| Error::invalid_field(field, "missing 0x prefix"))?;
    let bytes = hex::decode(digits).map_err(|err| Error::invalid_field(field, err))?;
    Ok(bytes.into())
}

fn convert_items(field: &str, items: Vec<IndexedItem>) -> Result<Vec<SpentItem>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            SpentItem::try_from(item).map_err(|err| err.within(&format!("{field}[{i}]")))
        })
        .collect()
}

impl TryFrom<IndexedItem> for SpentItem {
    type Error = Error;

    fn try_from(item: IndexedItem) -> Result<Self> {
        Ok(Self {
            itemType: parse_u8("itemType", &item.item_type)?,
            token: parse_address("token", &item.token)?,
            identifier: parse_uint("identifier", &item.identifier)?,
            amount: parse_uint("amount", &item.amount)?,
        })
    }
}

impl TryFrom<IndexedTerms> for Terms {
    type Error = Error;

    fn try_from(terms: IndexedTerms) -> Result<Self> {
        Ok(Self {
            status: parse_address("status", &terms.status)?,
            statusData: parse_bytes("statusData", &terms.status_data)?,
            pricing: parse_address("pricing", &terms.pricing)?,
            pricingData: parse_bytes("pricingData", &terms.pricing_data)?,
            settlement: parse_address("settlement", &terms.settlement)?,
            settlementData: parse_bytes("settlementData", &terms.settlement_data)?,
        })
    }
}

impl TryFrom<IndexedLoan> for Loan {
    type Error = Error;

    fn try_from(loan: IndexedLoan) -> Result<Self> {
        Ok(Self {
            start: parse_uint("start", &loan.start)?,
            custodian: parse_address("custodian", &loan.custodian)?,
            borrower: parse_address("borrower", &loan.borrower)?,
            issuer: parse_address("issuer", &loan.issuer)?,
            originator: parse_address("originator", &loan.originator)?,
            collateral: convert_items("collateral", loan.collateral)?,
            debt: convert_items("debt", loan.debt)?,
            terms: Terms::try_from(loan.terms).map_err(|err| err.within("terms"))?,
        })
    }
}
