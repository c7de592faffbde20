//! Wire types for the anchor's SEP-6 API and its `stellar.toml`
//!
//! Anchors omit fields freely, so every optional part of a response
//! defaults instead of failing the decode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The subset of `stellar.toml` the client needs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StellarToml {
    #[serde(rename = "SIGNING_KEY", default)]
    pub signing_key: Option<String>,
}

// ============================================================================
// GET /info
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoResponse {
    pub deposit: HashMap<String, AssetDetails>,
    pub withdraw: HashMap<String, WithdrawDetails>,
    pub transaction: EndpointDetails,
    pub transactions: EndpointDetails,
    pub features: Features,
    pub fee: EndpointDetails,
    #[serde(rename = "deposit-exchange")]
    pub deposit_exchange: EndpointDetails,
    #[serde(rename = "withdraw-exchange")]
    pub withdraw_exchange: EndpointDetails,
    pub supply: HashMap<String, SupplyDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDetails {
    pub enabled: bool,
    pub min_amount: f64,
    pub max_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_fixed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_percent: Option<f64>,
    pub authentication_required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawDetails {
    #[serde(flatten)]
    pub asset: AssetDetails,
    pub types: HashMap<String, WithdrawTypeDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawTypeDetails {
    pub fields: HashMap<String, FieldDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDetails {
    pub description: String,
    pub optional: bool,
}

/// Enabled/auth toggle shared by `transaction`, `transactions`, `fee` and the exchange endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointDetails {
    pub enabled: bool,
    pub authentication_required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub account_creation: bool,
    pub claimable_balances: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyDetails {
    pub circulating_supply: f64,
    pub circulating_supply_components: SupplyComponents,
    pub hotwallet_reserves: f64,
    pub coldwallet_reserves: f64,
    pub total_reserves: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyComponents {
    pub amount: f64,
    pub claimable_balances_amount: f64,
    pub liquidity_pools_amount: f64,
}

// ============================================================================
// Transactions
// ============================================================================

/// Error body some anchors return alongside non-200 statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// `{"transaction": {...}}`, used by `GET /transaction` and by status callbacks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionResponse {
    pub transaction: Transaction,
}

/// A deposit or withdrawal as reported by the anchor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: String,
    pub kind: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stellar_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_transaction_id: Option<String>,
}

// ============================================================================
// GET /deposit
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositResponse {
    pub how: String,
    pub instructions: HashMap<String, FinancialAccountField>,
    pub id: String,
    pub eta: Option<u64>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub fee_fixed: Option<String>,
    pub fee_percent: Option<f64>,
    pub extra_info: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialAccountField {
    pub value: String,
    pub description: String,
}

/// Sort order accepted by `GET /transactions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl std::str::FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            other => Err(format!("unknown order '{}', expected asc or desc", other)),
        }
    }
}
