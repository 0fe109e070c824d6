//! Request/response data for the typed call helpers.
//!
//! Only the commonly used fields are modelled; anything else goes into the
//! `extension` map and is sent (and signed) as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositRequest {
    #[serde(rename = "NotificationURL")]
    pub notification_url: String,
    #[serde(rename = "EndUserID")]
    pub end_user_id: String,
    #[serde(rename = "MessageID")]
    pub message_id: String,
    #[serde(rename = "Attributes", default)]
    pub attributes: DepositAttributes,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

/// Optional deposit attributes; unset fields are left off the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositAttributes {
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Locale", skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(rename = "Firstname", skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(rename = "Lastname", skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "SuccessURL", skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(rename = "FailURL", skip_serializing_if = "Option::is_none")]
    pub fail_url: Option<String>,
    #[serde(rename = "ShopperStatement", skip_serializing_if = "Option::is_none")]
    pub shopper_statement: Option<String>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepositResponse {
    #[serde(default)]
    pub orderid: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefundRequest {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefundResponse {
    #[serde(default)]
    pub orderid: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceRequest {
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceEntry {
    pub currency: String,
    pub balance: String,
}
