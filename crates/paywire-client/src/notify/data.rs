//! Typed notification payloads.
//!
//! The method string maps to a fixed [`DataShape`]; each shape decodes into
//! one [`NotificationData`] variant. Fields the static structs do not know
//! land in `extension`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use paywire_core::error::{PaywireError, Result};

/// Decoder tag declared at listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataShape {
    Credit,
    Debit,
    Pending,
    Cancel,
    Account,
    PayoutConfirmation,
    Kyc,
    /// Keep the data node as-is.
    Raw,
}

impl DataShape {
    /// Shape the protocol defines for a (case-insensitive) method name.
    pub fn for_method(method: &str) -> DataShape {
        match method.to_ascii_lowercase().as_str() {
            "credit" => DataShape::Credit,
            "debit" => DataShape::Debit,
            "pending" => DataShape::Pending,
            "cancel" => DataShape::Cancel,
            "account" => DataShape::Account,
            "payoutconfirmation" => DataShape::PayoutConfirmation,
            "kyc" => DataShape::Kyc,
            _ => DataShape::Raw,
        }
    }

    pub fn decode(self, data: &Value) -> Result<NotificationData> {
        Ok(match self {
            DataShape::Credit => NotificationData::Credit(decode(data, "credit")?),
            DataShape::Debit => NotificationData::Debit(decode(data, "debit")?),
            DataShape::Pending => NotificationData::Pending(decode(data, "pending")?),
            DataShape::Cancel => NotificationData::Cancel(decode(data, "cancel")?),
            DataShape::Account => NotificationData::Account(decode(data, "account")?),
            DataShape::PayoutConfirmation => {
                NotificationData::PayoutConfirmation(decode(data, "payoutconfirmation")?)
            }
            DataShape::Kyc => NotificationData::Kyc(decode(data, "kyc")?),
            DataShape::Raw => NotificationData::Raw(data.clone()),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(data: &Value, what: &str) -> Result<T> {
    serde_json::from_value(data.clone())
        .map_err(|e| PaywireError::Data(format!("invalid {what} notification data: {e}")))
}

/// Decoded notification data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NotificationData {
    Credit(CreditData),
    Debit(DebitData),
    Pending(PendingData),
    Cancel(CancelData),
    Account(AccountData),
    PayoutConfirmation(PayoutConfirmationData),
    Kyc(KycData),
    Raw(Value),
}

impl NotificationData {
    pub fn shape(&self) -> DataShape {
        match self {
            NotificationData::Credit(_) => DataShape::Credit,
            NotificationData::Debit(_) => DataShape::Debit,
            NotificationData::Pending(_) => DataShape::Pending,
            NotificationData::Cancel(_) => DataShape::Cancel,
            NotificationData::Account(_) => DataShape::Account,
            NotificationData::PayoutConfirmation(_) => DataShape::PayoutConfirmation,
            NotificationData::Kyc(_) => DataShape::Kyc,
            NotificationData::Raw(_) => DataShape::Raw,
        }
    }

    /// JSON form of the decoded data (input to validators).
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| PaywireError::Data(format!("notification data encode failed: {e}")))
    }
}

/// Payload types that can be registered for directly.
pub trait NotificationPayload: Send + Sync + 'static {
    const METHOD: &'static str;
    const SHAPE: DataShape;

    fn from_data(data: &NotificationData) -> Option<&Self>;
}

macro_rules! amount_notification {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $method:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(default)]
            pub amount: Option<String>,
            #[serde(default)]
            pub currency: Option<String>,
            #[serde(default)]
            pub messageid: Option<String>,
            #[serde(default)]
            pub orderid: Option<String>,
            #[serde(default)]
            pub enduserid: Option<String>,
            #[serde(default)]
            pub notificationid: Option<String>,
            #[serde(default)]
            pub timestamp: Option<String>,
            #[serde(default)]
            pub attributes: Option<Map<String, Value>>,
            #[serde(flatten)]
            pub extension: Map<String, Value>,
        }

        impl NotificationPayload for $name {
            const METHOD: &'static str = $method;
            const SHAPE: DataShape = DataShape::$variant;

            fn from_data(data: &NotificationData) -> Option<&Self> {
                match data {
                    NotificationData::$variant(d) => Some(d),
                    _ => None,
                }
            }
        }
    };
}

amount_notification!(
    /// Funds credited to the merchant account.
    CreditData, Credit, "credit"
);
amount_notification!(
    /// Funds debited (e.g. a reversed deposit).
    DebitData, Debit, "debit"
);
amount_notification!(
    /// Deposit initiated but not yet settled.
    PendingData, Pending, "pending"
);
amount_notification!(PayoutConfirmationData, PayoutConfirmation, "payoutconfirmation");

/// Order cancelled by the end user or the remote side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelData {
    #[serde(default)]
    pub messageid: Option<String>,
    #[serde(default)]
    pub orderid: Option<String>,
    #[serde(default)]
    pub enduserid: Option<String>,
    #[serde(default)]
    pub notificationid: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

impl NotificationPayload for CancelData {
    const METHOD: &'static str = "cancel";
    const SHAPE: DataShape = DataShape::Cancel;

    fn from_data(data: &NotificationData) -> Option<&Self> {
        match data {
            NotificationData::Cancel(d) => Some(d),
            _ => None,
        }
    }
}

/// End-user bank account selected or verified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(default)]
    pub messageid: Option<String>,
    #[serde(default)]
    pub orderid: Option<String>,
    #[serde(default)]
    pub notificationid: Option<String>,
    #[serde(default)]
    pub accountid: Option<String>,
    #[serde(default)]
    pub verified: Option<Value>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

impl AccountData {
    /// `verified` arrives as `"1"`/`"0"` or a boolean.
    pub fn is_verified(&self) -> bool {
        match &self.verified {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        }
    }
}

impl NotificationPayload for AccountData {
    const METHOD: &'static str = "account";
    const SHAPE: DataShape = DataShape::Account;

    fn from_data(data: &NotificationData) -> Option<&Self> {
        match data {
            NotificationData::Account(d) => Some(d),
            _ => None,
        }
    }
}

/// Identity check outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KycData {
    #[serde(default)]
    pub notificationid: Option<String>,
    #[serde(default)]
    pub messageid: Option<String>,
    #[serde(default)]
    pub orderid: Option<String>,
    #[serde(default)]
    pub kycentityid: Option<String>,
    #[serde(default)]
    pub abort: Option<String>,
    #[serde(default)]
    pub abortmessage: Option<String>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extension: Map<String, Value>,
}

impl NotificationPayload for KycData {
    const METHOD: &'static str = "kyc";
    const SHAPE: DataShape = DataShape::Kyc;

    fn from_data(data: &NotificationData) -> Option<&Self> {
        match data {
            NotificationData::Kyc(d) => Some(d),
            _ => None,
        }
    }
}
