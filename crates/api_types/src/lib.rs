use serde::{Deserialize, Deserializer, Serialize};

/// Generic acknowledgement body, also used for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub success: bool,
    pub message: String,
}

impl Message {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`).
///
/// Must be paired with `#[serde(default)]`.
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HealthStatus {
        pub status: String,
    }
}

pub mod user {
    use super::*;

    /// Body of register, login and user update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub user_id: i32,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserListResponse {
        pub success: bool,
        pub message: String,
        pub data: Vec<UserView>,
    }
}

pub mod expense {
    use super::*;

    /// Amounts are kept as text. Clients may still send a JSON number, which
    /// is stored as the shortest decimal text of its parsed value. That is
    /// lossy: `12.50` becomes `"12.5"` and integers past `i64` go through
    /// `f64`. A string amount is kept verbatim.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AmountRepr {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    impl AmountRepr {
        fn into_text(self) -> String {
            match self {
                Self::Text(text) => text,
                Self::Integer(n) => n.to_string(),
                Self::Float(n) => n.to_string(),
            }
        }
    }

    fn amount<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        AmountRepr::deserialize(deserializer).map(AmountRepr::into_text)
    }

    fn optional_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<AmountRepr>::deserialize(deserializer)
            .map(|value| value.map(AmountRepr::into_text))
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(default)]
        pub title: Option<String>,
        pub description: String,
        #[serde(deserialize_with = "amount")]
        pub amount: String,
        pub category: String,
        #[serde(default)]
        pub user_id: Option<i32>,
    }

    /// Partial update: only the keys present in the body are applied.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(
            default,
            deserialize_with = "explicit_null",
            skip_serializing_if = "Option::is_none"
        )]
        pub title: Option<Option<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(
            default,
            deserialize_with = "optional_amount",
            skip_serializing_if = "Option::is_none"
        )]
        pub amount: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(
            default,
            deserialize_with = "explicit_null",
            skip_serializing_if = "Option::is_none"
        )]
        pub user_id: Option<Option<i32>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub title: Option<String>,
        pub description: String,
        pub amount: String,
        pub date: String,
        pub category: String,
        pub user_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        pub success: bool,
        pub data: ExpenseView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub success: bool,
        pub data: Vec<ExpenseView>,
    }
}
