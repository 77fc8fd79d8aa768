use serde::de::{self, Deserializer};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Product identifier, assigned by the remote store.
///
/// The store is free to issue string or numeric ids; both deserialize to
/// the same textual form and compare by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(de::Error::custom(format!(
                "product id must be a string or number, got {other}"
            ))),
        }
    }
}

/// Human-facing product code. Not guaranteed unique by this layer and may
/// arrive as a string or a number; search compares it as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductIndex(String);

impl ProductIndex {
    pub fn new(index: impl Into<String>) -> Self {
        Self(index.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for ProductIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(de::Error::custom(format!(
                "product index must be a string or number, got {other}"
            ))),
        }
    }
}

/// Restock threshold metadata attached to a product.
///
/// The store sometimes hands this back as a structured mapping and
/// sometimes as a serialized-text encoding of that mapping. Decoding
/// normalizes to [`AlertConfig::Structured`]; anything that fails to
/// decode is kept verbatim as [`AlertConfig::Raw`] so a later write does
/// not destroy it. Decoding never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AlertConfig {
    /// Decoded threshold mapping.
    Structured { min_quantity: u32 },
    /// Blob that did not decode to a threshold mapping; kept opaque.
    Raw(String),
    #[default]
    Absent,
}

impl AlertConfig {
    /// The decoded restock threshold, if one could be extracted.
    pub fn min_quantity(&self) -> Option<u32> {
        match self {
            Self::Structured { min_quantity } => Some(*min_quantity),
            Self::Raw(_) | Self::Absent => None,
        }
    }

    fn decode(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Object(map) => match threshold_from(&map) {
                Some(min_quantity) => Self::Structured { min_quantity },
                None => Self::Raw(Value::Object(map).to_string()),
            },
            Value::String(text) => match serde_json::from_str::<Value>(&text) {
                // A string payload may embed the mapping as JSON text; if
                // the embedded value still fails, keep the original text.
                Ok(inner @ Value::Object(_)) => match Self::decode(inner) {
                    Self::Raw(_) => Self::Raw(text),
                    decoded => decoded,
                },
                _ => Self::Raw(text),
            },
            other => Self::Raw(other.to_string()),
        }
    }
}

fn threshold_from(map: &serde_json::Map<String, Value>) -> Option<u32> {
    match map.get("min_quantity")? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Serialize for AlertConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Structured { min_quantity } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("min_quantity", min_quantity)?;
                map.end()
            }
            Self::Raw(text) => serializer.serialize_str(text),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for AlertConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(v) => Self::decode(v),
            None => Self::Absent,
        })
    }
}

/// A catalog record as mirrored from the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub product_index: Option<ProductIndex>,
    pub name: String,
    #[serde(deserialize_with = "de_price")]
    pub buying_price: f64,
    #[serde(deserialize_with = "de_price")]
    pub selling_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub alert_config: AlertConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Creation payload. The store assigns the id and returns the canonical
/// record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_index: Option<ProductIndex>,
    pub name: String,
    pub buying_price: f64,
    pub selling_price: f64,
    pub quantity: u32,
    pub alert_config: AlertConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial update payload; only the fields present are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_index: Option<ProductIndex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buying_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_config: Option<AlertConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Decode a price that may arrive as a JSON number or a numeric string.
fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("price out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("price is not numeric: {s:?}"))),
        other => Err(de::Error::custom(format!(
            "price must be a number or numeric string, got {other}"
        ))),
    }
}
