//! Customer and metafield types shared by the Admin API client and the server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Projection of a Shopify Admin API customer record.
///
/// Upstream returns dozens of fields; deserializing into this struct keeps
/// only the four the lookup endpoint exposes. `email` and the name fields are
/// `null` for guest or partially-filled customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A namespaced key/value attribute attached to a customer.
///
/// `value` is kept as raw JSON. Current API versions always send a string,
/// older ones send integers and booleans for typed metafields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metafield {
    pub namespace: String,
    pub key: String,
    pub value: serde_json::Value,
}

/// Metafields flattened to `"namespace:key" -> value`.
pub type MetafieldMap = BTreeMap<String, serde_json::Value>;

/// Builds the `namespace:key` lookup key. Colons inside either part are not escaped.
#[must_use]
pub fn composite_key(namespace: &str, key: &str) -> String {
    format!("{namespace}:{key}")
}

/// Folds metafields into a [`MetafieldMap`] in iteration order.
///
/// When two metafields share a composite key the later one wins.
pub fn fold_metafields<I>(metafields: I) -> MetafieldMap
where
    I: IntoIterator<Item = Metafield>,
{
    metafields.into_iter().fold(MetafieldMap::new(), |mut map, m| {
        map.insert(composite_key(&m.namespace, &m.key), m.value);
        map
    })
}
