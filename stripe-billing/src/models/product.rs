use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Product {
    pub id: String,
    pub object: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
    /// Default price id. Unset until a price is attached.
    pub default_price: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub created: i64,
}
