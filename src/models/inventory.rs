use serde::{Deserialize, Serialize};

/// Product row from the `inventory` table, scoped by branch
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub quantity: f64,
    pub expiry_date: String,
}
