use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}
