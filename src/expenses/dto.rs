use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub category_id: Option<Uuid>,
    pub item: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub item: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}
