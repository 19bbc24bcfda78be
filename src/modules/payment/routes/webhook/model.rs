use serde::Deserialize;

pub const CHARGE_COMPLETED: &str = "charge.completed";

#[derive(Deserialize, Debug)]
pub struct Event {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Deserialize, Debug)]
pub struct ChargeCompleted {
    pub tx_ref: String,
    pub status: String,
    #[serde(default)]
    pub amount: Option<f64>,
}
