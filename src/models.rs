//! Sample models bundled with the command line tool.
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::node::Node;
use crate::options::GenerateOptions;

// ————————————————————————————————————————————————————————————————————————————
// MODELS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: u64,
    pub reference: String,
    pub placed_at: DateTime<Utc>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
    pub note: Option<String>,
    pub gift: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub loyalty_points: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u16,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_name: String,
    pub birthday: NaiveDate,
    pub scores: HashMap<String, u32>,
    pub tags: Vec<String>,
    pub location: (f64, f64),
    pub initial: char,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inventory {
    pub warehouse: String,
    pub shelves: [Shelf; 3],
    pub audited_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Shelf {
    pub label: String,
    pub bins: Vec<Option<i32>>,
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

pub struct Model {
    pub name: &'static str,
    pub about: &'static str,
    generate: fn(&GenerateOptions) -> Result<Node>,
    verify: fn(&str) -> Result<()>,
}

impl Model {
    fn of<T: DeserializeOwned>(name: &'static str, about: &'static str) -> Self {
        Self {
            name,
            about,
            generate: |options| crate::generate_node::<T>(options),
            verify: |json| crate::verify::<T>(json).map(drop),
        }
    }

    pub fn generate(&self, options: &GenerateOptions) -> Result<Node> {
        (self.generate)(options)
    }

    /// Decode `json` as this model; errors name the failing JSON path.
    pub fn verify(&self, json: &str) -> Result<()> {
        (self.verify)(json)
    }
}

pub fn all() -> Vec<Model> {
    vec![
        Model::of::<Order>("order", "an order with a customer, line items and timestamps"),
        Model::of::<Profile>("profile", "a user profile with a score map, a tuple and a date"),
        Model::of::<Inventory>("inventory", "a warehouse with a fixed array of shelves"),
    ]
}

pub fn find(name: &str) -> Option<Model> {
    all().into_iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_model_round_trips() {
        let options = GenerateOptions::default().with_seed(11);
        for model in all() {
            let node = model.generate(&options).unwrap();
            let json = String::from_utf8(crate::encode(&node).unwrap()).unwrap();
            model.verify(&json).unwrap_or_else(|e| panic!("{}: {e}", model.name));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find("Order").is_some());
        assert!(find("nope").is_none());
    }
}
