use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::product::{PizzaSize, PizzaType};

/// Pricing failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(i64),
}

/// Immutable unit prices (in Naira) keyed by pizza type and size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    prices: BTreeMap<(PizzaType, PizzaSize), i64>,
}

impl PriceTable {
    /// Build a table from explicit entries. Missing combinations are reported as invalid selections.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PizzaType, PizzaSize, i64)>,
    {
        Self {
            prices: entries
                .into_iter()
                .map(|(t, s, price)| ((t, s), price))
                .collect(),
        }
    }

    pub fn unit_price(&self, pizza_type: PizzaType, size: PizzaSize) -> Option<i64> {
        self.prices.get(&(pizza_type, size)).copied()
    }

    /// Menu listing: every pizza type that has at least one priced size
    pub fn pizza_types(&self) -> Vec<PizzaType> {
        let mut types: Vec<PizzaType> = self.prices.keys().map(|(t, _)| *t).collect();
        types.dedup();
        types
    }

    pub fn pizza_sizes(&self) -> Vec<PizzaSize> {
        PizzaSize::ALL.to_vec()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        use PizzaSize::*;
        use PizzaType::*;

        Self::from_entries([
            (Margherita, Small, 2500),
            (Margherita, Medium, 3500),
            (Margherita, Large, 4500),
            (Pepperoni, Small, 3000),
            (Pepperoni, Medium, 4000),
            (Pepperoni, Large, 5500),
            (Hawaiian, Small, 2800),
            (Hawaiian, Medium, 3800),
            (Hawaiian, Large, 5000),
            (Vegetarian, Small, 2600),
            (Vegetarian, Medium, 3600),
            (Vegetarian, Large, 4800),
            (BbqChicken, Small, 3200),
            (BbqChicken, Medium, 4200),
            (BbqChicken, Large, 5800),
        ])
    }
}

/// Computed price for a selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub pizza_type: PizzaType,
    pub pizza_size: PizzaSize,
    pub quantity: u32,
    pub unit_price: i64,
    pub total_price: i64,
    pub formatted_total: String,
}

/// Table-driven pizza pricing. Pure: no clock, no I/O.
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    table: PriceTable,
}

impl PricingCalculator {
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn quote(&self, pizza_type: PizzaType, size: PizzaSize, quantity: u32) -> Result<Quote, PricingError> {
        if quantity < 1 {
            return Err(PricingError::InvalidQuantity(quantity as i64));
        }

        let unit_price = self.table.unit_price(pizza_type, size).ok_or_else(|| {
            PricingError::InvalidSelection(format!("{} ({}) is not on the menu", pizza_type, size))
        })?;
        let total_price = unit_price * quantity as i64;

        Ok(Quote {
            pizza_type,
            pizza_size: size,
            quantity,
            unit_price,
            total_price,
            formatted_total: format_naira(total_price),
        })
    }

    /// Quote from raw menu names as submitted by a customer
    pub fn quote_named(&self, pizza_type: &str, size: &str, quantity: u32) -> Result<Quote, PricingError> {
        if quantity < 1 {
            return Err(PricingError::InvalidQuantity(quantity as i64));
        }
        self.quote(pizza_type.parse()?, size.parse()?, quantity)
    }
}

/// `7000` -> `₦7,000`
pub fn format_naira(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-₦{}", grouped)
    } else {
        format!("₦{}", grouped)
    }
}
