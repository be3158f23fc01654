use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::pricing::PricingError;

/// Pizza types on the menu
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PizzaType {
    Margherita,
    Pepperoni,
    Hawaiian,
    Vegetarian,
    #[serde(rename = "BBQ Chicken")]
    BbqChicken,
}

impl PizzaType {
    pub const ALL: [PizzaType; 5] = [
        PizzaType::Margherita,
        PizzaType::Pepperoni,
        PizzaType::Hawaiian,
        PizzaType::Vegetarian,
        PizzaType::BbqChicken,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaType::Margherita => "Margherita",
            PizzaType::Pepperoni => "Pepperoni",
            PizzaType::Hawaiian => "Hawaiian",
            PizzaType::Vegetarian => "Vegetarian",
            PizzaType::BbqChicken => "BBQ Chicken",
        }
    }
}

impl fmt::Display for PizzaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PizzaType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PizzaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PricingError::InvalidSelection(format!("unknown pizza type '{}'", s)))
    }
}

/// Pizza sizes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

impl PizzaSize {
    pub const ALL: [PizzaSize; 3] = [PizzaSize::Small, PizzaSize::Medium, PizzaSize::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaSize::Small => "Small",
            PizzaSize::Medium => "Medium",
            PizzaSize::Large => "Large",
        }
    }
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PizzaSize {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PizzaSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| PricingError::InvalidSelection(format!("unknown pizza size '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_round_trip() {
        for t in PizzaType::ALL {
            assert_eq!(t.as_str().parse::<PizzaType>().unwrap(), t);
        }
        for s in PizzaSize::ALL {
            assert_eq!(s.as_str().parse::<PizzaSize>().unwrap(), s);
        }
    }

    #[test]
    fn test_serde_uses_menu_names() {
        assert_eq!(serde_json::to_string(&PizzaType::BbqChicken).unwrap(), "\"BBQ Chicken\"");
        assert_eq!(serde_json::to_string(&PizzaSize::Medium).unwrap(), "\"Medium\"");
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert!(matches!("Hawaii".parse::<PizzaType>(), Err(PricingError::InvalidSelection(_))));
        assert!(matches!("medium".parse::<PizzaSize>(), Err(PricingError::InvalidSelection(_))));
    }
}
