pub mod product;
pub mod pricing;

pub use product::{PizzaType, PizzaSize};
pub use pricing::{PriceTable, PricingCalculator, PricingError, Quote};
