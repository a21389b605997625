//! # Drink Customization
//!
//! The customization triple that, together with a product id, forms a
//! cart line's identity.
//!
//! ## Identity Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  (product, customization) is the merge key                          │
//! │                                                                     │
//! │  espresso  + Medium/Hot/Normal   ──┐                                │
//! │  espresso  + Medium/Hot/Normal   ──┴──► ONE line, quantity 2        │
//! │                                                                     │
//! │  espresso  + Medium/Hot/Normal   ──────► line A                     │
//! │  espresso  + Large/Cold/Extra    ──────► line B (never merges)      │
//! │  espresso  + (no customization)  ──────► line C (never merges)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line with no customization (`None` at the cart level) is distinct
//! from every customized line of the same product.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Size
// =============================================================================

/// Drink size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Default for Size {
    fn default() -> Self {
        Size::Medium
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Small => write!(f, "Small"),
            Size::Medium => write!(f, "Medium"),
            Size::Large => write!(f, "Large"),
        }
    }
}

// =============================================================================
// Temperature
// =============================================================================

/// Serving temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    Hot,
    Cold,
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature::Hot
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Hot => write!(f, "Hot"),
            Temperature::Cold => write!(f, "Cold"),
        }
    }
}

// =============================================================================
// Sweetness
// =============================================================================

/// Sugar level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sweetness {
    NoSugar,
    Less,
    Normal,
    Extra,
}

impl Default for Sweetness {
    fn default() -> Self {
        Sweetness::Normal
    }
}

impl fmt::Display for Sweetness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sweetness::NoSugar => write!(f, "No Sugar"),
            Sweetness::Less => write!(f, "Less"),
            Sweetness::Normal => write!(f, "Normal"),
            Sweetness::Extra => write!(f, "Extra"),
        }
    }
}

// =============================================================================
// Customization
// =============================================================================

/// The full customization signature: size, temperature, sweetness.
///
/// Rendered in that fixed order wherever lines are flattened to text
/// (cart display, history records): `"Medium/Hot/Normal"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Customization {
    pub size: Size,
    pub temperature: Temperature,
    pub sweetness: Sweetness,
}

impl Customization {
    /// Creates a customization from its three components.
    pub const fn new(size: Size, temperature: Temperature, sweetness: Sweetness) -> Self {
        Customization {
            size,
            temperature,
            sweetness,
        }
    }
}

impl fmt::Display for Customization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.size, self.temperature, self.sweetness)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fixed_order() {
        let custom = Customization::new(Size::Large, Temperature::Cold, Sweetness::NoSugar);
        assert_eq!(custom.to_string(), "Large/Cold/No Sugar");
    }

    #[test]
    fn test_default_matches_order_form() {
        // The order form pre-selects Medium / Hot / Normal.
        let custom = Customization::default();
        assert_eq!(custom.to_string(), "Medium/Hot/Normal");
    }

    #[test]
    fn test_equality_is_componentwise() {
        let a = Customization::new(Size::Small, Temperature::Hot, Sweetness::Extra);
        let b = Customization::new(Size::Small, Temperature::Hot, Sweetness::Extra);
        let c = Customization::new(Size::Small, Temperature::Cold, Sweetness::Extra);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
