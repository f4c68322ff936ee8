//! # Add-to-Cart Validation
//!
//! The single enforcement point of the max-quantity policy.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Enforcement Layers                                 │
//! │                                                                         │
//! │  Layer 1: Quantity input (constraints.rs)                              │
//! │  ├── max_value advertised to the browser                               │
//! │  └── Advisory only: a shopper can type past it                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Counts what is already in the cart                                │
//! │  └── Rejects when in-cart + addition > limit                           │
//! │                                                                         │
//! │  Layer 1 is never trusted; layer 2 decides.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decision Table
//! ```text
//! limit unset                         → accept
//! in cart = E, adding P, E + P ≤ L    → accept
//! in cart = E, adding P, E + P > L    → reject (Cumulative, mentions E)
//! nothing in cart, P ≤ L              → accept
//! nothing in cart, P > L              → reject (SingleAddition)
//! ```
//! The limit is inclusive: reaching it exactly is allowed.

use crate::error::LimitExceeded;
use crate::lookup::quantity_in_cart;
use crate::types::{Cart, MaxQuantityLimit, ProductId, Quantity, ValidationResult};

/// Decides whether adding `quantity` of `product_id` keeps the product within
/// `limit`.
///
/// `product_name` is only used to build the rejection.
///
/// ## Returns
/// * `Ok(())` - The addition may proceed
/// * `Err(LimitExceeded)` - The addition must be blocked
pub fn check_addition(
    cart: &Cart,
    product_id: ProductId,
    quantity: Quantity,
    limit: MaxQuantityLimit,
    product_name: &str,
) -> Result<(), LimitExceeded> {
    let Some(max) = limit.get() else {
        return Ok(());
    };

    match quantity_in_cart(cart, product_id) {
        Some(in_cart) => {
            let total = u64::from(in_cart) + u64::from(quantity);
            if total > u64::from(max) {
                return Err(LimitExceeded::Cumulative {
                    limit: max,
                    product_name: product_name.to_string(),
                    cart_url: cart.url.clone(),
                    in_cart,
                });
            }
        }
        None => {
            // Backstop for a quantity typed past the advertised input maximum
            if quantity > max {
                return Err(LimitExceeded::SingleAddition {
                    limit: max,
                    product_name: product_name.to_string(),
                    cart_url: cart.url.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validates an add-to-cart attempt and renders the outcome for the host.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Shopper clicks "Add to cart" (qty 2, Mug, limit 5, 4 already in cart) │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_add_to_cart(..) ← THIS FUNCTION                              │
/// │       │                                                                 │
/// │       ├── accepted: false                                               │
/// │       └── message: "You can add a maximum of 5 Mug's to your cart.     │
/// │                     You already have 4."                                │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  Host shows the notice and skips the addition                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_add_to_cart(
    cart: &Cart,
    product_id: ProductId,
    quantity: Quantity,
    limit: MaxQuantityLimit,
    product_name: &str,
) -> ValidationResult {
    check_addition(cart, product_id, quantity, limit, product_name).into()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CartLine;

    const MUG: ProductId = ProductId::new(7);

    fn cart_with(in_cart: Option<Quantity>) -> Cart {
        let cart = Cart::new("https://shop.test/cart/");
        match in_cart {
            Some(qty) => cart.with_line(CartLine::new(MUG, qty)),
            None => cart,
        }
    }

    fn accepts(in_cart: Option<Quantity>, quantity: Quantity, limit: MaxQuantityLimit) -> bool {
        validate_add_to_cart(&cart_with(in_cart), MUG, quantity, limit, "Mug").accepted
    }

    #[test]
    fn test_unset_limit_always_accepts() {
        let limit = MaxQuantityLimit::unset();
        assert!(accepts(None, 1, limit));
        assert!(accepts(None, u32::MAX, limit));
        assert!(accepts(Some(u32::MAX), u32::MAX, limit));
    }

    #[test]
    fn test_empty_cart_boundary() {
        let limit = MaxQuantityLimit::new(5);
        assert!(accepts(None, 5, limit));
        assert!(!accepts(None, 6, limit));
    }

    #[test]
    fn test_existing_quantity_boundary() {
        let limit = MaxQuantityLimit::new(5);
        assert!(accepts(Some(4), 1, limit));
        assert!(!accepts(Some(4), 2, limit));
    }

    #[test]
    fn test_accepts_iff_total_within_limit() {
        for max in 1..=6 {
            let limit = MaxQuantityLimit::new(max);
            for existing in 0..=7 {
                for proposed in 1..=7 {
                    let in_cart = (existing > 0).then_some(existing);
                    assert_eq!(
                        accepts(in_cart, proposed, limit),
                        existing + proposed <= max,
                        "limit {max}, in cart {existing}, adding {proposed}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_repeated_single_additions_blocked_like_one_big_addition() {
        let limit = MaxQuantityLimit::new(2);
        let mut cart = Cart::new("/cart/");

        let mut outcomes = Vec::new();
        for _ in 0..3 {
            let result = validate_add_to_cart(&cart, MUG, 1, limit, "Mug");
            if result.accepted {
                let in_cart = quantity_in_cart(&cart, MUG).unwrap_or(0);
                cart.lines = vec![CartLine::new(MUG, in_cart + 1)];
            }
            outcomes.push(result.accepted);
        }

        assert_eq!(outcomes, vec![true, true, false]);
        assert!(!accepts(None, 3, limit));
    }

    #[test]
    fn test_cumulative_rejection_mentions_quantity_in_cart() {
        let result = validate_add_to_cart(&cart_with(Some(4)), MUG, 2, MaxQuantityLimit::new(5), "Mug");

        let message = result.message.unwrap();
        assert!(message.contains("maximum of 5"));
        assert!(message.contains("Mug's"));
        assert!(message.contains("href=\"https://shop.test/cart/\""));
        assert!(message.ends_with("You already have 4."));
    }

    #[test]
    fn test_single_addition_rejection_has_no_in_cart_clause() {
        let err = check_addition(&cart_with(None), MUG, 9, MaxQuantityLimit::new(5), "Mug").unwrap_err();

        assert_eq!(
            err,
            LimitExceeded::SingleAddition {
                limit: 5,
                product_name: "Mug".to_string(),
                cart_url: "https://shop.test/cart/".to_string(),
            }
        );
        assert!(!err.to_string().contains("already have"));
    }

    #[test]
    fn test_other_products_do_not_count() {
        let cart = Cart::new("/cart/").with_line(CartLine::new(ProductId::new(99), 5));
        assert!(validate_add_to_cart(&cart, MUG, 5, MaxQuantityLimit::new(5), "Mug").accepted);
    }

    #[test]
    fn test_malformed_line_does_not_affect_other_products() {
        let cart = cart_with(Some(1)).with_line(CartLine {
            key: "broken".to_string(),
            quantity: Some(50),
            ..CartLine::default()
        });

        assert!(validate_add_to_cart(&cart, MUG, 4, MaxQuantityLimit::new(5), "Mug").accepted);
    }

    #[test]
    fn test_large_quantities_do_not_overflow() {
        let result = validate_add_to_cart(&cart_with(Some(u32::MAX)), MUG, u32::MAX, MaxQuantityLimit::new(u32::MAX), "Mug");
        assert!(!result.accepted);
    }
}
