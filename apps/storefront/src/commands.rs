//! # Commands
//!
//! One line of input, one command, one JSON response.
//!
//! ## Command Set
//! ```text
//! add <product> [qty] [variation]   Add to cart (qty defaults to 1)
//! cart                              Show the cart
//! limit                             Show the current limit
//! limit set <value>                 Save the limit ("limit set" alone clears it)
//! input <product>                   Quantity input arguments for a product
//! variation <id>                    Data for one available variation
//! settings                          Inventory settings page
//! notices                           Pending shopper notices
//! hooks [name]                      Callbacks registered per extension point
//! clear                             Empty the cart
//! help                              This list
//! ```

use std::str::FromStr;

use maxqty_core::{ProductId, Quantity};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::storefront::Storefront;

pub const HELP: &[&str] = &[
    "add <product> [qty] [variation]",
    "cart",
    "limit",
    "limit set <value>",
    "input <product>",
    "variation <id>",
    "settings",
    "notices",
    "hooks [name]",
    "clear",
    "help",
];

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        product_id: ProductId,
        quantity: Quantity,
        variation_id: Option<ProductId>,
    },
    Cart,
    ShowLimit,
    SetLimit(String),
    Input(ProductId),
    Variation(ProductId),
    Settings,
    Notices,
    Hooks(Option<String>),
    Clear,
    Help,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(AppError::invalid_command("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("add", [product, rest @ ..]) if rest.len() <= 2 => Command::Add {
                product_id: parse_id(product)?,
                quantity: rest.first().map(|q| parse_quantity(q)).transpose()?.unwrap_or(1),
                variation_id: rest.get(1).map(|v| parse_id(v)).transpose()?,
            },
            ("cart", []) => Command::Cart,
            ("limit", []) => Command::ShowLimit,
            // Everything after "set" is the raw field value, spaces included
            ("limit", ["set", ..]) => {
                let raw = line
                    .trim_start()
                    .strip_prefix("limit")
                    .map(str::trim_start)
                    .and_then(|rest| rest.strip_prefix("set"))
                    .unwrap_or_default();
                Command::SetLimit(raw.trim().to_string())
            }
            ("input", [product]) => Command::Input(parse_id(product)?),
            ("variation", [id]) => Command::Variation(parse_id(id)?),
            ("settings", []) => Command::Settings,
            ("notices", []) => Command::Notices,
            ("hooks", []) => Command::Hooks(None),
            ("hooks", [name]) => Command::Hooks(Some(name.to_string())),
            ("clear", []) => Command::Clear,
            ("help", []) => Command::Help,
            _ => return Err(AppError::invalid_command(format!("unknown command: {}", line.trim()))),
        };

        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<ProductId, AppError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(ProductId::new(id)),
        _ => Err(AppError::invalid_command(format!("not a product id: {}", raw))),
    }
}

fn parse_quantity(raw: &str) -> Result<Quantity, AppError> {
    match raw.parse::<Quantity>() {
        Ok(qty) if qty > 0 => Ok(qty),
        _ => Err(AppError::invalid_command(format!("not a quantity: {}", raw))),
    }
}

/// Runs `command` against `store`.
pub fn execute(store: &Storefront, command: Command) -> Result<Value, AppError> {
    let response = match command {
        Command::Add {
            product_id,
            quantity,
            variation_id,
        } => json!(store.add_to_cart(product_id, variation_id, quantity)),
        Command::Cart => json!(store.cart()),
        Command::ShowLimit => json!({ "limit": store.limit().get() }),
        Command::SetLimit(raw) => json!({ "limit": store.set_limit(&raw)?.get() }),
        Command::Input(product_id) => json!({
            "product": store.product_name(product_id),
            "args": store.quantity_input(product_id),
        }),
        Command::Variation(id) => json!(store.variation(id)),
        Command::Settings => json!(store.settings_page()),
        Command::Notices => json!(store.take_notices()),
        Command::Hooks(name) => {
            let counts: serde_json::Map<String, Value> = store
                .registered_hooks(name.as_deref())?
                .into_iter()
                .map(|(point, count)| (point.name().to_string(), json!(count)))
                .collect();
            Value::Object(counts)
        }
        Command::Clear => {
            store.clear_cart();
            json!({ "cleared": true })
        }
        Command::Help => json!({ "commands": HELP }),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::error::ErrorCode;

    fn run(store: &Storefront, line: &str) -> Result<Value, AppError> {
        execute(store, line.parse()?)
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add 7".parse::<Command>().unwrap(),
            Command::Add {
                product_id: ProductId::new(7),
                quantity: 1,
                variation_id: None
            }
        );
        assert_eq!(
            "add 7 3 70".parse::<Command>().unwrap(),
            Command::Add {
                product_id: ProductId::new(7),
                quantity: 3,
                variation_id: Some(ProductId::new(70))
            }
        );
    }

    #[test]
    fn test_parse_limit_set_keeps_raw_value() {
        assert_eq!("limit set 5".parse::<Command>().unwrap(), Command::SetLimit("5".to_string()));
        assert_eq!("limit set".parse::<Command>().unwrap(), Command::SetLimit(String::new()));
        assert_eq!(
            "limit set five apples".parse::<Command>().unwrap(),
            Command::SetLimit("five apples".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        for line in ["", "dance", "add", "add 0", "add 7 0", "add 7 x", "add 1 2 3 4", "cart now"] {
            let err = line.parse::<Command>().unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidCommand, "line: {:?}", line);
        }
    }

    #[test]
    fn test_session() {
        let store = Storefront::new(&StorefrontConfig::default());

        assert_eq!(run(&store, "limit set 2").unwrap(), json!({ "limit": 2 }));
        assert_eq!(run(&store, "add 8 2").unwrap()["accepted"], json!(true));

        let blocked = run(&store, "add 8").unwrap();
        assert_eq!(blocked["accepted"], json!(false));
        assert_eq!(blocked["inCart"], json!(2));
        assert!(blocked["message"].as_str().unwrap().contains("Poster's"));

        assert_eq!(run(&store, "input 8").unwrap()["args"]["max_value"], json!(2));
        assert_eq!(run(&store, "clear").unwrap(), json!({ "cleared": true }));
        assert_eq!(run(&store, "add 8 2").unwrap()["inCart"], json!(2));

        assert_eq!(
            run(&store, "hooks woocommerce_quantity_input_args").unwrap(),
            json!({ "woocommerce_quantity_input_args": 1 })
        );
        assert_eq!(run(&store, "hooks nope").unwrap_err().code, ErrorCode::NotFound);

        let err = run(&store, "limit set -1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(run(&store, "limit").unwrap(), json!({ "limit": 2 }));
    }
}
