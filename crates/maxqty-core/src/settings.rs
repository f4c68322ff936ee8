//! # Settings Field
//!
//! Describes the admin field that holds the limit and where it goes.
//!
//! The field is appended to the host's inventory settings section, right
//! before that section's closing entry:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ { id: inventory_options, type: title }       │
//! │ { id: manage_stock,      type: checkbox }    │
//! │ ...                                          │
//! │ { id: isa_..._max_qty_limit, type: text } ◄──┼── inserted here
//! │ { id: inventory_options, type: sectionend }  │
//! └──────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::MaxQuantityLimit;
use crate::MAX_QTY_OPTION_KEY;

const INVENTORY_SECTION_ID: &str = "inventory_options";
const SECTION_END: &str = "sectionend";

const FIELD_TITLE: &str = "Maximum Quantity Limit Per Product";
const FIELD_DESC: &str =
    "Max quantity, per product, that can be added to the shopping cart. Enter a number, 1 or greater.";
const FIELD_TIP: &str = "Set a limit for the maximum quantity, per product, that can be added to the shopping cart. Enter a number, 1 or greater.";

// =============================================================================
// Settings Entry
// =============================================================================

/// One entry of a host settings page (a field, a title, or a section end).
///
/// Only `id` and `type` drive the insertion; everything else is carried in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsEntry {
    /// The text field for the limit.
    pub fn max_quantity_field() -> Self {
        let mut extra = Map::new();
        extra.insert("name".to_string(), Value::from(FIELD_TITLE));
        extra.insert("desc_tip".to_string(), Value::from(FIELD_TIP));
        extra.insert("desc".to_string(), Value::from(FIELD_DESC));
        extra.insert("css".to_string(), Value::from("width:50px;"));
        // Older hosts read "std", newer ones "default"
        extra.insert("std".to_string(), Value::from(""));
        extra.insert("default".to_string(), Value::from(""));

        SettingsEntry {
            id: Some(MAX_QTY_OPTION_KEY.to_string()),
            entry_type: Some("text".to_string()),
            extra,
        }
    }

    fn is_inventory_section_end(&self) -> bool {
        self.id.as_deref() == Some(INVENTORY_SECTION_ID)
            && self.entry_type.as_deref() == Some(SECTION_END)
    }
}

/// Inserts the limit field at the bottom of the inventory section.
///
/// A settings page without an inventory section end comes back unchanged.
pub fn insert_limit_field(entries: Vec<SettingsEntry>) -> Vec<SettingsEntry> {
    let mut updated = Vec::with_capacity(entries.len() + 1);

    for entry in entries {
        if entry.is_inventory_section_end() {
            updated.push(SettingsEntry::max_quantity_field());
        }
        updated.push(entry);
    }

    updated
}

// =============================================================================
// Admin Input
// =============================================================================

/// Validates what an administrator typed into the limit field.
///
/// ## Rules
/// - Empty (after trimming) clears the limit
/// - Otherwise a whole number, 1 or greater
///
/// ## Example
/// ```rust
/// use maxqty_core::validate_limit_input;
///
/// assert_eq!(validate_limit_input("10").unwrap().get(), Some(10));
/// assert!(!validate_limit_input("").unwrap().is_set());
/// assert!(validate_limit_input("0").is_err());
/// assert!(validate_limit_input("ten").is_err());
/// ```
pub fn validate_limit_input(raw: &str) -> Result<MaxQuantityLimit, ValidationError> {
    let raw = raw.trim();
    let limit = MaxQuantityLimit::parse_option(raw)?;

    if !raw.is_empty() && !limit.is_set() {
        return Err(ValidationError::OutOfRange {
            field: "max quantity".to_string(),
            min: 1,
            max: u32::MAX as u64,
        });
    }

    Ok(limit)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inventory_page() -> Vec<SettingsEntry> {
        serde_json::from_value(json!([
            { "title": "Inventory", "type": "title", "id": "inventory_options" },
            { "title": "Manage stock", "id": "woocommerce_manage_stock", "type": "checkbox", "default": "yes" },
            { "type": "sectionend", "id": "inventory_options" },
            { "title": "Other", "type": "title", "id": "other_options" },
            { "type": "sectionend", "id": "other_options" },
        ]))
        .unwrap()
    }

    #[test]
    fn test_field_inserted_before_inventory_section_end() {
        let updated = insert_limit_field(inventory_page());

        assert_eq!(updated.len(), 6);
        assert_eq!(updated[2].id.as_deref(), Some(MAX_QTY_OPTION_KEY));
        assert_eq!(updated[2].entry_type.as_deref(), Some("text"));
        assert!(updated[3].is_inventory_section_end());
        assert_eq!(updated[5].id.as_deref(), Some("other_options"));
    }

    #[test]
    fn test_no_inventory_section_means_no_change() {
        let page: Vec<SettingsEntry> = serde_json::from_value(json!([
            { "title": "Other", "type": "title", "id": "other_options" },
            { "type": "sectionend", "id": "other_options" },
        ]))
        .unwrap();

        assert_eq!(insert_limit_field(page.clone()), page);
    }

    #[test]
    fn test_existing_entries_round_trip_untouched() {
        let updated = insert_limit_field(inventory_page());
        let value = serde_json::to_value(&updated[1]).unwrap();

        assert_eq!(
            value,
            json!({ "title": "Manage stock", "id": "woocommerce_manage_stock", "type": "checkbox", "default": "yes" })
        );
    }

    #[test]
    fn test_field_description() {
        let value = serde_json::to_value(SettingsEntry::max_quantity_field()).unwrap();

        assert_eq!(value["name"], json!("Maximum Quantity Limit Per Product"));
        assert_eq!(value["css"], json!("width:50px;"));
        assert_eq!(value["default"], json!(""));
        assert!(value["desc"].as_str().unwrap().contains("1 or greater"));
    }

    #[test]
    fn test_validate_limit_input() {
        assert_eq!(validate_limit_input(" 3 ").unwrap().get(), Some(3));
        assert!(!validate_limit_input("  ").unwrap().is_set());

        assert!(matches!(
            validate_limit_input("0"),
            Err(ValidationError::OutOfRange { min: 1, .. })
        ));
        assert!(matches!(
            validate_limit_input("-1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
