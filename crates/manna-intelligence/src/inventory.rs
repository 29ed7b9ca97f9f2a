// ABOUTME: Inventory reconciliation after cooking a generated recipe
// ABOUTME: Fuzzy name matching, quantity decrement, depletion filtering and low-stock detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Inventory Reconciler
//!
//! Applies the ingredients consumed by a recipe to the user's kitchen
//! inventory and reports which items are running low.
//!
//! ## Matching
//!
//! Names are compared after lower-casing and trimming. A consumed ingredient
//! matches an inventory item when either normalized name contains the other,
//! and only the first matching item (in inventory order) is decremented.
//!
//! This bidirectional containment is a known-fragile heuristic: a consumed
//! ingredient called "oil" matches "Olive Oil" and "Coconut Oil" alike, and
//! whichever comes first wins. Clients rely on the current behavior, so it is
//! kept as-is; an alias table keyed by canonical ingredient names would be the
//! safer replacement.
//!
//! ## Quantities
//!
//! Units are informational. `amountValue` is assumed to be in the matched
//! item's unit, the decremented quantity is clipped at zero and rounded to two
//! decimals (half-to-even), and items left at or below 0.01 are dropped from
//! the result.
//!
//! ## Unreadable entries
//!
//! Submitted inventory entries that cannot be read as items (blank name,
//! missing or non-numeric quantity, not an object) become
//! [`InventoryEntry::Unrecognized`]. They never match and are returned exactly
//! as submitted, in their original position.

use crate::config::InventoryConfig;
use crate::input::{as_object, number_field, string_field};
use manna_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// One item in the user's kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Display name; identity is case-insensitive
    pub name: String,
    /// Remaining quantity in `unit`
    pub quantity: f64,
    /// Unit label, never converted
    #[serde(default)]
    pub unit: String,
    /// Client-owned fields (id, icon, daysLeft, ...) carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InventoryItem {
    /// Create an item with no client-owned fields
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            extra: Map::new(),
        }
    }

    /// Parse an item from loosely typed JSON
    ///
    /// # Errors
    ///
    /// Returns an error when the name is missing or blank, or the quantity is
    /// missing, non-numeric, non-finite or negative.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let object = as_object(value, "inventory item")?;

        let name = required_name(object, "inventory item")?;
        let quantity = number_field(object, "quantity")?
            .ok_or_else(|| AppError::invalid_input("inventory item has no quantity"))?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(AppError::invalid_input(format!(
                "inventory quantity {quantity} for {name} is not a non-negative number"
            )));
        }
        let unit = string_field(object, "unit")?.unwrap_or_default().to_owned();

        let extra = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "name" | "quantity" | "unit"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            name,
            quantity,
            unit,
            extra,
        })
    }
}

/// An ingredient used by a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedIngredient {
    /// Ingredient name as written by the recipe
    pub name: String,
    /// Amount used, in the matched inventory item's unit
    pub amount_value: f64,
}

impl ConsumedIngredient {
    /// Create a consumed ingredient
    pub fn new(name: impl Into<String>, amount_value: f64) -> Self {
        Self {
            name: name.into(),
            amount_value,
        }
    }

    /// Parse a consumed ingredient from loosely typed JSON
    ///
    /// # Errors
    ///
    /// Returns an error when the name is missing or blank, or `amountValue` is
    /// missing, non-numeric, non-finite or negative.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let object = as_object(value, "consumed ingredient")?;

        let name = required_name(object, "consumed ingredient")?;
        let amount_value = number_field(object, "amountValue")?
            .ok_or_else(|| AppError::invalid_input(format!("{name} has no amountValue")))?;
        if !amount_value.is_finite() || amount_value < 0.0 {
            return Err(AppError::invalid_input(format!(
                "amountValue {amount_value} for {name} is not a non-negative number"
            )));
        }

        Ok(Self { name, amount_value })
    }
}

fn required_name(object: &Map<String, Value>, what: &str) -> AppResult<String> {
    let name = string_field(object, "name")?
        .ok_or_else(|| AppError::invalid_input(format!("{what} has no name")))?;
    if name.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{what} has a blank name")));
    }
    Ok(name.to_owned())
}

/// One submitted inventory entry, usable or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventoryEntry {
    /// An item that takes part in matching
    Item(InventoryItem),
    /// An entry that could not be read, carried through untouched
    Unrecognized(Value),
}

impl InventoryEntry {
    /// Read an entry, keeping the raw value when it is not a usable item
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match InventoryItem::from_value(value) {
            Ok(item) => Self::Item(item),
            Err(e) => {
                warn!(error = %e, "Keeping unreadable inventory entry as submitted");
                Self::Unrecognized(value.clone())
            }
        }
    }

    /// The usable item, if any
    #[must_use]
    pub const fn item(&self) -> Option<&InventoryItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Unrecognized(_) => None,
        }
    }

    fn into_item(self) -> Option<InventoryItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<InventoryItem> for InventoryEntry {
    fn from(item: InventoryItem) -> Self {
        Self::Item(item)
    }
}

/// Read every submitted inventory entry; nothing is dropped
#[must_use]
pub fn parse_inventory_entries(values: &[Value]) -> Vec<InventoryEntry> {
    values.iter().map(InventoryEntry::from_value).collect()
}

/// Parse consumed ingredients, skipping (and logging) entries that cannot be used
#[must_use]
pub fn parse_consumed(values: &[Value]) -> Vec<ConsumedIngredient> {
    parse_skipping(values, ConsumedIngredient::from_value, "consumed ingredient")
}

fn parse_skipping<T>(values: &[Value], parse: fn(&Value) -> AppResult<T>, what: &str) -> Vec<T> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(index, error = %e, "Skipping unusable {what}");
                None
            }
        })
        .collect()
}

/// Result of applying consumed ingredients to an inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation<T = InventoryItem> {
    /// Inventory after consumption, depleted items removed
    pub updated_inventory: Vec<T>,
    /// Items that dropped to the low-stock band (deduplicated)
    pub low_stock: BTreeSet<String>,
}

/// Lower-case and trim a name for comparison
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Bidirectional containment between two normalized names
#[must_use]
pub fn names_match(consumed: &str, item: &str) -> bool {
    item.contains(consumed) || consumed.contains(item)
}

fn round_to(value: f64, decimal_places: i32) -> f64 {
    let factor = 10_f64.powi(decimal_places);
    (value * factor).round_ties_even() / factor
}

/// Apply consumed ingredients to an inventory snapshot
///
/// The input slice is never modified; the returned inventory is the new
/// source of truth. Consumed ingredients are processed in order, so several
/// ingredients matching the same item decrement it one after another.
#[must_use]
pub fn reconcile(
    inventory: &[InventoryItem],
    consumed: &[ConsumedIngredient],
    config: &InventoryConfig,
) -> Reconciliation {
    let entries: Vec<InventoryEntry> = inventory.iter().cloned().map(InventoryEntry::from).collect();
    let result = reconcile_entries(&entries, consumed, config);

    Reconciliation {
        updated_inventory: result
            .updated_inventory
            .into_iter()
            .filter_map(InventoryEntry::into_item)
            .collect(),
        low_stock: result.low_stock,
    }
}

/// Apply consumed ingredients to submitted entries, keeping unreadable ones
///
/// Same rules as [`reconcile`]; [`InventoryEntry::Unrecognized`] entries are
/// skipped by matching and survive depletion filtering in place.
#[must_use]
pub fn reconcile_entries(
    inventory: &[InventoryEntry],
    consumed: &[ConsumedIngredient],
    config: &InventoryConfig,
) -> Reconciliation<InventoryEntry> {
    let mut entries = inventory.to_vec();
    let normalized: Vec<Option<String>> = entries
        .iter()
        .map(|entry| entry.item().map(|item| normalize_name(&item.name)))
        .collect();
    let mut low_stock = BTreeSet::new();

    for ingredient in consumed {
        let wanted = normalize_name(&ingredient.name);
        if wanted.is_empty() {
            warn!("Skipping consumed ingredient with a blank name");
            continue;
        }

        let Some(index) = normalized
            .iter()
            .position(|name| name.as_deref().is_some_and(|name| names_match(&wanted, name)))
        else {
            debug!(ingredient = %ingredient.name, "No inventory match for consumed ingredient");
            continue;
        };

        let InventoryEntry::Item(item) = &mut entries[index] else {
            continue;
        };
        let old_quantity = item.quantity;
        let new_quantity = round_to(
            (old_quantity - ingredient.amount_value).max(0.0),
            config.decimal_places,
        );
        item.quantity = new_quantity;

        debug!(
            ingredient = %ingredient.name,
            item = %item.name,
            old_quantity,
            new_quantity,
            "Applied consumed ingredient"
        );

        if new_quantity > 0.0 && new_quantity <= old_quantity * config.low_stock_ratio {
            low_stock.insert(item.name.clone());
        }
    }

    entries.retain(|entry| match entry {
        InventoryEntry::Item(item) => item.quantity > config.depletion_threshold,
        InventoryEntry::Unrecognized(_) => true,
    });

    Reconciliation {
        updated_inventory: entries,
        low_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names_match_both_directions() {
        assert!(names_match("oats", "rolled oats"));
        assert!(names_match("chopped red onion", "red onion"));
        assert!(!names_match("milk", "oat drink"));
    }

    #[test]
    fn test_round_to_two_places() {
        assert!((round_to(14.999, 2) - 15.0).abs() < f64::EPSILON);
        assert!((round_to(0.333_333, 2) - 0.33).abs() < f64::EPSILON);
        // 12.5 and 37.5 hundredths are exact ties
        assert!((round_to(0.125, 2) - 0.12).abs() < f64::EPSILON);
        assert!((round_to(0.375, 2) - 0.38).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_keeps_client_fields() {
        let item = InventoryItem::from_value(&json!({
            "id": "17",
            "name": "Eggs",
            "quantity": "6",
            "unit": "pcs",
            "daysLeft": 10
        }))
        .unwrap();

        assert!((item.quantity - 6.0).abs() < f64::EPSILON);
        assert_eq!(item.extra.get("id"), Some(&json!("17")));

        let serialized = serde_json::to_value(&item).unwrap();
        assert_eq!(serialized["daysLeft"], json!(10));
        assert_eq!(serialized["name"], json!("Eggs"));
    }

    #[test]
    fn test_blank_or_negative_entries_rejected() {
        assert!(InventoryItem::from_value(&json!({"name": "  ", "quantity": 1})).is_err());
        assert!(InventoryItem::from_value(&json!({"name": "Rice", "quantity": -1})).is_err());
        assert!(ConsumedIngredient::from_value(&json!({"name": "Rice"})).is_err());
        assert!(
            ConsumedIngredient::from_value(&json!({"name": "Rice", "amountValue": -5})).is_err()
        );
    }

    #[test]
    fn test_unreadable_entries_are_kept_verbatim() {
        let raw = json!({"name": "Salt", "quantity": "a pinch", "id": "9"});
        let entries = parse_inventory_entries(&[
            json!({"name": "Oats", "quantity": 100, "unit": "g"}),
            raw.clone(),
        ]);

        assert!(entries[0].item().is_some());
        assert_eq!(entries[1], InventoryEntry::Unrecognized(raw.clone()));
        assert_eq!(serde_json::to_value(&entries[1]).unwrap(), raw);
    }

    #[test]
    fn test_parse_consumed_skips_bad_entries() {
        let values = vec![
            json!({"name": "Oats", "amountValue": 85}),
            json!({"name": "Milk", "amountValue": "abc"}),
            json!("not an object"),
            json!({"name": "Honey", "amountValue": "10.5"}),
        ];

        let parsed = parse_consumed(&values);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], ConsumedIngredient::new("Honey", 10.5));
    }
}
