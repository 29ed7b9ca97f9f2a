// ABOUTME: Deterministic nutrition and inventory engine for the Manna API
// ABOUTME: Pure functions with no I/O; the server crate feeds their output into prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Manna Intelligence
//!
//! The parts of the Manna API that do not depend on a language model:
//!
//! - **`nutrition_calculator`**: profile → daily calorie and protein targets,
//!   plus period totals for multi-day plans
//! - **`inventory`**: applies a recipe's consumed ingredients to the kitchen
//!   inventory and reports low-stock items
//!
//! Both are synchronous, borrow their inputs and never fail: malformed input is
//! defaulted, replaced by a fallback, skipped (consumed ingredients) or carried
//! through untouched (inventory entries).

/// Coefficients and thresholds for the engines
pub mod config;
/// Inventory reconciliation
pub mod inventory;
/// Nutrition target calculation
pub mod nutrition_calculator;

mod input;

pub use config::{InventoryConfig, NutritionConfig};
pub use inventory::{
    parse_consumed, parse_inventory_entries, reconcile, reconcile_entries, ConsumedIngredient,
    InventoryEntry, InventoryItem, Reconciliation,
};
pub use nutrition_calculator::{
    calculate_carb_grams, compute_targets, compute_targets_from_value, requested_days,
    NutritionTarget, PeriodTotals, Profile,
};
