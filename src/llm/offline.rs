// ABOUTME: Deterministic content generator that never leaves the process
// ABOUTME: Builds canned shopping lists, recipes, meal plans and fridge scans from the prompt context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Offline generator for local development and tests.
//!
//! Output depends only on the [`PromptContext`], so identical requests get
//! identical responses. Recipes draw on the first few pantry items and use
//! half of each, which lets the whole recipe flow (including inventory
//! reconciliation) run without network access. Fridge scans ignore the
//! photo and always report the same three items.

use async_trait::async_trait;
use manna_core::errors::AppResult;
use serde_json::{json, Value};
use tracing::debug;

use super::{ContentGenerator, PromptContext, PromptKind};

/// Pantry items a canned recipe draws on
const RECIPE_INGREDIENT_LIMIT: usize = 3;

/// Generator returning canned JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    /// Create an offline generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn shopping_list(context: &PromptContext) -> Value {
        let protein_total = context.totals.total_protein_g;
        json!([
            {
                "name": "Chicken Breast",
                "amount": format!("{}g", u64::from(protein_total) * 2),
                "nutrition": "High Protein",
                "substitute": "Firm Tofu",
                "why": format!("Covers most of the {protein_total} g protein you need for {}.", context.goal)
            },
            {
                "name": "Rolled Oats",
                "amount": format!("{}g", context.totals.total_carbs_g / 2),
                "nutrition": "Slow Carbs",
                "substitute": "Brown Rice",
                "why": "Steady energy for long study sessions."
            },
            {
                "name": "Spinach",
                "amount": "1 bag",
                "nutrition": "Iron",
                "substitute": "Kale",
                "why": "Micronutrients with almost no calories."
            }
        ])
    }

    fn recipe(context: &PromptContext) -> Value {
        let ingredients: Vec<Value> = context
            .pantry
            .iter()
            .take(RECIPE_INGREDIENT_LIMIT)
            .map(|item| {
                let amount_value = (item.quantity / 2.0 * 100.0).round() / 100.0;
                json!({
                    "name": item.name,
                    "amount": format!("{amount_value} {}", item.unit).trim_end().to_owned(),
                    "amountValue": amount_value
                })
            })
            .collect();

        let title = context
            .pantry
            .first()
            .map_or_else(|| "Pantry Bowl".to_owned(), |item| format!("{} Bowl", item.name));
        let calories = context.target.calories / 3;

        json!({
            "type": "Lunch",
            "title": title,
            "description": format!("A {} bowl built from what you already have.", context.vibe.to_lowercase()),
            "calories": calories,
            "macros": {
                "p": context.target.protein_g / 3,
                "c": context.totals.carbs_per_day_g / 3,
                "f": calories / 30
            },
            "time": "15 mins",
            "difficulty": "Easy",
            "ingredients": ingredients,
            "instructions": [
                "Prepare the ingredients.",
                "Combine everything in a bowl.",
                "Season to taste and serve."
            ]
        })
    }

    fn meal_plan(context: &PromptContext) -> Value {
        let calories = u64::from(context.target.calories);
        let protein = u64::from(context.target.protein_g);
        let days: Vec<Value> = (1..=context.days())
            .map(|day| {
                json!({
                    "day": day,
                    "meals": [
                        {"type": "Breakfast", "title": "Overnight Oats", "calories": calories * 3 / 10, "protein": protein * 3 / 10},
                        {"type": "Lunch", "title": "Chicken Rice Bowl", "calories": calories * 4 / 10, "protein": protein * 4 / 10},
                        {"type": "Dinner", "title": "Lentil Curry", "calories": calories * 3 / 10, "protein": protein * 3 / 10}
                    ]
                })
            })
            .collect();

        json!({
            "days": days,
            "shoppingList": [
                {"name": "Rolled Oats", "amount": format!("{}g", 80 * context.days())},
                {"name": "Chicken Breast", "amount": format!("{}g", 150 * context.days())},
                {"name": "Red Lentils", "amount": format!("{}g", 70 * context.days())}
            ]
        })
    }

    fn fridge_scan() -> Value {
        json!([
            {"item": "Avocados", "calories": 240, "protein": "3g", "quantity": 2, "unit": "pcs"},
            {"item": "Sourdough", "calories": 180, "protein": "7g", "quantity": 1, "unit": "pcs"},
            {"item": "Eggs", "calories": 70, "protein": "6g", "quantity": 6, "unit": "pcs"}
        ])
    }
}

#[async_trait]
impl ContentGenerator for OfflineGenerator {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, kind: PromptKind, context: &PromptContext) -> AppResult<String> {
        let value = match kind {
            PromptKind::ShoppingList => Self::shopping_list(context),
            PromptKind::Recipe => Self::recipe(context),
            PromptKind::MealPlan => Self::meal_plan(context),
            PromptKind::FridgeScan => Self::fridge_scan(),
        };
        debug!(kind = %kind, "Serving canned generator output");
        Ok(value.to_string())
    }
}
