// ABOUTME: Prompt templates for shopping lists, recipes, meal plans and fridge scans
// ABOUTME: The system prompt is loaded at compile time; user prompts are rendered from PromptContext
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! The shared system prompt lives in `manna_system.md` and is embedded at
//! compile time. Per-request user prompts are rendered from a
//! [`PromptContext`] and always state the deterministic targets so the model
//! plans around them instead of inventing its own.

use std::fmt::Write as _;

use super::{PromptContext, PromptKind};

/// Manna system prompt shared by every generation
pub const MANNA_SYSTEM_PROMPT: &str = include_str!("manna_system.md");

/// Get the system prompt for the given kind
#[must_use]
pub const fn system_prompt(_kind: PromptKind) -> &'static str {
    MANNA_SYSTEM_PROMPT
}

/// Render the user prompt for `kind`
#[must_use]
pub fn render(kind: PromptKind, context: &PromptContext) -> String {
    match kind {
        PromptKind::ShoppingList => shopping_list_prompt(context),
        PromptKind::Recipe => recipe_prompt(context),
        PromptKind::MealPlan => meal_plan_prompt(context),
        PromptKind::FridgeScan => fridge_scan_prompt(context),
    }
}

fn targets_block(context: &PromptContext) -> String {
    let totals = &context.totals;
    format!(
        "Daily targets: {} kcal, {} g protein, {} g carbohydrates.\n\
         Totals for {} day(s): {} kcal, {} g protein, {} g carbohydrates.",
        totals.calories_per_day,
        totals.protein_per_day_g,
        totals.carbs_per_day_g,
        totals.days,
        totals.total_calories,
        totals.total_protein_g,
        totals.total_carbs_g,
    )
}

fn shopping_list_prompt(context: &PromptContext) -> String {
    format!(
        "Create a shopping list for a student who wants to cook {vibe} meals.\n\
         Their goal: {goal}.\n\
         Their diet: {diet}.\n\
         Shopping duration: {days} day(s).\n\
         {targets}\n\
         Buy enough protein to reach the protein total.\n\n\
         Return ONLY a JSON array. Each item must have:\n\
         - name (string)\n\
         - amount (string)\n\
         - nutrition (string: brief benefit, e.g. \"High Protein\")\n\
         - substitute (string: a valid alternative)\n\
         - why (string: one short sentence linking it to the goal \"{goal}\")\n\n\
         Example:\n\
         [{{\"name\": \"Salmon\", \"amount\": \"2 fillets\", \"nutrition\": \"Omega-3s\", \
         \"substitute\": \"Trout or Tofu\", \"why\": \"Omega-3s support focus during exams.\"}}]",
        vibe = context.vibe,
        goal = context.goal,
        diet = context.diet,
        days = context.days(),
        targets = targets_block(context),
    )
}

fn pantry_lines(context: &PromptContext) -> String {
    let mut lines = String::new();
    for item in &context.pantry {
        let _ = writeln!(lines, "- {}: {} {}", item.name, item.quantity, item.unit);
    }
    lines
}

fn recipe_prompt(context: &PromptContext) -> String {
    format!(
        "The user has these ingredients (name: quantity unit):\n\
         {pantry}\
         Cooking vibe: {vibe}.\n\
         Their goal: {goal}.\n\
         Their diet: {diet}.\n\
         {targets}\n\n\
         Create ONE recipe that uses these ingredients. Basic staples (salt, pepper, water) \
         may be added freely.\n\
         Return ONLY a JSON object with:\n\
         - type (string: Breakfast, Lunch or Dinner)\n\
         - title (string)\n\
         - description (string: enticing one-liner)\n\
         - calories (number: integer estimate per serving)\n\
         - macros (object: {{\"p\": number, \"c\": number, \"f\": number}})\n\
         - time (string, e.g. \"15 mins\")\n\
         - difficulty (string: Easy, Medium or Hard)\n\
         - ingredients (array of objects: {{\"name\": string, \"amount\": string, \"amountValue\": number}})\n\
         - instructions (array of strings)\n\n\
         For every ingredient taken from the list above, copy its name exactly and give \
         amountValue in that ingredient's unit.",
        pantry = pantry_lines(context),
        vibe = context.vibe,
        goal = context.goal,
        diet = context.diet,
        targets = targets_block(context),
    )
}

fn meal_plan_prompt(context: &PromptContext) -> String {
    format!(
        "Generate a {days}-day meal plan with a shopping list.\n\
         Their goal: {goal}.\n\
         Their diet: {diet}.\n\
         Cooking vibe: {vibe}.\n\
         {targets}\n\n\
         Return ONLY a JSON object with:\n\
         - days (array of {{\"day\": number, \"meals\": [{{\"type\": string, \"title\": string, \
         \"calories\": number, \"protein\": number}}]}})\n\
         - shoppingList (array of {{\"name\": string, \"amount\": string}})\n\
         Each day's meals should add up to roughly the daily targets.",
        days = context.days(),
        goal = context.goal,
        diet = context.diet,
        vibe = context.vibe,
        targets = targets_block(context),
    )
}

fn fridge_scan_prompt(context: &PromptContext) -> String {
    format!(
        "Look at the attached photo of a fridge or pantry.\n\
         1. List every food item you can see.\n\
         2. Estimate the calories per serving.\n\
         3. Estimate the protein per serving.\n\
         4. Estimate how much of it there is, as a number and a unit.\n\
         The user's diet is {diet}; still list items that do not fit it.\n\n\
         Return ONLY a JSON array. Each item must have:\n\
         - item (string)\n\
         - calories (number)\n\
         - protein (string, e.g. \"0.5g\")\n\
         - quantity (number)\n\
         - unit (string: g, ml or pcs)\n\n\
         Example:\n\
         [{{\"item\": \"Apple\", \"calories\": 95, \"protein\": \"0.5g\", \
         \"quantity\": 3, \"unit\": \"pcs\"}}]",
        diet = context.diet,
    )
}
