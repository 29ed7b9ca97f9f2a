// ABOUTME: Coefficients and thresholds for the nutrition and inventory engines
// ABOUTME: Defaults reproduce the production constants; tests may override individual fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration.
//!
//! Every constant the calculators depend on lives here so handlers can pass a
//! single immutable config object instead of reaching for globals.

use serde::{Deserialize, Serialize};

/// Complete nutrition calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie offsets and protein factors per goal bucket
    pub goals: GoalAdjustmentConfig,
    /// Targets returned when the profile cannot be evaluated
    pub fallback: FallbackTargets,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary, also used for unrecognized labels: 1.2
    pub sedentary: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Athlete: 1.9
    pub athlete: f64,
}

/// Goal-specific calorie offsets (kcal/day) and protein factors (g/kg)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Deficit applied for weight loss goals
    pub weight_loss_calorie_offset: f64,
    /// Protein factor for weight loss goals
    pub weight_loss_protein_g_per_kg: f64,
    /// Surplus applied for muscle gain goals
    pub muscle_gain_calorie_offset: f64,
    /// Protein factor for muscle gain goals
    pub muscle_gain_protein_g_per_kg: f64,
    /// Protein factor for maintenance and everything else
    pub maintenance_protein_g_per_kg: f64,
}

/// Safety-net targets for profiles that cannot be evaluated
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FallbackTargets {
    /// Daily calories (kcal)
    pub calories: u32,
    /// Daily protein (grams)
    pub protein_g: u32,
}

/// Inventory reconciliation thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Remaining share of the pre-consumption quantity at or below which an item is low
    pub low_stock_ratio: f64,
    /// Items at or below this quantity are treated as used up and dropped
    pub depletion_threshold: f64,
    /// Decimal places kept on decremented quantities
    pub decimal_places: i32,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            moderate: 1.55,
            active: 1.725,
            athlete: 1.9,
        }
    }
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            weight_loss_calorie_offset: -500.0,
            weight_loss_protein_g_per_kg: 2.0,
            muscle_gain_calorie_offset: 400.0,
            muscle_gain_protein_g_per_kg: 2.2,
            maintenance_protein_g_per_kg: 1.6,
        }
    }
}

impl Default for FallbackTargets {
    fn default() -> Self {
        Self {
            calories: 2000,
            protein_g: 130,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_ratio: 0.2,
            depletion_threshold: 0.01,
            decimal_places: 2,
        }
    }
}
