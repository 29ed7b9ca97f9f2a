// ABOUTME: Daily calorie and protein targets from a biometric profile
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE and goal adjustment with a fixed fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Computes the daily calorie and protein targets that feed every meal-plan
//! and shopping-list prompt.
//!
//! The public entry points never fail. Internal steps return `Result` and the
//! boundary ([`compute_targets`], [`compute_targets_from_value`]) converts any
//! error into the configured fallback pair (2000 kcal, 130 g protein).
//!
//! Targets are rounded half-to-even, so an exact 112.5 g protein target
//! becomes 112 and 113.5 becomes 114.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::{ActivityFactorsConfig, BmrConfig, GoalAdjustmentConfig, NutritionConfig};
use crate::input::{as_object, integer_field, number_field, string_field};
use manna_core::constants::{planning, profile_defaults};
use manna_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male gender (+5 constant)
    Male,
    /// Female gender (-161 constant), also used for any other label
    Female,
}

impl Gender {
    /// Classify a free-text label; only "male" (any case, trimmed) maps to `Male`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Regular moderate exercise
    Moderate,
    /// Hard exercise most days
    Active,
    /// Competitive training
    Athlete,
}

impl ActivityLevel {
    /// Classify a free-text label; unrecognized labels fall back to `Sedentary`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "athlete" => Self::Athlete,
            _ => Self::Sedentary,
        }
    }
}

/// Goal bucket derived from the user's free-text goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// Caloric deficit with elevated protein
    WeightLoss,
    /// Caloric surplus with the highest protein factor
    MuscleGain,
    /// Energy balance (maintenance, energy, anything unrecognized)
    Maintenance,
}

impl GoalCategory {
    /// Classify a goal by case-insensitive substring; first match wins
    #[must_use]
    pub fn classify(goal: &str) -> Self {
        let goal = goal.to_lowercase();
        if goal.contains("loss") || goal.contains("weight") {
            Self::WeightLoss
        } else if goal.contains("muscle") || goal.contains("bulk") {
            Self::MuscleGain
        } else {
            Self::Maintenance
        }
    }
}

/// Biometric profile for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: i64,
    /// Gender used for the BMR constant
    pub gender: Gender,
    /// Activity level used for the TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Goal bucket used for calorie and protein adjustment
    pub goal: GoalCategory,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            weight_kg: profile_defaults::WEIGHT_KG,
            height_cm: profile_defaults::HEIGHT_CM,
            age: profile_defaults::AGE_YEARS,
            gender: Gender::from_label(profile_defaults::GENDER),
            activity_level: ActivityLevel::from_label(profile_defaults::ACTIVITY_LEVEL),
            goal: GoalCategory::classify(profile_defaults::GOAL),
        }
    }
}

impl Profile {
    /// Build a profile from a loosely typed JSON object
    ///
    /// Recognized keys: `weight`, `height`, `age`, `gender`, `activityLevel`,
    /// `goal`. Absent or `null` keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or a present field
    /// cannot be coerced (e.g. `"weight": "abc"`).
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let object = as_object(value, "profile")?;
        let defaults = Self::default();

        Ok(Self {
            weight_kg: number_field(object, "weight")?.unwrap_or(defaults.weight_kg),
            height_cm: number_field(object, "height")?.unwrap_or(defaults.height_cm),
            age: integer_field(object, "age")?.unwrap_or(defaults.age),
            gender: string_field(object, "gender")?.map_or(defaults.gender, Gender::from_label),
            activity_level: string_field(object, "activityLevel")?
                .map_or(defaults.activity_level, ActivityLevel::from_label),
            goal: string_field(object, "goal")?.map_or(defaults.goal, GoalCategory::classify),
        })
    }
}

/// Daily targets derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTarget {
    /// Calories (kcal/day)
    pub calories: u32,
    /// Protein (g/day)
    pub protein_g: u32,
}

/// Targets expanded over a planning window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// Number of days covered (clamped to the planning limits)
    pub days: u32,
    /// Calories per day
    pub calories_per_day: u32,
    /// Protein grams per day
    pub protein_per_day_g: u32,
    /// Carbohydrate grams per day (45% of calories at 4 kcal/g)
    pub carbs_per_day_g: u32,
    /// Calories over the window
    pub total_calories: u32,
    /// Protein grams over the window
    pub total_protein_g: u32,
    /// Carbohydrate grams over the window
    pub total_carbs_g: u32,
}

impl PeriodTotals {
    /// Expand daily targets over `days`, clamped to `1..=30`
    #[must_use]
    pub fn for_days(target: NutritionTarget, days: u32) -> Self {
        let days = days.clamp(planning::MIN_DAYS, planning::MAX_DAYS);
        let carbs_per_day_g = calculate_carb_grams(target.calories);

        Self {
            days,
            calories_per_day: target.calories,
            protein_per_day_g: target.protein_g,
            carbs_per_day_g,
            total_calories: target.calories.saturating_mul(days),
            total_protein_g: target.protein_g.saturating_mul(days),
            total_carbs_g: carbs_per_day_g.saturating_mul(days),
        }
    }
}

/// Read `days` from a loosely typed request, clamped to the planning limits
///
/// Absent, `null` or unparsable values give the default window.
#[must_use]
pub fn requested_days(value: &Value) -> u32 {
    let parsed = as_object(value, "request").and_then(|object| integer_field(object, "days"));
    match parsed {
        Ok(Some(days)) => {
            days.clamp(i64::from(planning::MIN_DAYS), i64::from(planning::MAX_DAYS)) as u32
        }
        Ok(None) => planning::DEFAULT_DAYS,
        Err(e) => {
            warn!(error = %e, "Unusable planning window, using default days");
            planning::DEFAULT_DAYS
        }
    }
}

/// Daily carbohydrate grams for a calorie target
#[must_use]
pub fn calculate_carb_grams(calories: u32) -> u32 {
    (f64::from(calories) * planning::CARB_CALORIE_SHARE / planning::KCAL_PER_GRAM_CARB)
        .round_ties_even() as u32
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// No range validation is applied; the result is only checked for finiteness.
///
/// # Errors
///
/// Returns an error if any input is not a finite number
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: i64,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    let age = age as f64;
    if !weight_kg.is_finite() || !height_cm.is_finite() || !age.is_finite() {
        return Err(AppError::invalid_input(
            "Weight, height and age must be finite numbers",
        ));
    }

    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    Ok(config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * age
        + gender_constant)
}

/// Calculate Total Daily Energy Expenditure (TDEE = BMR x activity factor)
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    let activity_factor = match activity_level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::Moderate => config.moderate,
        ActivityLevel::Active => config.active,
        ActivityLevel::Athlete => config.athlete,
    };

    bmr * activity_factor
}

/// Apply the goal adjustment, returning unrounded `(calories, protein_g)`
#[must_use]
pub fn apply_goal_adjustment(
    tdee: f64,
    weight_kg: f64,
    goal: GoalCategory,
    config: &GoalAdjustmentConfig,
) -> (f64, f64) {
    match goal {
        GoalCategory::WeightLoss => (
            tdee + config.weight_loss_calorie_offset,
            weight_kg * config.weight_loss_protein_g_per_kg,
        ),
        GoalCategory::MuscleGain => (
            tdee + config.muscle_gain_calorie_offset,
            weight_kg * config.muscle_gain_protein_g_per_kg,
        ),
        GoalCategory::Maintenance => (tdee, weight_kg * config.maintenance_protein_g_per_kg),
    }
}

/// Round half-to-even and convert to a daily target
fn to_target_value(value: f64, label: &str) -> AppResult<u32> {
    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return Err(AppError::invalid_input(format!(
            "{label} target {value} is not a valid daily amount"
        )));
    }
    Ok(rounded as u32)
}

/// Calculate targets, surfacing any conversion problem as an error
///
/// # Errors
///
/// Returns an error if the profile produces a non-finite or negative target
pub fn calculate_targets(profile: &Profile, config: &NutritionConfig) -> AppResult<NutritionTarget> {
    let bmr = calculate_mifflin_st_jeor(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, profile.activity_level, &config.activity_factors);
    let (calories, protein_g) =
        apply_goal_adjustment(tdee, profile.weight_kg, profile.goal, &config.goals);

    debug!(bmr, tdee, calories, protein_g, goal = ?profile.goal, "Computed nutrition targets");

    Ok(NutritionTarget {
        calories: to_target_value(calories, "calorie")?,
        protein_g: to_target_value(protein_g, "protein")?,
    })
}

/// Compute targets for a typed profile; never fails
#[must_use]
pub fn compute_targets(profile: &Profile, config: &NutritionConfig) -> NutritionTarget {
    calculate_targets(profile, config).unwrap_or_else(|e| {
        warn!(error = %e, "Nutrition calculation failed, using fallback targets");
        fallback_target(config)
    })
}

/// Compute targets for a loosely typed JSON profile; never fails
///
/// Absent fields take defaults; anything unparsable yields the fallback pair.
#[must_use]
pub fn compute_targets_from_value(value: &Value, config: &NutritionConfig) -> NutritionTarget {
    match Profile::from_value(value) {
        Ok(profile) => compute_targets(&profile, config),
        Err(e) => {
            warn!(error = %e, "Unusable profile, using fallback targets");
            fallback_target(config)
        }
    }
}

const fn fallback_target(config: &NutritionConfig) -> NutritionTarget {
    NutritionTarget {
        calories: config.fallback.calories,
        protein_g: config.fallback.protein_g,
    }
}
