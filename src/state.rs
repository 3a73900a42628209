//! Progress-evaluation state and its derived views
//!
//! `ProgressState` is the snapshot the store publishes. Only the store writes
//! it; everything below the authoritative fields is computed on read from
//! `current_evaluation` and falls back to an empty value when there is
//! nothing to show.

use serde::Serialize;

use crate::models::{
  pattern_text, DailyNutritionSummary, Evaluation, ExerciseProgress, NutritionEntry, NutritionSummary,
  TrainingSummary, Trend, WorkoutEntry,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressState {
  pub current_evaluation: Option<Evaluation>,
  pub evaluation_history: Vec<Evaluation>,
  pub workout_history: Vec<WorkoutEntry>,
  pub nutrition_history: Vec<NutritionEntry>,
  pub exercise_progress: Option<ExerciseProgress>,
  pub daily_nutrition: Option<DailyNutritionSummary>,
  pub loading: bool,
  pub error: Option<String>,
}

impl ProgressState {
  fn training(&self) -> Option<&TrainingSummary> {
    self.current_evaluation.as_ref()?.training_summary.as_ref()
  }

  fn nutrition(&self) -> Option<&NutritionSummary> {
    self.current_evaluation.as_ref()?.nutrition_summary.as_ref()
  }

  pub fn has_data(&self) -> bool {
    self.current_evaluation.is_some()
  }

  // ---- evaluation-level values ----

  pub fn training_trend(&self) -> Option<Trend> {
    self.current_evaluation.as_ref()?.training_trend
  }

  pub fn nutrition_trend(&self) -> Option<Trend> {
    self.current_evaluation.as_ref()?.nutrition_trend
  }

  pub fn ai_feedback(&self) -> String {
    self
      .current_evaluation
      .as_ref()
      .map(|e| e.ai_feedback.clone())
      .unwrap_or_default()
  }

  pub fn recommendations(&self) -> Vec<String> {
    self
      .current_evaluation
      .as_ref()
      .map(|e| e.recommendations.clone())
      .unwrap_or_default()
  }

  pub fn achievements(&self) -> Vec<String> {
    self
      .current_evaluation
      .as_ref()
      .map(|e| e.achievements.clone())
      .unwrap_or_default()
  }

  // ---- training summary ----

  pub fn training_consistency(&self) -> f64 {
    self.training().map_or(0.0, |t| t.consistency_pct)
  }

  pub fn has_plateau(&self) -> bool {
    self.training().is_some_and(|t| t.has_plateau)
  }

  pub fn plateau_message(&self) -> String {
    self
      .training()
      .and_then(|t| t.plateau_message.clone())
      .unwrap_or_default()
  }

  pub fn training_volume(&self) -> f64 {
    self.training().map_or(0.0, |t| t.total_volume)
  }

  pub fn strength_improvement(&self) -> f64 {
    self.training().map_or(0.0, |t| t.strength_improvement_pct)
  }

  pub fn highlighted_exercises(&self) -> Vec<ExerciseProgress> {
    self
      .training()
      .map(|t| t.highlighted_exercises.clone())
      .unwrap_or_default()
  }

  /// (completed, planned) workouts in the evaluated period
  pub fn workout_completion(&self) -> (u32, u32) {
    self
      .training()
      .map_or((0, 0), |t| (t.completed_workouts, t.planned_workouts))
  }

  // ---- nutrition summary ----

  pub fn calorie_adherence(&self) -> f64 {
    self.nutrition().map_or(0.0, |n| n.calorie_adherence)
  }

  pub fn protein_adherence(&self) -> f64 {
    self.nutrition().map_or(0.0, |n| n.protein_adherence)
  }

  pub fn average_calories(&self) -> f64 {
    self.nutrition().map_or(0.0, |n| n.average_calories)
  }

  pub fn target_calories(&self) -> f64 {
    self.nutrition().map_or(0.0, |n| n.target_calories)
  }

  pub fn nutrition_patterns(&self) -> Vec<String> {
    self
      .nutrition()
      .map(|n| n.detected_patterns.clone())
      .unwrap_or_default()
  }

  // ---- presentation tags ----

  pub fn training_trend_icon(&self) -> &'static str {
    Trend::or_unknown(self.training_trend()).icon()
  }

  pub fn nutrition_trend_icon(&self) -> &'static str {
    Trend::or_unknown(self.nutrition_trend()).icon()
  }

  pub fn training_trend_class(&self) -> &'static str {
    Trend::or_unknown(self.training_trend()).css_class()
  }

  pub fn nutrition_trend_class(&self) -> &'static str {
    Trend::or_unknown(self.nutrition_trend()).css_class()
  }
}

/// Localized label for a trend; `None` reads as "Sin datos".
pub fn trend_text(trend: Option<Trend>) -> &'static str {
  Trend::or_unknown(trend).label()
}

/// Localized labels for the detected nutrition patterns of a snapshot.
pub fn pattern_labels(state: &ProgressState) -> Vec<String> {
  state
    .nutrition_patterns()
    .iter()
    .map(|code| pattern_text(code).to_string())
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
