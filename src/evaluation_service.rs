//! Progress-evaluation endpoints
//!
//! `ProgressEvaluationService` is the seam the store talks to. The production
//! implementation is a thin set of typed calls over `ApiClient`, so retry,
//! busy indication and error normalization come for free.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::models::{
  DailyNutritionSummary, Evaluation, ExerciseProgress, LogNutritionRequest, LogWorkoutRequest, NutritionEntry,
  NutritionLogged, WorkoutEntry, WorkoutLogged,
};

/// ---------------------------------------------------------------------------
/// Endpoints
/// ---------------------------------------------------------------------------

const TRAINING_LOG: &str = "progress-evaluation/training/log";
const TRAINING_HISTORY: &str = "progress-evaluation/training/history";
const NUTRITION_LOG: &str = "progress-evaluation/nutrition/log";
const NUTRITION_HISTORY: &str = "progress-evaluation/nutrition/history";
const NUTRITION_DAILY_SUMMARY: &str = "progress-evaluation/nutrition/daily-summary";
const EVALUATE_TRAINING: &str = "progress-evaluation/evaluate/training";
const EVALUATE_NUTRITION: &str = "progress-evaluation/evaluate/nutrition";
const EVALUATE_FULL: &str = "progress-evaluation/evaluate/full";
const EVALUATION_HISTORY: &str = "progress-evaluation/evaluate/history";

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// ---------------------------------------------------------------------------
/// Service Trait
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait ProgressEvaluationService: Send + Sync {
  async fn log_workout(&self, request: &LogWorkoutRequest) -> Result<WorkoutLogged, ApiError>;
  async fn workout_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<WorkoutEntry>, ApiError>;
  async fn exercise_progress(&self, exercise_id: i64) -> Result<ExerciseProgress, ApiError>;

  async fn log_nutrition(&self, request: &LogNutritionRequest) -> Result<NutritionLogged, ApiError>;
  async fn nutrition_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NutritionEntry>, ApiError>;
  async fn daily_nutrition_summary(&self, date: NaiveDate) -> Result<DailyNutritionSummary, ApiError>;

  async fn evaluate_training(&self) -> Result<Evaluation, ApiError>;
  async fn evaluate_nutrition(&self) -> Result<Evaluation, ApiError>;
  async fn evaluate_full(&self) -> Result<Evaluation, ApiError>;
  async fn evaluation_history(&self, limit: u32) -> Result<Vec<Evaluation>, ApiError>;
}

/// ---------------------------------------------------------------------------
/// HTTP Implementation
/// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ProgressEvaluationClient {
  api: ApiClient,
}

impl ProgressEvaluationClient {
  pub fn new(api: ApiClient) -> Self {
    Self { api }
  }
}

fn date_range(from: NaiveDate, to: NaiveDate) -> RequestOptions {
  RequestOptions::new()
    .param("from", from.format(DATE_FORMAT))
    .param("to", to.format(DATE_FORMAT))
}

#[async_trait]
impl ProgressEvaluationService for ProgressEvaluationClient {
  async fn log_workout(&self, request: &LogWorkoutRequest) -> Result<WorkoutLogged, ApiError> {
    self.api.post(TRAINING_LOG, request).await
  }

  async fn workout_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<WorkoutEntry>, ApiError> {
    self.api.get_with(TRAINING_HISTORY, date_range(from, to)).await
  }

  async fn exercise_progress(&self, exercise_id: i64) -> Result<ExerciseProgress, ApiError> {
    let endpoint = format!("progress-evaluation/training/exercise/{}/progress", exercise_id);
    self.api.get(&endpoint).await
  }

  async fn log_nutrition(&self, request: &LogNutritionRequest) -> Result<NutritionLogged, ApiError> {
    self.api.post(NUTRITION_LOG, request).await
  }

  async fn nutrition_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NutritionEntry>, ApiError> {
    self.api.get_with(NUTRITION_HISTORY, date_range(from, to)).await
  }

  async fn daily_nutrition_summary(&self, date: NaiveDate) -> Result<DailyNutritionSummary, ApiError> {
    let options = RequestOptions::new().param("date", date.format(DATE_FORMAT));
    self.api.get_with(NUTRITION_DAILY_SUMMARY, options).await
  }

  async fn evaluate_training(&self) -> Result<Evaluation, ApiError> {
    self.api.get(EVALUATE_TRAINING).await
  }

  async fn evaluate_nutrition(&self) -> Result<Evaluation, ApiError> {
    self.api.get(EVALUATE_NUTRITION).await
  }

  async fn evaluate_full(&self) -> Result<Evaluation, ApiError> {
    self.api.get(EVALUATE_FULL).await
  }

  async fn evaluation_history(&self, limit: u32) -> Result<Vec<Evaluation>, ApiError> {
    let options = RequestOptions::new().param("limit", limit);
    self.api.get_with(EVALUATION_HISTORY, options).await
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
