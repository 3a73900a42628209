//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - A scripted transport standing in for the HTTP layer
//! - A scripted evaluation service and a recording notifier for the store
//! - Mock data factories
//! - Helper assertions

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ApiError, NormalizedError};
use crate::busy::BusyCounter;
use crate::evaluation_service::ProgressEvaluationService;
use crate::models::{
  DailyNutritionSummary, Evaluation, EvaluationKind, ExerciseProgress, LogNutritionRequest, LogWorkoutRequest,
  MealType, NutritionEntry, NutritionLogged, NutritionSummary, TrainingSummary, Trend, WorkoutEntry, WorkoutLogged,
};
use crate::notify::Notifier;
use crate::transport::{Transport, TransportFailure, TransportRequest, TransportResponse};

/// ---------------------------------------------------------------------------
/// Scripted Transport
/// ---------------------------------------------------------------------------

/// One canned transport outcome, consumed in order.
#[derive(Debug, Clone)]
pub enum Scripted {
  Body(String),
  Network(String),
  Status(u16),
}

pub fn ok_json(value: serde_json::Value) -> Scripted {
  Scripted::Body(value.to_string())
}

pub fn ok_raw(body: &str) -> Scripted {
  Scripted::Body(body.to_string())
}

pub fn network_error(message: &str) -> Scripted {
  Scripted::Network(message.to_string())
}

pub fn http_error(status: u16) -> Scripted {
  Scripted::Status(status)
}

/// Replays a fixed script of responses and records every request it sees.
/// Once the script runs out every further send is a network failure.
pub struct ScriptedTransport {
  script: Mutex<VecDeque<Scripted>>,
  requests: Mutex<Vec<TransportRequest>>,
  busy: Option<Arc<BusyCounter>>,
  observed: Mutex<Vec<usize>>,
}

impl ScriptedTransport {
  pub fn new(script: Vec<Scripted>) -> Arc<Self> {
    Arc::new(Self {
      script: Mutex::new(script.into()),
      requests: Mutex::new(Vec::new()),
      busy: None,
      observed: Mutex::new(Vec::new()),
    })
  }

  /// Also records the busy counter's pending count at the moment of each send.
  pub fn observing(script: Vec<Scripted>, busy: Arc<BusyCounter>) -> Arc<Self> {
    Arc::new(Self {
      script: Mutex::new(script.into()),
      requests: Mutex::new(Vec::new()),
      busy: Some(busy),
      observed: Mutex::new(Vec::new()),
    })
  }

  pub fn requests(&self) -> Vec<TransportRequest> {
    self.requests.lock().unwrap().clone()
  }

  pub fn attempts(&self) -> usize {
    self.requests.lock().unwrap().len()
  }

  pub fn observed_pending(&self) -> Vec<usize> {
    self.observed.lock().unwrap().clone()
  }
}

#[async_trait]
impl Transport for ScriptedTransport {
  async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
    if let Some(busy) = &self.busy {
      self.observed.lock().unwrap().push(busy.pending_count());
    }
    let url = request.url.clone();
    self.requests.lock().unwrap().push(request);

    let next = self.script.lock().unwrap().pop_front();
    match next {
      Some(Scripted::Body(body)) => Ok(TransportResponse { status: 200, body }),
      Some(Scripted::Network(message)) => Err(TransportFailure::Network { message }),
      Some(Scripted::Status(status)) => Err(TransportFailure::http(&url, status, String::new())),
      None => Err(TransportFailure::Network {
        message: "script exhausted".to_string(),
      }),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Scripted Evaluation Service
/// ---------------------------------------------------------------------------

pub fn api_error(message: &str) -> ApiError {
  ApiError::Request(NormalizedError::new(message))
}

/// Queue of results for one service method, each optionally delayed.
pub struct Script<T> {
  queue: Mutex<VecDeque<(Duration, Result<T, ApiError>)>>,
  args: Mutex<Vec<String>>,
  calls: AtomicUsize,
}

impl<T> Default for Script<T> {
  fn default() -> Self {
    Self {
      queue: Mutex::new(VecDeque::new()),
      args: Mutex::new(Vec::new()),
      calls: AtomicUsize::new(0),
    }
  }
}

impl<T> Script<T> {
  pub fn ok(&self, value: T) -> &Self {
    self.delayed(Duration::ZERO, Ok(value))
  }

  pub fn fail(&self, message: &str) -> &Self {
    self.delayed(Duration::ZERO, Err(api_error(message)))
  }

  pub fn delayed(&self, delay: Duration, result: Result<T, ApiError>) -> &Self {
    self.queue.lock().unwrap().push_back((delay, result));
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  /// Arguments of every call so far, formatted with `Display`.
  pub fn args(&self) -> Vec<String> {
    self.args.lock().unwrap().clone()
  }

  async fn next(&self, arg: String) -> Result<T, ApiError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.args.lock().unwrap().push(arg);
    let entry = self.queue.lock().unwrap().pop_front();
    match entry {
      Some((delay, result)) => {
        if !delay.is_zero() {
          tokio::time::sleep(delay).await;
        }
        result
      }
      None => Err(api_error("no scripted response")),
    }
  }
}

#[derive(Default)]
pub struct MockEvaluationService {
  pub log_workout: Script<WorkoutLogged>,
  pub workout_history: Script<Vec<WorkoutEntry>>,
  pub exercise_progress: Script<ExerciseProgress>,
  pub log_nutrition: Script<NutritionLogged>,
  pub nutrition_history: Script<Vec<NutritionEntry>>,
  pub daily_nutrition: Script<DailyNutritionSummary>,
  pub evaluate_training: Script<Evaluation>,
  pub evaluate_nutrition: Script<Evaluation>,
  pub evaluate_full: Script<Evaluation>,
  pub evaluation_history: Script<Vec<Evaluation>>,
}

impl MockEvaluationService {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  /// Total number of evaluate_* calls across all three kinds
  pub fn evaluation_calls(&self) -> usize {
    self.evaluate_training.calls() + self.evaluate_nutrition.calls() + self.evaluate_full.calls()
  }
}

#[async_trait]
impl ProgressEvaluationService for MockEvaluationService {
  async fn log_workout(&self, request: &LogWorkoutRequest) -> Result<WorkoutLogged, ApiError> {
    self.log_workout.next(request.exercise_id.to_string()).await
  }

  async fn workout_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<WorkoutEntry>, ApiError> {
    self.workout_history.next(format!("{}..{}", from, to)).await
  }

  async fn exercise_progress(&self, exercise_id: i64) -> Result<ExerciseProgress, ApiError> {
    self.exercise_progress.next(exercise_id.to_string()).await
  }

  async fn log_nutrition(&self, request: &LogNutritionRequest) -> Result<NutritionLogged, ApiError> {
    self.log_nutrition.next(request.date.to_string()).await
  }

  async fn nutrition_history(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<NutritionEntry>, ApiError> {
    self.nutrition_history.next(format!("{}..{}", from, to)).await
  }

  async fn daily_nutrition_summary(&self, date: NaiveDate) -> Result<DailyNutritionSummary, ApiError> {
    self.daily_nutrition.next(date.to_string()).await
  }

  async fn evaluate_training(&self) -> Result<Evaluation, ApiError> {
    self.evaluate_training.next(String::new()).await
  }

  async fn evaluate_nutrition(&self) -> Result<Evaluation, ApiError> {
    self.evaluate_nutrition.next(String::new()).await
  }

  async fn evaluate_full(&self) -> Result<Evaluation, ApiError> {
    self.evaluate_full.next(String::new()).await
  }

  async fn evaluation_history(&self, limit: u32) -> Result<Vec<Evaluation>, ApiError> {
    self.evaluation_history.next(limit.to_string()).await
  }
}

/// ---------------------------------------------------------------------------
/// Recording Notifier
/// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
  successes: Mutex<Vec<String>>,
  errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn successes(&self) -> Vec<String> {
    self.successes.lock().unwrap().clone()
  }

  pub fn errors(&self) -> Vec<String> {
    self.errors.lock().unwrap().clone()
  }
}

impl Notifier for RecordingNotifier {
  fn success(&self, message: &str) {
    self.successes.lock().unwrap().push(message.to_string());
  }

  fn error(&self, message: &str) {
    self.errors.lock().unwrap().push(message.to_string());
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn test_date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Training-only evaluation with an improving trend
pub fn mock_training_evaluation(consistency_pct: f64) -> Evaluation {
  Evaluation {
    id: Some(1),
    evaluated_on: Some(test_date(2025, 3, 10)),
    kind: EvaluationKind::Training,
    training_summary: Some(TrainingSummary {
      total_volume: 12500.0,
      average_max_weight: 82.5,
      strength_improvement_pct: 4.5,
      completed_workouts: 4,
      planned_workouts: 5,
      consistency_pct,
      highlighted_exercises: vec![mock_exercise_progress(1)],
      has_plateau: false,
      plateau_message: None,
    }),
    nutrition_summary: None,
    ai_feedback: "Buen progreso en fuerza".to_string(),
    recommendations: vec!["Aumentar descanso entre series".to_string()],
    achievements: vec!["Nuevo maximo en sentadilla".to_string()],
    training_trend: Some(Trend::Improving),
    nutrition_trend: None,
  }
}

/// Nutrition-only evaluation with a declining trend
pub fn mock_nutrition_evaluation() -> Evaluation {
  Evaluation {
    id: Some(2),
    evaluated_on: Some(test_date(2025, 3, 10)),
    kind: EvaluationKind::Nutrition,
    training_summary: None,
    nutrition_summary: Some(NutritionSummary {
      average_calories: 2100.0,
      target_calories: 2300.0,
      calorie_adherence: 91.0,
      average_protein: 112.5,
      target_protein: 150.0,
      protein_adherence: 75.0,
      detected_patterns: vec!["PROTEINAS_INSUFICIENTES".to_string(), "CUSTOM_CODE".to_string()],
      ..Default::default()
    }),
    ai_feedback: "Falta proteina".to_string(),
    recommendations: vec!["Incluir proteina en la cena".to_string()],
    achievements: Vec::new(),
    training_trend: None,
    nutrition_trend: Some(Trend::Declining),
  }
}

pub fn mock_full_evaluation() -> Evaluation {
  let training = mock_training_evaluation(90.0);
  let nutrition = mock_nutrition_evaluation();
  Evaluation {
    id: Some(3),
    kind: EvaluationKind::Full,
    nutrition_summary: nutrition.nutrition_summary,
    nutrition_trend: nutrition.nutrition_trend,
    ..training
  }
}

pub fn mock_exercise_progress(exercise_id: i64) -> ExerciseProgress {
  ExerciseProgress {
    exercise_id,
    exercise_name: "Sentadilla".to_string(),
    muscle_group: Some("Piernas".to_string()),
    current_weight: 100.0,
    previous_weight: 95.0,
    improvement_pct: 5.26,
    current_volume: None,
    previous_volume: None,
    trend: Some(Trend::Improving),
    sessions_this_week: Some(2),
  }
}

pub fn mock_workout_request() -> LogWorkoutRequest {
  LogWorkoutRequest::new(7, test_date(2025, 5, 2), 4, 8, 60.0)
}

pub fn mock_workout_logged() -> WorkoutLogged {
  WorkoutLogged {
    message: "Entrenamiento registrado correctamente".to_string(),
    id: 41,
    volume: 1920.0,
  }
}

pub fn mock_workout_entry(id: i64) -> WorkoutEntry {
  WorkoutEntry {
    id,
    date: test_date(2025, 5, 2),
    exercise_id: 7,
    exercise_name: "Press banca".to_string(),
    muscle_group: "Pecho".to_string(),
    sets_completed: 4,
    reps_completed: 8,
    weight_used: 60.0,
    volume: 1920.0,
    effort: "MODERADO".to_string(),
    notes: String::new(),
  }
}

pub fn mock_nutrition_request() -> LogNutritionRequest {
  let mut request = LogNutritionRequest::new(test_date(2025, 5, 2), MealType::Lunch);
  request.calories = Some(750.0);
  request.protein = Some(45.0);
  request
}

pub fn mock_nutrition_logged() -> NutritionLogged {
  NutritionLogged {
    message: "Comida registrada correctamente".to_string(),
    id: 5,
  }
}

pub fn mock_nutrition_entry(id: i64) -> NutritionEntry {
  NutritionEntry {
    id,
    date: test_date(2025, 5, 2),
    meal: "COMIDA".to_string(),
    calories: 750.0,
    protein: 45.0,
    carbs: 80.0,
    fat: 20.0,
    description: "Arroz con pollo".to_string(),
  }
}

pub fn mock_daily_summary() -> DailyNutritionSummary {
  DailyNutritionSummary {
    date: test_date(2025, 5, 2),
    total_calories: 2050.0,
    total_protein: 130.0,
    total_carbs: 220.0,
    total_fat: 65.0,
    entries: 4,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::transport::HttpMethod;

  fn request(url: &str) -> TransportRequest {
    TransportRequest {
      method: HttpMethod::Get,
      url: url.to_string(),
      params: Vec::new(),
      headers: Vec::new(),
      body: None,
    }
  }

  #[tokio::test]
  async fn test_scripted_transport_replays_in_order() {
    let transport = ScriptedTransport::new(vec![http_error(404), ok_raw("[]")]);

    let first = transport.send(request("http://api.test/a")).await.unwrap_err();
    assert_eq!(first, TransportFailure::http("http://api.test/a", 404, String::new()));

    let second = transport.send(request("http://api.test/b")).await.unwrap();
    assert_eq!(second.body, "[]");

    let exhausted = transport.send(request("http://api.test/c")).await;
    assert!(matches!(exhausted, Err(TransportFailure::Network { .. })));
    assert_eq!(transport.attempts(), 3);
  }

  #[tokio::test]
  async fn test_mock_service_counts_calls_and_runs_dry() {
    let service = MockEvaluationService::new();
    service.evaluate_full.ok(mock_full_evaluation());

    assert!(service.evaluate_full().await.is_ok());
    assert!(service.evaluate_full().await.is_err());
    assert_eq!(service.evaluate_full.calls(), 2);
    assert_eq!(service.evaluation_calls(), 2);
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let full = mock_full_evaluation();
    assert_eq!(full.kind, EvaluationKind::Full);
    assert!(full.training_summary.is_some());
    assert!(full.nutrition_summary.is_some());

    assert_approx_eq!(mock_workout_request().volume(), mock_workout_logged().volume, 1e-9);
  }
}
