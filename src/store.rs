//! Progress-evaluation store
//!
//! Owns the `ProgressState` for the session and runs every operation through
//! the same cycle: mark loading and clear the error, call the service, apply
//! the result or a fixed user-facing message, then drop the loading flag.
//! State changes are published on a `watch` channel; nothing is held across
//! an `.await`.
//!
//! Concurrent calls of the same operation are not coalesced. Whichever
//! resolves last wins.

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::ApiError;
use crate::evaluation_service::{ProgressEvaluationService, DEFAULT_HISTORY_LIMIT};
use crate::models::{
  Evaluation, EvaluationKind, ExerciseProgress, LogNutritionRequest, LogWorkoutRequest, NutritionLogged, Trend,
  WorkoutLogged,
};
use crate::notify::Notifier;
use crate::state::ProgressState;

/// ---------------------------------------------------------------------------
/// Messages
/// ---------------------------------------------------------------------------

const TRAINING_EVALUATION_FAILED: &str = "Error al cargar evaluacion de entrenamiento";
const NUTRITION_EVALUATION_FAILED: &str = "Error al cargar evaluacion de nutricion";
const FULL_EVALUATION_FAILED: &str = "Error al cargar evaluacion completa";
const EXERCISE_PROGRESS_FAILED: &str = "Error al cargar progreso del ejercicio";
const DAILY_NUTRITION_FAILED: &str = "Error al cargar resumen nutricional";

const WORKOUT_LOG_FAILED: &str = "Error al registrar entrenamiento";
const WORKOUT_LOG_FAILED_NOTICE: &str = "Error al registrar el entrenamiento";
const WORKOUT_LOGGED_NOTICE: &str = "Entrenamiento registrado";

const NUTRITION_LOG_FAILED: &str = "Error al registrar nutricion";
const NUTRITION_LOG_FAILED_NOTICE: &str = "Error al registrar la comida";
const NUTRITION_LOGGED_NOTICE: &str = "Comida registrada";

/// ---------------------------------------------------------------------------
/// Store
/// ---------------------------------------------------------------------------

pub struct ProgressEvaluationStore {
  service: Arc<dyn ProgressEvaluationService>,
  notifier: Arc<dyn Notifier>,
  state: watch::Sender<ProgressState>,
  last_kind: Mutex<EvaluationKind>,
}

impl ProgressEvaluationStore {
  pub fn new(service: Arc<dyn ProgressEvaluationService>, notifier: Arc<dyn Notifier>) -> Self {
    let (state, _) = watch::channel(ProgressState::default());
    Self {
      service,
      notifier,
      state,
      last_kind: Mutex::new(EvaluationKind::default()),
    }
  }

  // ---- reactive surface ----

  /// Watch the state; every mutation notifies receivers.
  pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
    self.state.subscribe()
  }

  pub fn snapshot(&self) -> ProgressState {
    self.state.borrow().clone()
  }

  /// Kind that `refresh` will re-issue
  pub(crate) fn last_evaluation_kind(&self) -> EvaluationKind {
    *self.last_kind.lock().unwrap_or_else(|e| e.into_inner())
  }

  fn update(&self, apply: impl FnOnce(&mut ProgressState)) {
    self.state.send_modify(apply);
  }

  fn begin(&self) {
    self.update(|s| {
      s.loading = true;
      s.error = None;
    });
  }

  fn fail(&self, message: &str, err: &ApiError) {
    debug!(error = %err, "{}", message);
    self.update(|s| {
      s.error = Some(message.to_string());
      s.loading = false;
    });
  }

  // ---- evaluations ----

  pub async fn load_training_evaluation(&self) {
    self.load_evaluation(EvaluationKind::Training).await
  }

  pub async fn load_nutrition_evaluation(&self) {
    self.load_evaluation(EvaluationKind::Nutrition).await
  }

  pub async fn load_full_evaluation(&self) {
    self.load_evaluation(EvaluationKind::Full).await
  }

  async fn load_evaluation(&self, kind: EvaluationKind) {
    self.begin();
    *self.last_kind.lock().unwrap_or_else(|e| e.into_inner()) = kind;

    let (result, failure) = match kind {
      EvaluationKind::Training => (self.service.evaluate_training().await, TRAINING_EVALUATION_FAILED),
      EvaluationKind::Nutrition => (self.service.evaluate_nutrition().await, NUTRITION_EVALUATION_FAILED),
      EvaluationKind::Full => (self.service.evaluate_full().await, FULL_EVALUATION_FAILED),
    };

    match result {
      Ok(evaluation) => {
        info!(%kind, "evaluation loaded");
        self.update(|s| {
          s.current_evaluation = Some(evaluation);
          s.loading = false;
        });
      }
      Err(err) => self.fail(failure, &err),
    }
  }

  /// Re-run whichever evaluation was loaded last (full if none yet).
  pub async fn refresh(&self) {
    let kind = self.last_evaluation_kind();
    self.load_evaluation(kind).await
  }

  // ---- writes ----

  /// Log a workout. On success the training evaluation is reloaded as a
  /// separate step; its outcome does not change the returned value.
  pub async fn log_workout(&self, request: &LogWorkoutRequest) -> Option<WorkoutLogged> {
    self.begin();

    match self.service.log_workout(request).await {
      Ok(logged) => {
        info!(id = logged.id, volume = logged.volume, "workout logged");
        self.notifier.success(WORKOUT_LOGGED_NOTICE);
        self.update(|s| s.loading = false);

        self.load_training_evaluation().await;
        Some(logged)
      }
      Err(err) => {
        self.fail(WORKOUT_LOG_FAILED, &err);
        self.notifier.error(WORKOUT_LOG_FAILED_NOTICE);
        None
      }
    }
  }

  /// Log a meal, then reload the nutrition evaluation.
  pub async fn log_nutrition(&self, request: &LogNutritionRequest) -> Option<NutritionLogged> {
    self.begin();

    match self.service.log_nutrition(request).await {
      Ok(logged) => {
        info!(id = logged.id, "nutrition logged");
        self.notifier.success(NUTRITION_LOGGED_NOTICE);
        self.update(|s| s.loading = false);

        self.load_nutrition_evaluation().await;
        Some(logged)
      }
      Err(err) => {
        self.fail(NUTRITION_LOG_FAILED, &err);
        self.notifier.error(NUTRITION_LOG_FAILED_NOTICE);
        None
      }
    }
  }

  // ---- history ----
  //
  // History loads never touch `loading` or `error`; a failure just empties
  // the list.

  pub async fn load_history(&self, limit: Option<u32>) {
    let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let history = self.service.evaluation_history(limit).await.unwrap_or_else(|err| {
      debug!(error = %err, "evaluation history unavailable");
      Vec::new()
    });
    self.update(|s| s.evaluation_history = history);
  }

  pub async fn load_workout_history(&self, from: NaiveDate, to: NaiveDate) {
    let history = self.service.workout_history(from, to).await.unwrap_or_else(|err| {
      debug!(error = %err, "workout history unavailable");
      Vec::new()
    });
    self.update(|s| s.workout_history = history);
  }

  pub async fn load_nutrition_history(&self, from: NaiveDate, to: NaiveDate) {
    let history = self.service.nutrition_history(from, to).await.unwrap_or_else(|err| {
      debug!(error = %err, "nutrition history unavailable");
      Vec::new()
    });
    self.update(|s| s.nutrition_history = history);
  }

  // ---- single-record lookups ----

  pub async fn load_exercise_progress(&self, exercise_id: i64) {
    self.begin();
    match self.service.exercise_progress(exercise_id).await {
      Ok(progress) => self.update(|s| {
        s.exercise_progress = Some(progress);
        s.loading = false;
      }),
      Err(err) => self.fail(EXERCISE_PROGRESS_FAILED, &err),
    }
  }

  pub async fn load_daily_nutrition(&self, date: NaiveDate) {
    self.begin();
    match self.service.daily_nutrition_summary(date).await {
      Ok(summary) => self.update(|s| {
        s.daily_nutrition = Some(summary);
        s.loading = false;
      }),
      Err(err) => self.fail(DAILY_NUTRITION_FAILED, &err),
    }
  }

  // ---- reset ----

  pub fn clear_error(&self) {
    self.update(|s| s.error = None);
  }

  /// Drop everything the user could see. The remembered evaluation kind
  /// survives so `refresh` keeps following the active tab.
  pub fn clear(&self) {
    self.update(|s| *s = ProgressState::default());
  }

  // ---- derived views over the current snapshot ----

  pub fn current_evaluation(&self) -> Option<Evaluation> {
    self.state.borrow().current_evaluation.clone()
  }

  pub fn loading(&self) -> bool {
    self.state.borrow().loading
  }

  pub fn error(&self) -> Option<String> {
    self.state.borrow().error.clone()
  }

  pub fn has_data(&self) -> bool {
    self.state.borrow().has_data()
  }

  pub fn training_trend(&self) -> Option<Trend> {
    self.state.borrow().training_trend()
  }

  pub fn nutrition_trend(&self) -> Option<Trend> {
    self.state.borrow().nutrition_trend()
  }

  pub fn ai_feedback(&self) -> String {
    self.state.borrow().ai_feedback()
  }

  pub fn recommendations(&self) -> Vec<String> {
    self.state.borrow().recommendations()
  }

  pub fn achievements(&self) -> Vec<String> {
    self.state.borrow().achievements()
  }

  pub fn training_consistency(&self) -> f64 {
    self.state.borrow().training_consistency()
  }

  pub fn calorie_adherence(&self) -> f64 {
    self.state.borrow().calorie_adherence()
  }

  pub fn protein_adherence(&self) -> f64 {
    self.state.borrow().protein_adherence()
  }

  pub fn has_plateau(&self) -> bool {
    self.state.borrow().has_plateau()
  }

  pub fn plateau_message(&self) -> String {
    self.state.borrow().plateau_message()
  }

  pub fn training_volume(&self) -> f64 {
    self.state.borrow().training_volume()
  }

  pub fn strength_improvement(&self) -> f64 {
    self.state.borrow().strength_improvement()
  }

  pub fn average_calories(&self) -> f64 {
    self.state.borrow().average_calories()
  }

  pub fn target_calories(&self) -> f64 {
    self.state.borrow().target_calories()
  }

  pub fn nutrition_patterns(&self) -> Vec<String> {
    self.state.borrow().nutrition_patterns()
  }

  pub fn highlighted_exercises(&self) -> Vec<ExerciseProgress> {
    self.state.borrow().highlighted_exercises()
  }

  pub fn workout_completion(&self) -> (u32, u32) {
    self.state.borrow().workout_completion()
  }

  pub fn training_trend_icon(&self) -> &'static str {
    self.state.borrow().training_trend_icon()
  }

  pub fn nutrition_trend_icon(&self) -> &'static str {
    self.state.borrow().nutrition_trend_icon()
  }

  pub fn training_trend_class(&self) -> &'static str {
    self.state.borrow().training_trend_class()
  }

  pub fn nutrition_trend_class(&self) -> &'static str {
    self.state.borrow().nutrition_trend_class()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
