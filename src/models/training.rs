use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Perceived effort (RPE-style) of a logged set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffortLevel {
  #[serde(rename = "FACIL")]
  Easy,
  #[serde(rename = "MODERADO")]
  Moderate,
  #[serde(rename = "DIFICIL")]
  Hard,
  #[serde(rename = "MUY_DIFICIL")]
  VeryHard,
}

/// Body of `POST progress-evaluation/training/log`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogWorkoutRequest {
  #[serde(rename = "ejercicioId")]
  pub exercise_id: i64,
  #[serde(rename = "fecha")]
  pub date: NaiveDate,
  #[serde(rename = "seriesCompletadas")]
  pub sets_completed: u32,
  #[serde(rename = "repeticionesCompletadas")]
  pub reps_completed: u32,
  #[serde(rename = "pesoUtilizado")]
  pub weight_used: f64,
  #[serde(rename = "tiempoDescansoReal", skip_serializing_if = "Option::is_none", default)]
  pub rest_seconds: Option<u32>,
  #[serde(rename = "duracionMinutos", skip_serializing_if = "Option::is_none", default)]
  pub duration_minutes: Option<u32>,
  #[serde(rename = "nivelEsfuerzo", skip_serializing_if = "Option::is_none", default)]
  pub effort: Option<EffortLevel>,
  #[serde(rename = "notas", skip_serializing_if = "Option::is_none", default)]
  pub notes: Option<String>,
}

impl LogWorkoutRequest {
  pub fn new(exercise_id: i64, date: NaiveDate, sets_completed: u32, reps_completed: u32, weight_used: f64) -> Self {
    Self {
      exercise_id,
      date,
      sets_completed,
      reps_completed,
      weight_used,
      rest_seconds: None,
      duration_minutes: None,
      effort: None,
      notes: None,
    }
  }

  /// sets x reps x weight, the same volume the backend reports back
  pub fn volume(&self) -> f64 {
    f64::from(self.sets_completed) * f64::from(self.reps_completed) * self.weight_used
  }
}

/// Acknowledgement for a logged workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogged {
  #[serde(default, deserialize_with = "null_as_default")]
  pub message: String,
  pub id: i64,
  #[serde(rename = "volumen", default, deserialize_with = "null_as_default")]
  pub volume: f64,
}

/// One row of the workout history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
  pub id: i64,
  #[serde(rename = "fecha")]
  pub date: NaiveDate,
  #[serde(rename = "ejercicioId")]
  pub exercise_id: i64,
  #[serde(rename = "nombreEjercicio", default, deserialize_with = "null_as_default")]
  pub exercise_name: String,
  #[serde(rename = "grupoMuscular", default, deserialize_with = "null_as_default")]
  pub muscle_group: String,
  #[serde(rename = "seriesCompletadas", default, deserialize_with = "null_as_default")]
  pub sets_completed: u32,
  #[serde(rename = "repeticionesCompletadas", default, deserialize_with = "null_as_default")]
  pub reps_completed: u32,
  #[serde(rename = "pesoUtilizado", default, deserialize_with = "null_as_default")]
  pub weight_used: f64,
  #[serde(rename = "volumen", default, deserialize_with = "null_as_default")]
  pub volume: f64,
  // Empty string when the set had no effort recorded
  #[serde(rename = "nivelEsfuerzo", default, deserialize_with = "null_as_default")]
  pub effort: String,
  #[serde(rename = "notas", default, deserialize_with = "null_as_default")]
  pub notes: String,
}
