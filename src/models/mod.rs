pub mod evaluation;
pub mod nutrition;
pub mod training;

pub use evaluation::{Evaluation, EvaluationKind, ExerciseProgress, NutritionSummary, TrainingSummary, Trend};
pub use nutrition::{
  pattern_text, DailyNutritionSummary, LogNutritionRequest, MealType, NutritionEntry, NutritionLogged,
};
pub use training::{EffortLevel, LogWorkoutRequest, WorkoutEntry, WorkoutLogged};

use serde::{Deserialize, Deserializer};

/// The backend serializes absent lists and text as `null`; treat that the
/// same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
