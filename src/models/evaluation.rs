use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// ---------------------------------------------------------------------------
/// Trend
/// ---------------------------------------------------------------------------

/// Direction of progress reported by the evaluation backend.
///
/// `Unknown` absorbs any value the backend may add later, so a new trend
/// never breaks decoding of the whole evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
  #[serde(rename = "MEJORANDO")]
  Improving,
  #[serde(rename = "ESTABLE")]
  Stable,
  #[serde(rename = "RETROCEDIENDO")]
  Declining,
  #[serde(rename = "PLATEAU")]
  Plateau,
  #[serde(other)]
  Unknown,
}

impl Trend {
  /// `None` means the evaluation carried no trend at all.
  pub fn or_unknown(trend: Option<Trend>) -> Trend {
    trend.unwrap_or(Trend::Unknown)
  }

  pub fn icon(self) -> &'static str {
    match self {
      Self::Improving => "↗",
      Self::Stable => "→",
      Self::Declining => "↘",
      Self::Plateau => "⏸",
      Self::Unknown => "?",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Improving => "Mejorando",
      Self::Stable => "Estable",
      Self::Declining => "Retrocediendo",
      Self::Plateau => "Plateau",
      Self::Unknown => "Sin datos",
    }
  }

  pub fn css_class(self) -> &'static str {
    match self {
      Self::Improving => "trend-improving",
      Self::Stable => "trend-stable",
      Self::Declining => "trend-declining",
      Self::Plateau => "trend-plateau",
      Self::Unknown => "trend-unknown",
    }
  }
}

impl std::fmt::Display for Trend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// ---------------------------------------------------------------------------
/// Evaluation Kind
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationKind {
  #[serde(rename = "ENTRENAMIENTO")]
  Training,
  #[serde(rename = "NUTRICION")]
  Nutrition,
  #[default]
  #[serde(rename = "INTEGRAL")]
  Full,
}

impl std::fmt::Display for EvaluationKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Training => write!(f, "training"),
      Self::Nutrition => write!(f, "nutrition"),
      Self::Full => write!(f, "full"),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Summaries
/// ---------------------------------------------------------------------------

/// Strength progress of a single exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
  #[serde(rename = "ejercicioId")]
  pub exercise_id: i64,
  #[serde(rename = "nombreEjercicio", default, deserialize_with = "null_as_default")]
  pub exercise_name: String,
  #[serde(rename = "grupoMuscular", default)]
  pub muscle_group: Option<String>,
  #[serde(rename = "pesoActual", default, deserialize_with = "null_as_default")]
  pub current_weight: f64,
  #[serde(rename = "pesoAnterior", default, deserialize_with = "null_as_default")]
  pub previous_weight: f64,
  #[serde(rename = "mejoraPorcentaje", default, deserialize_with = "null_as_default")]
  pub improvement_pct: f64,
  #[serde(rename = "volumenActual", default)]
  pub current_volume: Option<f64>,
  #[serde(rename = "volumenAnterior", default)]
  pub previous_volume: Option<f64>,
  #[serde(rename = "tendencia", default)]
  pub trend: Option<Trend>,
  #[serde(rename = "registrosSemana", default)]
  pub sessions_this_week: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingSummary {
  #[serde(rename = "volumenTotal", default, deserialize_with = "null_as_default")]
  pub total_volume: f64,
  #[serde(rename = "pesoMaximoPromedio", default, deserialize_with = "null_as_default")]
  pub average_max_weight: f64,
  #[serde(rename = "mejoraFuerzaPorcentaje", default, deserialize_with = "null_as_default")]
  pub strength_improvement_pct: f64,
  #[serde(rename = "entrenamientosCompletados", default, deserialize_with = "null_as_default")]
  pub completed_workouts: u32,
  #[serde(rename = "entrenamientosPlanificados", default, deserialize_with = "null_as_default")]
  pub planned_workouts: u32,
  #[serde(rename = "consistenciaPorcentaje", default, deserialize_with = "null_as_default")]
  pub consistency_pct: f64,
  #[serde(rename = "ejerciciosDestacados", default, deserialize_with = "null_as_default")]
  pub highlighted_exercises: Vec<ExerciseProgress>,
  #[serde(rename = "hayPlateau", default, deserialize_with = "null_as_default")]
  pub has_plateau: bool,
  #[serde(rename = "mensajePlateau", default)]
  pub plateau_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionSummary {
  #[serde(rename = "caloriasPromedio", default, deserialize_with = "null_as_default")]
  pub average_calories: f64,
  #[serde(rename = "caloriasMeta", default, deserialize_with = "null_as_default")]
  pub target_calories: f64,
  #[serde(rename = "adherenciaCalorias", default, deserialize_with = "null_as_default")]
  pub calorie_adherence: f64,
  #[serde(rename = "proteinasPromedio", default, deserialize_with = "null_as_default")]
  pub average_protein: f64,
  #[serde(rename = "proteinasMeta", default, deserialize_with = "null_as_default")]
  pub target_protein: f64,
  #[serde(rename = "adherenciaProteinas", default, deserialize_with = "null_as_default")]
  pub protein_adherence: f64,
  #[serde(rename = "carbohidratosPromedio", default)]
  pub average_carbs: Option<f64>,
  #[serde(rename = "carbohidratosMeta", default)]
  pub target_carbs: Option<f64>,
  #[serde(rename = "grasasPromedio", default)]
  pub average_fat: Option<f64>,
  #[serde(rename = "grasasMeta", default)]
  pub target_fat: Option<f64>,
  #[serde(rename = "aguaPromedio", default)]
  pub average_water_ml: Option<f64>,
  /// Pattern codes such as `PROTEINAS_INSUFICIENTES`, see `pattern_text`
  #[serde(rename = "patronesDetectados", default, deserialize_with = "null_as_default")]
  pub detected_patterns: Vec<String>,
}

/// ---------------------------------------------------------------------------
/// Evaluation
/// ---------------------------------------------------------------------------

/// One progress evaluation as produced by the backend. Training-only
/// evaluations carry no nutrition summary and vice versa.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(rename = "fechaEvaluacion", default)]
  pub evaluated_on: Option<NaiveDate>,
  #[serde(rename = "tipoEvaluacion", default, deserialize_with = "null_as_default")]
  pub kind: EvaluationKind,
  #[serde(rename = "entrenamientoResumen", default)]
  pub training_summary: Option<TrainingSummary>,
  #[serde(rename = "nutricionResumen", default)]
  pub nutrition_summary: Option<NutritionSummary>,
  #[serde(rename = "feedbackIA", default, deserialize_with = "null_as_default")]
  pub ai_feedback: String,
  #[serde(rename = "recomendaciones", default, deserialize_with = "null_as_default")]
  pub recommendations: Vec<String>,
  #[serde(rename = "logrosDestacados", default, deserialize_with = "null_as_default")]
  pub achievements: Vec<String>,
  #[serde(rename = "tendenciaEntrenamiento", default)]
  pub training_trend: Option<Trend>,
  #[serde(rename = "tendenciaNutricion", default)]
  pub nutrition_trend: Option<Trend>,
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
