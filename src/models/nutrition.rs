use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
  #[serde(rename = "DESAYUNO")]
  Breakfast,
  /// Mid-morning snack
  #[serde(rename = "ALMUERZO")]
  MidMorning,
  #[serde(rename = "COMIDA")]
  Lunch,
  #[serde(rename = "MERIENDA")]
  AfternoonSnack,
  #[serde(rename = "CENA")]
  Dinner,
}

/// Body of `POST progress-evaluation/nutrition/log`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogNutritionRequest {
  #[serde(rename = "fecha")]
  pub date: NaiveDate,
  #[serde(rename = "tipoComida")]
  pub meal: MealType,
  #[serde(rename = "caloriasConsumidas", skip_serializing_if = "Option::is_none", default)]
  pub calories: Option<f64>,
  #[serde(rename = "proteinasConsumidas", skip_serializing_if = "Option::is_none", default)]
  pub protein: Option<f64>,
  #[serde(rename = "carbohidratosConsumidos", skip_serializing_if = "Option::is_none", default)]
  pub carbs: Option<f64>,
  #[serde(rename = "grasasConsumidas", skip_serializing_if = "Option::is_none", default)]
  pub fat: Option<f64>,
  #[serde(rename = "fibraConsumida", skip_serializing_if = "Option::is_none", default)]
  pub fiber: Option<f64>,
  #[serde(rename = "aguaConsumidaMl", skip_serializing_if = "Option::is_none", default)]
  pub water_ml: Option<f64>,
  #[serde(rename = "descripcionComida", skip_serializing_if = "Option::is_none", default)]
  pub description: Option<String>,
  #[serde(rename = "esComidaPlaneada", skip_serializing_if = "Option::is_none", default)]
  pub planned: Option<bool>,
}

impl LogNutritionRequest {
  pub fn new(date: NaiveDate, meal: MealType) -> Self {
    Self {
      date,
      meal,
      calories: None,
      protein: None,
      carbs: None,
      fat: None,
      fiber: None,
      water_ml: None,
      description: None,
      planned: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionLogged {
  #[serde(default, deserialize_with = "null_as_default")]
  pub message: String,
  pub id: i64,
}

/// One row of the nutrition history. Missing macros come back as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
  pub id: i64,
  #[serde(rename = "fecha")]
  pub date: NaiveDate,
  #[serde(rename = "tipoComida", default, deserialize_with = "null_as_default")]
  pub meal: String,
  #[serde(rename = "caloriasConsumidas", default, deserialize_with = "null_as_default")]
  pub calories: f64,
  #[serde(rename = "proteinasConsumidas", default, deserialize_with = "null_as_default")]
  pub protein: f64,
  #[serde(rename = "carbohidratosConsumidos", default, deserialize_with = "null_as_default")]
  pub carbs: f64,
  #[serde(rename = "grasasConsumidas", default, deserialize_with = "null_as_default")]
  pub fat: f64,
  #[serde(rename = "descripcionComida", default, deserialize_with = "null_as_default")]
  pub description: String,
}

/// Totals for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionSummary {
  #[serde(rename = "fecha")]
  pub date: NaiveDate,
  #[serde(rename = "totalCalorias", default, deserialize_with = "null_as_default")]
  pub total_calories: f64,
  #[serde(rename = "totalProteinas", default, deserialize_with = "null_as_default")]
  pub total_protein: f64,
  #[serde(rename = "totalCarbohidratos", default, deserialize_with = "null_as_default")]
  pub total_carbs: f64,
  #[serde(rename = "totalGrasas", default, deserialize_with = "null_as_default")]
  pub total_fat: f64,
  #[serde(rename = "registros", default, deserialize_with = "null_as_default")]
  pub entries: u32,
}

/// Human-readable label for a detected nutrition pattern code. Unknown codes
/// are shown as-is.
pub fn pattern_text(code: &str) -> &str {
  match code {
    "BAJO_CONSUMO_FRECUENTE" => "Consumo bajo frecuente",
    "SOBRE_CONSUMO_FRECUENTE" => "Consumo alto frecuente",
    "PROTEINAS_INSUFICIENTES" => "Proteinas insuficientes",
    "HIDRATACION_BAJA" => "Hidratacion baja",
    "SIN_DATOS_SUFICIENTES" => "Datos insuficientes",
    other => other,
  }
}
