pub mod api;
pub mod busy;
pub mod config;
pub mod evaluation_service;
pub mod logging;
pub mod models;
pub mod notify;
pub mod resolver;
pub mod state;
pub mod store;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError, NormalizedError, RequestOptions};
pub use busy::{BusyCounter, BusyGuard};
pub use config::{ApiConfig, ConfigError};
pub use evaluation_service::{ProgressEvaluationClient, ProgressEvaluationService};
pub use notify::{LogNotifier, Notifier};
pub use state::ProgressState;
pub use store::ProgressEvaluationStore;

use std::sync::Arc;
use tracing::{error, info, warn};

use transport::ReqwestTransport;

/// ---------------------------------------------------------------------------
/// Composition Root
/// ---------------------------------------------------------------------------

/// Wires one busy counter, one HTTP client and the store for a session.
pub struct ProgressEngine {
  pub busy: Arc<BusyCounter>,
  pub store: ProgressEvaluationStore,
}

impl ProgressEngine {
  pub fn new(config: ApiConfig) -> Self {
    let busy = BusyCounter::shared();
    let api = ApiClient::new(&config, busy.clone(), Arc::new(ReqwestTransport::new()));
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let service = Arc::new(ProgressEvaluationClient::new(api));
    let store = ProgressEvaluationStore::new(service, notifier);

    Self { busy, store }
  }
}

fn print_report(state: &ProgressState) {
  println!("Progress evaluation");
  println!(
    "  Training:  {} {}",
    state.training_trend_icon(),
    state::trend_text(state.training_trend())
  );
  println!(
    "  Nutrition: {} {}",
    state.nutrition_trend_icon(),
    state::trend_text(state.nutrition_trend())
  );

  let (completed, planned) = state.workout_completion();
  println!("  Consistency: {:.0}% ({}/{} workouts)", state.training_consistency(), completed, planned);
  println!("  Volume: {:.1} kg, strength {:+.1}%", state.training_volume(), state.strength_improvement());
  if state.has_plateau() {
    println!("  Plateau: {}", state.plateau_message());
  }
  println!(
    "  Calories: {:.0}/{:.0} ({:.0}% adherence), protein {:.0}%",
    state.average_calories(),
    state.target_calories(),
    state.calorie_adherence(),
    state.protein_adherence()
  );
  for pattern in state::pattern_labels(state) {
    println!("  Pattern: {}", pattern);
  }

  if !state.ai_feedback().is_empty() {
    println!("\n{}", state.ai_feedback());
  }
  for recommendation in state.recommendations() {
    println!("  - {}", recommendation);
  }
  for achievement in state.achievements() {
    println!("  * {}", achievement);
  }
}

pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init_logging();

  let config = match ApiConfig::from_env() {
    Ok(config) => config,
    Err(ConfigError::MissingConfig(var)) => {
      warn!("{} not set, using {}", var, config::DEFAULT_API_URL);
      ApiConfig::default()
    }
    Err(e) => {
      error!("Invalid configuration: {}", e);
      return;
    }
  };

  let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
    Ok(runtime) => runtime,
    Err(e) => {
      error!("Failed to start async runtime: {}", e);
      return;
    }
  };

  info!(api_url = %config.api_url, "loading full evaluation");
  let engine = ProgressEngine::new(config);

  runtime.block_on(async {
    engine.store.load_full_evaluation().await;
  });

  let state = engine.store.snapshot();
  match &state.error {
    Some(message) => eprintln!("{}", message),
    None => print_report(&state),
  }
}
