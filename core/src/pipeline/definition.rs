// shopfront/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its construction.

use crate::engine::step::{Handler, SkipCondition, StepDef};
use crate::error::PipelineError;
use std::collections::HashMap;

/// An ordered list of named steps with async handlers over a shared `TData`.
///
/// `Err` is the error type handlers return; it must absorb `PipelineError` so that
/// misconfiguration (a required step with no handler) surfaces through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub(crate) name: &'static str,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(step_name, optional, skip_if)` tuples.
  pub fn new(name: &'static str, step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(step_name, optional, skip_if)| StepDef {
        name: (*step_name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      name,
      steps,
      on: HashMap::new(),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Panics on an unknown step: that is a wiring bug, not a runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "Pipeline setup error: step '{}' not found in pipeline '{}'.",
        step_name, self.name
      );
    }
  }
}
