// shopfront/src/engine/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Returned by a step handler to let the pipeline go on or halt it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Proceed with the remaining handlers and steps.
  Continue,
  /// Halt the pipeline. No further handlers run.
  Stop,
}

/// Outcome of a full pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every non-skipped step ran.
  Completed,
  /// A handler returned `PipelineControl::Stop`.
  Stopped,
}
