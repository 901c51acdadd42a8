// shopfront/src/pipeline/execution.rs

//! `Pipeline::run()`: executes steps in order against one shared context.

use crate::engine::context_data::ContextData;
use crate::engine::control::{PipelineControl, PipelineResult};
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Runs every step in order.
  ///
  /// A step whose `skip_if` returns true is skipped. A step with no handlers is
  /// skipped when optional and is an error otherwise. The first handler error
  /// aborts the run and is returned as-is.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(pipeline = self.name, num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(ctx_data.clone()) {
          event!(Level::DEBUG, step = step_name, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let handlers = match self.on.get(step_name) {
        Some(handlers) if !handlers.is_empty() => handlers,
        _ if step_def.optional => {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        _ => {
          event!(Level::ERROR, step = step_name, "Non-optional step has no handlers.");
          return Err(Err::from(PipelineError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }
      };

      // Spans are not entered across awaits; the index is recorded on each event instead.
      let step_span = span!(Level::DEBUG, "pipeline_step", step = step_name, step_index = step_idx);
      for handler_fn in handlers {
        match handler_fn(ctx_data.clone()).await {
          Ok(PipelineControl::Continue) => {}
          Ok(PipelineControl::Stop) => {
            event!(parent: &step_span, Level::INFO, "Pipeline stopped by a handler.");
            return Ok(PipelineResult::Stopped);
          }
          Err(e) => {
            event!(parent: &step_span, Level::WARN, error = %e, "Step handler failed.");
            return Err(e);
          }
        }
      }
      event!(parent: &step_span, Level::TRACE, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}
