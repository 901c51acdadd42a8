// shopfront/src/pipeline/hooks.rs

//! Handler registration for pipeline steps.

use crate::engine::context_data::ContextData;
use crate::engine::control::PipelineControl;
use crate::engine::step::Handler;
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;
use std::future::Future;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  /// Registers a handler for `step_name`. Several handlers on one step run in
  /// registration order.
  ///
  /// The handler may return any error convertible into the pipeline's `Err`.
  pub fn on_step<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler: Handler<TData, Err> = Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }
}
