// shopfront/src/registry.rs

//! `Workflows<E>`: a registry of pipelines keyed by the type of their context data.
//! Callers hand in a `ContextData<TData>` and the registry dispatches to the one
//! pipeline registered for `TData`.

use crate::engine::context_data::ContextData;
use crate::engine::control::PipelineResult;
use crate::error::PipelineError;
use crate::pipeline::definition::Pipeline;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[async_trait]
trait ErasedPipeline<E>: Send + Sync
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn name(&self) -> &'static str;

  /// `ctx_obj` must be a `Box<ContextData<TData>>` for this pipeline's `TData`.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, E>;
}

struct TypedPipeline<TData, HandlerErr, E>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pipeline: Pipeline<TData, HandlerErr>,
  _app_err: PhantomData<fn() -> E>,
}

#[async_trait]
impl<TData, HandlerErr, E> ErasedPipeline<E> for TypedPipeline<TData, HandlerErr, E>
where
  TData: 'static + Send + Sync,
  HandlerErr: std::error::Error + From<PipelineError> + Send + Sync + 'static,
  E: std::error::Error + From<HandlerErr> + From<PipelineError> + Send + Sync + 'static,
{
  fn name(&self) -> &'static str {
    self.pipeline.name()
  }

  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, E> {
    let ctx_data = match ctx_obj.downcast::<ContextData<TData>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<ContextData<TData>>().to_string();
        event!(Level::ERROR, %expected_type, "Context object type mismatch.");
        return Err(E::from(PipelineError::TypeMismatch { expected_type }));
      }
    };
    self.pipeline.run(ctx_data).await.map_err(E::from)
  }
}

/// Type-keyed pipeline registry. `E` is the error type `run` returns.
pub struct Workflows<E>
where
  E: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  registry: RwLock<HashMap<TypeId, Arc<dyn ErasedPipeline<E>>>>,
}

impl<E> Default for Workflows<E>
where
  E: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<E> Workflows<E>
where
  E: std::error::Error + From<PipelineError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      registry: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline` for its context type, replacing any earlier registration.
  pub fn register_pipeline<TData, HandlerErr>(&self, pipeline: Pipeline<TData, HandlerErr>)
  where
    TData: 'static + Send + Sync,
    HandlerErr: std::error::Error + From<PipelineError> + Send + Sync + 'static,
    E: From<HandlerErr>,
  {
    event!(Level::DEBUG, pipeline = pipeline.name(), tdata_type = %std::any::type_name::<TData>(), "Registering pipeline.");
    let typed = TypedPipeline::<TData, HandlerErr, E> {
      pipeline,
      _app_err: PhantomData,
    };
    self.registry.write().insert(TypeId::of::<TData>(), Arc::new(typed));
  }

  pub fn is_registered<TData: 'static>(&self) -> bool {
    self.registry.read().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the pipeline registered for `TData` against `ctx_data`.
  #[instrument(name = "Workflows::run", skip_all, fields(tdata_type = %std::any::type_name::<TData>()))]
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, E>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.registry.read().get(&TypeId::of::<TData>()).cloned();
    let runner = runner.ok_or_else(|| {
      let type_name = std::any::type_name::<TData>().to_string();
      event!(Level::ERROR, %type_name, "No pipeline registered.");
      E::from(PipelineError::NotRegistered { type_name })
    })?;

    event!(Level::DEBUG, pipeline = runner.name(), "Dispatching pipeline.");
    runner.run_erased(Box::new(ctx_data)).await
  }
}
