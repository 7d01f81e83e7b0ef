//! Generic fetch-and-normalize pipeline with last-input-wins state.

use crate::core::error::FetchResult;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// One data domain: how to fetch a raw payload for an input and how to turn
/// it into a view model.
#[async_trait]
pub trait Pipeline: Send + Sync + 'static {
    type Input: Clone + Debug + Send + Sync + 'static;
    type Raw: Send + 'static;
    type View: Clone + Debug + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    async fn fetch(&self, input: &Self::Input) -> FetchResult<Self::Raw>;

    fn normalize(&self, input: &Self::Input, raw: &Self::Raw) -> FetchResult<Self::View>;

    /// Fetches and normalizes in one step.
    async fn load(&self, input: &Self::Input) -> FetchResult<Self::View> {
        let raw = self.fetch(input).await?;
        self.normalize(input, &raw)
    }
}

/// Observable state of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> From<FetchResult<T>> for ResourceState<T> {
    fn from(result: FetchResult<T>) -> Self {
        match result {
            Ok(view) => ResourceState::Ready(view),
            Err(e) => ResourceState::Error(e.to_string()),
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ResourceState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Holds the latest state of a [`Pipeline`].
///
/// Every request is tagged with a generation number when issued. A response
/// is applied only if no newer request was issued in the meantime.
pub struct Resource<P: Pipeline> {
    pipeline: Arc<P>,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<ResourceState<P::View>>>,
}

impl<P: Pipeline> Clone for Resource<P> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            generation: Arc::clone(&self.generation),
            state: Arc::clone(&self.state),
        }
    }
}

impl<P: Pipeline> Resource<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(ResourceState::Loading)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.pipeline.name()
    }

    pub async fn state(&self) -> ResourceState<P::View> {
        self.state.lock().await.clone()
    }

    /// Generation of the most recently issued request.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn issue(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply(&self, generation: u64, next: ResourceState<P::View>) -> bool {
        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                pipeline = self.pipeline.name(),
                generation, "Discarding stale response"
            );
            return false;
        }
        *state = next;
        true
    }

    #[instrument(name = "PipelineRun", skip(self), fields(pipeline = self.pipeline.name()))]
    async fn run(&self, generation: u64, input: P::Input) -> bool {
        self.apply(generation, ResourceState::Loading).await;
        let result = self.pipeline.load(&input).await;
        if let Err(e) = &result {
            debug!(error = %e, "Pipeline failed");
        }
        self.apply(generation, result.into()).await
    }

    /// Issues a request and waits for it, returning the state afterwards.
    pub async fn refresh(&self, input: P::Input) -> ResourceState<P::View> {
        let generation = self.issue();
        self.run(generation, input).await;
        self.state().await
    }

    /// Issues a request in the background. The handle resolves to `true` if
    /// the response was applied, `false` if a newer request overtook it.
    pub fn request(&self, input: P::Input) -> JoinHandle<bool> {
        let generation = self.issue();
        let resource = self.clone();
        tokio::spawn(async move { resource.run(generation, input).await })
    }
}
