use futures::{Stream, StreamExt};
use rdf_actors_core::ActorResult;
use rdf_actors_model::BindingSet;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream over [BindingSet]s.
pub struct BindingsStream {
    inner: Pin<Box<dyn Stream<Item = ActorResult<BindingSet>> + Send>>,
}

impl BindingsStream {
    /// Creates a new [BindingsStream] from any stream of solutions.
    pub fn new(inner: impl Stream<Item = ActorResult<BindingSet>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(inner),
        }
    }

    /// Creates a stream that has no solutions.
    pub fn empty() -> Self {
        Self::new(futures::stream::empty())
    }

    /// Creates a stream that lazily yields `bindings`.
    pub fn from_bindings(bindings: Vec<BindingSet>) -> Self {
        Self::new(futures::stream::iter(bindings.into_iter().map(Ok)))
    }

    pub async fn try_collect_to_vec(mut self) -> ActorResult<Vec<BindingSet>> {
        let mut result = Vec::new();
        while let Some(element) = self.next().await {
            result.push(element?);
        }
        Ok(result)
    }
}

impl Stream for BindingsStream {
    type Item = ActorResult<BindingSet>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
