use futures::{Stream, StreamExt};
use rdf_actors_core::ActorResult;
use rdf_actors_model::Quad;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream over [Quad]s.
pub struct QuadStream {
    inner: Pin<Box<dyn Stream<Item = ActorResult<Quad>> + Send>>,
}

impl QuadStream {
    /// Creates a new [QuadStream] from any stream of quads.
    pub fn new(inner: impl Stream<Item = ActorResult<Quad>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(inner),
        }
    }

    /// Creates a stream that is already exhausted.
    pub fn empty() -> Self {
        Self::new(futures::stream::empty())
    }

    pub async fn try_collect_to_vec(mut self) -> ActorResult<Vec<Quad>> {
        let mut result = Vec::new();
        while let Some(element) = self.next().await {
            result.push(element?);
        }
        Ok(result)
    }
}

impl Stream for QuadStream {
    type Item = ActorResult<Quad>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
