use futures::{ready, Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A stream that expands every element of an upstream stream into zero or more elements.
///
/// The stream is driven by its consumer:
/// - A new upstream element is only pulled once all elements of the previous expansion have
///   been yielded. At most one expansion is buffered at any time.
/// - The elements of an expansion are yielded in the order returned by the transform.
/// - An upstream error, or an error of the transform, is yielded immediately and ends the
///   stream.
///
/// The upstream stream is dropped as soon as it is exhausted or failed, or when this stream is
/// dropped. Dropping this stream early therefore releases the upstream without pulling any
/// further element.
pub struct MultiTransformStream<S, F, O> {
    /// `None` once the upstream has been exhausted or failed.
    upstream: Option<S>,
    /// Expands a single upstream element.
    transform: F,
    /// The remaining elements of the current expansion.
    buffer: VecDeque<O>,
}

impl<S, F, O> MultiTransformStream<S, F, O> {
    /// Creates a new [MultiTransformStream] that expands the elements of `upstream` with
    /// `transform`.
    pub fn new(upstream: S, transform: F) -> Self {
        Self {
            upstream: Some(upstream),
            transform,
            buffer: VecDeque::new(),
        }
    }

    /// Returns the number of elements of the current expansion that have not yet been yielded.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

impl<S, F, I, O, E> Stream for MultiTransformStream<S, F, O>
where
    S: Stream<Item = Result<I, E>> + Unpin,
    F: FnMut(I) -> Result<Vec<O>, E> + Unpin,
    O: Unpin,
{
    type Item = Result<O, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(element) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(element)));
            }

            let Some(upstream) = this.upstream.as_mut() else {
                return Poll::Ready(None);
            };
            let expansion = match ready!(upstream.poll_next_unpin(cx)) {
                None => {
                    this.upstream = None;
                    return Poll::Ready(None);
                }
                Some(Err(error)) => Err(error),
                Some(Ok(element)) => (this.transform)(element),
            };

            match expansion {
                Ok(expansion) => this.buffer.extend(expansion),
                Err(error) => {
                    this.upstream = None;
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(error)));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.upstream {
            None => (self.buffer.len(), Some(self.buffer.len())),
            Some(_) => (self.buffer.len(), None),
        }
    }
}

/// Adds [MultiTransformExt::multi_transform] to all streams of results.
pub trait MultiTransformExt<I, E>: Stream<Item = Result<I, E>> + Sized {
    /// Expands every element of this stream with `transform`. See [MultiTransformStream].
    fn multi_transform<F, O>(self, transform: F) -> MultiTransformStream<Self, F, O>
    where
        F: FnMut(I) -> Result<Vec<O>, E>,
    {
        MultiTransformStream::new(self, transform)
    }
}

impl<S, I, E> MultiTransformExt<I, E> for S where S: Stream<Item = Result<I, E>> + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Sets a flag when dropped.
    struct DropGuard(Arc<AtomicBool>);

    impl Drop for DropGuard {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Returns an upstream of `0..len` that counts its pulls and reports when it is dropped.
    fn upstream(
        len: usize,
        pulls: Arc<AtomicUsize>,
        dropped: Arc<AtomicBool>,
    ) -> impl Stream<Item = Result<usize, String>> + Unpin {
        let guard = DropGuard(dropped);
        stream::iter(0..len).map(move |element| {
            let _guard = &guard;
            pulls.fetch_add(1, Ordering::SeqCst);
            Ok(element)
        })
    }

    fn repeat_three(element: usize) -> Result<Vec<usize>, String> {
        Ok(vec![element * 10, element * 10 + 1, element * 10 + 2])
    }

    #[tokio::test]
    async fn expands_in_element_then_transform_order() {
        let stream = stream::iter(vec![Ok(1), Ok(2)]).multi_transform(repeat_three);

        let result = stream.collect::<Vec<Result<usize, String>>>().await;

        assert_eq!(
            result,
            vec![Ok(10), Ok(11), Ok(12), Ok(20), Ok(21), Ok(22)]
        );
    }

    #[tokio::test]
    async fn pulls_upstream_only_when_expansion_is_drained() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicBool::new(false));
        let mut stream =
            upstream(5, Arc::clone(&pulls), dropped).multi_transform(repeat_three);

        assert_eq!(pulls.load(Ordering::SeqCst), 0);
        for expected in [0, 1, 2] {
            assert_eq!(stream.next().await, Some(Ok(expected)));
            assert_eq!(pulls.load(Ordering::SeqCst), 1);
        }
        assert_eq!(stream.next().await, Some(Ok(10)));
        assert_eq!(pulls.load(Ordering::SeqCst), 2);
        assert_eq!(stream.buffered_len(), 2);
    }

    #[tokio::test]
    async fn empty_expansions_are_skipped() {
        let stream = stream::iter(vec![Ok::<_, String>(1), Ok(2), Ok(3)]).multi_transform(
            |element: i32| {
                if element % 2 == 0 {
                    Ok(vec![element])
                } else {
                    Ok(vec![])
                }
            },
        );

        let result = stream.collect::<Vec<_>>().await;

        assert_eq!(result, vec![Ok(2)]);
    }

    #[tokio::test]
    async fn upstream_error_ends_stream() {
        let stream = stream::iter(vec![Ok(1), Err(String::from("broken")), Ok(2)])
            .multi_transform(repeat_three);

        let result = stream.collect::<Vec<_>>().await;

        assert_eq!(
            result,
            vec![Ok(10), Ok(11), Ok(12), Err(String::from("broken"))]
        );
    }

    #[tokio::test]
    async fn transform_error_ends_stream() {
        let stream = stream::iter(vec![Ok(1), Ok(2)]).multi_transform(|element: i32| {
            if element == 2 {
                Err(String::from("cannot expand"))
            } else {
                Ok(vec![element])
            }
        });

        let result = stream.collect::<Vec<_>>().await;

        assert_eq!(result, vec![Ok(1), Err(String::from("cannot expand"))]);
    }

    #[tokio::test]
    async fn upstream_is_released_when_exhausted() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicBool::new(false));
        let mut stream =
            upstream(1, Arc::clone(&pulls), Arc::clone(&dropped)).multi_transform(repeat_three);

        while stream.next().await.is_some() {}

        assert!(dropped.load(Ordering::SeqCst));
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn dropping_early_releases_upstream_without_pulling() {
        let pulls = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicBool::new(false));
        let mut stream = upstream(100, Arc::clone(&pulls), Arc::clone(&dropped))
            .multi_transform(repeat_three);

        assert_eq!(stream.next().await, Some(Ok(0)));
        drop(stream);

        assert!(dropped.load(Ordering::SeqCst));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
    }
}
