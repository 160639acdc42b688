//! Two-future combinators for single-threaded async flows.

use std::future::{poll_fn, Future};
use std::pin::pin;
use std::task::Poll;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

/// Run both futures to completion, polling them side by side.
pub async fn join<A: Future, B: Future>(a: A, b: B) -> (A::Output, B::Output) {
    let mut a = pin!(a);
    let mut b = pin!(b);
    let mut left = None;
    let mut right = None;
    poll_fn(|cx| {
        if left.is_none() {
            if let Poll::Ready(v) = a.as_mut().poll(cx) {
                left = Some(v);
            }
        }
        if right.is_none() {
            if let Poll::Ready(v) = b.as_mut().poll(cx) {
                right = Some(v);
            }
        }
        match (left.take(), right.take()) {
            (Some(l), Some(r)) => Poll::Ready((l, r)),
            (l, r) => {
                left = l;
                right = r;
                Poll::Pending
            }
        }
    })
    .await
}

/// First of the two to finish; the loser is dropped. `a` wins ties.
pub async fn race<A: Future, B: Future>(a: A, b: B) -> Either<A::Output, B::Output> {
    let mut a = pin!(a);
    let mut b = pin!(b);
    poll_fn(|cx| {
        if let Poll::Ready(v) = a.as_mut().poll(cx) {
            return Poll::Ready(Either::Left(v));
        }
        if let Poll::Ready(v) = b.as_mut().poll(cx) {
            return Poll::Ready(Either::Right(v));
        }
        Poll::Pending
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn join_keeps_both_outputs() {
        let (a, b) = block_on(join(async { 1 }, async { "two" }));
        assert_eq!((a, b), (1, "two"));
    }

    #[test]
    fn race_prefers_the_ready_side() {
        let won = block_on(race(std::future::pending::<u8>(), async { 7u32 }));
        assert_eq!(won, Either::Right(7));
        let tie = block_on(race(async { 'a' }, async { 'b' }));
        assert_eq!(tie, Either::Left('a'));
    }
}
