//! One-shot, pull-based queries
//!
//! A query pushes its results into a consumer one at a time. The consumer
//! returns `true` to ask for more and `false` to stop. Running a query
//! consumes it; searching again means building a new query.

use crate::error::Result;

/// How a query run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The producer ran out of items
    Exhausted,
    /// The consumer asked to stop
    Stopped,
}

/// A lazy, finite sequence of `T` that can be run exactly once
pub trait Query<T> {
    /// Feeds every item to `consumer` until the sequence ends or the consumer stops
    fn run(self: Box<Self>, consumer: &mut dyn FnMut(T) -> bool) -> Result<Completion>;
}

/// Boxed query, the currency passed between frameworks
pub type BoxQuery<'a, T> = Box<dyn Query<T> + Send + 'a>;

/// Query over any iterator; items are pulled only while the consumer wants them
pub struct IterQuery<I> {
    items: I,
}

impl<I: Iterator> IterQuery<I> {
    pub fn new<C>(items: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            items: items.into_iter(),
        }
    }
}

impl<I> Query<I::Item> for IterQuery<I>
where
    I: Iterator,
{
    fn run(self: Box<Self>, consumer: &mut dyn FnMut(I::Item) -> bool) -> Result<Completion> {
        for item in self.items {
            if !consumer(item) {
                return Ok(Completion::Stopped);
            }
        }
        Ok(Completion::Exhausted)
    }
}

/// Query that yields nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyQuery;

impl<T> Query<T> for EmptyQuery {
    fn run(self: Box<Self>, _consumer: &mut dyn FnMut(T) -> bool) -> Result<Completion> {
        Ok(Completion::Exhausted)
    }
}

/// Query whose items are adapted before they reach the consumer
///
/// The adaptation returns `Ok(Some(item))` to forward, `Ok(None)` to drop the
/// item and keep going, or an error to abort the whole run.
pub struct MappedQuery<'a, A, F> {
    inner: BoxQuery<'a, A>,
    adapt: F,
}

impl<'a, A, F> MappedQuery<'a, A, F> {
    pub fn new(inner: BoxQuery<'a, A>, adapt: F) -> Self {
        Self { inner, adapt }
    }
}

impl<'a, A, B, F> Query<B> for MappedQuery<'a, A, F>
where
    F: FnMut(A) -> Result<Option<B>>,
{
    fn run(self: Box<Self>, consumer: &mut dyn FnMut(B) -> bool) -> Result<Completion> {
        let MappedQuery { inner, mut adapt } = *self;
        let mut failure = None;

        let completion = inner.run(&mut |item| match adapt(item) {
            Ok(Some(adapted)) => consumer(adapted),
            Ok(None) => true,
            Err(e) => {
                failure = Some(e);
                false
            }
        })?;

        match failure {
            Some(e) => Err(e),
            None => Ok(completion),
        }
    }
}

/// Boxes an iterator as a query
pub fn from_iter<'a, C>(items: C) -> BoxQuery<'a, C::Item>
where
    C: IntoIterator,
    C::IntoIter: Send + 'a,
{
    Box::new(IterQuery::new(items))
}

/// Boxes an empty query
pub fn empty<'a, T>() -> BoxQuery<'a, T> {
    Box::new(EmptyQuery)
}

/// Runs a query to completion and collects every item
pub fn collect_all<T>(query: BoxQuery<'_, T>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    query.run(&mut |item| {
        items.push(item);
        true
    })?;
    Ok(items)
}

/// Runs a query until its first item
pub fn find_first<T>(query: BoxQuery<'_, T>) -> Result<Option<T>> {
    let mut first = None;
    query.run(&mut |item| {
        first = Some(item);
        false
    })?;
    Ok(first)
}
