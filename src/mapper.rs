//! Mappers transform identifiers, payloads and items between repository
//! layers.
//!
//! A [`Mapper`] is a one-way, fallible transformation; [`ReverseMapper`] adds
//! the opposite direction. Mappers compose with [`Mapper::chain`], which is
//! how [`MappedRepository`](crate::composition::MappedRepository) bridges an
//! application-facing type surface onto an adapter's native one.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{RepoError, RepoResult};

/// One-way, fallible transformation.
pub trait Mapper: Send + Sync {
    type In;
    type Out;

    /// Map an input to its output representation.
    fn map(&self, input: Self::In) -> RepoResult<Self::Out>;

    /// Chain another mapper after this one.
    ///
    /// Forward mapping runs this mapper first; reverse mapping (when both
    /// sides support it) runs in the opposite order.
    ///
    /// ```
    /// use generic_repository::{FnMapper, Mapper};
    ///
    /// let doubled_then_shown = FnMapper::new(|n: u32| n * 2)
    ///     .chain(FnMapper::new(|n: u32| n.to_string()));
    ///
    /// assert_eq!(doubled_then_shown.map(21).unwrap(), "42");
    /// ```
    fn chain<M>(self, next: M) -> Chained<Self, M>
    where
        Self: Sized,
        M: Mapper<In = Self::Out>,
    {
        Chained {
            first: self,
            second: next,
        }
    }
}

/// A mapper that can also run in the opposite direction.
pub trait ReverseMapper: Mapper {
    /// Map an output back to its input representation.
    fn reverse(&self, output: Self::Out) -> RepoResult<Self::In>;
}

/// Closure-backed mapper, optionally with a reverse closure.
pub struct FnMapper<F, G, In, Out> {
    forward: F,
    backward: Option<G>,
    _types: PhantomData<fn(In) -> Out>,
}

impl<F, In, Out> FnMapper<F, fn(Out) -> In, In, Out>
where
    F: Fn(In) -> Out + Send + Sync,
{
    /// Forward-only mapper; [`ReverseMapper::reverse`] fails at runtime.
    pub fn new(forward: F) -> Self {
        Self {
            forward,
            backward: None,
            _types: PhantomData,
        }
    }
}

impl<F, G, In, Out> FnMapper<F, G, In, Out>
where
    F: Fn(In) -> Out + Send + Sync,
    G: Fn(Out) -> In + Send + Sync,
{
    /// Mapper with both directions defined.
    pub fn with_reverse(forward: F, backward: G) -> Self {
        Self {
            forward,
            backward: Some(backward),
            _types: PhantomData,
        }
    }
}

impl<F, G, In, Out> Mapper for FnMapper<F, G, In, Out>
where
    F: Fn(In) -> Out + Send + Sync,
    G: Send + Sync,
{
    type In = In;
    type Out = Out;

    fn map(&self, input: In) -> RepoResult<Out> {
        Ok((self.forward)(input))
    }
}

impl<F, G, In, Out> ReverseMapper for FnMapper<F, G, In, Out>
where
    F: Fn(In) -> Out + Send + Sync,
    G: Fn(Out) -> In + Send + Sync,
{
    fn reverse(&self, output: Out) -> RepoResult<In> {
        match &self.backward {
            Some(backward) => Ok(backward(output)),
            None => Err(RepoError::internal("no reverse mapping defined")),
        }
    }
}

/// Maps through the standard `From`/`Into` conversion pair.
///
/// `IntoMapper<T, T>` is the identity mapper.
pub struct IntoMapper<In, Out>(PhantomData<fn(In) -> Out>);

impl<In, Out> IntoMapper<In, Out> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<In, Out> Default for IntoMapper<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> Mapper for IntoMapper<In, Out>
where
    Out: From<In>,
{
    type In = In;
    type Out = Out;

    fn map(&self, input: In) -> RepoResult<Out> {
        Ok(Out::from(input))
    }
}

impl<In, Out> ReverseMapper for IntoMapper<In, Out>
where
    Out: From<In>,
    In: From<Out>,
{
    fn reverse(&self, output: Out) -> RepoResult<In> {
        Ok(In::from(output))
    }
}

/// Two mappers run in sequence; built by [`Mapper::chain`].
pub struct Chained<A, B> {
    first: A,
    second: B,
}

impl<A, B> Mapper for Chained<A, B>
where
    A: Mapper,
    B: Mapper<In = A::Out>,
{
    type In = A::In;
    type Out = B::Out;

    fn map(&self, input: Self::In) -> RepoResult<Self::Out> {
        self.second.map(self.first.map(input)?)
    }
}

impl<A, B> ReverseMapper for Chained<A, B>
where
    A: ReverseMapper,
    B: ReverseMapper<In = A::Out>,
{
    fn reverse(&self, output: Self::Out) -> RepoResult<Self::In> {
        self.first.reverse(self.second.reverse(output)?)
    }
}

/// Maps a typed entity to its JSON value representation and back.
///
/// This is the serialization boundary mapper: adapters that speak raw JSON
/// can be bridged onto typed entities without hand-written conversions.
pub struct JsonMapper<T>(PhantomData<fn() -> T>);

impl<T> JsonMapper<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mapper for JsonMapper<T>
where
    T: Serialize,
{
    type In = T;
    type Out = Value;

    fn map(&self, input: T) -> RepoResult<Value> {
        serde_json::to_value(input).map_err(RepoError::from)
    }
}

impl<T> ReverseMapper for JsonMapper<T>
where
    T: Serialize + DeserializeOwned,
{
    fn reverse(&self, output: Value) -> RepoResult<T> {
        serde_json::from_value(output).map_err(RepoError::from)
    }
}
