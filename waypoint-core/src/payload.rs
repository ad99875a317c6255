//! Payload trait for the values a router carries.

/// A marker trait for the opaque argument/result values carried through a
/// dispatch.
///
/// The router never inspects payload values; they flow from the caller's
/// argument list into the action and back out inside [`Outcome::Value`].
/// Payloads must be `Send + Sync + 'static` so a router can be shared across
/// threads.
///
/// [`Outcome::Value`]: crate::Outcome::Value
pub trait Payload: Send + Sync + 'static {}

// Common payload implementations
impl Payload for () {}
impl Payload for String {}
impl Payload for &'static str {}
impl Payload for bool {}
impl Payload for i32 {}
impl Payload for i64 {}
impl Payload for u32 {}
impl Payload for u64 {}
impl Payload for usize {}
impl Payload for f64 {}
impl<T: Payload> Payload for Box<T> {}
impl<T: Payload> Payload for std::sync::Arc<T> {}
impl<T: Payload> Payload for Vec<T> {}
impl<T: Payload> Payload for Option<T> {}
impl<T: Payload, E: Payload> Payload for Result<T, E> {}
