//! Compile-time type lists used to track which beans an `AppBuilder` has
//! provided and which dependencies its beans still require.
//!
//! `TCons`/`TNil` build a type-level list (an "HList") out of the types
//! themselves — no values are ever stored, only `PhantomData`. The list is
//! threaded through `AppBuilder<T, Provided, Required>`'s two trailing type
//! parameters, so a missing dependency is a compile error at `.build_state()`
//! rather than a runtime `BeanError`.
//!
//! None of this is reflected on; it only needs to type-check. `Here`/`There`
//! witness a position in a list the way De Bruijn indices witness a binding
//! site, and `#[derive(Bean)]`/`#[derive(BeanState)]` emit the impls that
//! plug a concrete bean into the list at the right spot.

use std::marker::PhantomData;

/// The empty type list.
pub struct TNil;

/// A type list with head `H` and tail `T`.
pub struct TCons<H, T>(PhantomData<(H, T)>);

/// Witness that the needle is the head of the list.
pub struct Here;

/// Witness that the needle is found `There` inside the tail, at index `I`.
pub struct There<I>(PhantomData<I>);

/// `Self` contains `Needle` at the position witnessed by `Idx`.
///
/// Implemented recursively: `Here` for a direct head match, `There<Idx>` by
/// recursing into the tail. `Idx` is never named by hand — it falls out of
/// type inference at the call site.
pub trait Contains<Needle, Idx> {}

impl<Needle, Tail> Contains<Needle, Here> for TCons<Needle, Tail> {}

impl<Needle, Head, Tail, Idx> Contains<Needle, There<Idx>> for TCons<Head, Tail>
where
    Tail: Contains<Needle, Idx>,
{
}

/// Concatenate `Self` with `Other`, producing `Self::Output`.
///
/// Used to fold a bean's `Deps` list into an `AppBuilder`'s running
/// `Required` list as each `.with_bean()`/`.with_producer()` call is chained.
pub trait TAppend<Other> {
    type Output;
}

impl<Other> TAppend<Other> for TNil {
    type Output = Other;
}

impl<H, T, Other> TAppend<Other> for TCons<H, T>
where
    T: TAppend<Other>,
{
    type Output = TCons<H, <T as TAppend<Other>>::Output>;
}

/// Every element of `Self` is present somewhere in `P`, witnessed element-wise
/// by the matching `TCons` shape of `Idx`.
///
/// `Self` is normally an `AppBuilder`'s `Required` list and `P` its `Provided`
/// list; `build_state`/`try_build_state` are only callable once this holds,
/// which is exactly "every bean's dependencies have been provided."
pub trait AllSatisfied<P, Idx> {}

impl<P> AllSatisfied<P, TNil> for TNil {}

impl<P, Head, Tail, HIdx, TIdx> AllSatisfied<P, TCons<HIdx, TIdx>> for TCons<Head, Tail>
where
    P: Contains<Head, HIdx>,
    Tail: AllSatisfied<P, TIdx>,
{
}

/// Marker: `Self` (a `#[derive(BeanState)]` struct) can be built once `P`
/// contains every one of its field types, witnessed by `Indices`.
///
/// `Indices` is a tuple `(I0, I1, ...)`, one witness per unique field type —
/// `#[derive(BeanState)]` emits the only impls of this trait that exist, one
/// per state struct, since the set of field types is fixed by the struct
/// definition rather than by any recursive structure we can blanket-impl
/// over.
pub trait BuildableFrom<P, Indices> {}
