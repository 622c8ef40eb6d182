//! # Lifecycle Hooks
//!
//! A small, synchronous hook bus for observable collections.
//!
//! ## Overview
//!
//! Provides [`LifecycleHooks`], an owned dispatcher supporting exactly two
//! events ([`Lifecycle::Create`] and [`Lifecycle::Delete`]). Hooks run inline
//! during the call that triggers them, in bind order. There is no queue, no
//! deferred delivery, and no event loop.
//!
//! ## Features
//!
//! * **Typed**: two named events, not a string-keyed mixin.
//! * **Ordered**: hooks fire in the order they were bound.
//! * **Deduplicated**: binding the same [`Hook`] handle twice is suppressed.
//! * **Fail loud**: a panicking hook propagates to the caller; remaining
//!   hooks for that dispatch are not invoked.
//!
//! # Example
//!
//! ```rust
//! use corral_hooks::{Lifecycle, LifecycleHooks, hook};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! let hooks = LifecycleHooks::<(), u64>::new();
//! let seen = Arc::new(AtomicU64::new(0));
//!
//! let tally = seen.clone();
//! hooks.bind(Lifecycle::Create, hook(move |(), id| {
//!     tally.fetch_add(*id, Ordering::SeqCst);
//! }));
//!
//! assert_eq!(hooks.emit(Lifecycle::Create, &(), &3), 1);
//! assert_eq!(seen.load(Ordering::SeqCst), 3);
//! ```

mod bus;

pub use bus::{Hook, Lifecycle, LifecycleHooks, hook};
