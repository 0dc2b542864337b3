//! # Actor State Kinds
//!
//! Builders are parameterized by a state kind:
//!
//! - [`Stateless`]: hooks see no state (the actor still carries a `()`).
//! - [`Stateful<S>`]: the actor owns one `S`, created with `S::default()` when
//!   the actor is built and handed to every hook as `&mut S`.
//!
//! The `Default` bound on [`Stateful`] is what rejects state types without a
//! default value, at compile time:
//!
//! ```compile_fail
//! use actor_runtime::prelude::*;
//!
//! struct NoDefault(i32);
//!
//! let system = ActorSystem::new();
//! let _ = system.stateful_producer::<NoDefault>();
//! ```

use std::marker::PhantomData;

/// Selects the state an actor owns and the hook signatures its builder accepts.
pub trait StateKind: Send + 'static {
    type State: Default + Send + 'static;
}

/// Actors whose hooks take no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stateless;

impl StateKind for Stateless {
    type State = ();
}

/// Actors that own a private, default-initialized `S`.
pub struct Stateful<S>(PhantomData<fn() -> S>);

impl<S: Default + Send + 'static> StateKind for Stateful<S> {
    type State = S;
}

/// Generates `on_<hook>` / `on_<hook>_with_context` setter pairs on a builder
/// whose `hooks` field has one `Hook<State>` per listed name.
macro_rules! hook_setters {
    (stateless: $($hook:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Sets the `" $hook "` hook; it receives the actor identity."]
                pub fn [<on_ $hook _with_context>](
                    mut self,
                    hook: impl Fn(&$crate::ActorIdentity) + Send + Sync + 'static,
                ) -> Self {
                    self.hooks.$hook = std::sync::Arc::new(
                        move |_: &mut (), identity: &$crate::ActorIdentity| hook(identity),
                    );
                    self
                }

                #[doc = "Sets the `" $hook "` hook."]
                pub fn [<on_ $hook>](self, hook: impl Fn() + Send + Sync + 'static) -> Self {
                    self.[<on_ $hook _with_context>](move |_: &$crate::ActorIdentity| hook())
                }
            )+
        }
    };
    (stateful $state:ident: $($hook:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Sets the `" $hook "` hook; it receives the state and the actor identity."]
                pub fn [<on_ $hook _with_context>](
                    mut self,
                    hook: impl Fn(&mut $state, &$crate::ActorIdentity) + Send + Sync + 'static,
                ) -> Self {
                    self.hooks.$hook = std::sync::Arc::new(hook);
                    self
                }

                #[doc = "Sets the `" $hook "` hook; it receives the state."]
                pub fn [<on_ $hook>](
                    self,
                    hook: impl Fn(&mut $state) + Send + Sync + 'static,
                ) -> Self {
                    self.[<on_ $hook _with_context>](
                        move |state: &mut $state, _: &$crate::ActorIdentity| hook(state),
                    )
                }
            )+
        }
    };
}

pub(crate) use hook_setters;
