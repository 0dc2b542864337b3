//! # Actor Runtime
//!
//! > **Thread-per-actor concurrency with bounded, blocking mailboxes.**
//!
//! Every actor gets its own OS thread. Actors never share state; they talk by
//! sending messages into each other's bounded mailboxes. A full mailbox makes
//! the sender wait, which is the only backpressure mechanism there is.
//!
//! ## Core Concepts
//!
//! ### Actor kinds
//!
//! - **[`Producer`]**: runs one task once (`setup -> run -> shutdown`). It has
//!   no mailbox and usually feeds reactors.
//! - **[`Reactor<T>`](Reactor)**: owns a [`Mailbox`] of `T` and handles each
//!   message in arrival order (`setup -> receive*`). It runs until the
//!   process ends, or until [`Reactor::stop`] is called.
//!
//! Both come in a stateful flavour ([`StatefulProducer<S>`],
//! [`StatefulReactor<T, S>`]) that owns one `S: Default`, handed to every
//! hook as `&mut S`. Only the actor's own thread ever touches it.
//!
//! ### Building actors
//!
//! Actors are created through builders obtained from an [`ActorSystem`].
//! Every created actor is registered with that system; [`ActorSystem::start`]
//! launches all of them in registration order and then waits for each one.
//!
//! ```
//! use actor_runtime::prelude::*;
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use std::sync::Arc;
//!
//! # fn main() -> actor_runtime::Result<()> {
//! let system = ActorSystem::new();
//! let total = Arc::new(AtomicI64::new(0));
//!
//! let report = Arc::clone(&total);
//! let summer = system
//!     .stateful_reactor::<i64, i64>()
//!     .name("summer")
//!     .mailbox_size(10)
//!     .on_receive(|value, sum| *sum += value)
//!     .on_shutdown(move |sum| report.store(*sum, Ordering::SeqCst))
//!     .create()?;
//!
//! let target = Arc::clone(&summer);
//! system
//!     .producer()
//!     .name("numbers")
//!     .on_run(move || {
//!         for value in 1..=3 {
//!             target.send(value);
//!         }
//!         target.stop();
//!     })
//!     .create()?;
//!
//! system.start()?;
//! assert_eq!(total.load(Ordering::SeqCst), 6);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Tour
//!
//! - [`mailbox`]: the bounded blocking FIFO.
//! - [`actor`]: identities, the [`Actor`] trait and the thread lifecycle.
//! - [`producer`] / [`reactor`]: the two actor kinds and their builders.
//! - [`state`]: the [`Stateless`] / [`Stateful`] builder markers.
//! - [`group`]: [`ActorBuilder`] and [`Group`].
//! - [`system`]: [`ActorSystem`], the registry and orchestrator.
//! - [`config`], [`logging`], [`error`]: thread settings, tracing setup and
//!   [`ActorError`].
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod group;
pub mod logging;
pub mod mailbox;
pub mod producer;
pub mod reactor;
pub mod state;
pub mod system;

pub use actor::{Actor, ActorIdentity};
pub use config::SystemConfig;
pub use error::{ActorError, Result};
pub use group::{ActorBuilder, Group};
pub use logging::{setup_tracing, try_setup_tracing};
pub use mailbox::Mailbox;
pub use producer::{Producer, ProducerBuilder, StatefulProducer};
pub use reactor::{Reactor, ReactorBuilder, StatefulReactor};
pub use state::{StateKind, Stateful, Stateless};
pub use system::ActorSystem;

/// Everything needed to build and run actors.
pub mod prelude {
    pub use crate::{
        Actor, ActorBuilder, ActorError, ActorIdentity, ActorSystem, Group, Producer, Reactor,
        StatefulProducer, StatefulReactor, SystemConfig,
    };
}
