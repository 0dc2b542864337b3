//! # Groups and the Shared Builder Capability
//!
//! [`ActorBuilder`] is what producer and reactor builders have in common:
//! identity setters and the three ways of creating actors. Every creation
//! path registers the new actors with the builder's
//! [`ActorSystem`](crate::ActorSystem) before returning them.
//!
//! A [`Group`] is the fixed-size, ordered result of
//! [`ActorBuilder::create_group`].

use crate::actor::{Actor, ActorIdentity};
use crate::error::{ActorError, Result};
use crate::system::ActorSystem;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Creation capability shared by every actor builder.
///
/// Implementors provide identity storage and [`build`](Self::build); the
/// provided methods take care of registration.
pub trait ActorBuilder: Sized {
    type Actor: Actor;

    fn system(&self) -> &ActorSystem;

    fn identity(&self) -> &ActorIdentity;

    fn with_identity(self, identity: ActorIdentity) -> Self;

    /// Constructs one unregistered actor carrying `identity`.
    fn build(&self, identity: ActorIdentity) -> Result<Self::Actor>;

    fn id(self, id: i32) -> Self {
        let identity = ActorIdentity::new(id, self.identity().name());
        self.with_identity(identity)
    }

    fn name(self, name: impl Into<String>) -> Self {
        let identity = ActorIdentity::new(self.identity().id(), name);
        self.with_identity(identity)
    }

    /// Creates and registers one actor with the builder's identity.
    fn create(&self) -> Result<Arc<Self::Actor>> {
        self.create_with_context(self.identity().clone())
    }

    /// Creates and registers one actor with a caller-supplied identity.
    fn create_with_context(&self, identity: ActorIdentity) -> Result<Arc<Self::Actor>> {
        let actor = Arc::new(self.build(identity)?);
        self.system().register(actor.clone())?;
        Ok(actor)
    }

    /// Creates and registers `size` actors named `<name>-<i>` with ids `0..size`.
    ///
    /// Nothing is registered unless every member could be built.
    fn create_group(&self, size: usize) -> Result<Group<Self::Actor>> {
        if size == 0 {
            warn!(actor = %self.identity(), "Refusing to create an empty group");
            return Err(ActorError::EmptyGroup);
        }

        let members = (0..size)
            .map(|index| self.build(self.identity().member(index)).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        self.system().register_all(
            members
                .iter()
                .map(|member| member.clone() as Arc<dyn Actor>),
        )?;

        debug!(base = self.identity().name(), size, "Group created");
        Ok(Group { members })
    }
}

/// Ordered, fixed-size collection of actors built from one builder.
pub struct Group<A> {
    members: Vec<Arc<A>>,
}

impl<A> Group<A> {
    /// Member at `index`, where `index` is also the member's id.
    pub fn get(&self, index: usize) -> Result<&Arc<A>> {
        self.members
            .get(index)
            .ok_or(ActorError::GroupIndexOutOfBounds {
                index,
                size: self.members.len(),
            })
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<A>> {
        self.members.iter()
    }
}

impl<A> Clone for Group<A> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
        }
    }
}

impl<'g, A> IntoIterator for &'g Group<A> {
    type Item = &'g Arc<A>;
    type IntoIter = std::slice::Iter<'g, Arc<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<A> IntoIterator for Group<A> {
    type Item = Arc<A>;
    type IntoIter = std::vec::IntoIter<Arc<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<A: Actor> fmt::Debug for Group<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.members.iter().map(|member| member.identity()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_members_are_numbered_from_zero() {
        let system = ActorSystem::new();
        let group = system
            .reactor::<String>()
            .id(42)
            .name("worker")
            .mailbox_size(4)
            .create_group(3)
            .unwrap();

        assert_eq!(group.size(), 3);
        for (index, member) in group.iter().enumerate() {
            assert_eq!(member.id(), index as i32);
            assert_eq!(member.name(), format!("worker-{}", index));
        }
        assert_eq!(system.len(), 3);
    }

    #[test]
    fn get_is_bounds_checked() {
        let system = ActorSystem::new();
        let group = system.producer().name("p").create_group(2).unwrap();

        assert_eq!(group.get(1).unwrap().name(), "p-1");
        match group.get(2) {
            Err(ActorError::GroupIndexOutOfBounds { index, size }) => {
                assert_eq!((index, size), (2, 2));
            }
            other => panic!("expected out of bounds, got {:?}", other.map(|a| a.identity().clone())),
        }
    }

    #[test]
    fn empty_group_is_rejected() {
        let system = ActorSystem::new();
        let result = system.producer().create_group(0);
        assert!(matches!(result, Err(ActorError::EmptyGroup)));
        assert!(system.is_empty());
    }

    #[test]
    fn failed_group_registers_nothing() {
        let system = ActorSystem::new();
        let result = system.reactor::<u8>().name("sink").create_group(4);
        assert!(matches!(result, Err(ActorError::MailboxSizeUnset { .. })));
        assert!(system.is_empty());
    }

    #[test]
    fn create_uses_builder_identity_and_context_overrides_it() {
        let system = ActorSystem::new();
        let builder = system.producer().id(5).name("job");

        let first = builder.create().unwrap();
        let second = builder
            .create_with_context(ActorIdentity::new(11, "custom"))
            .unwrap();

        assert_eq!(first.identity(), &ActorIdentity::new(5, "job"));
        assert_eq!(second.identity(), &ActorIdentity::new(11, "custom"));
        assert_eq!(system.len(), 2);
    }
}
