//! Named groups of geometry, the container the panel pipeline writes into.

use std::fmt::{self, Debug};
use std::ops::{Deref, DerefMut};

pub mod entities;

pub use entities::{Edge, EdgeKey, Entities};

/// Handle to a group inside a [`Scene`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Group<S: Clone> {
    pub name: String,
    pub entities: Entities<S>,
}

/// Owner of every group. Erasing a group frees its slot but keeps the id
/// retired, so a stale [`GroupId`] can never alias a newer group.
#[derive(Debug, Clone)]
pub struct Scene<S: Clone> {
    groups: Vec<Option<Group<S>>>,
}

impl<S: Clone> Default for Scene<S> {
    fn default() -> Self {
        Scene { groups: Vec::new() }
    }
}

impl<S: Clone + Send + Sync + Debug> Scene<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty group and return its id.
    pub fn add_group(&mut self, name: impl Into<String>) -> GroupId {
        self.groups.push(Some(Group {
            name: name.into(),
            entities: Entities::new(),
        }));
        GroupId(self.groups.len() - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group<S>> {
        self.groups.get(id.0).and_then(Option::as_ref)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group<S>> {
        self.groups.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.group(id).is_some()
    }

    /// Remove a group, returning it if it was still alive.
    pub fn erase(&mut self, id: GroupId) -> Option<Group<S>> {
        self.groups.get_mut(id.0).and_then(Option::take)
    }

    /// Number of live groups.
    pub fn len(&self) -> usize {
        self.groups.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live groups in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group<S>)> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|g| (GroupId(i), g)))
    }

    /// Add a temporary group that is erased when the returned guard drops.
    pub fn scratch_group(&mut self, name: impl Into<String>) -> ScratchGroup<'_, S> {
        let id = self.add_group(name);
        ScratchGroup { scene: self, id }
    }
}

/// A group that lives only as long as this guard. The scene stays usable
/// through the guard.
pub struct ScratchGroup<'s, S: Clone + Send + Sync + Debug> {
    scene: &'s mut Scene<S>,
    id: GroupId,
}

impl<S: Clone + Send + Sync + Debug> ScratchGroup<'_, S> {
    pub const fn id(&self) -> GroupId {
        self.id
    }
}

impl<S: Clone + Send + Sync + Debug> Deref for ScratchGroup<'_, S> {
    type Target = Scene<S>;

    fn deref(&self) -> &Scene<S> {
        self.scene
    }
}

impl<S: Clone + Send + Sync + Debug> DerefMut for ScratchGroup<'_, S> {
    fn deref_mut(&mut self) -> &mut Scene<S> {
        self.scene
    }
}

impl<S: Clone + Send + Sync + Debug> Drop for ScratchGroup<'_, S> {
    fn drop(&mut self) {
        if self.scene.erase(self.id).is_some() {
            log::trace!("erased scratch group {}", self.id);
        }
    }
}
