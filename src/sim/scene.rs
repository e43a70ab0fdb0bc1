//! Entity store
//!
//! Ordered collection of every entity in the current room. The entity count
//! stays small (around 20), so tag lookups are plain linear scans.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Tag};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Index of the first entity carrying `tag`
    pub fn index_of(&self, tag: Tag) -> Option<usize> {
        self.entities.iter().position(|e| e.tag == tag)
    }

    pub fn find(&self, tag: Tag) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_mut(&mut self, tag: Tag) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    /// Entity that the room layout guarantees to exist
    ///
    /// # Panics
    /// If no entity carries `tag`; that means room sequencing is broken.
    pub fn expect_mut(&mut self, tag: Tag) -> &mut Entity {
        match self.find_mut(tag) {
            Some(entity) => entity,
            None => panic!("scene has no entity tagged {tag:?}"),
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Entity {
        self.entities.remove(index)
    }

    /// Remove the first entity carrying `tag`, if any
    pub fn remove_tag(&mut self, tag: Tag) -> Option<Entity> {
        self.index_of(tag).map(|i| self.entities.remove(i))
    }

    /// Keep only entities matching the predicate (order preserved)
    pub fn retain(&mut self, f: impl FnMut(&Entity) -> bool) {
        self.entities.retain(f);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn count(&self, f: impl Fn(&Entity) -> bool) -> usize {
        self.entities.iter().filter(|e| f(e)).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// Two distinct entities at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Entity, &mut Entity) {
        assert!(a < b, "pair_mut expects a < b");
        let (lo, hi) = self.entities.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
