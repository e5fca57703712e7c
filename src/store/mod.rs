//! # Resource Store
//!
//! The ordered list of resources belonging to one module.
//!
//! Every operation takes `&self` and returns a *new* store; a refused operation
//! returns a [`ResourceError`] and the original is untouched. Cloning a store is
//! cheap in the way that matters: file resources share their
//! [`FileHandle`](crate::collaborators::FileHandle), so no payload bytes are copied.

pub mod error;

pub use error::*;

use crate::model::{Resource, ResourceId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStore {
    resources: Vec<Resource>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an existing list, refusing duplicate ids.
    pub fn from_resources(resources: Vec<Resource>) -> Result<Self, ResourceError> {
        resources
            .into_iter()
            .try_fold(Self::new(), |store, resource| store.add(resource))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn as_slice(&self) -> &[Resource] {
        &self.resources
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    pub fn ids(&self) -> Vec<ResourceId> {
        self.resources.iter().map(|r| r.id.clone()).collect()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    pub fn position(&self, id: &ResourceId) -> Option<usize> {
        self.resources.iter().position(|r| &r.id == id)
    }

    pub fn into_vec(self) -> Vec<Resource> {
        self.resources
    }

    /// Appends `resource`. Its id must not already be present.
    pub fn add(&self, resource: Resource) -> Result<Self, ResourceError> {
        if self.get(&resource.id).is_some() {
            return Err(ResourceError::DuplicateId(resource.id));
        }
        let mut resources = self.resources.clone();
        resources.push(resource);
        Ok(Self { resources })
    }

    pub fn remove(&self, id: &ResourceId) -> Result<Self, ResourceError> {
        let idx = self
            .position(id)
            .ok_or_else(|| ResourceError::NotFound(id.clone()))?;
        let mut resources = self.resources.clone();
        resources.remove(idx);
        Ok(Self { resources })
    }

    /// Replaces the title only; id, kind, payload and colour are kept.
    pub fn rename(&self, id: &ResourceId, title: impl Into<String>) -> Result<Self, ResourceError> {
        let idx = self
            .position(id)
            .ok_or_else(|| ResourceError::NotFound(id.clone()))?;
        let mut resources = self.resources.clone();
        resources[idx].title = title.into();
        Ok(Self { resources })
    }

    /// Moves the element at `from` to `to`, shifting everything in between.
    pub fn reorder(&self, from: usize, to: usize) -> Result<Self, ResourceError> {
        let len = self.resources.len();
        if from >= len || to >= len {
            return Err(ResourceError::InvalidRange { from, to, len });
        }
        let mut resources = self.resources.clone();
        if from != to {
            let moved = resources.remove(from);
            resources.insert(to, moved);
        }
        Ok(Self { resources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::FileHandle;
    use crate::model::{Color, ResourceKind};

    const SWATCH: Color = Color([0xBB, 0xCC, 0xDD]);

    fn link(id: &str) -> Resource {
        Resource::link(id.into(), format!("https://{id}.example"), SWATCH)
    }

    fn store_of(ids: &[&str]) -> ResourceStore {
        ResourceStore::from_resources(ids.iter().map(|id| link(id)).collect()).unwrap()
    }

    fn order(store: &ResourceStore) -> Vec<String> {
        store.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn add_appends_and_rejects_duplicates() {
        let store = store_of(&["a"]);
        let grown = store.add(link("b")).unwrap();
        assert_eq!(order(&grown), ["a", "b"]);
        assert_eq!(store.len(), 1);

        assert_eq!(
            grown.add(link("a")),
            Err(ResourceError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn remove_drops_exactly_one() {
        let store = store_of(&["a", "b", "c"]);
        let shrunk = store.remove(&"b".into()).unwrap();
        assert_eq!(order(&shrunk), ["a", "c"]);
        assert_eq!(
            shrunk.remove(&"b".into()),
            Err(ResourceError::NotFound("b".into()))
        );
    }

    #[test]
    fn rename_changes_only_the_title() {
        let handle = FileHandle::in_memory("notes.pdf", vec![0; 4]);
        let file = Resource::file("f".into(), handle.clone(), SWATCH);
        let store = ResourceStore::new().add(file.clone()).unwrap();

        let renamed = store.rename(&"f".into(), "Lecture notes").unwrap();
        let after = renamed.get(&"f".into()).unwrap();
        assert_eq!(after.title, "Lecture notes");
        assert_eq!(after.id, file.id);
        assert_eq!(after.color, file.color);
        assert!(matches!(&after.kind, ResourceKind::File(h) if h.same_file(&handle)));

        assert!(store.rename(&"missing".into(), "x").is_err());
    }

    #[test]
    fn reorder_moves_and_shifts() {
        let store = store_of(&["a", "b", "c", "d"]);
        assert_eq!(order(&store.reorder(0, 2).unwrap()), ["b", "c", "a", "d"]);
        assert_eq!(order(&store.reorder(3, 1).unwrap()), ["a", "d", "b", "c"]);
        assert_eq!(store.reorder(2, 2).unwrap(), store);
    }

    #[test]
    fn reorder_round_trip_restores_order() {
        let store = store_of(&["a", "b", "c", "d", "e"]);
        for i in 0..store.len() {
            for j in 0..store.len() {
                let back = store.reorder(i, j).unwrap().reorder(j, i).unwrap();
                assert_eq!(back, store, "reorder({i}, {j}) then ({j}, {i})");
            }
        }
    }

    #[test]
    fn reorder_out_of_range_is_refused() {
        let store = store_of(&["a", "b"]);
        assert_eq!(
            store.reorder(0, 2),
            Err(ResourceError::InvalidRange { from: 0, to: 2, len: 2 })
        );
        assert!(ResourceStore::new().reorder(0, 0).is_err());
    }

    #[test]
    fn ids_track_adds_minus_removes() {
        let mut store = ResourceStore::new();
        let mut expected = std::collections::BTreeSet::new();
        for step in 0..40u32 {
            let id = format!("r{}", step % 7);
            if step % 3 == 0 {
                if let Ok(next) = store.remove(&id.as_str().into()) {
                    store = next;
                    expected.remove(&id);
                }
            } else if let Ok(next) = store.add(link(&id)) {
                store = next;
                expected.insert(id);
            }
        }
        let ids: Vec<String> = store.ids().iter().map(|id| id.to_string()).collect();
        let unique: std::collections::BTreeSet<String> = ids.iter().cloned().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(unique, expected);
    }
}
