//! Drag-and-drop of resources within one module.
//!
//! The drag source and drop target are identified by a droppable id and an
//! index, as a drag-and-drop layer reports them. Only a drop that starts and ends
//! inside this module's list, at a different index, changes anything, and only
//! when the dragged resource really sits at the reported source index.

use crate::model::{ModuleId, ResourceId};
use crate::store::{ResourceError, ResourceStore};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// The end of a drag. `destination` is `None` when the item was dropped outside
/// any list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragCommit {
    pub draggable_id: ResourceId,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

#[derive(Debug)]
pub struct DragCoordinator {
    droppable_id: String,
    active: Option<ResourceId>,
    hover: Option<usize>,
}

impl DragCoordinator {
    /// The droppable id of a module's list is the module id.
    pub fn new(module_id: &ModuleId) -> Self {
        Self {
            droppable_id: module_id.to_string(),
            active: None,
            hover: None,
        }
    }

    pub fn active(&self) -> Option<&ResourceId> {
        self.active.as_ref()
    }

    pub fn begin(&mut self, draggable_id: ResourceId, index: usize) {
        debug!(%draggable_id, index, "Drag started");
        self.active = Some(draggable_id);
        self.hover = Some(index);
    }

    pub fn over(&mut self, index: Option<usize>) {
        if self.hover != index {
            debug!(?index, "Drag over");
            self.hover = index;
        }
    }

    /// Ends the drag. Returns the reordered store, or `None` when the drop leaves
    /// the order as it was.
    pub fn commit(
        &mut self,
        ended: &DragCommit,
        store: &ResourceStore,
    ) -> Result<Option<ResourceStore>, ResourceError> {
        self.active = None;
        self.hover = None;

        let Some(destination) = &ended.destination else {
            debug!(draggable_id = %ended.draggable_id, "Dropped outside any list");
            return Ok(None);
        };
        if ended.source.droppable_id != self.droppable_id
            || destination.droppable_id != self.droppable_id
        {
            debug!(draggable_id = %ended.draggable_id, "Dropped outside this module");
            return Ok(None);
        }
        match store.position(&ended.draggable_id) {
            None => return Err(ResourceError::NotFound(ended.draggable_id.clone())),
            Some(index) if index != ended.source.index => {
                return Err(ResourceError::StaleIndex {
                    id: ended.draggable_id.clone(),
                    index: ended.source.index,
                })
            }
            Some(_) => {}
        }
        if ended.source.index == destination.index {
            return Ok(None);
        }
        store
            .reorder(ended.source.index, destination.index)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Resource};

    fn store() -> ResourceStore {
        ResourceStore::from_resources(vec![
            Resource::link("a".into(), "https://a.example", Color([0xCC; 3])),
            Resource::link("b".into(), "https://b.example", Color([0xDD; 3])),
        ])
        .unwrap()
    }

    fn drop_to(destination: Option<DragLocation>) -> DragCommit {
        DragCommit {
            draggable_id: "a".into(),
            source: DragLocation::new("m1", 0),
            destination,
        }
    }

    #[test]
    fn drop_within_the_list_reorders() {
        let mut drag = DragCoordinator::new(&"m1".into());
        drag.begin("a".into(), 0);
        drag.over(Some(1));
        assert_eq!(drag.active(), Some(&"a".into()));

        let moved = drag
            .commit(&drop_to(Some(DragLocation::new("m1", 1))), &store())
            .unwrap()
            .unwrap();
        assert_eq!(moved.ids(), vec![ResourceId::from("b"), ResourceId::from("a")]);
        assert!(drag.active().is_none());
    }

    #[test]
    fn drop_outside_leaves_order_alone() {
        let mut drag = DragCoordinator::new(&"m1".into());
        drag.begin("a".into(), 0);
        assert_eq!(drag.commit(&drop_to(None), &store()), Ok(None));
        assert!(drag.active().is_none());
    }

    #[test]
    fn drop_into_another_module_or_same_index_is_ignored() {
        let mut drag = DragCoordinator::new(&"m1".into());
        let elsewhere = drop_to(Some(DragLocation::new("m2", 1)));
        assert_eq!(drag.commit(&elsewhere, &store()), Ok(None));

        let same = drop_to(Some(DragLocation::new("m1", 0)));
        assert_eq!(drag.commit(&same, &store()), Ok(None));
    }

    #[test]
    fn stale_indices_are_refused() {
        let mut drag = DragCoordinator::new(&"m1".into());
        let stale = drop_to(Some(DragLocation::new("m1", 5)));
        assert!(matches!(
            drag.commit(&stale, &store()),
            Err(ResourceError::InvalidRange { len: 2, .. })
        ));
    }

    #[test]
    fn a_source_index_that_disagrees_with_the_id_is_refused() {
        let mut drag = DragCoordinator::new(&"m1".into());
        let wrong_item = DragCommit {
            draggable_id: "b".into(),
            source: DragLocation::new("m1", 0),
            destination: Some(DragLocation::new("m1", 1)),
        };
        assert_eq!(
            drag.commit(&wrong_item, &store()),
            Err(ResourceError::StaleIndex {
                id: "b".into(),
                index: 0
            })
        );

        let unknown = DragCommit {
            draggable_id: "z".into(),
            ..wrong_item
        };
        assert_eq!(
            drag.commit(&unknown, &store()),
            Err(ResourceError::NotFound("z".into()))
        );
    }
}
