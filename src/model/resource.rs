//! Resources attached to a module.
//!
//! A resource is either an uploaded file or a link. Its position in the owning list
//! is its display and drag order; there is no separate position field.

use crate::collaborators::FileHandle;
use crate::model::Color;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of a resource, unique within its module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out `resource-<millis>` ids.
///
/// Clones share one high-water mark, so ids are strictly increasing across every
/// widget using the same generator, even when several are minted in the same
/// millisecond or the wall clock steps backwards.
#[derive(Debug, Clone, Default)]
pub struct ResourceIdGenerator {
    last: Arc<AtomicU64>,
}

impl ResourceIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ResourceId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            }) {
            Ok(previous) | Err(previous) => previous,
        };
        ResourceId(format!("resource-{}", now.max(previous + 1)))
    }
}

/// What a resource points at.
///
/// A file always owns a handle and a link never does; for links the title doubles
/// as the URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceKind {
    File(FileHandle),
    Link,
}

/// Payload-free discriminant of [`ResourceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    File,
    Link,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub kind: ResourceKind,
    pub color: Color,
}

impl Resource {
    /// A file resource titled after the picked file. The handle is shared, never
    /// copied.
    pub fn file(id: ResourceId, handle: FileHandle, color: Color) -> Self {
        Self {
            id,
            title: handle.name().to_string(),
            kind: ResourceKind::File(handle),
            color,
        }
    }

    pub fn link(id: ResourceId, title: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            title: title.into(),
            kind: ResourceKind::Link,
            color,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self.kind {
            ResourceKind::File(_) => ResourceType::File,
            ResourceKind::Link => ResourceType::Link,
        }
    }

    pub fn file_handle(&self) -> Option<&FileHandle> {
        match &self.kind {
            ResourceKind::File(handle) => Some(handle),
            ResourceKind::Link => None,
        }
    }

    /// The link target, if this is a link.
    pub fn href(&self) -> Option<&str> {
        match self.kind {
            ResourceKind::Link => Some(&self.title),
            ResourceKind::File(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_strictly_increasing() {
        let ids = ResourceIdGenerator::new();
        let stamps: Vec<u64> = (0..50)
            .map(|_| {
                let id = ids.next_id();
                assert!(id.as_str().starts_with("resource-"));
                id.as_str()["resource-".len()..].parse().unwrap()
            })
            .collect();
        assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn cloned_generators_never_repeat() {
        let a = ResourceIdGenerator::new();
        let b = a.clone();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            assert!(seen.insert(a.next_id()));
            assert!(seen.insert(b.next_id()));
        }
    }

    #[test]
    fn file_and_link_constructors_keep_kind_invariants() {
        let color = Color([0xBB, 0xCC, 0xDD]);
        let file = Resource::file(
            "resource-1".into(),
            FileHandle::in_memory("notes.pdf", b"%PDF".to_vec()),
            color,
        );
        assert_eq!(file.title, "notes.pdf");
        assert_eq!(file.resource_type(), ResourceType::File);
        assert!(file.file_handle().is_some());
        assert!(file.href().is_none());

        let link = Resource::link("resource-2".into(), "https://x.org", color);
        assert_eq!(link.resource_type(), ResourceType::Link);
        assert!(link.file_handle().is_none());
        assert_eq!(link.href(), Some("https://x.org"));
    }
}
