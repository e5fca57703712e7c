//! A named, ordered container of resources.
//!
//! # Actor Framework
//! [`Module`] implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! so the collection of modules can be owned by a
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! The actor-side hooks live in [`crate::module_actor::entity`], using:
//! - Creation parameters ([`ModuleCreate`](crate::model::ModuleCreate))
//! - Update parameters ([`ModuleUpdate`](crate::model::ModuleUpdate))

use crate::model::Resource;
use std::fmt::Display;

/// Type-safe identifier for Modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ModuleId {
    fn from(id: u32) -> Self {
        Self(format!("module-{id}"))
    }
}

impl From<&str> for ModuleId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub resources: Vec<Resource>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(id: impl Into<ModuleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            resources: Vec::new(),
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }
}

/// DTO for Module creation.
#[derive(Debug, Clone)]
pub struct ModuleCreate {
    pub title: String,
}

/// DTO for Module updates. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ModuleUpdate {
    pub title: Option<String>,
    pub resources: Option<Vec<Resource>>,
}

impl ModuleUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn resources(resources: Vec<Resource>) -> Self {
        Self {
            resources: Some(resources),
            ..Self::default()
        }
    }
}
