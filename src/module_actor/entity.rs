//! [`ActorEntity`] implementation for the [`Module`] domain type.

use crate::framework::ActorEntity;
use crate::model::{Module, ModuleCreate, ModuleId, ModuleUpdate};
use crate::module_actor::ModuleError;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Module {
    type Id = ModuleId;
    type Create = ModuleCreate;
    type Update = ModuleUpdate;
    type Context = ();
    type Error = ModuleError;

    fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Creates an empty module.
    fn from_create_params(id: ModuleId, params: ModuleCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.title))
    }

    /// Applies a map-update. An empty title is allowed.
    async fn on_update(&mut self, update: ModuleUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(resources) = update.resources {
            debug!(module_id = %self.id, count = resources.len(), "Resources synced");
            self.resources = resources;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Resource};

    #[tokio::test]
    async fn update_touches_only_given_fields() {
        let link = Resource::link("resource-1".into(), "https://x.org", Color([0xBB; 3]));
        let mut module = Module::new("m1", "Week 1").with_resources(vec![link.clone()]);

        module.on_update(ModuleUpdate::title(""), &()).await.unwrap();
        assert_eq!(module.title, "");
        assert_eq!(module.resources, vec![link]);

        module
            .on_update(ModuleUpdate::resources(Vec::new()), &())
            .await
            .unwrap();
        assert!(module.resources.is_empty());
        assert_eq!(module.title, "");
    }

    #[test]
    fn generated_ids_are_prefixed() {
        let module = Module::from_create_params(ModuleId::from(3), ModuleCreate {
            title: "Week 3".into(),
        })
        .unwrap();
        assert_eq!(module.id.as_str(), "module-3");
    }
}
