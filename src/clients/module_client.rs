use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Module, ModuleCreate, ModuleId, ModuleUpdate, Resource};
use crate::module_actor::ModuleError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the module store.
#[derive(Clone)]
pub struct ModuleClient {
    inner: ResourceClient<Module>,
}

impl ModuleClient {
    pub fn new(inner: ResourceClient<Module>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Module> for ModuleClient {
    type Error = ModuleError;

    fn inner(&self) -> &ResourceClient<Module> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ModuleError::NotFound(id),
            FrameworkError::DuplicateId(id) => ModuleError::DuplicateId(id),
            other => ModuleError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ModuleClient {
    #[instrument(skip(self))]
    pub async fn list_modules(&self) -> Result<Vec<Module>, ModuleError> {
        debug!("Sending request");
        self.inner.list().await.map_err(Self::map_error)
    }

    /// Swaps the whole list in one step.
    #[instrument(skip(self, modules), fields(count = modules.len()))]
    pub async fn replace_modules(&self, modules: Vec<Module>) -> Result<(), ModuleError> {
        debug!("Sending request");
        self.inner.replace(modules).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn create_module(&self, title: String) -> Result<ModuleId, ModuleError> {
        debug!("Sending request");
        self.inner
            .create(ModuleCreate { title })
            .await
            .map_err(Self::map_error)
    }

    /// Filters the module out; the order of the others is kept.
    pub async fn remove_module(&self, id: ModuleId) -> Result<(), ModuleError> {
        self.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn rename_module(&self, id: ModuleId, title: String) -> Result<Module, ModuleError> {
        debug!("Sending request");
        self.inner
            .update(id, ModuleUpdate::title(title))
            .await
            .map_err(Self::map_error)
    }

    /// Overwrites the stored resource list of one module.
    #[instrument(skip(self, resources), fields(count = resources.len()))]
    pub async fn sync_resources(
        &self,
        id: ModuleId,
        resources: Vec<Resource>,
    ) -> Result<Module, ModuleError> {
        debug!("Sending request");
        self.inner
            .update(id, ModuleUpdate::resources(resources))
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{
        create_mock_client, expect_create, expect_delete, expect_list, expect_replace,
        expect_update,
    };

    #[tokio::test]
    async fn test_remove_module_maps_not_found() {
        let (inner, mut receiver) = create_mock_client::<Module>(4);
        let client = ModuleClient::new(inner);

        let task = tokio::spawn(async move { client.remove_module("m9".into()).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete");
        assert_eq!(id, ModuleId::from("m9"));
        responder
            .send(Err(FrameworkError::NotFound(id.to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ModuleError::NotFound("m9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rename_sends_title_only() {
        let (inner, mut receiver) = create_mock_client::<Module>(4);
        let client = ModuleClient::new(inner);

        let task =
            tokio::spawn(async move { client.rename_module("m1".into(), String::new()).await });

        let (id, update, responder) = expect_update(&mut receiver).await.expect("Expected Update");
        assert_eq!(id.as_str(), "m1");
        assert_eq!(update.title.as_deref(), Some(""));
        assert!(update.resources.is_none());
        responder.send(Ok(Module::new("m1", ""))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().title, "");
    }

    #[tokio::test]
    async fn test_sync_resources_sends_resources_only() {
        let (inner, mut receiver) = create_mock_client::<Module>(4);
        let client = ModuleClient::new(inner);

        let task =
            tokio::spawn(async move { client.sync_resources("m1".into(), Vec::new()).await });

        let (_, update, responder) = expect_update(&mut receiver).await.expect("Expected Update");
        assert!(update.title.is_none());
        assert_eq!(update.resources, Some(Vec::new()));
        responder.send(Ok(Module::new("m1", "Week 1"))).unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_replace_and_list() {
        let (inner, mut receiver) = create_mock_client::<Module>(4);
        let client = ModuleClient::new(inner);

        let task = tokio::spawn(async move {
            client
                .replace_modules(vec![Module::new("m1", "Week 1")])
                .await?;
            client.list_modules().await
        });

        let (items, responder) = expect_replace(&mut receiver).await.expect("Expected Replace");
        responder.send(Ok(())).unwrap();
        let responder = expect_list(&mut receiver).await.expect("Expected List");
        responder.send(Ok(items)).unwrap();

        let listed = task.await.unwrap().unwrap();
        assert_eq!(listed, vec![Module::new("m1", "Week 1")]);
    }

    #[tokio::test]
    async fn test_create_module_returns_id() {
        let (inner, mut receiver) = create_mock_client::<Module>(4);
        let client = ModuleClient::new(inner);

        let task = tokio::spawn(async move { client.create_module("Week 3".into()).await });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(params.title, "Week 3");
        responder.send(Ok(ModuleId::from(3))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().as_str(), "module-3");
    }

    #[tokio::test]
    async fn test_closed_store_is_a_communication_error() {
        let (inner, receiver) = create_mock_client::<Module>(4);
        drop(receiver);
        let client = ModuleClient::new(inner);

        assert!(matches!(
            client.list_modules().await,
            Err(ModuleError::ActorCommunicationError(_))
        ));
    }
}
