use crate::clients::{ActorClient, ModuleClient, WidgetClient};
use crate::collaborators::{Document, Downloader, FeedbackBoard};
use crate::lifecycle::config::WidgetConfig;
use crate::model::{Module, ModuleId, ResourceIdGenerator};
use crate::module_actor::ModuleError;
use crate::widget::{ModuleWidget, WidgetContext};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Runs the module store and the widgets mounted on it.
///
/// `CourseSystem` is responsible for:
/// - **Lifecycle Management**: spawning the module store and one task per mounted widget
/// - **Dependency Wiring**: handing every widget the store client, the feedback board,
///   the document and the downloader
/// - **Resource Coordination**: one [`ResourceIdGenerator`] shared by all widgets
///
/// # Example
///
/// ```ignore
/// let mut system = CourseSystem::new(WidgetConfig::default(), downloader);
/// system.modules.replace_modules(vec![Module::new("m1", "Week 1")]).await?;
///
/// let widget = system.mount(&"m1".into()).await?;
/// widget.toggle_options(MenuButton::ellipsis()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CourseSystem {
    /// Client for the module store
    pub modules: ModuleClient,

    /// Status line shared by every widget
    pub feedback: FeedbackBoard,

    /// Pointer events are raised here
    pub document: Document,

    config: WidgetConfig,
    downloader: Arc<dyn Downloader>,
    ids: ResourceIdGenerator,
    store_handle: JoinHandle<()>,
    widgets: Vec<MountedWidget>,
}

struct MountedWidget {
    module_id: ModuleId,
    client: WidgetClient,
    handle: JoinHandle<()>,
}

impl MountedWidget {
    async fn stop(self) -> Result<(), String> {
        // already gone when every client was dropped
        let _ = self.client.teardown().await;
        drop(self.client);
        self.handle.await.map_err(|e| {
            error!(module_id = %self.module_id, "Widget task failed: {:?}", e);
            format!("Widget task failed: {:?}", e)
        })
    }
}

impl CourseSystem {
    /// Spawns the module store. Widgets are mounted separately.
    pub fn new(config: WidgetConfig, downloader: Arc<dyn Downloader>) -> Self {
        let (store_actor, store_client) = crate::module_actor::new(config.store_capacity);
        let store_handle = tokio::spawn(store_actor.run(()));

        Self {
            modules: ModuleClient::new(store_client),
            feedback: FeedbackBoard::new(),
            document: Document::new(config.document_capacity),
            config,
            downloader,
            ids: ResourceIdGenerator::new(),
            store_handle,
            widgets: Vec::new(),
        }
    }

    /// Replaces the module list in one step.
    pub async fn seed(&self, modules: Vec<Module>) -> Result<(), ModuleError> {
        self.modules.replace_modules(modules).await
    }

    /// Spawns a widget for the stored module `module_id`, or hands back the client
    /// of the widget already mounted for it. A module never has two widgets, since
    /// each would push its own copy of the resource list.
    ///
    /// The widget is listening for pointer events by the time this returns.
    pub async fn mount(&mut self, module_id: &ModuleId) -> Result<WidgetClient, ModuleError> {
        if let Some(mounted) = self.widgets.iter().find(|w| &w.module_id == module_id) {
            debug!(%module_id, "Widget already mounted");
            return Ok(mounted.client.clone());
        }

        let module = self
            .modules
            .get(module_id.clone())
            .await?
            .ok_or_else(|| ModuleError::NotFound(module_id.to_string()))?;

        let (widget, client) =
            ModuleWidget::new(module, &self.config, self.ids.clone(), &self.document);
        let context = WidgetContext {
            modules: self.modules.clone(),
            feedback: Arc::new(self.feedback.clone()),
            downloader: self.downloader.clone(),
        };
        let handle = tokio::spawn(widget.run(context));
        info!(%module_id, mounted = self.widgets.len() + 1, "Widget spawned");

        self.widgets.push(MountedWidget {
            module_id: module_id.clone(),
            client: client.clone(),
            handle,
        });
        Ok(client)
    }

    /// Mounts a widget for every stored module, in store order.
    pub async fn mount_all(&mut self) -> Result<Vec<WidgetClient>, ModuleError> {
        let mut clients = Vec::new();
        for module in self.modules.list_modules().await? {
            clients.push(self.mount(&module.id).await?);
        }
        Ok(clients)
    }

    /// Tears one widget down and waits for it. Returns `Ok(false)` when no widget
    /// for `module_id` is mounted.
    pub async fn unmount(&mut self, module_id: &ModuleId) -> Result<bool, String> {
        let Some(index) = self.widgets.iter().position(|w| &w.module_id == module_id) else {
            return Ok(false);
        };
        self.widgets.remove(index).stop().await?;
        info!(%module_id, "Widget unmounted");
        Ok(true)
    }

    pub fn mounted(&self) -> Vec<ModuleId> {
        self.widgets.iter().map(|w| w.module_id.clone()).collect()
    }

    /// Gracefully shuts down every widget, then the module store.
    ///
    /// Widgets are torn down first since each holds a store client. The store
    /// stops once the last [`ModuleClient`] is dropped, so callers must not keep
    /// clones of [`CourseSystem::modules`] past this call.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down course system...");

        // =====================================================================
        // Step 1: Tear down widgets
        // =====================================================================

        for mounted in self.widgets {
            mounted.stop().await?;
        }

        // =====================================================================
        // Step 2: Close the module store
        // =====================================================================

        drop(self.modules);
        if let Err(e) = self.store_handle.await {
            error!("Module store task failed: {:?}", e);
            return Err(format!("Module store task failed: {:?}", e));
        }

        info!("Course system shutdown complete.");
        Ok(())
    }
}
