//! # Module Widget
//!
//! One module rendered as an interactive card. The widget is an actor: every UI
//! event, every pointer-down on the document and every feedback timer arrives as
//! a message and is handled to completion before the next one, so the resource
//! list and the UI mode never see concurrent mutation.
//!
//! ## Event handling
//!
//! Each event first passes the [`UiModeController`] gate, then mutates the local
//! [`ResourceStore`] or the module store, then shows feedback. Resource changes
//! are pushed to the module store as a whole list before they replace the local
//! one. A push that fails for any reason other than a missing module is logged
//! and the local list is kept anyway.
//!
//! | Event              | Feedback           | Clears after | Then closes              |
//! |--------------------|--------------------|--------------|--------------------------|
//! | delete module      | "Module deleted"   | long         | options menu, upload     |
//! | commit title edit  | "Module renamed"   | long         | nothing                  |
//! | file selected      | "File uploaded"    | short        | options menu, upload     |
//! | link submitted     | "Link added"       | short        | its own link prompt      |
//! | delete resource    | "Resource deleted" | long         | nothing                  |
//! | rename resource    | "Resource renamed" | long         | nothing                  |
//! | download           | "File downloaded"  | long         | nothing                  |
//!
//! Once the module is deleted, by this widget or found missing in the store,
//! every further event is refused with [`Rejection::ModuleGone`]. Pending
//! feedback still clears and the widget stays up until it is torn down.
//!
//! ## Lifetime
//!
//! The pointer listener is registered when the widget is built and released when
//! [`ModuleWidget::run`] returns. `run` returns on [`WidgetRequest::Teardown`] or
//! once every [`WidgetClient`] is dropped; the pending feedback timer is aborted
//! on the way out.

use crate::clients::{ModuleClient, WidgetClient};
use crate::collaborators::{Document, Downloader, FeedbackChannel, PointerDown, PointerListener};
use crate::lifecycle::config::{FeedbackDelays, WidgetConfig};
use crate::model::{Color, Module, ModuleId, Resource, ResourceIdGenerator};
use crate::module_actor::ModuleError;
use crate::store::ResourceStore;
use crate::widget::drag::DragCoordinator;
use crate::widget::feedback::{AfterClear, FeedbackScheduler};
use crate::widget::messages::{EventOutcome, Rejection, WidgetEvent, WidgetRequest, WidgetSnapshot};
use crate::widget::ui_mode::UiModeController;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const MODULE_DELETED: &str = "Module deleted";
const MODULE_RENAMED: &str = "Module renamed";
const FILE_UPLOADED: &str = "File uploaded";
const LINK_ADDED: &str = "Link added";
const RESOURCE_DELETED: &str = "Resource deleted";
const RESOURCE_RENAMED: &str = "Resource renamed";
const FILE_DOWNLOADED: &str = "File downloaded";

type Feedback = FeedbackScheduler<WidgetRequest>;

/// Node id of a widget's outermost element. Pointer-downs whose path contains it
/// are inside the widget.
pub fn root_node_id(module_id: &ModuleId) -> String {
    format!("module:{module_id}")
}

/// Services a running widget talks to.
pub struct WidgetContext {
    pub modules: ModuleClient,
    pub feedback: Arc<dyn FeedbackChannel>,
    pub downloader: Arc<dyn Downloader>,
}

pub struct ModuleWidget {
    receiver: mpsc::Receiver<WidgetRequest>,
    mailbox: mpsc::WeakSender<WidgetRequest>,
    pointer: Option<PointerListener>,
    module_id: ModuleId,
    root_node: String,
    title: String,
    resources: ResourceStore,
    ui: UiModeController,
    drag: DragCoordinator,
    ids: ResourceIdGenerator,
    delays: FeedbackDelays,
    gone: bool,
}

impl ModuleWidget {
    /// Builds the widget for `module` and subscribes it to `document`.
    pub fn new(
        module: Module,
        config: &WidgetConfig,
        ids: ResourceIdGenerator,
        document: &Document,
    ) -> (Self, WidgetClient) {
        let (sender, receiver) = mpsc::channel(config.mailbox_capacity);
        let Module {
            id,
            title,
            resources,
        } = module;

        let resources = resources
            .into_iter()
            .fold(ResourceStore::new(), |store, resource| match store.add(resource) {
                Ok(next) => next,
                Err(e) => {
                    warn!(module_id = %id, error = %e, "Skipping resource");
                    store
                }
            });

        let widget = Self {
            receiver,
            mailbox: sender.downgrade(),
            pointer: Some(document.subscribe()),
            root_node: root_node_id(&id),
            drag: DragCoordinator::new(&id),
            module_id: id,
            title,
            resources,
            ui: UiModeController::new(),
            ids,
            delays: config.feedback,
            gone: false,
        };
        (widget, WidgetClient::new(sender))
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    pub async fn run(mut self, ctx: WidgetContext) {
        let mut pointer = self.pointer.take();
        let mut feedback = FeedbackScheduler::new(
            ctx.feedback.clone(),
            self.mailbox.clone(),
            |ticket| WidgetRequest::FeedbackElapsed { ticket },
        );
        info!(
            entity_type = "ModuleWidget",
            module_id = %self.module_id,
            size = self.resources.len(),
            "Widget mounted"
        );

        loop {
            tokio::select! {
                biased;
                event = next_pointer(&mut pointer), if pointer.is_some() => match event {
                    Some(event) => self.on_pointer_down(&event),
                    None => {
                        debug!(module_id = %self.module_id, "Document closed");
                        pointer = None;
                    }
                },
                request = self.receiver.recv() => match request {
                    Some(WidgetRequest::Teardown) | None => break,
                    Some(request) => self.handle(request, &ctx, &mut feedback).await,
                },
            }
        }

        if feedback.cancel() {
            debug!(module_id = %self.module_id, "Pending feedback cancelled");
        }
        drop(pointer);
        info!(
            entity_type = "ModuleWidget",
            module_id = %self.module_id,
            size = self.resources.len(),
            "Widget torn down"
        );
    }

    async fn handle(&mut self, request: WidgetRequest, ctx: &WidgetContext, feedback: &mut Feedback) {
        match request {
            WidgetRequest::Event { event, respond_to } => {
                debug!(module_id = %self.module_id, ?event, "Event");
                let outcome = EventOutcome::from(self.apply(event, ctx, feedback).await);
                if let EventOutcome::Ignored(reason) = &outcome {
                    warn!(module_id = %self.module_id, %reason, "Event ignored");
                }
                let _ = respond_to.send(outcome);
            }
            WidgetRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot(feedback));
            }
            WidgetRequest::FeedbackElapsed { ticket } => match feedback.on_elapsed(ticket) {
                Some(AfterClear::CloseMenus) => {
                    self.ui.dismiss_all();
                }
                Some(AfterClear::CloseLinkPrompt { prompt }) => {
                    self.ui.expire_link_prompt(prompt);
                }
                Some(AfterClear::FeedbackOnly) | None => {}
            },
            WidgetRequest::Teardown => {}
        }
    }

    async fn apply(
        &mut self,
        event: WidgetEvent,
        ctx: &WidgetContext,
        feedback: &mut Feedback,
    ) -> Result<(), Rejection> {
        if self.gone {
            return Err(Rejection::ModuleGone(self.module_id.clone()));
        }
        match event {
            WidgetEvent::ToggleOptions(button) => self.ui.toggle_options(button)?,
            WidgetEvent::RequestAddLink => self.ui.request_add_link()?,
            WidgetEvent::RequestUpload => self.ui.request_upload()?,
            WidgetEvent::LinkCancelled => self.ui.close_link_prompt()?,
            WidgetEvent::StartTitleEdit => self.ui.start_title_edit(&self.title)?,
            WidgetEvent::EditTitle(draft) => self.ui.edit_title(draft)?,

            WidgetEvent::DeleteModule => {
                self.ui.request_delete()?;
                let removed = ctx.modules.remove_module(self.module_id.clone()).await;
                self.check_store(removed)?;
                self.gone = true;
                info!(entity_type = "ModuleWidget", module_id = %self.module_id, "Module deleted");
                feedback.announce(MODULE_DELETED, self.delays.long(), AfterClear::CloseMenus);
            }
            WidgetEvent::CommitTitleEdit => {
                let draft = self.ui.commit_title_edit()?;
                let renamed = ctx.modules.rename_module(self.module_id.clone(), draft).await;
                let module = self.check_store(renamed)?;
                self.title = module.title;
                info!(module_id = %self.module_id, title = %self.title, "Module renamed");
                feedback.announce(MODULE_RENAMED, self.delays.long(), AfterClear::FeedbackOnly);
            }

            WidgetEvent::FileSelected(file) => {
                self.ui.ensure_upload_prompt()?;
                let file = file.ok_or(Rejection::PickerCancelled)?;
                let color = Color::random_light(&mut rand::rng());
                self.add_resource(Resource::file(self.ids.next_id(), file, color), ctx)
                    .await?;
                feedback.announce(FILE_UPLOADED, self.delays.short(), AfterClear::CloseMenus);
            }
            WidgetEvent::LinkSubmitted(submission) => {
                let prompt = self.ui.ensure_link_prompt()?;
                let link = submission.validate()?;
                debug!(url = %link.url, title = %link.title, "Link accepted");
                let color = Color::random_light(&mut rand::rng());
                self.add_resource(Resource::link(self.ids.next_id(), link.title, color), ctx)
                    .await?;
                feedback.announce(
                    LINK_ADDED,
                    self.delays.short(),
                    AfterClear::CloseLinkPrompt { prompt },
                );
            }
            WidgetEvent::DeleteResource(id) => {
                let next = self.resources.remove(&id)?;
                self.commit_resources(next, ctx).await?;
                feedback.announce(RESOURCE_DELETED, self.delays.long(), AfterClear::FeedbackOnly);
            }
            WidgetEvent::RenameResource { id, title } => {
                let next = self.resources.rename(&id, title)?;
                self.commit_resources(next, ctx).await?;
                feedback.announce(RESOURCE_RENAMED, self.delays.long(), AfterClear::FeedbackOnly);
            }
            WidgetEvent::Download(id) => {
                let resource = self
                    .resources
                    .get(&id)
                    .ok_or_else(|| Rejection::NotFound(id.to_string()))?;
                let file = resource
                    .file_handle()
                    .ok_or_else(|| Rejection::NotAFile(id.clone()))?;
                ctx.downloader.trigger(file)?;
                feedback.announce(FILE_DOWNLOADED, self.delays.long(), AfterClear::FeedbackOnly);
            }

            WidgetEvent::DragBegin {
                draggable_id,
                index,
            } => self.drag.begin(draggable_id, index),
            WidgetEvent::DragOver { index } => self.drag.over(index),
            WidgetEvent::DragCommit(ended) => {
                let next = self
                    .drag
                    .commit(&ended, &self.resources)?
                    .ok_or(Rejection::Unmoved)?;
                self.commit_resources(next, ctx).await?;
            }
        }
        Ok(())
    }

    async fn add_resource(&mut self, resource: Resource, ctx: &WidgetContext) -> Result<(), Rejection> {
        let next = self.resources.add(resource)?;
        self.commit_resources(next, ctx).await
    }

    /// Pushes `next` to the module store, then swaps it in. Nothing changes if the
    /// module is missing from the store.
    async fn commit_resources(
        &mut self,
        next: ResourceStore,
        ctx: &WidgetContext,
    ) -> Result<(), Rejection> {
        let synced = ctx
            .modules
            .sync_resources(self.module_id.clone(), next.as_slice().to_vec())
            .await;
        match synced {
            Ok(_) => {}
            Err(ModuleError::NotFound(_)) => {
                self.mark_gone();
                return Err(Rejection::ModuleGone(self.module_id.clone()));
            }
            Err(e) => warn!(module_id = %self.module_id, error = %e, "Resource sync failed"),
        }
        self.resources = next;
        info!(
            entity_type = "ModuleWidget",
            module_id = %self.module_id,
            size = self.resources.len(),
            "Resources committed"
        );
        Ok(())
    }

    /// A missing module is remembered so later events are refused.
    fn check_store<T>(&mut self, result: Result<T, ModuleError>) -> Result<T, Rejection> {
        if let Err(ModuleError::NotFound(_)) = &result {
            self.mark_gone();
        }
        result.map_err(Rejection::from)
    }

    fn mark_gone(&mut self) {
        if !self.gone {
            info!(
                entity_type = "ModuleWidget",
                module_id = %self.module_id,
                "Module gone from the store"
            );
        }
        self.gone = true;
    }

    fn on_pointer_down(&mut self, event: &PointerDown) {
        if event.target.contains(&self.root_node) {
            return;
        }
        if self.ui.dismiss_all() {
            debug!(module_id = %self.module_id, "Dismissed by outside click");
        }
    }

    fn snapshot(&self, feedback: &Feedback) -> WidgetSnapshot {
        WidgetSnapshot {
            module_id: self.module_id.clone(),
            title: self.title.clone(),
            mode: self.ui.mode().clone(),
            resources: self.resources.as_slice().to_vec(),
            feedback: feedback.showing().to_string(),
            dragging: self.drag.active().cloned(),
        }
    }
}

async fn next_pointer(listener: &mut Option<PointerListener>) -> Option<PointerDown> {
    match listener {
        Some(listener) => listener.next().await,
        None => std::future::pending().await,
    }
}
