use crate::collaborators::{FileHandle, LinkSubmission};
use crate::model::ResourceId;
use crate::widget::{
    DragCommit, DragLocation, EventOutcome, MenuButton, WidgetError, WidgetEvent, WidgetRequest,
    WidgetSnapshot,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for one mounted [`ModuleWidget`](crate::widget::ModuleWidget).
///
/// Every method resolves once the widget has handled the event, so a sequence of
/// awaited calls is applied in order.
#[derive(Clone)]
pub struct WidgetClient {
    sender: mpsc::Sender<WidgetRequest>,
}

impl WidgetClient {
    pub fn new(sender: mpsc::Sender<WidgetRequest>) -> Self {
        Self { sender }
    }

    async fn send(&self, event: WidgetEvent) -> Result<EventOutcome, WidgetError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(WidgetRequest::Event { event, respond_to })
            .await
            .map_err(|_| WidgetError::Closed)?;
        response.await.map_err(|_| WidgetError::Dropped)
    }

    /// True once the widget has been torn down.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    #[instrument(skip(self))]
    pub async fn toggle_options(&self, button: MenuButton) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::ToggleOptions(button)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_module(&self) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::DeleteModule).await
    }

    pub async fn request_add_link(&self) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::RequestAddLink).await
    }

    pub async fn request_upload(&self) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::RequestUpload).await
    }

    /// Hands over the picker result; `None` when it was dismissed.
    #[instrument(skip(self))]
    pub async fn select_file(&self, file: Option<FileHandle>) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::FileSelected(file)).await
    }

    #[instrument(skip(self))]
    pub async fn submit_link(
        &self,
        url: &str,
        display_name: &str,
    ) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::LinkSubmitted(LinkSubmission::new(url, display_name)))
            .await
    }

    pub async fn cancel_link(&self) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::LinkCancelled).await
    }

    pub async fn start_title_edit(&self) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::StartTitleEdit).await
    }

    pub async fn edit_title(&self, draft: &str) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::EditTitle(draft.to_string())).await
    }

    #[instrument(skip(self))]
    pub async fn commit_title_edit(&self) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::CommitTitleEdit).await
    }

    #[instrument(skip(self))]
    pub async fn delete_resource(&self, id: ResourceId) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::DeleteResource(id)).await
    }

    #[instrument(skip(self))]
    pub async fn rename_resource(
        &self,
        id: ResourceId,
        title: &str,
    ) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::RenameResource {
            id,
            title: title.to_string(),
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn download(&self, id: ResourceId) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::Download(id)).await
    }

    pub async fn drag_begin(
        &self,
        draggable_id: ResourceId,
        index: usize,
    ) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::DragBegin {
            draggable_id,
            index,
        })
        .await
    }

    pub async fn drag_over(&self, index: Option<usize>) -> Result<EventOutcome, WidgetError> {
        self.send(WidgetEvent::DragOver { index }).await
    }

    #[instrument(skip(self))]
    pub async fn drag_commit(
        &self,
        draggable_id: ResourceId,
        source: DragLocation,
        destination: Option<DragLocation>,
    ) -> Result<EventOutcome, WidgetError> {
        debug!("Sending request");
        self.send(WidgetEvent::DragCommit(DragCommit {
            draggable_id,
            source,
            destination,
        }))
        .await
    }

    pub async fn snapshot(&self) -> Result<WidgetSnapshot, WidgetError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(WidgetRequest::Snapshot { respond_to })
            .await
            .map_err(|_| WidgetError::Closed)?;
        response.await.map_err(|_| WidgetError::Dropped)
    }

    /// Asks the widget to stop. Pending events ahead of this one are still handled.
    #[instrument(skip(self))]
    pub async fn teardown(&self) -> Result<(), WidgetError> {
        debug!("Sending request");
        self.sender
            .send(WidgetRequest::Teardown)
            .await
            .map_err(|_| WidgetError::Closed)
    }
}
