//! Messages understood by a [`ModuleWidget`](crate::widget::ModuleWidget).

use crate::collaborators::{DownloadError, FileHandle, LinkSubmission};
use crate::model::{ModuleId, Resource, ResourceId};
use crate::module_actor::ModuleError;
use crate::store::ResourceError;
use crate::widget::drag::DragCommit;
use crate::widget::feedback::Ticket;
use crate::widget::ui_mode::{MenuButton, NotEnabled, UiAction, UiMode};
use thiserror::Error;
use tokio::sync::oneshot;

/// A user interaction with the widget.
#[derive(Debug)]
pub enum WidgetEvent {
    ToggleOptions(MenuButton),
    DeleteModule,
    RequestAddLink,
    RequestUpload,
    /// `None` when the picker was dismissed.
    FileSelected(Option<FileHandle>),
    LinkSubmitted(LinkSubmission),
    LinkCancelled,
    StartTitleEdit,
    EditTitle(String),
    CommitTitleEdit,
    DeleteResource(ResourceId),
    RenameResource { id: ResourceId, title: String },
    Download(ResourceId),
    DragBegin { draggable_id: ResourceId, index: usize },
    DragOver { index: Option<usize> },
    DragCommit(DragCommit),
}

#[derive(Debug)]
pub enum WidgetRequest {
    Event {
        event: WidgetEvent,
        respond_to: oneshot::Sender<EventOutcome>,
    },
    Snapshot {
        respond_to: oneshot::Sender<WidgetSnapshot>,
    },
    /// Posted by a feedback timer.
    FeedbackElapsed { ticket: Ticket },
    Teardown,
}

#[derive(Debug)]
pub enum EventOutcome {
    Applied,
    Ignored(Rejection),
}

impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EventOutcome::Applied)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EventOutcome::Applied => None,
            EventOutcome::Ignored(reason) => Some(reason),
        }
    }
}

impl From<Result<(), Rejection>> for EventOutcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => EventOutcome::Applied,
            Err(reason) => EventOutcome::Ignored(reason),
        }
    }
}

/// Why an event left the widget unchanged.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("{action:?} is not enabled in {mode} mode")]
    NotEnabled { action: UiAction, mode: &'static str },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Index out of range: from {from} to {to} in a list of {len}")]
    InvalidRange { from: usize, to: usize, len: usize },

    #[error("Link URL is empty")]
    EmptyInput,

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Resource {0} is not a file")]
    NotAFile(ResourceId),

    #[error("File picker closed without a selection")]
    PickerCancelled,

    #[error("Drop left the order unchanged")]
    Unmoved,

    #[error("Resource {id} is not at index {index}")]
    StaleIndex { id: ResourceId, index: usize },

    #[error("Module {0} no longer exists")]
    ModuleGone(ModuleId),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("Module store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<NotEnabled> for Rejection {
    fn from(e: NotEnabled) -> Self {
        Rejection::NotEnabled {
            action: e.action,
            mode: e.mode,
        }
    }
}

impl From<ResourceError> for Rejection {
    fn from(e: ResourceError) -> Self {
        match e {
            ResourceError::NotFound(id) => Rejection::NotFound(id.to_string()),
            ResourceError::DuplicateId(id) => Rejection::DuplicateId(id.to_string()),
            ResourceError::InvalidRange { from, to, len } => {
                Rejection::InvalidRange { from, to, len }
            }
            ResourceError::StaleIndex { id, index } => Rejection::StaleIndex { id, index },
            ResourceError::EmptyInput => Rejection::EmptyInput,
        }
    }
}

impl From<ModuleError> for Rejection {
    fn from(e: ModuleError) -> Self {
        match e {
            ModuleError::NotFound(id) => Rejection::NotFound(id),
            ModuleError::DuplicateId(id) => Rejection::DuplicateId(id),
            ModuleError::ActorCommunicationError(msg) => Rejection::StoreUnavailable(msg),
        }
    }
}

/// Errors talking to the widget itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Widget torn down")]
    Closed,
    #[error("Widget dropped response channel")]
    Dropped,
}

/// What the widget would render right now.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    pub module_id: ModuleId,
    pub title: String,
    pub mode: UiMode,
    pub resources: Vec<Resource>,
    pub feedback: String,
    pub dragging: Option<ResourceId>,
}

impl WidgetSnapshot {
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.resources.iter().map(|r| r.id.clone()).collect()
    }

    pub fn resource_titles(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.title.as_str()).collect()
    }
}
