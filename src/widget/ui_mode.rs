//! # UI Mode Controller
//!
//! Which overlay of the widget is active. The modes are one tagged variant, so
//! combinations like "options menu open while editing the title" cannot be
//! represented.
//!
//! ```text
//!            toggle(b)              request_add_link
//!   Idle ─────────────► OptionsOpen(b) ───────────────► LinkPrompt
//!    ▲  ◄───────────────     │   │  request_upload          │ close_link_prompt
//!    │   toggle(b) again     │   └──────────────► UploadPrompt
//!    │   request_delete      │                         │
//!    └───────────────────────┴─────── dismiss_all ─────┘
//!
//!   any mode except a prompt ── start_title_edit ──► TitleEdit ── commit ──► Idle
//! ```
//!
//! `dismiss_all` (a pointer-down outside the widget, or the delayed reset after
//! an upload or module delete) never touches `TitleEdit` or `LinkPrompt`: both
//! are self-contained overlays with their own close action. Each opening of the
//! link prompt is numbered, so a delayed close aimed at one prompt leaves a
//! later one alone.

use std::fmt;
use thiserror::Error;

/// The menu toggle a pointer activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuButton(String);

impl MenuButton {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The module header's "⋮" toggle.
    pub fn ellipsis() -> Self {
        Self::new("ellipsis")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMode {
    Idle,
    OptionsOpen(MenuButton),
    UploadPrompt,
    LinkPrompt,
    TitleEdit { draft: String },
}

impl UiMode {
    pub fn name(&self) -> &'static str {
        match self {
            UiMode::Idle => "idle",
            UiMode::OptionsOpen(_) => "options-open",
            UiMode::UploadPrompt => "upload-prompt",
            UiMode::LinkPrompt => "link-prompt",
            UiMode::TitleEdit { .. } => "title-edit",
        }
    }
}

impl fmt::Display for UiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User intents the controller gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleOptions,
    RequestDelete,
    RequestAddLink,
    RequestUpload,
    SelectFile,
    SubmitLink,
    CancelLink,
    StartTitleEdit,
    EditTitle,
    CommitTitleEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action:?} is not enabled in {mode} mode")]
pub struct NotEnabled {
    pub action: UiAction,
    pub mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiModeController {
    mode: UiMode,
    link_prompts: u64,
}

impl Default for UiModeController {
    fn default() -> Self {
        Self {
            mode: UiMode::Idle,
            link_prompts: 0,
        }
    }
}

impl UiModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    fn refuse<T>(&self, action: UiAction) -> Result<T, NotEnabled> {
        Err(NotEnabled {
            action,
            mode: self.mode.name(),
        })
    }

    /// Opens the menu for `button`, or closes it when `button` is the one already
    /// open. Opening also closes an upload prompt. Refused while a title edit or
    /// the link prompt is open so their input is never thrown away.
    pub fn toggle_options(&mut self, button: MenuButton) -> Result<(), NotEnabled> {
        self.mode = match &self.mode {
            UiMode::TitleEdit { .. } | UiMode::LinkPrompt => {
                return self.refuse(UiAction::ToggleOptions)
            }
            UiMode::OptionsOpen(open) if *open == button => UiMode::Idle,
            _ => UiMode::OptionsOpen(button),
        };
        Ok(())
    }

    fn from_options(&mut self, action: UiAction, next: UiMode) -> Result<(), NotEnabled> {
        match self.mode {
            UiMode::OptionsOpen(_) => {
                self.mode = next;
                Ok(())
            }
            _ => self.refuse(action),
        }
    }

    pub fn request_delete(&mut self) -> Result<(), NotEnabled> {
        self.from_options(UiAction::RequestDelete, UiMode::Idle)
    }

    pub fn request_add_link(&mut self) -> Result<(), NotEnabled> {
        self.from_options(UiAction::RequestAddLink, UiMode::LinkPrompt)?;
        self.link_prompts += 1;
        Ok(())
    }

    pub fn request_upload(&mut self) -> Result<(), NotEnabled> {
        self.from_options(UiAction::RequestUpload, UiMode::UploadPrompt)
    }

    /// The picker only exists while the upload prompt is shown.
    pub fn ensure_upload_prompt(&self) -> Result<(), NotEnabled> {
        match self.mode {
            UiMode::UploadPrompt => Ok(()),
            _ => self.refuse(UiAction::SelectFile),
        }
    }

    /// Returns the number of the open link prompt.
    pub fn ensure_link_prompt(&self) -> Result<u64, NotEnabled> {
        match self.mode {
            UiMode::LinkPrompt => Ok(self.link_prompts),
            _ => self.refuse(UiAction::SubmitLink),
        }
    }

    pub fn close_link_prompt(&mut self) -> Result<(), NotEnabled> {
        match self.mode {
            UiMode::LinkPrompt => {
                self.mode = UiMode::Idle;
                Ok(())
            }
            _ => self.refuse(UiAction::CancelLink),
        }
    }

    /// Starts editing with `current_title` as the draft. Already editing keeps the
    /// existing draft.
    pub fn start_title_edit(&mut self, current_title: &str) -> Result<(), NotEnabled> {
        match self.mode {
            UiMode::UploadPrompt | UiMode::LinkPrompt => self.refuse(UiAction::StartTitleEdit),
            UiMode::TitleEdit { .. } => Ok(()),
            UiMode::Idle | UiMode::OptionsOpen(_) => {
                self.mode = UiMode::TitleEdit {
                    draft: current_title.to_string(),
                };
                Ok(())
            }
        }
    }

    pub fn edit_title(&mut self, text: impl Into<String>) -> Result<(), NotEnabled> {
        match &mut self.mode {
            UiMode::TitleEdit { draft } => {
                *draft = text.into();
                Ok(())
            }
            _ => self.refuse(UiAction::EditTitle),
        }
    }

    /// Leaves title editing and hands back the draft, which may be empty.
    pub fn commit_title_edit(&mut self) -> Result<String, NotEnabled> {
        match std::mem::replace(&mut self.mode, UiMode::Idle) {
            UiMode::TitleEdit { draft } => Ok(draft),
            other => {
                self.mode = other;
                self.refuse(UiAction::CommitTitleEdit)
            }
        }
    }

    /// Closes the options menu and the upload prompt. Returns whether anything
    /// closed.
    pub fn dismiss_all(&mut self) -> bool {
        match self.mode {
            UiMode::OptionsOpen(_) | UiMode::UploadPrompt => {
                self.mode = UiMode::Idle;
                true
            }
            UiMode::Idle | UiMode::LinkPrompt | UiMode::TitleEdit { .. } => false,
        }
    }

    /// Closes the link prompt only if it is still the one numbered `prompt`.
    pub fn expire_link_prompt(&mut self, prompt: u64) -> bool {
        if self.mode == UiMode::LinkPrompt && self.link_prompts == prompt {
            self.mode = UiMode::Idle;
            true
        } else {
            false
        }
    }
}
