//! Document-wide pointer events.
//!
//! Every pointer-down anywhere in the editor is broadcast to all subscribed
//! widgets. A widget holds a [`PointerListener`] for as long as it is mounted;
//! dropping the listener is the deregistration.

use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Ancestry of the element a pointer event hit, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(nodes.into_iter().map(Into::into).collect())
    }

    /// True when `node` is the target or one of its ancestors.
    pub fn contains(&self, node: &str) -> bool {
        self.0.iter().any(|n| n == node)
    }
}

#[derive(Debug, Clone)]
pub struct PointerDown {
    pub target: NodePath,
}

/// The shared document that pointer events are raised on.
#[derive(Debug, Clone)]
pub struct Document {
    sender: broadcast::Sender<PointerDown>,
}

impl Document {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Raises a pointer-down and returns how many listeners saw it.
    pub fn pointer_down(&self, target: NodePath) -> usize {
        self.sender.send(PointerDown { target }).unwrap_or(0)
    }

    pub fn subscribe(&self) -> PointerListener {
        debug!(listeners = self.sender.receiver_count() + 1, "Pointer listener registered");
        PointerListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(64)
    }
}

pub struct PointerListener {
    receiver: broadcast::Receiver<PointerDown>,
}

impl PointerListener {
    /// Next pointer-down, or `None` once the document is gone.
    pub async fn next(&mut self) -> Option<PointerDown> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Pointer listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        debug!("Pointer listener released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_contains_ancestors() {
        let path = NodePath::new(["editor", "module:m1", "title"]);
        assert!(path.contains("module:m1"));
        assert!(!path.contains("module:m2"));
    }

    #[tokio::test]
    async fn listeners_register_and_release() {
        let document = Document::new(8);
        assert_eq!(document.listener_count(), 0);

        let mut listener = document.subscribe();
        assert_eq!(document.listener_count(), 1);
        assert_eq!(document.pointer_down(NodePath::new(["body"])), 1);
        let event = listener.next().await.unwrap();
        assert!(event.target.contains("body"));

        drop(listener);
        assert_eq!(document.listener_count(), 0);
        assert_eq!(document.pointer_down(NodePath::new(["body"])), 0);
    }

    #[tokio::test]
    async fn listener_ends_when_document_is_gone() {
        let document = Document::new(8);
        let mut listener = document.subscribe();
        drop(document);
        assert!(listener.next().await.is_none());
    }
}
