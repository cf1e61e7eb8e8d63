use std::collections::VecDeque;

/// A scene-stack change requested by game code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    Push(String),
    Pop,
    /// Pop until the named scene is on top.
    PopTo(String),
    /// Replace the named scene with a fresh instance from its factory.
    Rebuild(String),
    /// Drop the whole stack without running any transition.
    Clear,
}

/// Queue of stack requests, drained by the [`SceneManager`](crate::SceneManager)
/// whenever no transition is running.
#[derive(Debug, Default)]
pub struct Navigation {
    queue: VecDeque<NavRequest>,
}

impl Navigation {
    pub fn push(&mut self, scene: impl Into<String>) {
        self.queue.push_back(NavRequest::Push(scene.into()));
    }

    pub fn pop(&mut self) {
        self.queue.push_back(NavRequest::Pop);
    }

    pub fn pop_to(&mut self, scene: impl Into<String>) {
        self.queue.push_back(NavRequest::PopTo(scene.into()));
    }

    pub fn rebuild(&mut self, scene: impl Into<String>) {
        self.queue.push_back(NavRequest::Rebuild(scene.into()));
    }

    pub fn clear(&mut self) {
        self.queue.push_back(NavRequest::Clear);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &NavRequest> {
        self.queue.iter()
    }

    pub(crate) fn next(&mut self) -> Option<NavRequest> {
        self.queue.pop_front()
    }
}
