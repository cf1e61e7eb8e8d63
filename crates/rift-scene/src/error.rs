use std::fmt;

/// Invalid scene-stack request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No scene registered under this name.
    UnknownScene(String),
    /// `pop` with nothing on the stack.
    EmptyStack,
    /// `pop_to` a scene that is not on the stack.
    NotOnStack(String),
    /// `rebuild` of a scene that is currently on the stack.
    Active(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownScene(name) => write!(f, "no scene registered as {name:?}"),
            SceneError::EmptyStack => write!(f, "cannot pop an empty scene stack"),
            SceneError::NotOnStack(name) => write!(f, "scene {name:?} is not on the stack"),
            SceneError::Active(name) => write!(f, "scene {name:?} is on the stack and cannot be rebuilt"),
        }
    }
}

impl std::error::Error for SceneError {}
