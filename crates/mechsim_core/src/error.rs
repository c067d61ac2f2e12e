//! Error types for tree and scene graph operations

use std::fmt;

use crate::NodeKey;

/// Error type for ownership tree operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The key refers to a node that has been destroyed (or never existed)
    StaleNode(NodeKey),
    /// Child index out of bounds
    IndexOutOfRange { index: usize, len: usize },
    /// The operation would break the tree's ownership rules
    InvalidOperation(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::StaleNode(key) => write!(f, "Stale node reference: {:?}", key),
            TreeError::IndexOutOfRange { index, len } => {
                write!(f, "Child index {} out of range (node has {} children)", index, len)
            }
            TreeError::InvalidOperation(msg) => write!(f, "Invalid tree operation: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}

/// Error type for scene graph controller operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Error from the underlying tree
    Tree(TreeError),
    /// The request is not allowed on the scene graph (e.g. removing the root)
    InvalidOperation(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Tree(e) => write!(f, "Scene tree error: {}", e),
            SceneError::InvalidOperation(msg) => write!(f, "Invalid scene operation: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Tree(e) => Some(e),
            SceneError::InvalidOperation(_) => None,
        }
    }
}

impl From<TreeError> for SceneError {
    fn from(e: TreeError) -> Self {
        SceneError::Tree(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_index_out_of_range_display() {
        let err = TreeError::IndexOutOfRange { index: 3, len: 2 };
        let msg = format!("{}", err);
        assert!(msg.contains("3"));
        assert!(msg.contains("2 children"));
    }

    #[test]
    fn test_invalid_operation_display() {
        let err = SceneError::InvalidOperation("cannot remove the root node".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid scene operation"));
        assert!(msg.contains("root"));
    }

    #[test]
    fn test_from_tree_error() {
        let scene_err: SceneError = TreeError::StaleNode(NodeKey::default()).into();
        match scene_err {
            SceneError::Tree(TreeError::StaleNode(_)) => {}
            other => panic!("Expected Tree(StaleNode), got {:?}", other),
        }
    }

    #[test]
    fn test_error_source() {
        let wrapped = SceneError::Tree(TreeError::InvalidOperation("cycle".to_string()));
        assert!(wrapped.source().is_some());

        let direct = SceneError::InvalidOperation("root".to_string());
        assert!(direct.source().is_none());
    }
}
