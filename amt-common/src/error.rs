//! Common error types for the AMT front end

use thiserror::Error;

/// Common result type for AMT operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or mounting a page controller
#[derive(Error, Debug)]
pub enum Error {
    /// A controller's required element is absent from the page
    #[error("{controller} not mounted: element '{element}' not found")]
    NotMounted {
        controller: &'static str,
        element: String,
    },

    /// Configuration parsing or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A DOM call rejected (wraps the stringified JS exception)
    #[error("DOM error: {0}")]
    Dom(String),

    /// Request payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Look up a required element, turning absence into [`Error::NotMounted`]
pub fn require<T>(element: Option<T>, controller: &'static str, id: &str) -> Result<T> {
    element.ok_or_else(|| Error::NotMounted {
        controller,
        element: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present_element() {
        let found = require(Some(7), "chat", "chatForm").unwrap();
        assert_eq!(found, 7);
    }

    #[test]
    fn test_require_missing_element_is_not_mounted() {
        let err = require::<u8>(None, "chat", "chatForm").unwrap_err();
        match &err {
            Error::NotMounted { controller, element } => {
                assert_eq!(*controller, "chat");
                assert_eq!(element, "chatForm");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "chat not mounted: element 'chatForm' not found"
        );
    }
}
