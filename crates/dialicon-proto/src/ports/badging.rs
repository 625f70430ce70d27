use std::error::Error;

use super::compositor::{Drawable, RgbaBitmap};

/// Error type returned by [`BadgingPort`] operations.
///
/// Each error variant stores the logical operation name to aid diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum BadgingError {
    /// The backend failed to execute the requested operation.
    #[error("operation `{operation}` failed: {source}")]
    Backend {
        /// Logical operation identifier.
        operation: &'static str,
        /// Source error reported by the backend implementation.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// No badging backend is available to serve the operation.
    #[error("operation `{operation}` unavailable: no badging backend")]
    Unavailable {
        /// Logical operation identifier.
        operation: &'static str,
    },
    /// The operation failed with an explanatory message.
    #[error("operation `{operation}` failed: {message}")]
    Message {
        /// Logical operation identifier.
        operation: &'static str,
        /// Human readable error description.
        message: String,
    },
}

impl BadgingError {
    /// Helper for constructing [`BadgingError::Unavailable`].
    pub const fn unavailable(operation: &'static str) -> Self {
        Self::Unavailable { operation }
    }

    /// Helper for constructing [`BadgingError::Message`].
    pub fn message(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Message {
            operation,
            message: message.into(),
        }
    }
}

/// Identity whose badge is composited onto generated icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserHandle(pub u32);

/// A badged, scaled bitmap rendition of an icon.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgedBitmap {
    /// The rendered icon pixels.
    pub bitmap: RgbaBitmap,
    /// Scale factor the backend applied to fit the icon into its shape.
    pub scale: f32,
}

/// Factory for scoped badging sessions.
pub trait BadgingPort {
    /// Acquire a badging session.
    ///
    /// Backend resources held by the session are released when the returned
    /// value is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`BadgingError`] when no session can be provided.
    fn obtain(&self) -> Result<Box<dyn BadgingSession + '_>, BadgingError>;
}

/// Scoped access to the host's icon badging facility.
pub trait BadgingSession {
    /// Render `icon` into a badged bitmap of `icon_size` pixels for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`BadgingError`] when the backend cannot render the icon.
    fn create_badged_icon(
        &mut self,
        icon: &dyn Drawable,
        user: UserHandle,
        icon_size: u32,
    ) -> Result<BadgedBitmap, BadgingError>;
}
