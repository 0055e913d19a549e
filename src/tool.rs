//! Active tool selection.

use serde::{Deserialize, Serialize};

/// Tool currently driving pointer input on the capture surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Plain pointer: clicks and collection drags only
    #[default]
    Pointer,
    /// Rectangular capture
    RectangleCapture,
    /// Freehand (lasso) capture
    FreehandCapture,
    /// Grab and move cutouts
    Hand,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pointer,
        ToolKind::RectangleCapture,
        ToolKind::FreehandCapture,
        ToolKind::Hand,
    ];

    /// Whether this tool draws capture selections
    pub fn is_capture(&self) -> bool {
        matches!(self, ToolKind::RectangleCapture | ToolKind::FreehandCapture)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Pointer => "Pointer",
            ToolKind::RectangleCapture => "Scissors",
            ToolKind::FreehandCapture => "Freehand Scissors",
            ToolKind::Hand => "Hand",
        }
    }

    /// Cursor the host should show while this tool is active
    pub fn cursor(&self) -> &'static str {
        match self {
            ToolKind::Pointer => "default",
            ToolKind::RectangleCapture | ToolKind::FreehandCapture => "crosshair",
            ToolKind::Hand => "grab",
        }
    }
}
