//! Core types for the cardboard canvas system.
//!
//! This module defines the fundamental data structures the engine works with:
//! cards, card content, style attributes, and per-canvas viewport settings.
//! Cards are produced by the external CRUD layer and handed to the core as
//! immutable per-render snapshots; the core only mutates *references* to them
//! (which ids are selected, hovered, dragged, or edited), with the single
//! exception of the optimistic position commit at the end of a drag gesture.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// Stable card identifier, unique within a workspace.
pub type CardId = u64;

/// A positioned, resizable content unit on a canvas.
///
/// Each card has a unique ID, spatial attributes, and a content value that is
/// a tagged union over the supported content kinds. A card is owned by exactly
/// one canvas; the working set only ever holds the active canvas's cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card
    pub id: CardId,
    /// Position on the canvas in canvas coordinates (x, y)
    pub position: (f32, f32),
    /// Stacking order; higher values render on top
    pub z: i32,
    /// Size of the card in canvas units (width, height)
    pub size: (f32, f32),
    /// The content this card displays. Shared so per-render snapshots are
    /// cheap to clone and the render gate can compare by pointer first.
    pub content: Arc<CardContent>,
    /// Visual style attributes
    pub style: CardStyle,
    /// Locked cards cannot be dragged, resized, or edited
    pub locked: bool,
    /// Hidden cards are not hit targets and are skipped by the reading order
    pub hidden: bool,
    /// Monotonic version bumped by the CRUD layer on every persisted change
    pub version: u64,
    /// Last-modified timestamp (unix seconds), owned by the CRUD layer
    pub updated_at: u64,
}

impl Card {
    /// Create a card with default style at the given position.
    pub fn new(id: CardId, position: (f32, f32), content: CardContent) -> Self {
        let size = content.default_size();
        Self {
            id,
            position,
            z: 0,
            size,
            content: Arc::new(content),
            style: CardStyle::default(),
            locked: false,
            hidden: false,
            version: 0,
            updated_at: 0,
        }
    }

    /// Bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.position.0,
            self.position.1,
            self.position.0 + self.size.0,
            self.position.1 + self.size.1,
        )
    }

    /// The edit mode an editor for this card would mount in.
    pub fn edit_mode(&self) -> EditMode {
        self.content.edit_mode()
    }
}

/// The content of a card.
///
/// Determines which editor mounts when the card enters an edit session and
/// how the card is rendered. Every match over this enum is exhaustive; there
/// is deliberately no fallback variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardContent {
    /// Plain or rich text
    Text {
        /// Serialized text content (the editor's document model is external)
        text: String,
    },
    /// An image with an optional caption
    Image {
        /// Image location, resolved by the renderer
        url: String,
        /// Caption shown under the image; edited via the image-caption editor
        caption: Option<String>,
    },
    /// A web link
    Link {
        url: String,
        /// Display title; falls back to the url when absent
        title: Option<String>,
    },
    /// A source code block with syntax highlighting
    Code {
        code: String,
        /// Language identifier for highlighting (e.g. "rust", "python")
        language: String,
    },
}

impl CardContent {
    /// Derive the edit mode from the content variant.
    pub fn edit_mode(&self) -> EditMode {
        match self {
            CardContent::Text { .. } => EditMode::Text,
            CardContent::Image { .. } => EditMode::ImageCaption,
            CardContent::Link { .. } => EditMode::Link,
            CardContent::Code { .. } => EditMode::Code,
        }
    }

    /// Default size for newly created cards of this content kind.
    pub fn default_size(&self) -> (f32, f32) {
        match self {
            CardContent::Text { .. } => (300.0, 100.0),
            CardContent::Image { .. } => (400.0, 300.0),
            CardContent::Link { .. } => (300.0, 80.0),
            CardContent::Code { .. } => (420.0, 240.0),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            CardContent::Text { text } => text.clone(),
            CardContent::Image { url, caption } => caption.clone().unwrap_or_else(|| url.clone()),
            CardContent::Link { url, title } => title.clone().unwrap_or_else(|| url.clone()),
            CardContent::Code { language, .. } => format!("{} snippet", language),
        }
    }
}

/// The editor flavor mounted for an active edit session.
///
/// One editor exists per mode; the coordinator hands the mode to the caller
/// when a session is granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    Text,
    ImageCaption,
    Link,
    Code,
}

impl EditMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditMode::Text => "text",
            EditMode::ImageCaption => "image-caption",
            EditMode::Link => "link",
            EditMode::Code => "code",
        }
    }
}

/// Visual style attributes of a card. Opaque to the engine; carried through
/// snapshots for the renderer and the CRUD layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    /// Background color as hex string (e.g. "#1e1e2e")
    pub background: Option<String>,
    /// Border color as hex string
    pub border_color: Option<String>,
    /// Corner radius in canvas units
    pub corner_radius: f32,
}

/// Grid rendering style for a canvas background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridStyle {
    None,
    #[default]
    Dots,
    Lines,
}

/// Per-canvas viewport settings, persisted by the CRUD layer and restored on
/// canvas switch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Pan offset in canvas units
    pub pan: (f32, f32),
    /// Zoom factor, clamped to [MIN_ZOOM, MAX_ZOOM]
    pub zoom: f32,
    pub grid: GridStyle,
    /// Background color as hex string
    pub background: Option<String>,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            pan: (0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            grid: GridStyle::default(),
            background: None,
        }
    }
}

impl CanvasSettings {
    /// Set zoom, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
