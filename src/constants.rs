//! Engine-wide constants.
//!
//! Centralizes magic numbers to make the codebase more maintainable and
//! self-documenting.

// ============================================================================
// Viewport
// ============================================================================

/// Default zoom factor for a fresh canvas
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum zoom factor
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom factor
pub const MAX_ZOOM: f32 = 8.0;

// ============================================================================
// Cards
// ============================================================================

/// Minimum card dimension in canvas units
pub const MIN_CARD_SIZE: f32 = 30.0;

// ============================================================================
// Accessibility projection
// ============================================================================

/// Vertical band height used to group cards into reading-order rows.
/// Cards whose top edges are within this distance of the row anchor are
/// considered part of the same row.
pub const READING_ROW_BAND: f32 = 40.0;
