//! Marker bookkeeping for the live map.
//!
//! The map surface (terminal canvas, or a test double) owns the drawn
//! markers; [`MarkerPool`] owns the mapping from entity key to marker handle;
//! [`reconcile`] keeps the two in step with the entity lists.

pub mod canvas;
pub mod pool;
pub mod reconcile;
pub mod surface;

pub use canvas::{CanvasSurface, Glyph, GlyphId};
pub use pool::MarkerPool;
pub use reconcile::{reconcile, ReconcileReport};
pub use surface::{MapSurface, MarkerAction, MarkerSpec, MarkerTone, Plottable};
