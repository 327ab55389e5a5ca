//! Ordered collections: drag gesture, local mirror, remote write-back

pub mod collection;
pub mod gesture;
pub mod persist;

pub use collection::{OrderedCollection, OrderedEntity, move_item};
pub use gesture::{DEFAULT_ACTIVATION_DISTANCE, DragEvent, DragGesture, DragState, Point, Reorder};
pub use persist::{PersistReport, persist_order, spawn_persist};
