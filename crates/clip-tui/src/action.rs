//! Action enum — user intents produced by components, dispatched by the App.

use clip_proto::catalog::ClipEntry;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ClipList,
    Header,
}

/// All actions that can flow through the system.
#[derive(Debug, Clone)]
pub enum Action {
    /// The user activated a clip row (Enter or click).
    Select(ClipEntry),
    /// Re-run the catalog load.
    ReloadCatalog,
    Quit,
}
