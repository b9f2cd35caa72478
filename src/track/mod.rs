/// Track layer: keys, raw-file parsing, and loading.
///
/// Architecture:
/// ```text
///  m0500..fehp050.track      column_labels.txt
///        │                         │
///        ▼                         ▼
///   ┌──────────┐             ┌──────────┐
///   │ filename  │             │  schema   │
///   └──────────┘             └──────────┘
///        │   TrackKey               │   Vec<String>
///        └────────────┬─────────────┘
///                     ▼
///               ┌──────────┐
///               │  loader   │  one file → Track
///               └──────────┘
///                     │   many tracks
///                     ▼
///               Grid::assemble
/// ```
pub mod filename;
pub mod loader;
pub mod model;
pub mod schema;
