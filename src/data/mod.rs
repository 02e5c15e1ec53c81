/// Data layer: discovery, loading, and saving of point clouds.
///
/// Architecture:
/// ```text
///   root directory
///        │
///        ▼
///   ┌──────────┐
///   │ catalog  │  recursive scan → ordered CatalogEntry list
///   └──────────┘
///        │ selected entry
///        ▼
///   ┌──────────┐
///   │  loader  │  strict X,Y,Z rows → PointCloud
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer  │  rows + "# Crown Z value: …" → name_crown.csv
///   └──────────┘
/// ```

pub mod catalog;
pub mod loader;
pub mod model;
pub mod writer;
