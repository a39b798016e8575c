/// Data layer: core types and the four pipeline stages.
///
/// Architecture:
/// ```text
///  path / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse CSV → Table
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ preprocess │  drop placeholders, rename → Vec<LabeledText>
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  seeded shuffle → train / test
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  saver    │  <output_dir>/raw/{train,test}.csv
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod preprocess;
pub mod saver;
pub mod split;
