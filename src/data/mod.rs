/// Data layer: measurements, groups, file formats, and visibility.
///
/// Architecture:
/// ```text
///  .snet / .json          .txt / .csv
///        │                     │
///        ▼                     ▼
///   ┌──────────┐        ┌──────────┐
///   │   snet    │        │  loader   │  legacy slash-separated import
///   └──────────┘        └──────────┘
///        │                     │
///        └──────────┬──────────┘
///                   ▼
///           ┌──────────────┐
///           │   Project     │  Vec<DataGroup>, selected group
///           └──────────────┘
///                   │
///                   ▼
///           ┌──────────┐
///           │  filter   │  enabled groups → items to plot
///           └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod snet;
