/// Data layer: loading, the transformation pipeline, filtering and export.
///
/// Architecture:
/// ```text
///   .csv file / URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  tokenize → Table (header + rows of strings)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐   ┌──────┐   ┌────────┐
///   │ aggregate │ → │ rank │ → │ derive │   total / daily / growth
///   └───────────┘   └──────┘   └────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  PipelineState, colourised per view on demand
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name query / top N → visible indices
///   └──────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod rank;
