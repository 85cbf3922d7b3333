/// Data layer: core types, parsing, and file loading.
///
/// Architecture:
/// ```text
///  solver output (.txt / .dat)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → lines
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  classify + tokenize lines → ParsedTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series   │  x / y vectors, never empty
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod parser;
