/// Data layer: loading, normalisation, classification and aggregation.
///
/// Architecture:
/// ```text
///   valuation .csv (header at a fixed offset)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Vec<ValuationRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  hectarize    │  currency → annual filter → basis filter
///   │  (+ currency, │  → divide by area → purge missing
///   │   classify)   │  → Vec<CleanRecord> + CleaningReport
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  top biomes × category, category × biome
///   └───────────┘
/// ```

pub mod aggregate;
pub mod classify;
pub mod currency;
pub mod hectarize;
pub mod loader;
pub mod model;
pub mod pipeline;
