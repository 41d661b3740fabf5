pub mod variant;

// re-export for cleaner imports
pub use self::variant::{SampleGenotype, VariantRecord};
