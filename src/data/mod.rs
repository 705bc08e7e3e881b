//! Data module - Race records and dataset loading

mod loader;
mod record;

pub use loader::DataLoader;
pub use record::{year_start, Dataset, RaceRecord};

#[cfg(test)]
pub(crate) use record::tests::record as sample_record;
