pub mod dissonance;
pub mod export;
pub mod search;
pub mod validate;

use temperforge::error::TfResult;
use temperforge::ratio::BoundaryRatio;
use temperforge::targets::IntervalTargetStore;

/// Builds a store for `scale_size` notes under `boundary` and fills it from a CSV file.
pub fn load_store(targets: &str, boundary: &str, scale_size: usize) -> TfResult<IntervalTargetStore> {
    let boundary = BoundaryRatio::parse(boundary)?;
    let mut store = IntervalTargetStore::new(scale_size);
    store.set_boundary_ratio(boundary.numerator(), boundary.denominator())?;
    store.load_csv(targets)?;
    Ok(store)
}
