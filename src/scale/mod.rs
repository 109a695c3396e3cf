pub mod builder;
pub mod scala;
pub mod tuning_table;

pub use self::builder::{
    build_scale, build_scale_with_names, circular_diff, scale_cents, wrap, ScaleNote, SolverInput,
    SolverOutput,
};
pub use self::scala::{export_rank2_to_scala, ScalaExport};
pub use self::tuning_table::TuningTable;
