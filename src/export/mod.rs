//! Output files written by a run

pub mod csv;
pub mod snapshot;
pub mod xlsx;

pub use self::csv::write_csv;
pub use snapshot::write_snapshot;
pub use xlsx::write_xlsx;
