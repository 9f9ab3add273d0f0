//! Movement rules: profiles, the cost table, and path execution.
mod cost;
mod execute;
mod profile;

pub use cost::{MoveCost, MoveCostError, MoveCostTable, MoveCostTableBuilder};
pub use execute::{ExecuteError, MoveExecution, execute_path};
pub use profile::MoveProfile;
