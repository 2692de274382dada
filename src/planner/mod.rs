pub mod constants;
pub mod fallback;
pub mod reconcile;

pub use constants::*;
pub use fallback::plan_offline;
pub use reconcile::{reconcile, reconcile_item};
