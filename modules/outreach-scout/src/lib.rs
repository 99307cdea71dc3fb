pub mod auditor;
pub mod collector;
pub mod pacing;
pub mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use auditor::Auditor;
pub use collector::Collector;
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use table::OutreachTable;
