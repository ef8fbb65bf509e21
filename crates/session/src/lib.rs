pub mod game;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use game::{GameSession, Turn, AGENT_LOOP_GUARD};
pub use snapshot::Snapshot;
pub use stats::Stats;
pub use store::Store;
