pub mod board;
pub mod movegen;
pub mod outcome;
pub mod types;

// Re-export the rule-engine surface
pub use board::*;
pub use movegen::*;
pub use outcome::*;
pub use types::*;
