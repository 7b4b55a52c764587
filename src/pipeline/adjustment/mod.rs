pub mod types;
pub mod rules;
pub mod detox;
pub mod classify;
pub mod ratios;
pub mod engine;

pub use types::*;
pub use rules::*;
pub use detox::*;
pub use classify::*;
pub use ratios::*;
pub use engine::*;
