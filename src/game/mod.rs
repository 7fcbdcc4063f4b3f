//! Game engine: tableau, stock/waste, match legality, session dispatch

pub mod matcher;
pub mod random_controller;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod stock;
pub mod tableau;

pub use matcher::Source;
pub use random_controller::RandomController;
pub use session::{Command, GameSession};
pub use snapshot::{SlotView, Snapshot};
pub use state::{GameState, GameStatus};
pub use stock::{StockWaste, DEFAULT_RECYCLE_LIMIT};
pub use tableau::{SlotId, Tableau, SLOT_COUNT};
