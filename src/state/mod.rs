pub mod dice;
pub mod hazards;
pub mod placement;
pub mod scheduler;
pub mod session;
pub mod watchdog;

pub use dice::Dice;
pub use hazards::{HazardField, HitOutcome, ObstacleKind};
pub use placement::{Board, PlacementCheck, Selection};
pub use scheduler::{Scheduler, Task};
pub use session::{RoundPool, SessionClock};
pub use watchdog::IdleWatchdog;
