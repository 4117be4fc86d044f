pub mod collector;
pub mod console;
pub mod problem_loader;
pub mod race;
pub mod timer;

pub use collector::{AnswerCollector, Closed, CollectorHandle};
pub use console::SharedOutput;
pub use problem_loader::{load_problem_set, load_problem_set_from_reader};
pub use race::RaceCoordinator;
pub use timer::{Expiry, TimerGate, START_PROMPT};
