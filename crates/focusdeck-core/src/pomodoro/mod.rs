mod cycle;
mod phase;

pub use cycle::{PomodoroAction, PomodoroCycle};
pub use phase::Phase;
