pub mod constants;
pub mod filename;
pub mod math;
pub mod progress;

pub use constants::*;
pub use filename::default_summary_filename;
pub use math::{mean, round_half_up};
pub use progress::ProgressReporter;
