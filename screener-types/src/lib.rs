pub mod events;

pub use events::{PollEvent, PollOutcome};
