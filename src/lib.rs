// Public modules that are part of the API
pub mod classifier;
pub mod config;
pub mod error;
pub mod mapper;
pub mod monitoring;
pub mod poller;
pub mod proxy;
pub mod render;
pub mod simulate;
pub mod source;
pub mod swap;
pub mod token;

// Re-export common types
pub use classifier::{
    bonding_progress,
    classify,
    remaining_to_bond,
    ClassifiedTokens,
    GraduationTracker,
    Thresholds,
};

pub use poller::{
    FailurePolicy,
    PollerCommand,
    ScreenerSnapshot,
    SnapshotStore,
    TokenPoller,
};

pub use token::{
    LifecycleStatus,
    Token,
    TokenListResponse,
};

pub use source::TokenSource;

pub use error::{
    Result,
    ScreenerError,
};
