pub mod mirror_service;

pub use mirror_service::{merge_latest, MirrorOutcome, MirrorService, RunOptions, RunReport};
