mod assigner;

pub use assigner::{DEFAULT_ORACLE_TIMEOUT, LayoutAssigner, classify};
