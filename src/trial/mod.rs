pub mod loader;
pub mod store;
pub mod types;

pub use self::loader::{load_all, load_trial, merge, parse_trial};
pub use self::store::{DirStore, MemoryStore, TrialStore};
pub use self::types::{
    Challenge, ChallengeType, Keypress, Layout, Provenance, TimeSpan, Travel, TrialItem,
    TrialMeta, TrialSet, Vec3,
};
