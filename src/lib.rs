pub mod assign;
pub mod commit;
pub mod error;
pub mod model;
pub mod problem;
pub mod rng;
pub mod sample;

pub use assign::{AssignOptions, AssignOutcome, SearchLimits, SearchStats, SlotOrder, assign};
pub use error::{AssignError, ErrorKind};
pub use model::{Assignment, Catalog, ForbiddenRelation, Item, Slot};
pub use sample::{SampleMode, pick_one, sample};
