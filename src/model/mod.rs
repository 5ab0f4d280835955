pub mod assignment;
pub mod catalog;
pub mod forbidden;
pub mod slot;

pub use assignment::Assignment;
pub use catalog::{Catalog, Item};
pub use forbidden::{ForbiddenIndex, ForbiddenRelation};
pub use slot::{DEFAULT_SLOTS, Slot};
