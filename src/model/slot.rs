use std::fmt;

use crate::error::AssignError;

pub const DEFAULT_SLOTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(u32);

impl Slot {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    pub fn from_index(idx: usize) -> Self {
        Self(idx as u32 + 1)
    }

    pub fn is_valid_for(self, slots: u32) -> bool {
        1 <= self.0 && self.0 <= slots
    }

    pub fn validate(n: u32, slots: u32) -> Result<Slot, AssignError> {
        let slot = Slot(n);
        if !slot.is_valid_for(slots) {
            return Err(AssignError::invalid(format!(
                "slot {} is outside 1..={}",
                n, slots
            )));
        }
        Ok(slot)
    }

    pub fn all(slots: u32) -> impl Iterator<Item = Slot> {
        (1..=slots).map(Slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
