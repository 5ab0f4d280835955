use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::io::Write;

use anyhow::Result;
use tracing::warn;

use crate::error::AssignError;
use crate::model::{Assignment, Slot};

pub trait SlotWriter<K> {
    fn set_slot(&mut self, slot: Slot, id: &K) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    #[default]
    HaltOnError,
    TryAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCommit<K> {
    pub slot: Slot,
    pub id: K,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport<K> {
    pub attempted: Vec<SlotCommit<K>>,
    pub skipped: Vec<Slot>,
}

impl<K> CommitReport<K> {
    pub fn all_ok(&self) -> bool {
        self.skipped.is_empty() && self.attempted.iter().all(|c| c.error.is_none())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SlotCommit<K>> {
        self.attempted.iter().filter(|c| c.error.is_some())
    }
}

pub fn commit_assignment<K, W>(
    assignment: &Assignment<K>,
    writer: &mut W,
    policy: CommitPolicy,
) -> CommitReport<K>
where
    K: Clone + Debug + Hash + Eq,
    W: SlotWriter<K> + ?Sized,
{
    write_slots(assignment.ids_in_slot_order(), writer, policy)
}

pub fn commit_ids<K, W>(
    ids: &[K],
    slots: u32,
    writer: &mut W,
    policy: CommitPolicy,
) -> Result<CommitReport<K>, AssignError>
where
    K: Clone + Debug,
    W: SlotWriter<K> + ?Sized,
{
    if ids.len() != slots as usize {
        return Err(AssignError::invalid(format!(
            "must commit exactly {} ids, received {}",
            slots,
            ids.len()
        )));
    }
    Ok(write_slots(ids, writer, policy))
}

fn write_slots<K, W>(ids: &[K], writer: &mut W, policy: CommitPolicy) -> CommitReport<K>
where
    K: Clone + Debug,
    W: SlotWriter<K> + ?Sized,
{
    let mut attempted = Vec::with_capacity(ids.len());
    let mut skipped = Vec::new();
    let mut halted = false;

    for (i, id) in ids.iter().enumerate() {
        let slot = Slot::from_index(i);
        if halted {
            skipped.push(slot);
            continue;
        }
        let error = match writer.set_slot(slot, id) {
            Ok(()) => None,
            Err(e) => {
                warn!(slot = slot.get(), item = ?id, error = %e, "slot commit failed");
                if policy == CommitPolicy::HaltOnError {
                    halted = true;
                }
                Some(format!("{e:#}"))
            }
        };
        attempted.push(SlotCommit {
            slot,
            id: id.clone(),
            error,
        });
    }

    CommitReport { attempted, skipped }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingWriter<K> {
    pub writes: Vec<(Slot, K)>,
}

impl<K: Clone> SlotWriter<K> for RecordingWriter<K> {
    fn set_slot(&mut self, slot: Slot, id: &K) -> Result<()> {
        self.writes.push((slot, id.clone()));
        Ok(())
    }
}

pub struct LineWriter<W: Write> {
    out: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<K: Display, W: Write> SlotWriter<K> for LineWriter<W> {
    fn set_slot(&mut self, slot: Slot, id: &K) -> Result<()> {
        writeln!(self.out, "slot={} item={}", slot, id)?;
        Ok(())
    }
}
