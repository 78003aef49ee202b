//! Object number allocation and the cross-reference table.
//!
//! Object ids are handed out in strictly increasing order when an object is
//! reserved, which is not necessarily the order objects reach the output.
//! Every reserved id must be written exactly once before the table is
//! finalized; the table itself lists entries sorted by id.

use crate::error::{Error, Result};
use crate::object::ObjectId;
use std::io::Write;

/// Largest base for object numbering; the PDF implementation limit on
/// indirect objects.
pub const MAX_FIRST_OBJECT_ID: u32 = 8_388_607;

/// Line written for the head of the free list (object 0).
const FREE_LIST_HEAD: &[u8] = b"0000000000 65535 f\r\n";

/// Cross-reference table entry: where an object's header begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossRefEntry {
    /// Object the entry belongs to
    pub id: ObjectId,
    /// Byte offset of the `<id> 0 obj` line in the output
    pub offset: u64,
}

/// Issues object ids and records the byte offset of every written object.
#[derive(Debug, Clone)]
pub struct ObjectAllocator {
    first: u32,
    next: u32,
    /// Entries in write order
    entries: Vec<CrossRefEntry>,
    /// Indexed by `id - first`
    written: Vec<bool>,
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectAllocator {
    /// Create an allocator starting at object 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an allocator whose first id is `first`, clamped to
    /// `1..=MAX_FIRST_OBJECT_ID`.
    pub fn starting_at(first: u32) -> Self {
        let first = first.clamp(1, MAX_FIRST_OBJECT_ID);
        Self {
            first,
            next: first,
            entries: Vec::new(),
            written: Vec::new(),
        }
    }

    /// Reserve a fresh id.
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next);
        self.next += 1;
        self.written.push(false);
        id
    }

    /// Number of ids reserved so far.
    pub fn allocated(&self) -> usize {
        self.written.len()
    }

    /// Entries recorded so far, in write order.
    pub fn entries(&self) -> &[CrossRefEntry] {
        &self.entries
    }

    /// Record that the header of object `id` starts at `offset`.
    ///
    /// Fails if the id was never reserved or already has an offset.
    pub fn record_offset(&mut self, id: ObjectId, offset: u64) -> Result<()> {
        let slot = self.slot(id).ok_or_else(|| {
            Error::InvalidInput(format!("object {} was never allocated", id))
        })?;
        if self.written[slot] {
            return Err(Error::DuplicateOffset(id));
        }
        self.written[slot] = true;
        self.entries.push(CrossRefEntry { id, offset });
        log::trace!("xref: object {} at offset {}", id, offset);
        Ok(())
    }

    /// Whether an offset has been recorded for `id`.
    pub fn is_written(&self, id: ObjectId) -> bool {
        self.slot(id).map(|slot| self.written[slot]).unwrap_or(false)
    }

    /// Ids that were reserved but have no recorded offset yet.
    pub fn pending_ids(&self) -> Vec<ObjectId> {
        self.written
            .iter()
            .enumerate()
            .filter(|(_, written)| !**written)
            .map(|(slot, _)| ObjectId::new(self.first + slot as u32))
            .collect()
    }

    /// Produce the final table sorted by id.
    ///
    /// Every reserved id must have been written; otherwise the table would
    /// leave references dangling and `UnwrittenObjects` is returned.
    pub fn finalize_table(&self) -> Result<Vec<CrossRefEntry>> {
        let pending = self.pending_ids();
        if !pending.is_empty() {
            return Err(Error::UnwrittenObjects(pending));
        }
        let mut table = self.entries.clone();
        table.sort_by_key(|entry| entry.id);
        Ok(table)
    }

    fn slot(&self, id: ObjectId) -> Option<usize> {
        let raw = id.get();
        if raw < self.first || raw >= self.next {
            return None;
        }
        Some((raw - self.first) as usize)
    }
}

/// Value of the trailer's `/Size` entry for a sorted table.
pub fn trailer_size(table: &[CrossRefEntry]) -> u32 {
    table
        .last()
        .map(|entry| entry.id.get().saturating_add(1))
        .unwrap_or(1)
}

/// Write the `xref` section for a table sorted by id.
///
/// Consecutive ids share one subsection. When the first id is 1 the free
/// list head joins that subsection, giving the usual `0 <count>` header.
pub fn write_table<W: Write>(w: &mut W, table: &[CrossRefEntry]) -> std::io::Result<()> {
    w.write_all(b"xref\r\n")?;

    let runs = contiguous_runs(table);
    let joins_head = runs.first().map(|run| run[0].id.get() == 1).unwrap_or(false);
    if !joins_head {
        w.write_all(b"0 1\r\n")?;
        w.write_all(FREE_LIST_HEAD)?;
    }

    for (index, run) in runs.iter().enumerate() {
        if index == 0 && joins_head {
            write!(w, "0 {}\r\n", run.len() + 1)?;
            w.write_all(FREE_LIST_HEAD)?;
        } else {
            write!(w, "{} {}\r\n", run[0].id, run.len())?;
        }
        for entry in *run {
            write!(w, "{:010} 00000 n\r\n", entry.offset)?;
        }
    }
    Ok(())
}

fn contiguous_runs(table: &[CrossRefEntry]) -> Vec<&[CrossRefEntry]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=table.len() {
        let breaks =
            i == table.len() || table[i].id.get() != table[i - 1].id.get() + 1;
        if breaks {
            runs.push(&table[start..i]);
            start = i;
        }
    }
    runs
}
