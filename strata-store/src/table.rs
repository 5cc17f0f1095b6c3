use crate::{Chunk, DictionarySegment, Segment, ValueSegment};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use strata_base::{fatal, require, with_data_type, AnyValue, ChunkId, ChunkOffset, ColumnCount, ColumnId, DataType};
use tracing::debug;

pub const DEFAULT_TARGET_CHUNK_SIZE: ChunkOffset = 1 << 16;

#[derive(Clone)]
struct ColumnDefinition {
    name: String,
    data_type: DataType,
    nullable: bool,
}

// Chunk handle and mutability flag live in one slot so compression swaps
// both under a single write lock and readers never see them disagree.
struct ChunkSlot {
    chunk: Arc<Chunk>,
    mutable: bool,
}

/// A column schema plus an ordered sequence of chunks. At most the last
/// chunk is mutable; on reaching `target_chunk_size` the next append opens a
/// fresh one.
pub struct Table {
    columns: Vec<ColumnDefinition>,
    chunks: RwLock<Vec<ChunkSlot>>,
    target_chunk_size: ChunkOffset,
    // Monotonic counter bumped per append. Never derived from chunk sizes:
    // a compressed chunk keeps whatever size it was sealed at.
    row_count: AtomicU64,
}

impl Table {
    pub fn new(target_chunk_size: ChunkOffset) -> Self {
        require!(target_chunk_size > 0, "target chunk size must be positive");
        Table {
            columns: Vec::new(),
            chunks: RwLock::new(vec![ChunkSlot {
                chunk: Arc::new(Chunk::new()),
                mutable: true,
            }]),
            target_chunk_size,
            row_count: AtomicU64::new(0),
        }
    }

    /// Wrap a single pre-built chunk (a scan result) in a table sharing
    /// `schema_source`'s schema. The chunk is installed immutable and the
    /// target chunk size is effectively unbounded.
    pub fn with_single_chunk(schema_source: &Table, chunk: Chunk) -> Self {
        let row_count = chunk.size() as u64;
        Table {
            columns: schema_source.columns.clone(),
            chunks: RwLock::new(vec![ChunkSlot {
                chunk: Arc::new(chunk),
                mutable: false,
            }]),
            target_chunk_size: ChunkOffset::MAX,
            row_count: AtomicU64::new(row_count),
        }
    }

    /// Extend the schema; only possible while the table has no rows.
    pub fn add_column(&mut self, name: &str, data_type: DataType, nullable: bool) {
        require!(
            self.row_count() == 0,
            "tried to add a column to a non-empty table"
        );
        self.columns.push(ColumnDefinition {
            name: name.to_owned(),
            data_type,
            nullable,
        });
        for slot in self.chunks.read().iter() {
            add_value_segment(&slot.chunk, data_type, nullable);
        }
    }

    /// Append one row, rolling over to a new mutable chunk when the last
    /// one is sealed or full.
    pub fn append(&self, values: &[AnyValue]) {
        let chunk = {
            let mut slots = self.chunks.write();
            let needs_new_chunk = slots.last().map_or(true, |slot| {
                !slot.mutable || slot.chunk.size() == self.target_chunk_size
            });
            if needs_new_chunk {
                let chunk = Chunk::new();
                for column in &self.columns {
                    add_value_segment(&chunk, column.data_type, column.nullable);
                }
                slots.push(ChunkSlot {
                    chunk: Arc::new(chunk),
                    mutable: true,
                });
            }
            slots
                .last()
                .map(|slot| slot.chunk.clone())
                .unwrap_or_else(|| fatal!("table has no chunks"))
        };
        chunk.append(values);
        self.row_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Replace the chunk's value segments with freshly built dictionary
    /// segments, one worker per column, and seal the slot. Callers must
    /// have stopped appending into the chunk. Readers holding the old
    /// handle stay on the value chunk; everyone else sees the dictionary
    /// chunk.
    pub fn compress_chunk(&self, chunk_id: ChunkId) {
        let chunk = self.get_chunk(chunk_id);
        let dictionary_segments: Vec<Arc<dyn Segment>> = self
            .columns
            .par_iter()
            .enumerate()
            .map(|(column_id, column)| {
                let segment = chunk.get_segment(column_id as ColumnId);
                with_data_type!(column.data_type, T => {
                    Arc::new(DictionarySegment::<T>::new(segment.as_ref())) as Arc<dyn Segment>
                })
            })
            .collect();

        let compressed = Chunk::new();
        for segment in dictionary_segments {
            compressed.add_segment(segment);
        }

        let mut slots = self.chunks.write();
        let slot = slots
            .get_mut(chunk_id as usize)
            .unwrap_or_else(|| fatal!("chunk id {chunk_id} out of range"));
        slot.chunk = Arc::new(compressed);
        slot.mutable = false;
        debug!(target: "strata", chunk_id, "compressed chunk to dictionary segments");
    }

    /// Snapshot of a chunk handle; fatal out of range.
    pub fn get_chunk(&self, chunk_id: ChunkId) -> Arc<Chunk> {
        self.chunks
            .read()
            .get(chunk_id as usize)
            .map(|slot| slot.chunk.clone())
            .unwrap_or_else(|| fatal!("chunk id {chunk_id} out of range"))
    }

    pub fn column_count(&self) -> ColumnCount {
        self.columns.len() as ColumnCount
    }

    pub fn row_count(&self) -> u64 {
        self.row_count.load(Ordering::Relaxed)
    }

    pub fn chunk_count(&self) -> ChunkId {
        self.chunks.read().len() as ChunkId
    }

    pub fn column_name(&self, column_id: ColumnId) -> &str {
        &self.column(column_id).name
    }

    pub fn column_type(&self, column_id: ColumnId) -> DataType {
        self.column(column_id).data_type
    }

    pub fn column_nullable(&self, column_id: ColumnId) -> bool {
        self.column(column_id).nullable
    }

    pub fn column_id_by_name(&self, name: &str) -> ColumnId {
        self.columns
            .iter()
            .position(|column| column.name == name)
            .map(|index| index as ColumnId)
            .unwrap_or_else(|| fatal!("no column named {name:?}"))
    }

    pub fn target_chunk_size(&self) -> ChunkOffset {
        self.target_chunk_size
    }

    fn column(&self, column_id: ColumnId) -> &ColumnDefinition {
        self.columns
            .get(column_id as usize)
            .unwrap_or_else(|| fatal!("column id {column_id} out of range"))
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new(DEFAULT_TARGET_CHUNK_SIZE)
    }
}

fn add_value_segment(chunk: &Chunk, data_type: DataType, nullable: bool) {
    with_data_type!(data_type, T => {
        chunk.add_segment(Arc::new(ValueSegment::<T>::new(nullable)));
    });
}
