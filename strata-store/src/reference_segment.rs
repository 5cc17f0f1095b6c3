use crate::{Segment, Table};
use std::any::Any;
use std::mem::size_of;
use std::sync::Arc;
use strata_base::{fatal, AnyValue, ChunkOffset, ColumnId, PosList, RowId};

/// Column segment that projects rows out of another table's column through a
/// shared position list. Reads materialize on demand; the segment itself
/// stores nothing but the projection. Holding the referenced table and the
/// position list keeps both alive for the lifetime of the scan output.
pub struct ReferenceSegment {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    pos_list: Arc<PosList>,
}

impl ReferenceSegment {
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        pos_list: Arc<PosList>,
    ) -> Self {
        ReferenceSegment {
            referenced_table,
            referenced_column_id,
            pos_list,
        }
    }

    /// Resolve one row id against the referenced table.
    pub fn get_by_row_id(&self, row_id: RowId) -> AnyValue {
        if row_id.is_null() {
            return AnyValue::Null;
        }
        let chunk = self.referenced_table.get_chunk(row_id.chunk_id);
        chunk
            .get_segment(self.referenced_column_id)
            .value_at(row_id.chunk_offset)
    }

    pub fn pos_list(&self) -> &Arc<PosList> {
        &self.pos_list
    }

    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }
}

impl Segment for ReferenceSegment {
    fn value_at(&self, chunk_offset: ChunkOffset) -> AnyValue {
        let row_id = self
            .pos_list
            .get(chunk_offset as usize)
            .copied()
            .unwrap_or_else(|| fatal!("chunk offset {chunk_offset} out of range"));
        self.get_by_row_id(row_id)
    }

    fn size(&self) -> ChunkOffset {
        self.pos_list.len() as ChunkOffset
    }

    fn estimate_memory_usage(&self) -> usize {
        self.pos_list.len() * size_of::<RowId>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
