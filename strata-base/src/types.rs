/// Index of a chunk within a table.
pub type ChunkId = u32;
/// Index of a row within a chunk.
pub type ChunkOffset = u32;
/// Index of a column within a table or chunk.
pub type ColumnId = u16;
pub type ColumnCount = u16;

/// A code into a dictionary segment's dictionary (or the reserved null code).
pub type ValueId = u32;
/// Sentinel for "no such code": past-the-end bound, or the null code of a
/// non-nullable dictionary segment.
pub const INVALID_VALUE_ID: ValueId = ValueId::MAX;

/// Byte width of an attribute vector's backing integer: 1, 2 or 4.
pub type AttributeVectorWidth = u8;

/// Identifies a row in a base table.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

/// The null row: both halves all-bits-set.
pub const NULL_ROW_ID: RowId = RowId {
    chunk_id: ChunkId::MAX,
    chunk_offset: ChunkOffset::MAX,
};

impl RowId {
    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        RowId {
            chunk_id,
            chunk_offset,
        }
    }

    pub fn is_null(self) -> bool {
        self == NULL_ROW_ID
    }
}

/// The payload of a reference segment: a sequence of row ids.
pub type PosList = Vec<RowId>;
