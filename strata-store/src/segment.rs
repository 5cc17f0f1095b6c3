use std::any::Any;
use strata_base::{AnyValue, ChunkOffset};

/// A single column's values within one chunk.
pub trait Segment: Send + Sync {
    /// The value at a row offset, boxed into the variant. Null rows come
    /// back as `AnyValue::Null`.
    fn value_at(&self, chunk_offset: ChunkOffset) -> AnyValue;

    /// Number of rows.
    fn size(&self) -> ChunkOffset;

    /// Payload footprint in bytes.
    fn estimate_memory_usage(&self) -> usize;

    /// Downcast hook. The chunk append path and the table scan dispatch on
    /// the concrete segment kind through this.
    fn as_any(&self) -> &dyn Any;
}
