use crate::{Segment, ValueSegment};
use parking_lot::RwLock;
use std::sync::Arc;
use strata_base::{fatal, require, with_data_type, AnyValue, ChunkOffset, ColumnCount, ColumnId, DataType};

/// Horizontal partition of a table: one segment per column, all of equal
/// row count. Mutable (appendable) until it is compressed or emitted as a
/// scan result.
#[derive(Default)]
pub struct Chunk {
    segments: RwLock<Vec<Arc<dyn Segment>>>,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk::default()
    }

    /// Append a segment as the next column.
    pub fn add_segment(&self, segment: Arc<dyn Segment>) {
        self.segments.write().push(segment);
    }

    /// Append one row. Every column of the chunk must be a value segment of
    /// its declared element kind; arity mismatch and non-appendable segments
    /// are fatal.
    pub fn append(&self, values: &[AnyValue]) {
        let segments = self.segments.read();
        require!(
            values.len() == segments.len(),
            "tried to append a row of {} values to a chunk of {} columns",
            values.len(),
            segments.len()
        );
        for (segment, value) in segments.iter().zip(values) {
            append_to_value_segment(segment.as_ref(), value);
        }
    }

    pub fn get_segment(&self, column_id: ColumnId) -> Arc<dyn Segment> {
        self.segments
            .read()
            .get(column_id as usize)
            .cloned()
            .unwrap_or_else(|| fatal!("column id {column_id} out of range"))
    }

    pub fn column_count(&self) -> ColumnCount {
        self.segments.read().len() as ColumnCount
    }

    pub fn size(&self) -> ChunkOffset {
        self.segments.read().first().map_or(0, |segment| segment.size())
    }
}

// Try the value segment of each element kind in turn; the set is closed, so
// falling through means the segment is not appendable.
fn append_to_value_segment(segment: &dyn Segment, value: &AnyValue) {
    for data_type in DataType::ALL {
        let appended = with_data_type!(data_type, T => {
            match segment.as_any().downcast_ref::<ValueSegment<T>>() {
                Some(value_segment) => {
                    value_segment.append(value);
                    true
                }
                None => false,
            }
        });
        if appended {
            return;
        }
    }
    fatal!("rows can only be appended into mutable value segments");
}
