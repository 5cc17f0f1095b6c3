use crate::Segment;
use parking_lot::{RwLock, RwLockReadGuard};
use std::any::Any;
use std::mem::size_of;
use strata_base::{fatal, require, AnyValue, ChunkOffset, ColumnType};

/// Uncompressed, mutable column segment. Values (and the null mask, when the
/// segment is nullable) sit behind locks so the segment can keep growing
/// while it is shared as `Arc<dyn Segment>` by its chunk.
pub struct ValueSegment<T: ColumnType> {
    nullable: bool,
    values: RwLock<Vec<T>>,
    null_values: RwLock<Vec<bool>>,
}

impl<T: ColumnType> ValueSegment<T> {
    pub fn new(nullable: bool) -> Self {
        ValueSegment {
            nullable,
            values: RwLock::new(Vec::new()),
            null_values: RwLock::new(Vec::new()),
        }
    }

    /// Append a value, down-cast to the segment's element kind. Appending
    /// null stores a default value and marks the row in the null mask;
    /// appending null into a non-nullable segment is fatal, as is an
    /// inconvertible value.
    pub fn append(&self, value: &AnyValue) {
        if value.is_null() {
            require!(
                self.nullable,
                "tried to append NULL into a non-nullable value segment"
            );
            self.values.write().push(T::default());
            self.null_values.write().push(true);
            return;
        }
        let typed = T::from_any(value)
            .unwrap_or_else(|| fatal!("tried to append an inconvertible value {value:?}"));
        self.values.write().push(typed);
        if self.nullable {
            self.null_values.write().push(false);
        }
    }

    pub fn is_null(&self, chunk_offset: ChunkOffset) -> bool {
        self.nullable && self.null_values.read()[chunk_offset as usize]
    }

    /// The value at an offset; fatal if the row is null.
    pub fn get(&self, chunk_offset: ChunkOffset) -> T {
        require!(
            !self.is_null(chunk_offset),
            "tried to get a NULL value at offset {chunk_offset}"
        );
        self.values.read()[chunk_offset as usize].clone()
    }

    /// Null-safe variant of `get`.
    pub fn get_typed_value(&self, chunk_offset: ChunkOffset) -> Option<T> {
        if self.is_null(chunk_offset) {
            return None;
        }
        Some(self.get(chunk_offset))
    }

    pub fn values(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.values.read()
    }

    /// The null mask; fatal on a non-nullable segment.
    pub fn null_values(&self) -> RwLockReadGuard<'_, Vec<bool>> {
        require!(
            self.nullable,
            "tried to get the null mask of a non-nullable value segment"
        );
        self.null_values.read()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl<T: ColumnType> Segment for ValueSegment<T> {
    fn value_at(&self, chunk_offset: ChunkOffset) -> AnyValue {
        match self.get_typed_value(chunk_offset) {
            Some(value) => value.into_any(),
            None => AnyValue::Null,
        }
    }

    fn size(&self) -> ChunkOffset {
        self.values.read().len() as ChunkOffset
    }

    // The null mask is intentionally not counted.
    fn estimate_memory_usage(&self) -> usize {
        self.values.read().len() * size_of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
