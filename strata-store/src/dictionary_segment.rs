use crate::{make_fitting_attribute_vector, AttributeVector, Segment, ValueSegment};
use std::any::Any;
use std::collections::BTreeMap;
use std::mem::size_of;
use strata_base::{fatal, require, AnyValue, ChunkOffset, ColumnType, ValueId, INVALID_VALUE_ID};

/// Read-only dictionary-compressed column segment: a sorted, deduplicated
/// dictionary of the distinct non-null values plus an attribute vector
/// mapping every row to a dictionary code.
///
/// On nullable segments code 0 is reserved for NULL and dictionary codes
/// start at 1; on non-nullable segments codes start at 0 and the null code
/// is the `INVALID_VALUE_ID` sentinel, which no row ever carries.
pub struct DictionarySegment<T: ColumnType> {
    nullable: bool,
    dictionary: Vec<T>,
    attribute_vector: Box<dyn AttributeVector>,
}

impl<T: ColumnType> DictionarySegment<T> {
    /// Build from a value segment of the same element kind; any other
    /// segment is fatal.
    pub fn new(segment: &dyn Segment) -> Self {
        let value_segment = segment
            .as_any()
            .downcast_ref::<ValueSegment<T>>()
            .unwrap_or_else(|| {
                fatal!("dictionary segments are built from a value segment of the same element kind")
            });
        let nullable = value_segment.is_nullable();
        let values = value_segment.values();
        let null_values = nullable.then(|| value_segment.null_values());
        let row_is_null = |index: usize| null_values.as_ref().is_some_and(|mask| mask[index]);

        let mut value_to_id = BTreeMap::<T, ValueId>::new();
        for (index, value) in values.iter().enumerate() {
            if !row_is_null(index) {
                value_to_id.entry(value.clone()).or_insert(0);
            }
        }

        let code_base: usize = if nullable { 1 } else { 0 };
        require!(
            value_to_id.len() + code_base <= INVALID_VALUE_ID as usize,
            "dictionary overflows the 32-bit code space"
        );
        let mut next_value_id = code_base as ValueId;
        for value_id in value_to_id.values_mut() {
            *value_id = next_value_id;
            next_value_id += 1;
        }

        let highest_value_id = (next_value_id as usize).saturating_sub(1);
        let mut attribute_vector = make_fitting_attribute_vector(values.len(), highest_value_id);
        for (index, value) in values.iter().enumerate() {
            if row_is_null(index) {
                attribute_vector.set(index, 0);
            } else {
                attribute_vector.set(index, value_to_id[value]);
            }
        }

        drop(null_values);
        drop(values);
        DictionarySegment {
            nullable,
            dictionary: value_to_id.into_keys().collect(),
            attribute_vector,
        }
    }

    fn code_base(&self) -> usize {
        if self.nullable {
            1
        } else {
            0
        }
    }

    /// The code marking a null row.
    pub fn null_value_id(&self) -> ValueId {
        if self.nullable {
            0
        } else {
            INVALID_VALUE_ID
        }
    }

    /// The dictionary entry behind a code; fatal for the reserved null code
    /// in either form (the `INVALID_VALUE_ID` sentinel, or code 0 on a
    /// nullable segment).
    pub fn value_of_value_id(&self, value_id: ValueId) -> T {
        require!(
            value_id != INVALID_VALUE_ID && value_id as usize >= self.code_base(),
            "tried to look up the reserved null code"
        );
        self.dictionary[value_id as usize - self.code_base()].clone()
    }

    /// The value at a row offset; fatal if the row is null.
    pub fn get(&self, chunk_offset: ChunkOffset) -> T {
        self.get_typed_value(chunk_offset)
            .unwrap_or_else(|| fatal!("tried to get a NULL value at offset {chunk_offset}"))
    }

    /// Null-safe variant of `get`.
    pub fn get_typed_value(&self, chunk_offset: ChunkOffset) -> Option<T> {
        let value_id = self.attribute_vector.get(chunk_offset as usize);
        if value_id == self.null_value_id() {
            return None;
        }
        Some(self.value_of_value_id(value_id))
    }

    /// The code of the first dictionary entry >= `value`, or
    /// `INVALID_VALUE_ID` when every entry is smaller.
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let index = self.dictionary.partition_point(|entry| entry < value);
        if index == self.dictionary.len() {
            return INVALID_VALUE_ID;
        }
        (index + self.code_base()) as ValueId
    }

    /// The code of the first dictionary entry > `value`, or
    /// `INVALID_VALUE_ID` when every entry is <= `value`.
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let index = self.dictionary.partition_point(|entry| entry <= value);
        if index == self.dictionary.len() {
            return INVALID_VALUE_ID;
        }
        (index + self.code_base()) as ValueId
    }

    /// `lower_bound` from a variant: a null search value yields the null
    /// code (fatal on non-nullable segments), a cross-kind value is fatal.
    pub fn lower_bound_any(&self, value: &AnyValue) -> ValueId {
        match self.bound_search_value(value) {
            Some(typed) => self.lower_bound(&typed),
            None => self.null_value_id(),
        }
    }

    /// `upper_bound` from a variant; see `lower_bound_any`.
    pub fn upper_bound_any(&self, value: &AnyValue) -> ValueId {
        match self.bound_search_value(value) {
            Some(typed) => self.upper_bound(&typed),
            None => self.null_value_id(),
        }
    }

    fn bound_search_value(&self, value: &AnyValue) -> Option<T> {
        if value.is_null() {
            require!(self.nullable, "dictionary segment is not nullable");
            return None;
        }
        Some(
            T::from_any(value)
                .unwrap_or_else(|| fatal!("tried a dictionary bound with an incompatible value")),
        )
    }

    /// The sorted dictionary of distinct non-null values.
    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn attribute_vector(&self) -> &dyn AttributeVector {
        self.attribute_vector.as_ref()
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl<T: ColumnType> Segment for DictionarySegment<T> {
    fn value_at(&self, chunk_offset: ChunkOffset) -> AnyValue {
        match self.get_typed_value(chunk_offset) {
            Some(value) => value.into_any(),
            None => AnyValue::Null,
        }
    }

    fn size(&self) -> ChunkOffset {
        self.attribute_vector.size() as ChunkOffset
    }

    fn estimate_memory_usage(&self) -> usize {
        self.attribute_vector.size() * self.attribute_vector.width() as usize
            + self.dictionary.len() * size_of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
