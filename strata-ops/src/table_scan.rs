use crate::{Operator, OperatorBase};
use std::sync::Arc;
use strata_base::{
    fatal, require, with_data_type, AnyValue, ChunkId, ChunkOffset, ColumnId, ColumnType, PosList,
    RowId, ValueId,
};
use strata_store::{Chunk, DictionarySegment, ReferenceSegment, Segment, Table, ValueSegment};

/// Comparison selecting rows of the scan column.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ScanType {
    Equals,
    NotEquals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
}

/// Filters one column of the input table into a new table whose columns are
/// reference segments over a shared position list. Each of the three segment
/// encodings gets its own path: value segments compare typed values,
/// dictionary segments compare codes against the search value's code
/// interval, reference segments resolve row ids through the referenced
/// table.
pub struct TableScan {
    base: OperatorBase,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: AnyValue,
}

impl TableScan {
    pub fn new(
        input: Box<dyn Operator>,
        column_id: ColumnId,
        scan_type: ScanType,
        search_value: AnyValue,
    ) -> TableScan {
        TableScan {
            base: OperatorBase::new(Some(input), None),
            column_id,
            scan_type,
            search_value,
        }
    }

    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn search_value(&self) -> &AnyValue {
        &self.search_value
    }

    /// The search value in the scan column's element kind. `None` for a
    /// null search value, which matches nothing; an inconvertible search
    /// value is fatal.
    fn typed_search_value<T: ColumnType>(&self) -> Option<T> {
        if self.search_value.is_null() {
            return None;
        }
        Some(
            T::from_any(&self.search_value)
                .unwrap_or_else(|| fatal!("tried a comparison with an incompatible search value")),
        )
    }

    fn matches<T: Ord>(&self, value: &T, search: &T) -> bool {
        match self.scan_type {
            ScanType::Equals => value == search,
            ScanType::NotEquals => value != search,
            ScanType::LessThan => value < search,
            ScanType::LessThanEquals => value <= search,
            ScanType::GreaterThan => value > search,
            ScanType::GreaterThanEquals => value >= search,
        }
    }

    /// Comparison over the half-open code interval `[lower, upper)` of the
    /// search value. The interval is empty (`lower == upper`) exactly when
    /// the search value is absent from the dictionary, which keeps the
    /// ordering correct for searches falling between dictionary entries or
    /// past either end.
    fn matches_value_id(&self, value_id: ValueId, lower: ValueId, upper: ValueId) -> bool {
        match self.scan_type {
            ScanType::Equals => value_id == lower && lower < upper,
            ScanType::NotEquals => !(value_id == lower && lower < upper),
            ScanType::LessThan => value_id < lower,
            ScanType::LessThanEquals => value_id < upper,
            ScanType::GreaterThan => value_id >= upper,
            ScanType::GreaterThanEquals => value_id >= lower,
        }
    }

    fn scan_value_segment<T: ColumnType>(
        &self,
        chunk_id: ChunkId,
        segment: &ValueSegment<T>,
        pos_list: &mut PosList,
    ) {
        let Some(search) = self.typed_search_value::<T>() else {
            return;
        };
        let values = segment.values();
        let null_values = segment.is_nullable().then(|| segment.null_values());
        for (chunk_offset, value) in values.iter().enumerate() {
            if null_values.as_ref().is_some_and(|mask| mask[chunk_offset]) {
                continue;
            }
            if self.matches(value, &search) {
                pos_list.push(RowId::new(chunk_id, chunk_offset as ChunkOffset));
            }
        }
    }

    fn scan_dictionary_segment<T: ColumnType>(
        &self,
        chunk_id: ChunkId,
        segment: &DictionarySegment<T>,
        pos_list: &mut PosList,
    ) {
        if self.typed_search_value::<T>().is_none() {
            return;
        }
        let lower = segment.lower_bound_any(&self.search_value);
        let upper = segment.upper_bound_any(&self.search_value);
        let null_value_id = segment.null_value_id();
        let attribute_vector = segment.attribute_vector();
        for chunk_offset in 0..attribute_vector.size() {
            let value_id = attribute_vector.get(chunk_offset);
            // Null rows match nothing, not even a not-equals scan.
            if segment.is_nullable() && value_id == null_value_id {
                continue;
            }
            if self.matches_value_id(value_id, lower, upper) {
                pos_list.push(RowId::new(chunk_id, chunk_offset as ChunkOffset));
            }
        }
    }

    fn scan_reference_segment<T: ColumnType>(
        &self,
        segment: &ReferenceSegment,
        pos_list: &mut PosList,
    ) {
        let Some(search) = self.typed_search_value::<T>() else {
            return;
        };
        for row_id in segment.pos_list().iter() {
            let value = segment.get_by_row_id(*row_id);
            // from_any is None for null rows; null matches nothing.
            if let Some(typed) = T::from_any(&value) {
                if self.matches(&typed, &search) {
                    pos_list.push(*row_id);
                }
            }
        }
    }
}

impl Operator for TableScan {
    fn base(&self) -> &OperatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OperatorBase {
        &mut self.base
    }

    fn on_execute(&mut self) -> Arc<Table> {
        let table = self.base.left_input_table();
        let chunk_count = table.chunk_count();
        let mut pos_list = PosList::new();
        let mut referenced_table: Option<Arc<Table>> = None;
        let mut reference_segments_seen = 0u32;

        for chunk_id in 0..chunk_count {
            let chunk = table.get_chunk(chunk_id);
            let segment = chunk.get_segment(self.column_id);
            with_data_type!(table.column_type(self.column_id), T => {
                let segment_any = segment.as_any();
                if let Some(value_segment) = segment_any.downcast_ref::<ValueSegment<T>>() {
                    self.scan_value_segment(chunk_id, value_segment, &mut pos_list);
                } else if let Some(dictionary_segment) =
                    segment_any.downcast_ref::<DictionarySegment<T>>()
                {
                    self.scan_dictionary_segment(chunk_id, dictionary_segment, &mut pos_list);
                } else if let Some(reference_segment) =
                    segment_any.downcast_ref::<ReferenceSegment>()
                {
                    reference_segments_seen += 1;
                    referenced_table = Some(reference_segment.referenced_table().clone());
                    self.scan_reference_segment::<T>(reference_segment, &mut pos_list);
                } else {
                    fatal!("segment is neither a value, dictionary nor reference segment");
                }
            });
        }

        // A reference segment may only appear when the input is the output
        // of a single prior scan; the output then references the origin
        // table directly, keeping reference chains one level deep.
        require!(
            reference_segments_seen == 0 || (reference_segments_seen == 1 && chunk_count == 1),
            "scan inputs may carry a reference segment only in the single-chunk case"
        );

        let referenced_table = referenced_table.unwrap_or_else(|| table.clone());
        let pos_list = Arc::new(pos_list);
        let output_chunk = Chunk::new();
        for column_id in 0..table.column_count() {
            output_chunk.add_segment(Arc::new(ReferenceSegment::new(
                referenced_table.clone(),
                column_id,
                pos_list.clone(),
            )));
        }
        Arc::new(Table::with_single_chunk(&table, output_chunk))
    }
}
