// A teaching-grade columnar in-memory table engine. Tables are sequences of
// fixed-size horizontal chunks, one segment per column per chunk; segments
// come in value, dictionary and reference encodings, and the table scan
// filters rows across all three into a reference-only result table.
//
// The subsystem crates do the work; this crate only assembles the public
// surface.

pub use strata_base::{
    AnyValue, AttributeVectorWidth, ChunkId, ChunkOffset, ColumnCount, ColumnId, ColumnType,
    DataType, Error, Float32, Float64, PosList, Result, RowId, ValueId, INVALID_VALUE_ID,
    NULL_ROW_ID,
};
pub use strata_ops::{GetTable, Operator, OperatorBase, ScanType, TableScan};
pub use strata_store::{
    make_fitting_attribute_vector, AttributeVector, Catalog, Chunk, DictionarySegment,
    FixedWidthVector, ReferenceSegment, Segment, Table, ValueSegment, DEFAULT_TARGET_CHUNK_SIZE,
};
