mod error;
mod types;
mod value;

pub use error::{Error, Result};
pub use types::{
    AttributeVectorWidth, ChunkId, ChunkOffset, ColumnCount, ColumnId, PosList, RowId, ValueId,
    INVALID_VALUE_ID, NULL_ROW_ID,
};
pub use value::{AnyValue, ColumnType, DataType, Float32, Float64};

#[cfg(test)]
mod test;
