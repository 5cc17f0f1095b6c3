// The storage substrate: a table is a column schema plus an ordered sequence
// of fixed-size horizontal chunks; a chunk holds one segment per column; a
// segment is one of three physical encodings:
//
// - Value segments: uncompressed, append-only while their chunk is mutable,
//   with an optional null mask.
// - Dictionary segments: a sorted deduplicated dictionary plus a fixed-width
//   attribute vector of codes (code 0 reserved for NULL on nullable columns).
//   Built once from a value segment, immutable afterwards.
// - Reference segments: a position list of (chunk id, offset) row ids
//   projected out of some other table's column. The table scan emits these.
//
// Only the last chunk of a table is ever mutable. Compressing a chunk swaps
// the slot's handle and clears its mutability flag under one lock, so readers
// holding the old handle stay consistent and new readers see the new chunk.

mod attribute_vector;
mod catalog;
mod chunk;
mod dictionary_segment;
mod reference_segment;
mod segment;
mod table;
mod value_segment;

pub use attribute_vector::{make_fitting_attribute_vector, AttributeVector, FixedWidthVector};
pub use catalog::Catalog;
pub use chunk::Chunk;
pub use dictionary_segment::DictionarySegment;
pub use reference_segment::ReferenceSegment;
pub use segment::Segment;
pub use table::{Table, DEFAULT_TARGET_CHUNK_SIZE};
pub use value_segment::ValueSegment;
