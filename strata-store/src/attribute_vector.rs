use funty::Unsigned;
use std::mem::size_of;
use strata_base::{fatal, require, AttributeVectorWidth, ValueId, INVALID_VALUE_ID};

/// A dense array of dictionary codes, one per row of a chunk.
pub trait AttributeVector: Send + Sync {
    /// The code at a row position.
    fn get(&self, index: usize) -> ValueId;

    /// Store a code at a row position.
    fn set(&mut self, index: usize, value_id: ValueId);

    /// Number of codes.
    fn size(&self) -> usize;

    /// Byte width of the backing integer.
    fn width(&self) -> AttributeVectorWidth;
}

/// Attribute vector backed by `u8`, `u16` or `u32` codes.
pub struct FixedWidthVector<T: Unsigned> {
    value_ids: Vec<T>,
}

impl<T> FixedWidthVector<T>
where
    T: Unsigned + Default + Copy,
{
    pub fn new(size: usize) -> Self {
        FixedWidthVector {
            value_ids: vec![T::default(); size],
        }
    }
}

impl<T> AttributeVector for FixedWidthVector<T>
where
    T: Unsigned + Default + Copy + TryFrom<u32> + Into<u32> + Send + Sync,
{
    fn get(&self, index: usize) -> ValueId {
        self.value_ids[index].into()
    }

    fn set(&mut self, index: usize, value_id: ValueId) {
        let code = T::try_from(value_id)
            .ok()
            .unwrap_or_else(|| fatal!("value id {value_id} does not fit a {}-byte code", size_of::<T>()));
        self.value_ids[index] = code;
    }

    fn size(&self) -> usize {
        self.value_ids.len()
    }

    fn width(&self) -> AttributeVectorWidth {
        size_of::<T>() as AttributeVectorWidth
    }
}

/// Allocate an `size`-element vector of the smallest width whose range
/// covers `highest_value_id`.
pub fn make_fitting_attribute_vector(
    size: usize,
    highest_value_id: usize,
) -> Box<dyn AttributeVector> {
    require!(
        highest_value_id <= INVALID_VALUE_ID as usize,
        "cannot build an attribute vector for value ids wider than 32 bits"
    );
    let bits = usize::BITS - highest_value_id.leading_zeros();
    if bits <= 8 {
        Box::new(FixedWidthVector::<u8>::new(size))
    } else if bits <= 16 {
        Box::new(FixedWidthVector::<u16>::new(size))
    } else {
        Box::new(FixedWidthVector::<u32>::new(size))
    }
}
