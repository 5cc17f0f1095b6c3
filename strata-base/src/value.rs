use ordered_float::OrderedFloat;
use std::fmt::Debug;
use std::hash::Hash;

// Float columns carry OrderedFloat so every element kind has a total order;
// dictionaries sort on it and scans compare with it.
pub type Float32 = OrderedFloat<f32>;
pub type Float64 = OrderedFloat<f64>;

/// The closed set of element kinds a column can be declared with.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    String,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Int,
        DataType::Long,
        DataType::Float,
        DataType::Double,
        DataType::String,
    ];

    /// The stable external name, as used in schema definitions.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
        }
    }

    pub fn from_name(name: &str) -> DataType {
        match name {
            "int" => DataType::Int,
            "long" => DataType::Long,
            "float" => DataType::Float,
            "double" => DataType::Double,
            "string" => DataType::String,
            _ => crate::fatal!("unknown column type name {name:?}"),
        }
    }
}

/// A value of any element kind, or null.
///
/// The derived comparisons are raw structural ones: `Null == Null` holds
/// here. The engine's three-valued logic (anything compared with null is
/// false) is applied at the call sites that filter rows, which check
/// `is_null` on both sides before comparing payloads.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum AnyValue {
    Null,
    Int(i32),
    Long(i64),
    Float(Float32),
    Double(Float64),
    String(String),
}

impl AnyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnyValue::Null)
    }
}

impl From<i32> for AnyValue {
    fn from(value: i32) -> AnyValue {
        AnyValue::Int(value)
    }
}
impl From<i64> for AnyValue {
    fn from(value: i64) -> AnyValue {
        AnyValue::Long(value)
    }
}
impl From<f32> for AnyValue {
    fn from(value: f32) -> AnyValue {
        AnyValue::Float(OrderedFloat(value))
    }
}
impl From<f64> for AnyValue {
    fn from(value: f64) -> AnyValue {
        AnyValue::Double(OrderedFloat(value))
    }
}
impl From<&str> for AnyValue {
    fn from(value: &str) -> AnyValue {
        AnyValue::String(value.to_owned())
    }
}
impl From<String> for AnyValue {
    fn from(value: String) -> AnyValue {
        AnyValue::String(value)
    }
}

/// One of the five element kinds, as a Rust type. Segments are generic over
/// this; only reference segments stay element-kind-agnostic.
pub trait ColumnType: Clone + Default + Ord + Hash + Debug + Send + Sync + 'static {
    /// Down-cast from a variant. Integer kinds accept each other when the
    /// payload is representable, float kinds accept any numeric payload,
    /// strings only strings. `None` for null or an inconvertible payload;
    /// callers decide whether that is a skip or a fatal condition.
    fn from_any(value: &AnyValue) -> Option<Self>;

    fn into_any(self) -> AnyValue;
}

impl ColumnType for i32 {
    fn from_any(value: &AnyValue) -> Option<i32> {
        match value {
            AnyValue::Int(v) => Some(*v),
            AnyValue::Long(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Int(self)
    }
}

impl ColumnType for i64 {
    fn from_any(value: &AnyValue) -> Option<i64> {
        match value {
            AnyValue::Int(v) => Some(i64::from(*v)),
            AnyValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Long(self)
    }
}

impl ColumnType for Float32 {
    fn from_any(value: &AnyValue) -> Option<Float32> {
        match value {
            AnyValue::Int(v) => Some(OrderedFloat(*v as f32)),
            AnyValue::Long(v) => Some(OrderedFloat(*v as f32)),
            AnyValue::Float(v) => Some(*v),
            AnyValue::Double(v) => Some(OrderedFloat(v.0 as f32)),
            _ => None,
        }
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Float(self)
    }
}

impl ColumnType for Float64 {
    fn from_any(value: &AnyValue) -> Option<Float64> {
        match value {
            AnyValue::Int(v) => Some(OrderedFloat(f64::from(*v))),
            AnyValue::Long(v) => Some(OrderedFloat(*v as f64)),
            AnyValue::Float(v) => Some(OrderedFloat(f64::from(v.0))),
            AnyValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    fn into_any(self) -> AnyValue {
        AnyValue::Double(self)
    }
}

impl ColumnType for String {
    fn from_any(value: &AnyValue) -> Option<String> {
        match value {
            AnyValue::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_any(self) -> AnyValue {
        AnyValue::String(self)
    }
}

/// Static dispatch from a runtime `DataType` to the matching element kind.
/// Binds the given identifier as a local type alias in each arm, so call
/// sites get a statically typed path per kind without open-ended
/// inheritance:
///
/// ```ignore
/// with_data_type!(table.column_type(id), T => {
///     chunk.add_segment(Arc::new(ValueSegment::<T>::new(nullable)));
/// });
/// ```
#[macro_export]
macro_rules! with_data_type {
    ($data_type:expr, $T:ident => $body:expr) => {
        match $data_type {
            $crate::DataType::Int => {
                type $T = i32;
                $body
            }
            $crate::DataType::Long => {
                type $T = i64;
                $body
            }
            $crate::DataType::Float => {
                type $T = $crate::Float32;
                $body
            }
            $crate::DataType::Double => {
                type $T = $crate::Float64;
                $body
            }
            $crate::DataType::String => {
                type $T = ::std::string::String;
                $body
            }
        }
    };
}
