/// Builds a [`DottedValue`](crate::DottedValue) from a JSON-like literal.
///
/// Object keys are kept verbatim; dotted keys are only expanded when the value
/// is passed through a [`NestedMap`](crate::NestedMap).
///
/// ```rust
/// use serde_dotted::{dotted, DottedValue};
///
/// let value = dotted!({ "a": { "b": [1, 2] }, "c": null });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! dotted {
    // Handle null
    (null) => {
        $crate::DottedValue::Null
    };

    // Handle true
    (true) => {
        $crate::DottedValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::DottedValue::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::DottedValue::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::DottedValue::Array(vec![$($crate::dotted!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::DottedValue::Object($crate::DottedMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::DottedMap::new();
        $(
            object.insert($key.to_string(), $crate::dotted!($value));
        )*
        $crate::DottedValue::Object(object)
    }};

    // Any other expression goes through the serializer
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::DottedValue::Null)
    }};
}
