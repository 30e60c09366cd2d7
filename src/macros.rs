#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build an ordered list of `(key, ResponseValue)` pairs.
///
/// Values go through `ResponseValue::from`, so plain string literals become
/// static replies and `ResponseValue::computed(..)` passes through unchanged.
#[macro_export]
macro_rules! responses {
    ( $( $key:literal => $value:expr ),* $(,)? ) => {{
        vec![ $( ($key, $crate::ResponseValue::from($value)) ),* ]
    }};
}
