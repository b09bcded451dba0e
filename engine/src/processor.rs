//! Parameter-processor capability.
//!
//! The engine never interprets parameter content itself; it hands every
//! bound option's raw parameters to a caller-supplied [`ParamProcessor`]
//! and stores whatever typed value comes back. Content rejections surface
//! as [`ResolveError::BadOptionParameters`](crate::ResolveError) carrying
//! the descriptor, specifier, and original raw list.

use option_resolver_core::OptionDescriptor;

use crate::error::ParamError;

/// Converts one option's raw string parameters into a typed value.
///
/// Implementations see the descriptor, so a single processor can dispatch
/// on `descriptor.id` for per-option conversion rules.
///
/// # Examples
///
/// ```
/// use option_resolver_core::OptionDescriptor;
/// use option_resolver_engine::{ParamError, ParamProcessor};
///
/// /// Parses every parameter as an integer.
/// struct Numbers;
///
/// impl ParamProcessor for Numbers {
///     type Value = Vec<i64>;
///
///     fn process(
///         &self,
///         _descriptor: &OptionDescriptor,
///         raw_params: &[String],
///     ) -> Result<Self::Value, ParamError> {
///         raw_params
///             .iter()
///             .map(|p| {
///                 p.parse()
///                     .map_err(|_| ParamError::new(format!("not a number: {p}")))
///             })
///             .collect()
///     }
/// }
///
/// let d = OptionDescriptor::new("level", "--level");
/// assert_eq!(Numbers.process(&d, &["3".into()]).unwrap(), vec![3]);
/// assert!(Numbers.process(&d, &["x".into()]).is_err());
/// ```
pub trait ParamProcessor {
    /// The typed value produced for each bound option.
    type Value;

    /// Converts `raw_params` for the given descriptor, or rejects them.
    fn process(
        &self,
        descriptor: &OptionDescriptor,
        raw_params: &[String],
    ) -> Result<Self::Value, ParamError>;
}

/// Identity processor: every option's value is its raw parameter list.
///
/// # Examples
///
/// ```
/// use option_resolver_core::OptionDescriptor;
/// use option_resolver_engine::{ParamProcessor, RawParams};
///
/// let d = OptionDescriptor::new("files", "--files");
/// let value = RawParams.process(&d, &["a.txt".into(), "b.txt".into()]).unwrap();
/// assert_eq!(value, vec!["a.txt".to_string(), "b.txt".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RawParams;

impl ParamProcessor for RawParams {
    type Value = Vec<String>;

    fn process(
        &self,
        _descriptor: &OptionDescriptor,
        raw_params: &[String],
    ) -> Result<Self::Value, ParamError> {
        Ok(raw_params.to_vec())
    }
}
