use std::sync::Arc;

use crate::registry::Registry;

/// Unmarshaling configuration options.
///
/// Example: decode with a private registry instead of the process-wide one.
///
/// ```rust
/// use std::sync::Arc;
///
/// use argpath::{Registry, Size};
///
/// #[derive(Debug, Default)]
/// struct Volume {
///     size: Size,
/// }
/// argpath::record!(Volume { size });
///
/// let registry = Registry::with_builtins();
/// // Binary units for every suffix.
/// registry.register(|raw: &str| {
///     raw.trim_end_matches('G').parse::<u64>().map(|g| Size::from_bytes(g << 30))
/// });
///
/// let options = argpath::options! {
///     registry: Some(Arc::new(registry)),
/// };
/// let v: Volume = argpath::from_args_with_options(&["size=2G"], options).unwrap();
/// assert_eq!(v.size.as_u64(), 2 << 30);
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Maximum number of dot-separated segments in one argument name.
    ///
    /// Default: 32
    pub max_path_depth: usize,
    /// Maximum number of arguments accepted by one call.
    ///
    /// Default: 4,096
    pub max_arguments: usize,
    /// Registry consulted for decoders. `None` selects [`Registry::global`].
    pub registry: Option<Arc<Registry>>,
}

impl Options {
    pub(crate) fn registry(&self) -> &Registry {
        self.registry.as_deref().unwrap_or_else(|| Registry::global())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_path_depth: 32,
            max_arguments: 4_096,
            registry: None,
        }
    }
}
