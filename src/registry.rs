//! Extension registry: decoding functions keyed by destination type.
//!
//! The process-wide registry is created on first use with the built-in decoders (byte sizes,
//! IP addresses, CIDR networks and payload sources). Registrations are expected to happen during
//! program initialization, before any concurrent call to [`crate::unmarshal`]. Reads are cheap
//! and may run concurrently; a registration racing with in-flight decodes is memory safe but
//! whether those decodes observe it is unspecified.

use std::any::TypeId;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use ahash::AHashMap;

use crate::error::BoxError;
use crate::net::IpNet;
use crate::payload::Payload;
use crate::size::Size;
use crate::target::{ArgTarget, Node};

pub(crate) type Decoder =
    Arc<dyn Fn(&str, &mut dyn ArgTarget) -> Result<(), BoxError> + Send + Sync + 'static>;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

/// Table of decoding functions keyed by the exact type they produce.
pub struct Registry {
    decoders: RwLock<AHashMap<TypeId, Decoder>>,
}

impl Registry {
    /// An empty registry, without the built-in decoders.
    pub fn new() -> Self {
        Registry {
            decoders: RwLock::new(AHashMap::new()),
        }
    }

    /// A registry holding the built-in decoders.
    pub fn with_builtins() -> Self {
        let registry = Registry::new();
        registry.register(|raw: &str| raw.parse::<Size>());
        registry.register(|raw: &str| raw.parse::<IpAddr>());
        registry.register(|raw: &str| raw.parse::<Ipv4Addr>());
        registry.register(|raw: &str| raw.parse::<Ipv6Addr>());
        registry.register(|raw: &str| raw.parse::<IpNet>());
        registry.register(|raw: &str| raw.parse::<Payload>());
        registry
    }

    /// The process-wide registry used when [`crate::Options::registry`] is not set.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `decode` as the decoder for `T`.
    ///
    /// A later registration for the same type replaces the earlier one. Registered decoders
    /// take priority over scalar handling but not over [`crate::DecodeArg`].
    pub fn register<T, E, F>(&self, decode: F)
    where
        T: ArgTarget,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let decoder: Decoder = Arc::new(move |raw: &str, target: &mut dyn ArgTarget| -> Result<(), BoxError> {
            let value = match decode(raw) {
                Ok(value) => value,
                Err(err) => return Err(err.into()),
            };
            let found = target.type_name();
            match target.as_any_mut().downcast_mut::<T>() {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(format!(
                    "decoder for {} cannot write into {found}",
                    std::any::type_name::<T>()
                )
                .into()),
            }
        });
        let replaced = self
            .decoders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), decoder);
        tracing::debug!(
            type_name = std::any::type_name::<T>(),
            replaced = replaced.is_some(),
            "registered argument decoder"
        );
    }

    /// Whether a decoder is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// Whether `target` takes a single argument value (a self decoder, a registered decoder or
    /// a scalar) rather than nested names. `Option` and `Box` are looked through; an empty
    /// `Option` gets a default pointee allocated on the way.
    pub fn is_terminal(&self, target: &mut dyn ArgTarget) -> bool {
        if target.self_decoder().is_some() || self.lookup(target.target_type_id()).is_some() {
            return true;
        }
        match target.node() {
            Node::Scalar(_) => true,
            Node::Indirect(indirect) => self.is_terminal(indirect.get_or_insert()),
            _ => false,
        }
    }

    pub(crate) fn lookup(&self, type_id: TypeId) -> Option<Decoder> {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("Registry").field("decoders", &len).finish()
    }
}

/// Register `decode` in the process-wide registry.
///
/// Call this during initialization, before arguments are unmarshaled.
///
/// ```rust
/// use std::time::Duration;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Seconds(Duration);
/// argpath::registered_target!(Seconds);
///
/// argpath::register_decoder(|raw: &str| {
///     raw.parse::<u64>().map(|s| Seconds(Duration::from_secs(s)))
/// });
///
/// #[derive(Debug, Default)]
/// struct Wait {
///     timeout: Seconds,
/// }
/// argpath::record!(Wait { timeout });
///
/// let wait: Wait = argpath::from_args(&["timeout=30"]).unwrap();
/// assert_eq!(wait.timeout, Seconds(Duration::from_secs(30)));
/// ```
pub fn register_decoder<T, E, F>(decode: F)
where
    T: ArgTarget,
    E: Into<BoxError>,
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
{
    Registry::global().register(decode);
}

/// Whether values of type `T` take a single argument value in the process-wide registry.
///
/// ```rust
/// #[derive(Default)]
/// struct Volume {
///     size: argpath::Size,
/// }
/// argpath::record!(Volume { size });
///
/// assert!(argpath::is_terminal::<argpath::Size>());
/// assert!(argpath::is_terminal::<Option<u16>>());
/// assert!(!argpath::is_terminal::<Volume>());
/// assert!(!argpath::is_terminal::<Vec<String>>());
/// ```
pub fn is_terminal<T: ArgTarget + Default>() -> bool {
    Registry::global().is_terminal(&mut T::default())
}
