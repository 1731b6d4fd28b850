//! CIDR network literals.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// An IP address with a prefix length, written `10.0.0.0/24` or `fd00::/8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IpNet {
    addr: IpAddr,
    prefix_len: u8,
}

impl IpNet {
    /// Build a network, checking the prefix length against the address family.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self, IpNetError> {
        if prefix_len > max_prefix_len(&addr) {
            return Err(IpNetError::PrefixTooLong {
                prefix_len,
                max: max_prefix_len(&addr),
            });
        }
        Ok(IpNet { addr, prefix_len })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Whether `ip` lies inside this network.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        match (self.addr, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = u32::MAX.checked_shl(32 - self.prefix_len as u32).unwrap_or(0);
                u32::from(net) & mask == u32::from(*ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = u128::MAX.checked_shl(128 - self.prefix_len as u32).unwrap_or(0);
                u128::from(net) & mask == u128::from(*ip) & mask
            }
            _ => false,
        }
    }
}

fn max_prefix_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

impl Default for IpNet {
    fn default() -> Self {
        IpNet {
            addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            prefix_len: 0,
        }
    }
}

/// Error returned when a string is not a valid [`IpNet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IpNetError {
    MissingPrefix,
    InvalidAddress(String),
    InvalidPrefix(String),
    PrefixTooLong { prefix_len: u8, max: u8 },
}

impl fmt::Display for IpNetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpNetError::MissingPrefix => write!(f, "missing `/prefix` in CIDR literal"),
            IpNetError::InvalidAddress(addr) => write!(f, "invalid IP address `{addr}`"),
            IpNetError::InvalidPrefix(prefix) => write!(f, "invalid prefix length `{prefix}`"),
            IpNetError::PrefixTooLong { prefix_len, max } => {
                write!(f, "prefix length {prefix_len} exceeds {max}")
            }
        }
    }
}

impl std::error::Error for IpNetError {}

impl FromStr for IpNet {
    type Err = IpNetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s.split_once('/').ok_or(IpNetError::MissingPrefix)?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| IpNetError::InvalidAddress(addr.to_owned()))?;
        let prefix_len: u8 = prefix
            .parse()
            .map_err(|_| IpNetError::InvalidPrefix(prefix.to_owned()))?;
        IpNet::new(addr, prefix_len)
    }
}

impl fmt::Display for IpNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl Serialize for IpNet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IpNet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

crate::registered_target!(IpNet);
