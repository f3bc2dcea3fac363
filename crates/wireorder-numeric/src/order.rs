use std::fmt;

use crate::swap::Swap;

/// Byte order of multi-byte values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
    /// Whatever the executing host uses. Resolved to `Big` or `Little`
    /// before it is stored anywhere.
    #[default]
    Native,
}

impl ByteOrder {
    /// The byte order of the executing host.
    pub const fn host() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Resolve `Native` against the actual host order.
    pub const fn resolve(self) -> Self {
        self.resolve_for(Self::host())
    }

    /// Resolve `Native` against an explicit host order.
    ///
    /// A `Native` host is itself resolved against the actual host first.
    pub const fn resolve_for(self, host: ByteOrder) -> Self {
        match self {
            ByteOrder::Native => match host {
                ByteOrder::Native => Self::host(),
                other => other,
            },
            other => other,
        }
    }

    pub const fn is_native(self) -> bool {
        matches!(self, ByteOrder::Native)
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Big => f.write_str("big-endian"),
            ByteOrder::Little => f.write_str("little-endian"),
            ByteOrder::Native => f.write_str("native"),
        }
    }
}

/// Decide whether values declared in `order` must be byte-swapped on a host
/// whose actual order is `host`.
pub const fn swap_required(order: ByteOrder, host: ByteOrder) -> bool {
    let host_is_little = matches!(host.resolve_for(ByteOrder::host()), ByteOrder::Little);
    match order {
        ByteOrder::Native => false,
        ByteOrder::Big => host_is_little,
        ByteOrder::Little => !host_is_little,
    }
}

/// A resolved byte order together with its cached swap decision.
///
/// `order` is never `Native`. The swap flag is computed once on
/// construction so per-value conversions are a single field read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireOrder {
    order: ByteOrder,
    swap: bool,
}

impl WireOrder {
    /// Configure `order` for the executing host.
    pub const fn new(order: ByteOrder) -> Self {
        Self::for_host(order, ByteOrder::host())
    }

    /// Configure `order` as if running on a host with byte order `host`.
    pub const fn for_host(order: ByteOrder, host: ByteOrder) -> Self {
        let host = host.resolve_for(ByteOrder::host());
        Self {
            order: order.resolve_for(host),
            swap: swap_required(order, host),
        }
    }

    /// The resolved order: always `Big` or `Little`.
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// True when values must be swapped between host and wire.
    pub const fn swaps(&self) -> bool {
        self.swap
    }

    /// Convert between host and wire representation.
    ///
    /// Swapping is its own inverse, so the same call serves both directions.
    #[inline]
    pub fn apply<T: Swap>(&self, value: T) -> T {
        if self.swap {
            value.swap()
        } else {
            value
        }
    }
}

impl Default for WireOrder {
    fn default() -> Self {
        Self::new(ByteOrder::Native)
    }
}

impl From<ByteOrder> for WireOrder {
    fn from(order: ByteOrder) -> Self {
        Self::new(order)
    }
}
