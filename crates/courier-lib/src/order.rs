use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::LocationId;

/// Dispatch precedence class of an order.
///
/// Variants are declared in precedence order so the derived `Ord` sorts
/// expedited orders ahead of standard ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryTier {
    /// Fast delivery; always dispatched before any standard order.
    Expedited,
    /// Normal delivery.
    Standard,
}

impl DeliveryTier {
    /// Numeric priority of the tier. Lower values dispatch first.
    pub fn priority(self) -> u8 {
        match self {
            DeliveryTier::Expedited => 1,
            DeliveryTier::Standard => 2,
        }
    }

    pub fn is_expedited(self) -> bool {
        self == DeliveryTier::Expedited
    }

    pub fn label(self) -> &'static str {
        match self {
            DeliveryTier::Expedited => "expedited",
            DeliveryTier::Standard => "standard",
        }
    }
}

impl From<bool> for DeliveryTier {
    fn from(expedited: bool) -> Self {
        if expedited {
            DeliveryTier::Expedited
        } else {
            DeliveryTier::Standard
        }
    }
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeliveryTier {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expedited" | "fast" | "1" => Ok(DeliveryTier::Expedited),
            "standard" | "normal" | "2" => Ok(DeliveryTier::Standard),
            _ => Err(Error::InvalidTier {
                value: value.to_string(),
            }),
        }
    }
}

/// An accepted delivery order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    name: String,
    tier: DeliveryTier,
    location: LocationId,
}

impl Order {
    pub(crate) fn new(name: String, tier: DeliveryTier, location: LocationId) -> Self {
        Self {
            name,
            tier,
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> DeliveryTier {
        self.tier
    }

    pub fn priority(&self) -> u8 {
        self.tier.priority()
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (priority: {}, location: {})",
            self.name,
            self.priority(),
            self.location
        )
    }
}

/// An order submission that has not been validated against the session yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub name: String,
    pub tier: DeliveryTier,
    pub location: String,
}

impl OrderRequest {
    pub fn new(name: impl Into<String>, tier: DeliveryTier, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier,
            location: location.into(),
        }
    }

    /// Parse the inline `NAME@LOCATION` form used on the command line.
    ///
    /// The last `@` separates the location so names may contain `@`.
    pub fn parse_inline(spec: &str, tier: DeliveryTier) -> Result<Self> {
        let invalid = || Error::InvalidOrderSpec {
            spec: spec.to_string(),
        };

        let (name, location) = spec.rsplit_once('@').ok_or_else(invalid)?;
        let (name, location) = (name.trim(), location.trim());
        if name.is_empty() || location.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(name, tier, location))
    }
}
