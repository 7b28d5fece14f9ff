//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a catalog item (product row).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogItemId(Uuid);

/// Identifier of a pool configuration produced by the wizard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(CatalogItemId, "CatalogItemId");
impl_uuid_newtype!(ConfigurationId, "ConfigurationId");

/// Namespace for code-derived catalog item ids.
const CATALOG_CODE_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93d0_4b8e_a5f2_0c7d_91e3_b846);

impl CatalogItemId {
    /// Deterministic id for a product code (UUIDv5 within a fixed namespace).
    ///
    /// Re-running normalization over the same batch yields the same ids.
    pub fn from_code(code: &str) -> Self {
        Self(Uuid::new_v5(&CATALOG_CODE_NAMESPACE, code.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_derived_ids_are_stable() {
        assert_eq!(
            CatalogItemId::from_code("BAZ-OBD-SK-3-6-1.2"),
            CatalogItemId::from_code("BAZ-OBD-SK-3-6-1.2")
        );
        assert_ne!(
            CatalogItemId::from_code("BAZ-OBD-SK-3-6-1.2"),
            CatalogItemId::from_code("BAZ-OBD-SK-3-6-1.5")
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<CatalogItemId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("CatalogItemId")),
            _ => panic!("Expected InvalidId error"),
        }
    }
}
