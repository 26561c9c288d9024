//! Type-safe identifiers for ports, vehicles and routes.
//!
//! All identifiers use Arc<str> for cheap cloning and minimal memory overhead.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::models::types::{FerryError, Result};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

impl_identifier!(PortName);
impl_identifier!(VehicleId);
impl_identifier!(RouteKey);

fn is_name_space(c: char) -> bool {
    // U+FEFF is not White_Space in Unicode but turns up as a stray BOM
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Collapse every whitespace run to a single space and trim both ends.
///
/// Tabs, line breaks, no-break spaces and byte order marks all count as
/// whitespace, so names typed with mixed spacing still land on the same key.
pub fn clean_port_name(raw: &str) -> String {
    raw.split(is_name_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl PortName {
    /// Build a port name from raw table or click input.
    pub fn clean(raw: &str) -> Self {
        Self::new(clean_port_name(raw))
    }
}

impl RouteKey {
    /// Join two ports into a directed route key.
    ///
    /// Fails when either name contains the separator, since the key could
    /// then be split in more than one way.
    pub fn for_ports(origin: &PortName, destination: &PortName, separator: char) -> Result<Self> {
        for port in [origin, destination] {
            if port.as_str().contains(separator) {
                return Err(FerryError::AmbiguousKey {
                    port: port.clone(),
                    separator,
                });
            }
        }

        let mut key = String::with_capacity(origin.as_str().len() + destination.as_str().len() + 1);
        key.push_str(origin.as_str());
        key.push(separator);
        key.push_str(destination.as_str());
        Ok(Self::new(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = PortName::new("Agaete");
        let id2 = PortName::new("Agaete");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(VehicleId::new("12"), 42);

        assert_eq!(map.get(&VehicleId::new("12")), Some(&42));
    }

    #[test]
    fn test_clean_port_name() {
        assert_eq!(clean_port_name("  Santa Cruz   de\tTenerife \r\n"), "Santa Cruz de Tenerife");
        assert_eq!(clean_port_name("Los\u{00A0}Cristianos"), "Los Cristianos");
        assert_eq!(clean_port_name(""), "");
        assert_eq!(clean_port_name(" \t "), "");
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert_eq!(clean_port_name("\u{FEFF}Agaete"), "Agaete");
        assert_eq!(clean_port_name("Playa\u{FEFF}Blanca\u{FEFF}"), "Playa Blanca");
        assert_eq!(PortName::clean("\u{FEFF}Agaete "), PortName::clean("Agaete"));
    }

    #[test]
    fn test_route_key() {
        let key = RouteKey::for_ports(&PortName::new("Agaete"), &PortName::new("Santa Cruz"), '|').unwrap();
        assert_eq!(key.as_str(), "Agaete|Santa Cruz");
    }

    #[test]
    fn test_route_key_rejects_separator_in_name() {
        let err = RouteKey::for_ports(&PortName::new("A|B"), &PortName::new("C"), '|').unwrap_err();
        assert!(matches!(err, FerryError::AmbiguousKey { separator: '|', .. }));
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(raw in "\\PC*") {
            let once = clean_port_name(&raw);
            prop_assert_eq!(clean_port_name(&once), once);
        }

        #[test]
        fn whitespace_variants_clean_identically(
            words in prop::collection::vec("[A-Za-z]{1,8}", 1..5),
            gaps in prop::collection::vec("[ \t\r\n\u{00A0}\u{FEFF}]{1,4}", 5),
            lead in "[ \t]{0,3}",
            trail in "[ \t\r\n]{0,3}",
        ) {
            let single = words.join(" ");
            let mut spaced = lead.clone();
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    spaced.push_str(&gaps[i]);
                }
                spaced.push_str(word);
            }
            spaced.push_str(&trail);

            prop_assert_eq!(clean_port_name(&spaced), clean_port_name(&single));
        }
    }
}
