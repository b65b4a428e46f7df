//! Core types for circuit representation.

use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub String);

        impl $name {
            /// The raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of an input source.
    SourceId
);
string_id!(
    /// Identifier of a gate.
    GateId
);
string_id!(
    /// Identifier of a connection.
    ConnectionId
);

/// A position on the board, in board units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The boolean function a gate computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateType {
    And,
    Or,
    Nand,
    Xor,
    Not,
}

impl GateType {
    /// Every gate type, in toolbar order.
    pub const ALL: [GateType; 5] = [
        GateType::And,
        GateType::Not,
        GateType::Nand,
        GateType::Or,
        GateType::Xor,
    ];

    /// Number of input terminals a gate of this type is created with.
    pub fn inputs_count(&self) -> usize {
        match self {
            GateType::Not => 1,
            GateType::And | GateType::Or | GateType::Nand | GateType::Xor => 2,
        }
    }

    /// Upper-case label, also used as the gate id prefix.
    pub fn label(&self) -> &'static str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Nand => "NAND",
            GateType::Xor => "XOR",
            GateType::Not => "NOT",
        }
    }

    /// Parse a gate type keyword (case-insensitive).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AND" => Some(GateType::And),
            "OR" => Some(GateType::Or),
            "NAND" => Some(GateType::Nand),
            "XOR" => Some(GateType::Xor),
            "NOT" => Some(GateType::Not),
            _ => None,
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What drives a connection: a source or another gate's output.
///
/// Resolved once when the connection is created, so propagation never has
/// to probe both collections for an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Driver {
    Source(SourceId),
    Gate(GateId),
}

impl Driver {
    /// The raw id of the driving entity.
    pub fn id(&self) -> &str {
        match self {
            Driver::Source(id) => id.as_str(),
            Driver::Gate(id) => id.as_str(),
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, Driver::Source(_))
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_count() {
        assert_eq!(GateType::Not.inputs_count(), 1);
        for ty in [GateType::And, GateType::Or, GateType::Nand, GateType::Xor] {
            assert_eq!(ty.inputs_count(), 2);
        }
    }

    #[test]
    fn test_gate_type_keyword() {
        assert_eq!(GateType::from_keyword("nand"), Some(GateType::Nand));
        assert_eq!(GateType::from_keyword("Xor"), Some(GateType::Xor));
        assert_eq!(GateType::from_keyword("NOR"), None);
        for ty in GateType::ALL {
            assert_eq!(GateType::from_keyword(ty.label()), Some(ty));
        }
    }

    #[test]
    fn test_driver_id() {
        let driver = Driver::Gate(GateId::from("AND_1"));
        assert_eq!(driver.id(), "AND_1");
        assert!(!driver.is_source());
        assert!(Driver::Source(SourceId::from("source_0")).is_source());
    }
}
