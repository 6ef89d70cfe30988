//! Error handling for SchemKit
//!
//! Provides error types for all layers of the library:
//! - Routing errors (wire path computation)
//! - Geometry errors (degenerate numeric input)
//! - Circuit errors (component/terminal bookkeeping)
//!
//! All error types use `thiserror` for ergonomic error handling. Every failure
//! is deterministic: the same inputs fail identically on retry, so no variant
//! here is ever worth retrying.

use thiserror::Error;

/// Wire-routing error type
///
/// Represents failures of the automatic orthogonal router. These are either
/// caller precondition violations or tolerance inconsistencies; none of them
/// are recoverable by re-running the router.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// The same terminal was passed as both ends of a wire
    #[error("`from` and `to` terminals are identical; wires must have different terminals at each end")]
    IdenticalTerminals,

    /// Cardinalized directions are neither parallel nor perpendicular
    ///
    /// Only reachable when the snapping tolerance admits a pair of directions
    /// whose dot product is neither close to 0 nor close to ±1.
    #[error("terminal directions ({from_dot:.4} dot product after snapping) are neither parallel nor perpendicular")]
    ObliqueDirections {
        /// Dot product of the two cardinalized unit directions.
        from_dot: f64,
    },
}

/// Geometric degeneracy error type
///
/// Raised instead of propagating NaN/inf when numeric input admits no valid
/// solution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A direction vector of zero length was supplied
    #[error("direction vector has zero length")]
    ZeroVector,

    /// Three-point arc request with collinear points
    ///
    /// The perpendicular-bisector intersection matrix is singular, so no
    /// circumscribed circle exists.
    #[error("arc through collinear points ({x:.4}, {y:.4}) has no circumcircle")]
    CollinearPoints {
        /// x-ordinate of the offending waypoint.
        x: f64,
        /// y-ordinate of the offending waypoint.
        y: f64,
    },

    /// Arc chord longer than the circle diameter
    ///
    /// The arcsin argument left `[-1, 1]` by more than floating-point noise.
    #[error("arc chord {chord:.4} exceeds circle diameter {diameter:.4}")]
    ChordExceedsDiameter {
        /// The straight-line distance between the arc endpoints.
        chord: f64,
        /// The diameter of the circle implied by the waypoint.
        diameter: f64,
    },

    /// Two lines expected to intersect are parallel
    #[error("lines are parallel and do not intersect")]
    ParallelLines,
}

/// Circuit bookkeeping error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// A terminal was passed that no component in the circuit owns
    #[error("terminal with end coordinates ({x:.4}, {y:.4}) does not belong to any component in this circuit")]
    ForeignTerminal {
        /// x-ordinate of the terminal's end point.
        x: f64,
        /// y-ordinate of the terminal's end point.
        y: f64,
    },

    /// A terminal id could not be resolved against the circuit
    #[error("unknown terminal id {id}")]
    UnknownTerminal {
        /// The unresolvable id, rendered as a string.
        id: String,
    },

    /// A component id could not be resolved against the circuit
    #[error("unknown component id {id}")]
    UnknownComponent {
        /// The unresolvable id, rendered as a string.
        id: String,
    },

    /// A voltage id could not be resolved against the circuit
    #[error("unknown voltage id {id}")]
    UnknownVoltage {
        /// The unresolvable id, rendered as a string.
        id: String,
    },

    /// Dynamic terminal creation requested on a fixed-terminal component
    #[error("component has a fixed terminal set; only nodes create terminals on demand")]
    FixedTerminals,
}

/// Main error type for SchemKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Wire-routing error
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// Geometric degeneracy
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Circuit bookkeeping error
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a routing error
    pub fn is_routing_error(&self) -> bool {
        matches!(self, Error::Routing(_))
    }

    /// Check if this is a geometric degeneracy
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_error_display() {
        let err = RoutingError::IdenticalTerminals;
        assert!(err.to_string().contains("identical"));

        let err = RoutingError::ObliqueDirections { from_dot: 0.5 };
        assert!(err.to_string().contains("neither parallel nor perpendicular"));
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::CollinearPoints { x: 1.0, y: 2.0 };
        assert_eq!(
            err.to_string(),
            "arc through collinear points (1.0000, 2.0000) has no circumcircle"
        );

        let err = GeometryError::ChordExceedsDiameter {
            chord: 4.0,
            diameter: 2.0,
        };
        assert!(err.to_string().contains("exceeds circle diameter"));
    }

    #[test]
    fn test_circuit_error_display() {
        let err = CircuitError::ForeignTerminal { x: 0.5, y: -1.0 };
        assert_eq!(
            err.to_string(),
            "terminal with end coordinates (0.5000, -1.0000) does not belong to any component in this circuit"
        );
    }

    #[test]
    fn test_error_conversion() {
        let routing: Error = RoutingError::IdenticalTerminals.into();
        assert!(routing.is_routing_error());

        let geometry: Error = GeometryError::ZeroVector.into();
        assert!(geometry.is_geometry_error());
        assert!(!geometry.is_routing_error());
    }
}
