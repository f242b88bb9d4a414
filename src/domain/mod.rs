// ============================================================
// Domain Layer
// ============================================================
// Pure Rust structs and traits describing the classifier's
// external contract.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//
// shape.rs : input geometry and the shape arithmetic that
//             fixes every layer width at construction time
// traits.rs: the Scorer abstraction the inferencer implements

/// Input geometry and derived feature sizes
pub mod shape;

/// Core abstractions implemented by the ml layer
pub mod traits;
