//! Centralized limits and thresholds for the ifx engine.
//!
//! Centralizing these values prevents duplicate definitions with inconsistent
//! values and documents the rationale for each limit.

/// Maximum number of distinct substituted interface identities visited while
/// expanding one interface closure.
///
/// A well-formed interface graph is small; this bound only matters for
/// hostile or corrupted symbol tables where substitution keeps producing new
/// `(interface, type-arguments)` identities. When exceeded the closure walk
/// stops and the remaining interfaces are treated as having no members,
/// which degrades to "no fix available" rather than a hang.
pub const MAX_CLOSURE_SIZE: usize = 4_096;

/// Maximum integer suffix tried when freshening a colliding name
/// (`T` → `T1` → `T2` → ...).
///
/// Also applies to the dispose guard field (`disposedValue1`, ...). Collisions
/// past this bound mean the surrounding scope is pathological; the original
/// name is kept and synthesis for the member is abandoned.
pub const MAX_NAME_SUFFIX: u32 = 1_000;

/// Maximum depth for recursive type instantiation.
///
/// Prevents unbounded recursion when substituting through self-referential
/// generic constructions. When exceeded the substitution returns the error
/// type and the member is dropped from the plan.
pub const MAX_INSTANTIATION_DEPTH: u32 = 100;
