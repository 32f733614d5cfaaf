//! Semantic model for the ifx implement-interface engine.
//!
//! This crate defines the read-only oracle the engine computes over:
//! - Interned structural types (`TypeId`, `TypeData`, `TypeStore`)
//! - Type symbols and declarations (`SymbolId`, `SymbolData`, `InterfaceRef`)
//! - Normalized member signatures (`MemberSignature`, `MemberKind`,
//!   `ParamInfo`, `TypeParamInfo`, `ConstValue`)
//! - The `SemanticModel` facade with builder-style mutators for hosts and
//!   tests
//!
//! The engine never mutates the model; separate fix invocations may read it
//! concurrently.

pub mod model;
pub mod signature;
pub mod symbols;
pub mod types;

pub use model::SemanticModel;
pub use signature::{
    Accessibility, Accessors, ConstValue, ExplicitImplOf, MemberKind, MemberMods, MemberSignature,
    ParamInfo, RefKind, SpecialConstraints, TypeParamInfo,
};
pub use symbols::{InterfaceRef, SymbolData, SymbolId, TypeDefKind};
pub use types::{PrimitiveKind, TypeArgs, TypeData, TypeId, TypeStore};
