//! Core analysis for the ifx implement-interface code fix.
//!
//! Given a type declaration and the interfaces it declares but does not fully
//! implement (supplied by an external diagnostic source), this crate computes
//! the missing members, finds delegation receivers, renames colliding type
//! parameters, and selects the applicable fix strategies. The result is an
//! [`ImplementationPlan`] consumed by `ifx-synth`.
//!
//! The engine is stateless between invocations: every call reads the
//! externally owned [`ifx_model::SemanticModel`] and builds transient data
//! only. Concurrent invocations over one model are safe.

pub mod closure;
pub mod delegation;
pub mod finder;
pub mod matching;
pub mod rename;
pub mod strategy;
pub mod substitute;

pub use closure::interface_closure;
pub use delegation::{
    DelegationCandidate, DelegationKind, find_delegation_targets, member_requires_cast,
    type_satisfies_interface,
};
pub use finder::{MissingByInterface, MissingMember, find_missing, is_fully_implemented};
pub use matching::{MemberMatchResult, match_member};
pub use rename::{RenameMap, rename_type_params};
pub use strategy::{
    ImplMode, ImplementationPlan, PlanEntry, StrategyDescriptor, StrategyKind, apply, apply_batch,
    is_dispose_member, list_strategies,
};
pub use substitute::{
    TypeSubstitution, instantiate_interface_ref, instantiate_type, substitute_members,
    substitute_signature,
};
