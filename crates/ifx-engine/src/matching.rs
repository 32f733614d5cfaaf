//! Signature matching.
//!
//! Decides whether a member already present on the implementing type (or a
//! base class) satisfies an interface member: same kind, same name (or an
//! explicit implementation targeting exactly this interface member), same
//! arity and parameter types after substitution, compatible passing modes,
//! and, for properties and events, per-accessor satisfaction.

use crate::substitute::{TypeSubstitution, instantiate_type};
use ifx_model::{Accessors, InterfaceRef, MemberKind, MemberSignature, SemanticModel};

/// Result of matching one candidate member against one interface member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberMatchResult {
    NoMatch,
    FullyImplemented,
    /// Same name and type, but some required accessors are missing. Carries
    /// the missing accessor set. A partial property blocks the implicit
    /// route: the full member must be re-synthesized explicitly.
    PartiallyImplemented(Accessors),
    /// Name and arity match but the signature is incompatible (return type or
    /// parameter types differ). Blocks the implicit route.
    ConflictingSignature,
}

/// Match `candidate` (an existing member of the implementer or a base class)
/// against `wanted` (a substituted interface member of `iface`).
///
/// `allow_abstract` is set when the implementing type is abstract, in which
/// case an abstract declaration counts as satisfying.
pub fn match_member(
    model: &SemanticModel,
    candidate: &MemberSignature,
    iface: &InterfaceRef,
    wanted: &MemberSignature,
    allow_abstract: bool,
) -> MemberMatchResult {
    // An explicit implementation satisfies exactly its recorded target.
    if let Some(explicit) = &candidate.explicit_impl_of {
        if explicit.interface == iface.symbol
            && explicit.args == iface.args
            && explicit.member == wanted.name
        {
            return MemberMatchResult::FullyImplemented;
        }
        return MemberMatchResult::NoMatch;
    }

    if candidate.kind == MemberKind::Field || candidate.name != wanted.name {
        return MemberMatchResult::NoMatch;
    }
    if candidate.kind != wanted.kind {
        // A non-field member with the right name but wrong kind occupies the
        // name; the implicit route would not compile.
        return MemberMatchResult::ConflictingSignature;
    }
    if candidate.is_static() != wanted.is_static() {
        return MemberMatchResult::ConflictingSignature;
    }
    if candidate.is_abstract() && !allow_abstract {
        return MemberMatchResult::NoMatch;
    }
    // Implicit satisfaction requires a publicly accessible member.
    if !candidate.accessibility.is_public() {
        return MemberMatchResult::ConflictingSignature;
    }

    match wanted.kind {
        MemberKind::Method | MemberKind::OperatorUnary | MemberKind::OperatorBinary
        | MemberKind::OperatorConversion => match_method(model, candidate, wanted),
        MemberKind::Property | MemberKind::Indexer => match_property(candidate, wanted),
        MemberKind::Event => match_event(candidate, wanted),
        MemberKind::Field => MemberMatchResult::NoMatch,
    }
}

fn match_method(
    model: &SemanticModel,
    candidate: &MemberSignature,
    wanted: &MemberSignature,
) -> MemberMatchResult {
    if candidate.type_params.len() != wanted.type_params.len()
        || candidate.params.len() != wanted.params.len()
    {
        return MemberMatchResult::NoMatch;
    }

    // Compare generic methods up to alpha-equivalence: rewrite the
    // candidate's own type parameters to the wanted member's names.
    let mut alpha = TypeSubstitution::new();
    for (own, theirs) in candidate.type_params.iter().zip(&wanted.type_params) {
        alpha.insert(own.name, model.types.type_param(theirs.name));
    }

    for (own, theirs) in candidate.params.iter().zip(&wanted.params) {
        if !own.ref_kind.matches(theirs.ref_kind) {
            return MemberMatchResult::NoMatch;
        }
        if instantiate_type(model, own.ty, &alpha) != theirs.ty {
            return MemberMatchResult::NoMatch;
        }
    }

    if instantiate_type(model, candidate.return_type, &alpha) != wanted.return_type
        || !candidate.return_ref.matches(wanted.return_ref)
    {
        // Same name and parameter list with a different return type cannot
        // coexist with an implicit implementation.
        return MemberMatchResult::ConflictingSignature;
    }

    MemberMatchResult::FullyImplemented
}

fn match_property(candidate: &MemberSignature, wanted: &MemberSignature) -> MemberMatchResult {
    if candidate.params.len() != wanted.params.len() {
        return MemberMatchResult::NoMatch;
    }
    for (own, theirs) in candidate.params.iter().zip(&wanted.params) {
        if own.ty != theirs.ty || !own.ref_kind.matches(theirs.ref_kind) {
            return MemberMatchResult::NoMatch;
        }
    }
    if candidate.return_type != wanted.return_type {
        return MemberMatchResult::ConflictingSignature;
    }

    // `init` satisfies an `init` requirement; a plain setter does not.
    let mut missing = Accessors::empty();
    for required in [Accessors::GET, Accessors::SET, Accessors::INIT] {
        if wanted.accessors.contains(required) && !candidate.accessors.contains(required) {
            missing |= required;
        }
    }
    if missing.is_empty() {
        MemberMatchResult::FullyImplemented
    } else {
        MemberMatchResult::PartiallyImplemented(missing)
    }
}

fn match_event(candidate: &MemberSignature, wanted: &MemberSignature) -> MemberMatchResult {
    if candidate.return_type != wanted.return_type {
        return MemberMatchResult::ConflictingSignature;
    }
    MemberMatchResult::FullyImplemented
}

/// Does the candidate satisfy the member well enough that nothing needs to be
/// generated for it?
pub fn is_satisfying(result: &MemberMatchResult) -> bool {
    matches!(result, MemberMatchResult::FullyImplemented)
}

/// Does the candidate block the implicit-name route (forcing explicit
/// interface syntax for this member)?
pub fn blocks_implicit(result: &MemberMatchResult) -> bool {
    matches!(
        result,
        MemberMatchResult::PartiallyImplemented(_) | MemberMatchResult::ConflictingSignature
    )
}
