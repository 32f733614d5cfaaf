//! Unimplemented-member finder.
//!
//! For each interface a type declares, expands the interface closure,
//! substitutes every member into the implementer's vocabulary, and filters
//! out members an existing declaration already satisfies. What remains is the
//! per-interface "to implement" set, in interface declaration order.

use crate::closure::interface_closure;
use crate::matching::{MemberMatchResult, blocks_implicit, is_satisfying, match_member};
use crate::substitute::{
    TypeSubstitution, mark_inaccessible_explicit_only, requires_implementation,
    substitute_members, substitute_signature,
};
use ifx_common::CancellationToken;
use ifx_model::{
    Accessors, InterfaceRef, MemberSignature, SemanticModel, SymbolId,
};
use indexmap::IndexMap;
use tracing::debug;

/// One member still missing from the implementing type.
#[derive(Clone, Debug)]
pub struct MissingMember {
    /// The substituted, implementer-vocabulary signature to generate.
    /// `explicit_only` is set when the implicit route is unavailable.
    pub signature: MemberSignature,
    /// The accessors actually missing. Usually equals the signature's
    /// accessor set; smaller when an existing partial property satisfies some
    /// accessors (the full member is still re-synthesized, explicitly).
    pub missing_accessors: Accessors,
}

/// Map from each interface in the declared closures to its missing members.
/// Preserves declared-interface-list order, then closure discovery order;
/// member order inside an interface is never permuted (layout-significant
/// interfaces rely on this).
pub type MissingByInterface = IndexMap<InterfaceRef, Vec<MissingMember>>;

/// Compute the missing members of `implementer` for the given declared
/// interface references. Returns `None` only on cancellation.
///
/// Declared references that are malformed (wrong arity, not an interface)
/// contribute nothing: the feature is inert for them.
pub fn find_missing(
    model: &SemanticModel,
    implementer: SymbolId,
    declared: &[InterfaceRef],
    token: &CancellationToken,
) -> Option<MissingByInterface> {
    let mut result = MissingByInterface::default();
    let candidates = collect_candidates(model, implementer);
    let allow_abstract = model.symbol(implementer).is_abstract;
    let implementer_assembly = model.symbol(implementer).assembly;

    for root in declared {
        if token.is_cancelled() {
            return None;
        }
        let Some(closure) = interface_closure(model, root) else {
            debug!(
                "interface reference is unusable, skipping: {}",
                model.display_interface_ref(root)
            );
            continue;
        };
        for iface in closure {
            if token.is_cancelled() {
                return None;
            }
            if result.contains_key(&iface) {
                // Already reached through another declared interface.
                continue;
            }
            let missing = missing_for_interface(
                model,
                &iface,
                &candidates,
                allow_abstract,
                implementer_assembly,
                token,
            )?;
            if !missing.is_empty() {
                result.insert(iface, missing);
            }
        }
    }
    Some(result)
}

fn missing_for_interface(
    model: &SemanticModel,
    iface: &InterfaceRef,
    candidates: &[MemberSignature],
    allow_abstract: bool,
    implementer_assembly: u32,
    token: &CancellationToken,
) -> Option<Vec<MissingMember>> {
    let mut missing = Vec::new();

    for mut wanted in substitute_members(model, iface) {
        if token.is_cancelled() {
            return None;
        }
        if !requires_implementation(&wanted) {
            continue;
        }
        mark_inaccessible_explicit_only(model, &mut wanted, implementer_assembly);
        if wanted.return_type.is_error() || wanted.params.iter().any(|p| p.ty.is_error()) {
            // Fundamentally unexpressible; synthesis would produce invalid
            // code, so the member is silently dropped.
            continue;
        }

        let mut satisfied = false;
        let mut force_explicit = false;
        let mut missing_accessors = wanted.accessors;

        for candidate in candidates {
            match match_member(model, candidate, iface, &wanted, allow_abstract) {
                ref m if is_satisfying(m) => {
                    satisfied = true;
                    break;
                }
                MemberMatchResult::PartiallyImplemented(still_missing) => {
                    force_explicit = true;
                    missing_accessors = still_missing;
                }
                ref m if blocks_implicit(m) => {
                    force_explicit = true;
                }
                _ => {}
            }
        }
        if satisfied {
            continue;
        }
        if force_explicit {
            wanted.explicit_only = true;
        }
        missing.push(MissingMember {
            signature: wanted,
            missing_accessors,
        });
    }
    Some(missing)
}

/// Members eligible to satisfy interface members: the type's own declarations
/// plus the (substituted) members of every base class.
fn collect_candidates(model: &SemanticModel, implementer: SymbolId) -> Vec<MemberSignature> {
    let mut candidates: Vec<MemberSignature> = model.members(implementer).to_vec();
    for base in model.base_class_chain(implementer) {
        let data = model.symbol(base.symbol);
        let subst = TypeSubstitution::from_args(&data.type_params, &base.args);
        for member in &data.members {
            candidates.push(substitute_signature(model, member, &subst));
        }
    }
    candidates
}

/// Convenience used by idempotence checks: is the type fully implemented for
/// all the given interfaces?
pub fn is_fully_implemented(
    model: &SemanticModel,
    implementer: SymbolId,
    declared: &[InterfaceRef],
    token: &CancellationToken,
) -> bool {
    find_missing(model, implementer, declared, token)
        .map(|missing| missing.is_empty())
        .unwrap_or(false)
}
