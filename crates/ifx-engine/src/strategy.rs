//! Fix-strategy selection and plan construction.
//!
//! Composes the finder, delegation scanner, and renamer into the ordered list
//! of applicable strategies, and turns a chosen strategy into an
//! [`ImplementationPlan`] for the synthesizer. "Nothing to do" is an empty
//! strategy list, never an error.

use crate::delegation::{
    DelegationCandidate, find_delegation_targets, member_requires_cast, type_satisfies_interface,
};
use crate::finder::{MissingByInterface, MissingMember, find_missing};
use crate::rename::rename_type_params;
use ifx_common::limits::MAX_NAME_SUFFIX;
use ifx_common::{Atom, CancellationToken};
use ifx_model::{
    InterfaceRef, MemberKind, SemanticModel, SymbolId, TypeDefKind, TypeId,
};
use rustc_hash::FxHashSet;
use tracing::debug;

/// The strategy families, in the fixed priority order they are offered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Implement everything with public members (forced-explicit members
    /// still come out explicit).
    ImplicitAll,
    /// Forward members to an existing field / property.
    ThroughMember,
    /// Implement everything with explicit interface syntax.
    ExplicitAll,
    /// Declare the members abstract (abstract classes only).
    Abstract,
}

/// One offered fix, ready to be shown to a caller and applied.
#[derive(Clone, Debug)]
pub struct StrategyDescriptor {
    pub kind: StrategyKind,
    /// For `ThroughMember`: the receiving field / property.
    pub through_member: Option<Atom>,
    /// Synthesize the finalizer-safe dispose pattern for `Dispose()` instead
    /// of a plain stub.
    pub dispose_pattern: bool,
    /// When set, only this declared interface is fixed ("fix one" mode);
    /// other interfaces' diagnostics are left untouched.
    pub only_interface: Option<InterfaceRef>,
    /// Display title ("Implement interface through 'goo'").
    pub title: String,
}

/// How one member is to be generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImplMode {
    Implicit,
    ThroughMember {
        receiver: Atom,
        /// Set when the receiver's type implements the member only
        /// explicitly, so forwarding must cast to the interface first.
        cast_to: Option<InterfaceRef>,
    },
    Explicit,
    Abstract,
    DisposePattern { explicit: bool },
}

/// One member to generate.
#[derive(Clone, Debug)]
pub struct PlanEntry {
    pub interface: InterfaceRef,
    pub member: MissingMember,
    pub mode: ImplMode,
}

/// The unit of output: everything the synthesizer needs for one application
/// of one strategy. Created per invocation and discarded after use.
#[derive(Clone, Debug)]
pub struct ImplementationPlan {
    pub target: SymbolId,
    pub entries: Vec<PlanEntry>,
    /// For dispose-pattern plans: the collision-avoided guard field name.
    pub dispose_guard_field: Option<Atom>,
}

impl ImplementationPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the ordered list of applicable strategies for `implementer` and
/// the interfaces reported missing. Returns an empty list when there is
/// nothing to fix (or on cancellation).
pub fn list_strategies(
    model: &SemanticModel,
    implementer: SymbolId,
    declared: &[InterfaceRef],
    token: &CancellationToken,
) -> Vec<StrategyDescriptor> {
    let Some(missing) = find_missing(model, implementer, declared, token) else {
        return Vec::new();
    };
    if missing.is_empty() {
        return Vec::new();
    }

    let mut strategies = Vec::new();
    let any_implicit = missing
        .values()
        .flatten()
        .any(|m| !m.signature.explicit_only);

    // (1) implicit-implement-all
    if any_implicit {
        strategies.push(StrategyDescriptor {
            kind: StrategyKind::ImplicitAll,
            through_member: None,
            dispose_pattern: false,
            only_interface: None,
            title: "Implement interface".to_string(),
        });
    }

    // (2) one implicit-through-member action per eligible candidate, per
    // declared interface.
    for root in declared {
        for candidate in find_delegation_targets(model, implementer, root) {
            let member = model.interner.resolve(candidate.member_name);
            strategies.push(StrategyDescriptor {
                kind: StrategyKind::ThroughMember,
                through_member: Some(candidate.member_name),
                dispose_pattern: false,
                only_interface: Some(root.clone()),
                title: format!("Implement interface through '{member}'"),
            });
        }
    }

    // (3) explicit-implement-all: always expressible.
    strategies.push(StrategyDescriptor {
        kind: StrategyKind::ExplicitAll,
        through_member: None,
        dispose_pattern: false,
        only_interface: None,
        title: "Implement all members explicitly".to_string(),
    });

    // (4) implement-abstractly, on abstract classes only.
    if model.symbol(implementer).is_abstract {
        strategies.push(StrategyDescriptor {
            kind: StrategyKind::Abstract,
            through_member: None,
            dispose_pattern: false,
            only_interface: None,
            title: "Implement interface abstractly".to_string(),
        });
    }

    // (5) dispose-pattern variants crossed with (1)/(3)/(4).
    if dispose_pattern_applies(model, implementer, &missing) {
        let mut dispose = Vec::new();
        if any_implicit {
            dispose.push(StrategyDescriptor {
                kind: StrategyKind::ImplicitAll,
                through_member: None,
                dispose_pattern: true,
                only_interface: None,
                title: "Implement interface with Dispose pattern".to_string(),
            });
        }
        dispose.push(StrategyDescriptor {
            kind: StrategyKind::ExplicitAll,
            through_member: None,
            dispose_pattern: true,
            only_interface: None,
            title: "Implement all members explicitly with Dispose pattern".to_string(),
        });
        if model.symbol(implementer).is_abstract {
            dispose.push(StrategyDescriptor {
                kind: StrategyKind::Abstract,
                through_member: None,
                dispose_pattern: true,
                only_interface: None,
                title: "Implement interface abstractly with Dispose pattern".to_string(),
            });
        }
        strategies.extend(dispose);
    }

    strategies
}

/// Apply a strategy: compute the missing members (honoring "fix one" scope)
/// and produce the plan. Returns `None` on cancellation; an empty plan means
/// the fix is a no-op (idempotence).
pub fn apply(
    model: &SemanticModel,
    implementer: SymbolId,
    declared: &[InterfaceRef],
    descriptor: &StrategyDescriptor,
    token: &CancellationToken,
) -> Option<ImplementationPlan> {
    let scope: Vec<InterfaceRef> = match &descriptor.only_interface {
        Some(only) => vec![only.clone()],
        None => declared.to_vec(),
    };
    let missing = find_missing(model, implementer, &scope, token)?;

    let forbidden: FxHashSet<Atom> = model.type_params_in_scope(implementer).into_iter().collect();
    let wants_dispose =
        descriptor.dispose_pattern && dispose_pattern_applies(model, implementer, &missing);

    let mut entries = Vec::new();
    let mut needs_guard = false;

    for (iface, members) in &missing {
        if token.is_cancelled() {
            return None;
        }
        for member in members {
            if token.is_cancelled() {
                return None;
            }
            let (signature, _renames) = rename_type_params(model, &member.signature, &forbidden);
            let member = MissingMember {
                signature,
                missing_accessors: member.missing_accessors,
            };
            let mode = select_mode(model, implementer, descriptor, iface, &member, wants_dispose);
            if matches!(mode, ImplMode::DisposePattern { .. }) {
                needs_guard = true;
            }
            entries.push(PlanEntry {
                interface: iface.clone(),
                member,
                mode,
            });
        }
    }

    let dispose_guard_field = if needs_guard {
        choose_guard_field_name(model, implementer)
    } else {
        None
    };

    debug!(
        "plan for {}: {} member(s)",
        model.name_of(implementer),
        entries.len()
    );
    Some(ImplementationPlan {
        target: implementer,
        entries,
        dispose_guard_field,
    })
}

/// Batch ("fix all") application: the same strategy kind is applied uniformly
/// across every occurrence, re-resolving delegation candidates per occurrence
/// since the best receiver may differ per type. Occurrences with no
/// applicable plan are skipped.
pub fn apply_batch(
    model: &SemanticModel,
    occurrences: &[(SymbolId, Vec<InterfaceRef>)],
    kind: StrategyKind,
    dispose_pattern: bool,
    token: &CancellationToken,
) -> Option<Vec<ImplementationPlan>> {
    let mut plans = Vec::new();
    for (implementer, declared) in occurrences {
        if token.is_cancelled() {
            return None;
        }
        let descriptor = match kind {
            StrategyKind::ThroughMember => {
                // Re-resolve the receiver for this occurrence.
                let candidate = declared.iter().find_map(|root| {
                    find_delegation_targets(model, *implementer, root)
                        .into_iter()
                        .next()
                        .map(|c: DelegationCandidate| (root.clone(), c))
                });
                let Some((root, candidate)) = candidate else {
                    continue;
                };
                let member = model.interner.resolve(candidate.member_name);
                StrategyDescriptor {
                    kind,
                    through_member: Some(candidate.member_name),
                    dispose_pattern,
                    only_interface: Some(root),
                    title: format!("Implement interface through '{member}'"),
                }
            }
            _ => StrategyDescriptor {
                kind,
                through_member: None,
                dispose_pattern,
                only_interface: None,
                title: String::new(),
            },
        };
        let plan = apply(model, *implementer, declared, &descriptor, token)?;
        if !plan.is_empty() {
            plans.push(plan);
        }
    }
    Some(plans)
}

fn select_mode(
    model: &SemanticModel,
    implementer: SymbolId,
    descriptor: &StrategyDescriptor,
    iface: &InterfaceRef,
    member: &MissingMember,
    wants_dispose: bool,
) -> ImplMode {
    let sig = &member.signature;

    if wants_dispose && is_dispose_member(model, sig) {
        return ImplMode::DisposePattern {
            explicit: matches!(descriptor.kind, StrategyKind::ExplicitAll) || sig.explicit_only,
        };
    }

    match descriptor.kind {
        StrategyKind::ExplicitAll => ImplMode::Explicit,
        StrategyKind::Abstract => {
            if sig.explicit_only {
                ImplMode::Explicit
            } else {
                ImplMode::Abstract
            }
        }
        StrategyKind::ImplicitAll => {
            if sig.explicit_only {
                ImplMode::Explicit
            } else {
                ImplMode::Implicit
            }
        }
        StrategyKind::ThroughMember => {
            let Some(receiver) = descriptor.through_member else {
                // Malformed descriptor; degrade to a plain stub.
                return if sig.explicit_only {
                    ImplMode::Explicit
                } else {
                    ImplMode::Implicit
                };
            };
            let receiver_ty = receiver_type(model, implementer, receiver);
            // Static members and members the receiver cannot provide fall
            // back to plain stubs.
            let forwardable = !sig.is_static()
                && receiver_ty
                    .is_some_and(|ty| type_satisfies_interface(model, ty, iface));
            match (forwardable, receiver_ty) {
                (true, Some(ty)) => {
                    let cast_to = member_requires_cast(model, ty, iface, sig)
                        .then(|| iface.clone());
                    ImplMode::ThroughMember { receiver, cast_to }
                }
                _ if sig.explicit_only => ImplMode::Explicit,
                _ => ImplMode::Implicit,
            }
        }
    }
}

fn receiver_type(model: &SemanticModel, implementer: SymbolId, receiver: Atom) -> Option<TypeId> {
    let data = model.symbol(implementer);
    data.members
        .iter()
        .find(|m| {
            m.name == receiver && matches!(m.kind, MemberKind::Field | MemberKind::Property)
        })
        .map(|m| m.return_type)
        .or_else(|| {
            data.primary_ctor_params
                .iter()
                .find(|p| p.name == receiver)
                .map(|p| p.ty)
        })
}

/// Is this member `void Dispose()`, the disposable shape?
pub fn is_dispose_member(model: &SemanticModel, sig: &ifx_model::MemberSignature) -> bool {
    sig.kind == MemberKind::Method
        && sig.params.is_empty()
        && sig.type_params.is_empty()
        && sig.return_type == TypeId::VOID
        && !sig.is_static()
        && &*model.interner.resolve(sig.name) == "Dispose"
}

/// The dispose pattern is offered when a `Dispose()` member is missing, the
/// target is a class (not a struct), and the type does not already carry a
/// `Dispose(bool)` method.
fn dispose_pattern_applies(
    model: &SemanticModel,
    implementer: SymbolId,
    missing: &MissingByInterface,
) -> bool {
    let data = model.symbol(implementer);
    if data.kind != TypeDefKind::Class {
        return false;
    }
    let already_has_dispose_bool = data.members.iter().any(|m| {
        m.kind == MemberKind::Method
            && &*model.interner.resolve(m.name) == "Dispose"
            && m.params.len() == 1
            && m.params[0].ty == TypeId::BOOL
    });
    if already_has_dispose_bool {
        return false;
    }
    missing
        .values()
        .flatten()
        .any(|m| is_dispose_member(model, &m.signature))
}

/// Pick a guard-field name that does not collide with any existing member,
/// suffixing digits as needed (`disposedValue`, `disposedValue1`, ...).
fn choose_guard_field_name(model: &SemanticModel, implementer: SymbolId) -> Option<Atom> {
    let data = model.symbol(implementer);
    let taken: FxHashSet<Atom> = data
        .members
        .iter()
        .map(|m| m.name)
        .chain(data.primary_ctor_params.iter().map(|p| p.name))
        .collect();

    let base = model.interner.intern("disposedValue");
    if !taken.contains(&base) {
        return Some(base);
    }
    for suffix in 1..=MAX_NAME_SUFFIX {
        let candidate = model.interner.intern(&format!("disposedValue{suffix}"));
        if !taken.contains(&candidate) {
            return Some(candidate);
        }
    }
    None
}
