//! Member synthesis.
//!
//! Turns an [`ImplementationPlan`] into declaration nodes. Kind-specific
//! rules are dispatched by matching on [`ifx_model::MemberKind`] and the
//! entry's [`ImplMode`]; the dispose pattern expands into its own group of
//! declarations.

use crate::declaration::{Body, DisposeBoolVisibility, MemberDecl, Receiver, SynthDecl};
use ifx_engine::{ImplMode, ImplementationPlan, PlanEntry};
use ifx_model::{MemberSignature, SemanticModel, TypeId};
use tracing::debug;

/// Synthesize every member of the plan, in plan order.
///
/// Members whose signature still mentions an unrepresentable type are
/// skipped (fail gracefully, never emit invalid syntax).
pub fn synthesize(model: &SemanticModel, plan: &ImplementationPlan) -> Vec<SynthDecl> {
    let mut decls = Vec::new();
    let mut dispose_emitted = false;

    for entry in &plan.entries {
        if signature_unrepresentable(&entry.member.signature) {
            debug!(
                "skipping unrepresentable member {}",
                model.interner.resolve(entry.member.signature.name)
            );
            continue;
        }
        match &entry.mode {
            ImplMode::DisposePattern { explicit } => {
                if !dispose_emitted {
                    decls.extend(dispose_group(model, plan, entry, *explicit));
                    dispose_emitted = true;
                }
            }
            mode => decls.push(SynthDecl::Member(member_decl(entry, mode))),
        }
    }
    decls
}

fn member_decl(entry: &PlanEntry, mode: &ImplMode) -> MemberDecl {
    let signature = entry.member.signature.clone();
    match mode {
        ImplMode::Implicit => MemberDecl {
            signature,
            explicit_interface: None,
            is_abstract: false,
            body: Body::ThrowNotImplemented,
        },
        ImplMode::Explicit => MemberDecl {
            signature,
            explicit_interface: Some(entry.interface.clone()),
            is_abstract: false,
            body: Body::ThrowNotImplemented,
        },
        ImplMode::Abstract => {
            // Operators and static members cannot be abstract on a class;
            // they degrade to throw-bodied stubs.
            if signature.is_operator() || signature.is_static() {
                MemberDecl {
                    signature,
                    explicit_interface: None,
                    is_abstract: false,
                    body: Body::ThrowNotImplemented,
                }
            } else {
                MemberDecl {
                    signature,
                    explicit_interface: None,
                    is_abstract: true,
                    body: Body::None,
                }
            }
        }
        ImplMode::ThroughMember { receiver, cast_to } => MemberDecl {
            signature,
            explicit_interface: None,
            is_abstract: false,
            body: Body::Forward(Receiver {
                member: *receiver,
                cast_to: cast_to.clone(),
            }),
        },
        // Handled by the caller.
        ImplMode::DisposePattern { explicit } => MemberDecl {
            signature,
            explicit_interface: explicit.then(|| entry.interface.clone()),
            is_abstract: false,
            body: Body::ThrowNotImplemented,
        },
    }
}

/// The dispose-pattern group: guard field, `Dispose(bool)`, the commented-out
/// finalizer, and the interface `Dispose()`.
fn dispose_group(
    model: &SemanticModel,
    plan: &ImplementationPlan,
    entry: &PlanEntry,
    explicit: bool,
) -> Vec<SynthDecl> {
    let Some(guard) = plan.dispose_guard_field else {
        // No usable guard name: degrade to a plain stub.
        return vec![SynthDecl::Member(member_decl(
            entry,
            &if explicit {
                ImplMode::Explicit
            } else {
                ImplMode::Implicit
            },
        ))];
    };
    let target = model.symbol(plan.target);
    let visibility = if target.is_sealed {
        DisposeBoolVisibility::Private
    } else {
        DisposeBoolVisibility::ProtectedVirtual
    };
    vec![
        SynthDecl::DisposeGuardField { name: guard },
        SynthDecl::DisposeBoolMethod { guard, visibility },
        SynthDecl::FinalizerComment {
            class_name: target.name,
        },
        SynthDecl::DisposeMethod {
            explicit: explicit.then(|| entry.interface.clone()),
        },
    ]
}

fn signature_unrepresentable(sig: &MemberSignature) -> bool {
    sig.return_type == TypeId::ERROR
        || sig.params.iter().any(|p| p.ty == TypeId::ERROR)
        || sig
            .type_params
            .iter()
            .any(|tp| tp.constraints.iter().any(|&c| c == TypeId::ERROR))
}
