//! Delegation ("implement through member") candidates.
//!
//! Scans the implementing type's own instance fields, readable properties,
//! and primary-constructor parameters for members whose declared type already
//! provides the target interface, so the fix can forward calls instead of
//! throwing.

use crate::closure::interface_closure;
use crate::substitute::{TypeSubstitution, instantiate_interface_ref};
use ifx_common::Atom;
use ifx_model::{
    Accessors, InterfaceRef, MemberKind, MemberSignature, SemanticModel, SymbolId, TypeData,
    TypeId,
};
use tracing::trace;

/// A field or property eligible to receive forwarded interface calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelegationCandidate {
    /// Name of the field / property / primary-constructor parameter.
    pub member_name: Atom,
    /// Its declared type.
    pub member_type: TypeId,
    pub kind: DelegationKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DelegationKind {
    Field,
    Property,
    PrimaryCtorParameter,
}

/// Find every member of `implementer` that can delegate `iface`.
///
/// One candidate per eligible member: when several fields qualify, the caller
/// surfaces one distinctly named action per field. Write-only properties and
/// indexers cannot be read back for forwarding and are excluded, as are
/// static members.
pub fn find_delegation_targets(
    model: &SemanticModel,
    implementer: SymbolId,
    iface: &InterfaceRef,
) -> Vec<DelegationCandidate> {
    let mut candidates = Vec::new();
    let data = model.symbol(implementer);

    for member in &data.members {
        if member.is_static() {
            continue;
        }
        let eligible = match member.kind {
            MemberKind::Field => true,
            // Readable, non-indexer properties only.
            MemberKind::Property => member.accessors.contains(Accessors::GET),
            _ => false,
        };
        if !eligible {
            continue;
        }
        if type_satisfies_interface(model, member.return_type, iface) {
            candidates.push(DelegationCandidate {
                member_name: member.name,
                member_type: member.return_type,
                kind: if member.kind == MemberKind::Field {
                    DelegationKind::Field
                } else {
                    DelegationKind::Property
                },
            });
        }
    }

    for param in &data.primary_ctor_params {
        if type_satisfies_interface(model, param.ty, iface) {
            candidates.push(DelegationCandidate {
                member_name: param.name,
                member_type: param.ty,
                kind: DelegationKind::PrimaryCtorParameter,
            });
        }
    }

    trace!(
        "{} delegation candidate(s) for {}",
        candidates.len(),
        model.display_interface_ref(iface)
    );
    candidates
}

/// Does `ty` provide `iface`, either by being that exact instantiation or by
/// implementing it (transitively, with substitution)?
pub fn type_satisfies_interface(model: &SemanticModel, ty: TypeId, iface: &InterfaceRef) -> bool {
    let TypeData::Named { symbol, args } = model.types.lookup(ty) else {
        return false;
    };
    let data = model.symbol(symbol);

    if symbol == iface.symbol && args[..] == iface.args[..] {
        return true;
    }

    if data.is_interface() {
        let this_ref = InterfaceRef { symbol, args };
        return interface_closure(model, &this_ref)
            .is_some_and(|closure| closure.contains(iface));
    }

    // Class / struct: walk declared interfaces of the type and its base
    // classes, substituting type arguments at each level.
    let mut current = Some(InterfaceRef { symbol, args });
    while let Some(type_ref) = current {
        let type_data = model.symbol(type_ref.symbol);
        if type_data.arity() != type_ref.args.len() {
            return false;
        }
        let subst = TypeSubstitution::from_args(&type_data.type_params, &type_ref.args);
        for base_iface in &type_data.base_interfaces {
            let substituted = instantiate_interface_ref(model, base_iface, &subst);
            if substituted == *iface {
                return true;
            }
            if interface_closure(model, &substituted)
                .is_some_and(|closure| closure.contains(iface))
            {
                return true;
            }
        }
        current = type_data
            .base_class
            .as_ref()
            .map(|base| instantiate_interface_ref(model, base, &subst));
    }
    false
}

/// Must a forwarding call through a receiver of type `receiver_ty` cast to
/// the interface first?
///
/// Interface-typed receivers expose the member directly. Class/struct-typed
/// receivers expose it only if some accessible member implements it
/// implicitly; a receiver type that implements the member through explicit
/// interface syntax needs `((IFace)receiver).Member(...)`.
pub fn member_requires_cast(
    model: &SemanticModel,
    receiver_ty: TypeId,
    iface: &InterfaceRef,
    member: &MemberSignature,
) -> bool {
    let TypeData::Named { symbol, args } = model.types.lookup(receiver_ty) else {
        return false;
    };
    let data = model.symbol(symbol);
    if data.is_interface() {
        return false;
    }

    // Look for a public implicit member with the right name on the receiver
    // type or its base classes.
    let mut current = Some(InterfaceRef { symbol, args });
    while let Some(type_ref) = current {
        let type_data = model.symbol(type_ref.symbol);
        for candidate in &type_data.members {
            if candidate.explicit_impl_of.is_none()
                && candidate.kind == member.kind
                && candidate.name == member.name
                && candidate.accessibility.is_public()
            {
                return false;
            }
        }
        let subst = TypeSubstitution::from_args(&type_data.type_params, &type_ref.args);
        current = type_data
            .base_class
            .as_ref()
            .map(|base| instantiate_interface_ref(model, base, &subst));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_only_property_is_not_a_candidate() {
        let mut model = SemanticModel::new();
        let iface = model.add_interface("IGoo");
        let class = model.add_class("C");
        let iface_ty = model.types.named(iface, []);

        let name = model.atom("WriteOnly");
        let mut prop = MemberSignature::property(name, iface_ty, Accessors::SET);
        prop.kind = MemberKind::Property;
        model.add_member(class, prop);

        let target = InterfaceRef::non_generic(iface);
        assert!(find_delegation_targets(&model, class, &target).is_empty());
    }

    #[test]
    fn interface_typed_receiver_needs_no_cast() {
        let mut model = SemanticModel::new();
        let iface = model.add_interface("IGoo");
        let m = model.atom("M");
        let sig = MemberSignature::method(m, vec![], TypeId::VOID);
        model.add_member(iface, sig.clone());
        let iface_ty = model.types.named(iface, []);

        assert!(!member_requires_cast(
            &model,
            iface_ty,
            &InterfaceRef::non_generic(iface),
            &sig
        ));
    }
}
