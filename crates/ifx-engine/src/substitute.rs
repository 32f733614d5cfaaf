//! Generic substitution.
//!
//! [`TypeSubstitution`] maps type-parameter names to concrete types;
//! [`instantiate_type`] applies a substitution recursively through a
//! structural type. [`substitute_members`] rewrites every member declared on
//! an interface into the implementer's vocabulary for one base-list entry
//! (`IInterface1<int>`), flagging members whose substituted constraints can
//! no longer be legally re-declared.

use crate::rename::rename_type_params;
use ifx_common::Atom;
use ifx_common::limits::MAX_INSTANTIATION_DEPTH;
use ifx_model::{
    Accessibility, ConstValue, InterfaceRef, MemberMods, MemberSignature, PrimitiveKind,
    SemanticModel, TypeData, TypeDefKind, TypeId, TypeParamInfo,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// A mapping from type-parameter names to substituted types.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<Atom, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a substitution pairing `type_params[i]` with `args[i]`.
    /// Extra arguments (arity mismatch) are ignored; callers validate arity
    /// before substituting.
    pub fn from_args(type_params: &[TypeParamInfo], args: &[TypeId]) -> Self {
        let mut subst = Self::new();
        for (param, &arg) in type_params.iter().zip(args) {
            subst.insert(param.name, arg);
        }
        subst
    }

    pub fn insert(&mut self, name: Atom, ty: TypeId) {
        self.map.insert(name, ty);
    }

    pub fn get(&self, name: Atom) -> Option<TypeId> {
        self.map.get(&name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn values(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.map.values().copied()
    }
}

/// Apply a substitution to a type, rebuilding interned nodes bottom-up.
pub fn instantiate_type(model: &SemanticModel, ty: TypeId, subst: &TypeSubstitution) -> TypeId {
    instantiate_at_depth(model, ty, subst, 0)
}

fn instantiate_at_depth(
    model: &SemanticModel,
    ty: TypeId,
    subst: &TypeSubstitution,
    depth: u32,
) -> TypeId {
    if depth > MAX_INSTANTIATION_DEPTH {
        return TypeId::ERROR;
    }
    if subst.is_empty() {
        return ty;
    }
    match model.types.lookup(ty) {
        TypeData::Error | TypeData::Primitive(_) => ty,
        TypeData::TypeParam { name } => subst.get(name).unwrap_or(ty),
        TypeData::Array(inner) => {
            let inner = instantiate_at_depth(model, inner, subst, depth + 1);
            model.types.array(inner)
        }
        TypeData::Nullable(inner) => {
            let inner = instantiate_at_depth(model, inner, subst, depth + 1);
            model.types.nullable(inner)
        }
        TypeData::Named { symbol, args } => {
            if args.is_empty() {
                return ty;
            }
            let args = args
                .iter()
                .map(|&arg| instantiate_at_depth(model, arg, subst, depth + 1));
            model.types.named(symbol, args)
        }
    }
}

/// Instantiate an interface reference whose arguments may mention the
/// type parameters bound by `subst` (used when composing base-interface
/// references with the current argument map).
pub fn instantiate_interface_ref(
    model: &SemanticModel,
    iface: &InterfaceRef,
    subst: &TypeSubstitution,
) -> InterfaceRef {
    InterfaceRef {
        symbol: iface.symbol,
        args: iface
            .args
            .iter()
            .map(|&arg| instantiate_type(model, arg, subst))
            .collect(),
    }
}

/// Substitute every member declared directly on `iface`'s symbol into the
/// implementer's vocabulary. Members of base interfaces are *not* included;
/// the closure walk re-invokes this per base reference.
pub fn substitute_members(model: &SemanticModel, iface: &InterfaceRef) -> Vec<MemberSignature> {
    let data = model.symbol(iface.symbol);
    let subst = TypeSubstitution::from_args(&data.type_params, &iface.args);

    data.members
        .iter()
        .map(|member| substitute_signature(model, member, &subst))
        .collect()
}

/// Apply a substitution across one member signature: parameter types, return
/// type, constraint clauses, and `default(T)` default values.
pub fn substitute_signature(
    model: &SemanticModel,
    member: &MemberSignature,
    subst: &TypeSubstitution,
) -> MemberSignature {
    let mut sig = avoid_capture(model, member, subst);

    for param in &mut sig.params {
        // Only a default whose *type* was a substituted generic parameter is
        // re-validated; concrete-typed defaults carry through unchanged.
        let was_substituted_param = matches!(
            model.types.lookup(param.ty),
            TypeData::TypeParam { name } if subst.get(name).is_some()
        );
        param.ty = instantiate_type(model, param.ty, subst);
        if was_substituted_param && matches!(param.default, Some(ConstValue::Default)) {
            param.default = Some(revalidate_default(model, param.ty));
        }
    }
    sig.return_type = instantiate_type(model, sig.return_type, subst);

    let mut unexpressible = false;
    for tp in &mut sig.type_params {
        for constraint in &mut tp.constraints {
            *constraint = instantiate_type(model, *constraint, subst);
            if !is_expressible_constraint(model, *constraint) {
                unexpressible = true;
            }
        }
    }
    if unexpressible {
        // Explicit implementations reuse the interface's own constraints and
        // omit the where clause, so they stay legal.
        sig.explicit_only = true;
    }
    if !sig.accessibility.is_public() {
        sig.explicit_only = true;
    }
    if sig.is_static() && sig.is_abstract() && sig.is_operator() {
        // Static abstract operators can only be implemented with explicit
        // interface syntax on the implementing type.
        sig.explicit_only = true;
    }
    sig
}

/// Rename away the member's own type parameters whose name also arrives
/// inside the substituted arguments (`I<T>` instantiated with the
/// implementer's `S` must not capture a member-declared `S`). Must run
/// before the substitution is applied, while the two namespaces are still
/// distinguishable.
fn avoid_capture(
    model: &SemanticModel,
    member: &MemberSignature,
    subst: &TypeSubstitution,
) -> MemberSignature {
    if member.type_params.is_empty() || subst.is_empty() {
        return member.clone();
    }
    let mut incoming: FxHashSet<Atom> = FxHashSet::default();
    for ty in subst.values() {
        collect_type_param_names(model, ty, &mut incoming);
    }
    if member.type_params.iter().all(|tp| !incoming.contains(&tp.name)) {
        return member.clone();
    }
    let (renamed, _) = rename_type_params(model, member, &incoming);
    renamed
}

fn collect_type_param_names(model: &SemanticModel, ty: TypeId, names: &mut FxHashSet<Atom>) {
    match model.types.lookup(ty) {
        TypeData::TypeParam { name } => {
            names.insert(name);
        }
        TypeData::Array(inner) | TypeData::Nullable(inner) => {
            collect_type_param_names(model, inner, names);
        }
        TypeData::Named { args, .. } => {
            for &arg in &args {
                collect_type_param_names(model, arg, names);
            }
        }
        TypeData::Error | TypeData::Primitive(_) => {}
    }
}

/// Re-validate a `default(T)` default once `T` has been substituted away.
fn revalidate_default(model: &SemanticModel, substituted: TypeId) -> ConstValue {
    match model.types.lookup(substituted) {
        // Still an open type parameter of the implementer: keep `default`.
        TypeData::TypeParam { .. } | TypeData::Error => ConstValue::Default,
        TypeData::Array(_) | TypeData::Nullable(_) => ConstValue::Null,
        TypeData::Primitive(kind) => match kind {
            PrimitiveKind::Bool => ConstValue::Bool(false),
            PrimitiveKind::Char => ConstValue::Char('\0'),
            PrimitiveKind::String | PrimitiveKind::Object => ConstValue::Null,
            PrimitiveKind::I8 | PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64 => {
                ConstValue::Int(0)
            }
            PrimitiveKind::U8 | PrimitiveKind::U16 | PrimitiveKind::U32 | PrimitiveKind::U64 => {
                ConstValue::UInt(0)
            }
            PrimitiveKind::F32 => ConstValue::Float32(0.0),
            PrimitiveKind::F64 => ConstValue::Float64(0.0),
            PrimitiveKind::Decimal => ConstValue::Decimal("0".to_string()),
            PrimitiveKind::Void => ConstValue::Default,
        },
        TypeData::Named { symbol, .. } => match model.symbol(symbol).kind {
            TypeDefKind::Class | TypeDefKind::Interface | TypeDefKind::Delegate => ConstValue::Null,
            TypeDefKind::Enum => ConstValue::Enum { symbol, bits: 0 },
            // Arbitrary structs have no literal zero; keep the explicit
            // `default` expression.
            TypeDefKind::Struct => ConstValue::Default,
        },
    }
}

/// Can this substituted constraint appear in a fresh `where` clause?
///
/// Sealed classes, value types, enums, delegates, arrays, and primitives are
/// not legal constraint types; a member constrained to one of them must be
/// implemented explicitly.
pub fn is_expressible_constraint(model: &SemanticModel, constraint: TypeId) -> bool {
    match model.types.lookup(constraint) {
        TypeData::TypeParam { .. } => true,
        TypeData::Error => false,
        TypeData::Array(_) => false,
        TypeData::Nullable(inner) => is_expressible_constraint(model, inner),
        // `object` is also banned as a constraint, as are all value
        // primitives; `string` is sealed.
        TypeData::Primitive(_) => false,
        TypeData::Named { symbol, .. } => {
            let data = model.symbol(symbol);
            match data.kind {
                TypeDefKind::Interface => true,
                TypeDefKind::Class => !data.is_sealed,
                TypeDefKind::Struct | TypeDefKind::Enum | TypeDefKind::Delegate => false,
            }
        }
    }
}

/// Does the signature reference a type the implementer cannot see? Such a
/// member cannot be declared publicly and is forced explicit-only.
pub fn mark_inaccessible_explicit_only(
    model: &SemanticModel,
    sig: &mut MemberSignature,
    implementer_assembly: u32,
) {
    if !model.is_signature_accessible_from(sig, implementer_assembly) {
        sig.explicit_only = true;
    }
}

/// Static non-abstract interface members (static virtual / sealed default
/// members) are inherited for free; everything else needs an implementation.
pub fn requires_implementation(sig: &MemberSignature) -> bool {
    if sig.mods.contains(MemberMods::STATIC) {
        return sig.mods.contains(MemberMods::ABSTRACT);
    }
    // Instance default-interface members (virtual with a body) are also
    // inherited for free.
    if sig.mods.contains(MemberMods::VIRTUAL) && !sig.mods.contains(MemberMods::ABSTRACT) {
        return false;
    }
    true
}
