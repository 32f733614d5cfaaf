//! Substitution through member signatures: parameter and return rewriting,
//! constraint expressibility, and the explicit-only flags.

use ifx_engine::substitute::{
    is_expressible_constraint, requires_implementation, substitute_members,
};
use ifx_engine::{TypeSubstitution, substitute_signature};
use ifx_model::{
    Accessibility, ConstValue, InterfaceRef, MemberKind, MemberMods, MemberSignature, ParamInfo,
    SemanticModel, TypeId, TypeParamInfo,
};

#[test]
fn member_of_instantiated_interface_gets_concrete_types() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IInterface1");
    let params = model.set_type_params(igoo, &["T"]);

    // void Method1(T t);
    let name = model.atom("Method1");
    let t = model.atom("t");
    let sig = MemberSignature::method(name, vec![ParamInfo::new(t, params[0])], TypeId::VOID);
    model.add_member(igoo, sig);

    let declared = InterfaceRef::new(igoo, [TypeId::I32]);
    let members = substitute_members(&model, &declared);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].params[0].ty, TypeId::I32);
    assert_eq!(members[0].return_type, TypeId::VOID);
    assert_eq!(model.display_type(members[0].params[0].ty), "int");
}

#[test]
fn substitution_reaches_nested_and_array_types() {
    let mut model = SemanticModel::new();
    let ilist = model.add_interface("IList");
    model.set_type_params(ilist, &["E"]);
    let igoo = model.add_interface("IGoo");
    let params = model.set_type_params(igoo, &["T"]);

    // IList<T[]> Method1();
    let list_of_arrays = model.types.named(ilist, [model.types.array(params[0])]);
    let name = model.atom("Method1");
    let sig = MemberSignature::method(name, vec![], list_of_arrays);
    model.add_member(igoo, sig);

    let declared = InterfaceRef::new(igoo, [TypeId::STRING]);
    let members = substitute_members(&model, &declared);
    let expected = model.types.named(ilist, [model.types.array(TypeId::STRING)]);
    assert_eq!(members[0].return_type, expected);
    assert_eq!(model.display_type(members[0].return_type), "IList<string[]>");
}

#[test]
fn unexpressible_substituted_constraint_forces_explicit() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let params = model.set_type_params(igoo, &["T"]);

    // void Method1<U>() where U : T; with T := int the constraint cannot be
    // re-declared.
    let u = model.atom("U");
    let mut tp = TypeParamInfo::unconstrained(u);
    tp.constraints.push(params[0]);
    let name = model.atom("Method1");
    let mut sig = MemberSignature::method(name, vec![], TypeId::VOID);
    sig.type_params.push(tp);
    model.add_member(igoo, sig);

    let declared = InterfaceRef::new(igoo, [TypeId::I32]);
    let members = substitute_members(&model, &declared);
    assert!(members[0].explicit_only);
    assert_eq!(members[0].type_params[0].constraints[0], TypeId::I32);

    // With T := an interface the constraint stays expressible.
    let ibar = model.add_interface("IBar");
    let ibar_ty = model.types.named(ibar, []);
    let declared = InterfaceRef::new(igoo, [ibar_ty]);
    let members = substitute_members(&model, &declared);
    assert!(!members[0].explicit_only);
}

#[test]
fn incoming_arguments_are_not_captured_by_member_type_parameters() {
    let mut model = SemanticModel::new();
    let ilist = model.add_interface("IList");
    model.set_type_params(ilist, &["E"]);
    let igoo = model.add_interface("IGoo");
    let igoo_params = model.set_type_params(igoo, &["T"]);

    // void M<S>(T t, S s) where S : IList<T>;
    let s = model.atom("S");
    let s_ty = model.types.type_param(s);
    let mut tp = TypeParamInfo::unconstrained(s);
    tp.constraints.push(model.types.named(ilist, [igoo_params[0]]));
    let m = model.atom("M");
    let pt = model.atom("t");
    let ps = model.atom("s");
    let mut sig = MemberSignature::method(
        m,
        vec![ParamInfo::new(pt, igoo_params[0]), ParamInfo::new(ps, s_ty)],
        TypeId::VOID,
    );
    sig.type_params.push(tp);
    model.add_member(igoo, sig);

    // Declared as IGoo<S> on a type whose own parameter is also named S: the
    // member's S must step aside, while the incoming S stays put.
    let declared = InterfaceRef::new(igoo, [s_ty]);
    let members = substitute_members(&model, &declared);
    let member = &members[0];

    let s1 = model.atom("S1");
    let s1_ty = model.types.type_param(s1);
    assert_eq!(member.type_params[0].name, s1);
    assert_eq!(member.params[0].ty, s_ty);
    assert_eq!(member.params[1].ty, s1_ty);
    // where S1 : IList<S>; the outer S is untouched.
    assert_eq!(
        member.type_params[0].constraints[0],
        model.types.named(ilist, [s_ty])
    );
}

#[test]
fn constraint_expressibility_by_kind() {
    let mut model = SemanticModel::new();
    let iface = model.add_interface("IGoo");
    let open_class = model.add_class("Base");
    let sealed_class = model.add_class("Sealed");
    model.symbol_mut(sealed_class).is_sealed = true;
    let a_struct = model.add_struct("S");
    let an_enum = model.add_enum("E", &[("A", 0)], false);
    let a_delegate = model.add_delegate("D");

    let named = |m: &SemanticModel, s| m.types.named(s, []);
    assert!(is_expressible_constraint(&model, named(&model, iface)));
    assert!(is_expressible_constraint(&model, named(&model, open_class)));
    assert!(!is_expressible_constraint(&model, named(&model, sealed_class)));
    assert!(!is_expressible_constraint(&model, named(&model, a_struct)));
    assert!(!is_expressible_constraint(&model, named(&model, an_enum)));
    assert!(!is_expressible_constraint(&model, named(&model, a_delegate)));
    assert!(!is_expressible_constraint(&model, TypeId::I32));
    assert!(!is_expressible_constraint(&model, TypeId::STRING));
    assert!(!is_expressible_constraint(&model, TypeId::OBJECT));

    let t = model.atom("T");
    let t_ty = model.types.type_param(t);
    assert!(is_expressible_constraint(&model, t_ty));
    assert!(!is_expressible_constraint(&model, model.types.array(t_ty)));
}

#[test]
fn default_t_revalidates_only_substituted_parameter_types() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let params = model.set_type_params(igoo, &["T"]);

    // void M(T t = default, S s = default); S is a struct, untouched.
    let some_struct = model.add_struct("SomeStruct");
    let struct_ty = model.types.named(some_struct, []);
    let name = model.atom("M");
    let mut p1 = ParamInfo::new(model.atom("t"), params[0]);
    p1.default = Some(ConstValue::Default);
    let mut p2 = ParamInfo::new(model.atom("s"), struct_ty);
    p2.default = Some(ConstValue::Default);
    let sig = MemberSignature::method(name, vec![p1, p2], TypeId::VOID);

    let t = model.atom("T");
    let mut subst = TypeSubstitution::new();
    subst.insert(t, TypeId::STRING);
    let result = substitute_signature(&model, &sig, &subst);

    // T := string re-validates to null; the struct default carries through.
    assert_eq!(result.params[0].default, Some(ConstValue::Null));
    assert_eq!(result.params[1].default, Some(ConstValue::Default));
}

#[test]
fn non_public_member_is_explicit_only() {
    let mut model = SemanticModel::new();
    let name = model.atom("Hidden");
    let mut sig = MemberSignature::method(name, vec![], TypeId::VOID);
    sig.accessibility = Accessibility::Internal;

    let result = substitute_signature(&model, &sig, &TypeSubstitution::new());
    assert!(result.explicit_only);
}

#[test]
fn static_abstract_operator_is_explicit_only() {
    let mut model = SemanticModel::new();
    let name = model.atom("+");
    let mut sig = MemberSignature::method(name, vec![], TypeId::I32);
    sig.kind = MemberKind::OperatorBinary;
    sig.mods = MemberMods::STATIC | MemberMods::ABSTRACT;

    let result = substitute_signature(&model, &sig, &TypeSubstitution::new());
    assert!(result.explicit_only);

    // A static abstract method (not an operator) stays freely implementable.
    let m = model.atom("Create");
    let mut sig = MemberSignature::method(m, vec![], TypeId::I32);
    sig.mods = MemberMods::STATIC | MemberMods::ABSTRACT;
    let result = substitute_signature(&model, &sig, &TypeSubstitution::new());
    assert!(!result.explicit_only);
}

#[test]
fn static_and_default_members_do_not_require_implementation() {
    let model = SemanticModel::new();
    let name = model.atom("M");

    let mut static_virtual = MemberSignature::method(name, vec![], TypeId::VOID);
    static_virtual.mods = MemberMods::STATIC | MemberMods::VIRTUAL;
    assert!(!requires_implementation(&static_virtual));

    let mut static_abstract = MemberSignature::method(name, vec![], TypeId::VOID);
    static_abstract.mods = MemberMods::STATIC | MemberMods::ABSTRACT;
    assert!(requires_implementation(&static_abstract));

    // Instance default-interface member (virtual with a body).
    let mut dim = MemberSignature::method(name, vec![], TypeId::VOID);
    dim.mods = MemberMods::VIRTUAL;
    assert!(!requires_implementation(&dim));

    let plain = MemberSignature::method(name, vec![], TypeId::VOID);
    assert!(requires_implementation(&plain));
}
