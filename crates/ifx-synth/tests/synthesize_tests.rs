//! End-to-end synthesis: find missing members, apply a strategy, synthesize,
//! and print.

use ifx_common::CancellationToken;
use ifx_engine::{
    ImplementationPlan, StrategyDescriptor, StrategyKind, apply, list_strategies,
};
use ifx_model::{
    Accessors, ConstValue, InterfaceRef, MemberSignature, ParamInfo, RefKind, SemanticModel,
    SymbolId, TypeId, TypeParamInfo,
};
use ifx_synth::{print_decls, synthesize};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn plan_for(
    model: &SemanticModel,
    class: SymbolId,
    declared: &[InterfaceRef],
    pick: impl Fn(&StrategyDescriptor) -> bool,
) -> ImplementationPlan {
    let strategies = list_strategies(model, class, declared, &CancellationToken::new());
    let descriptor = strategies.iter().find(|s| pick(s)).expect("strategy offered");
    apply(model, class, declared, descriptor, &CancellationToken::new()).expect("not cancelled")
}

fn render(
    model: &SemanticModel,
    class: SymbolId,
    declared: &[InterfaceRef],
    pick: impl Fn(&StrategyDescriptor) -> bool,
) -> String {
    let plan = plan_for(model, class, declared, pick);
    print_decls(model, &synthesize(model, &plan))
}

#[test]
fn implicit_method_stub() {
    init_tracing();
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let name = model.atom("Method1");
    let i = model.atom("i");
    model.add_member(
        igoo,
        MemberSignature::method(name, vec![ParamInfo::new(i, TypeId::I32)], TypeId::VOID),
    );
    let class = model.add_class("C");

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ImplicitAll && !s.dispose_pattern
    });
    assert_eq!(
        text,
        "public void Method1(int i)\n\
         {\n\
         \x20   throw new System.NotImplementedException();\n\
         }\n"
    );
}

#[test]
fn explicit_method_carries_the_interface_qualifier() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let params = model.set_type_params(igoo, &["T"]);
    let name = model.atom("Method1");
    let t = model.atom("t");
    model.add_member(
        igoo,
        MemberSignature::method(name, vec![ParamInfo::new(t, params[0])], TypeId::VOID),
    );
    let class = model.add_class("C");

    let declared = [InterfaceRef::new(igoo, [TypeId::I32])];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ExplicitAll && !s.dispose_pattern
    });
    assert!(text.starts_with("void IGoo<int>.Method1(int t)\n"));
}

#[test]
fn forwarding_method_calls_through_the_receiver() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let name = model.atom("Method1");
    let x = model.atom("x");
    let mut param = ParamInfo::new(x, TypeId::I32);
    param.ref_kind = RefKind::Out;
    model.add_member(
        igoo,
        MemberSignature::method(name, vec![param], TypeId::I32),
    );

    let class = model.add_class("C");
    let igoo_ty = model.types.named(igoo, []);
    let inner = model.atom("inner");
    model.add_member(class, MemberSignature::field(inner, igoo_ty));

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ThroughMember
    });
    assert_eq!(
        text,
        "public int Method1(out int x)\n\
         {\n\
         \x20   return inner.Method1(out x);\n\
         }\n"
    );
}

#[test]
fn forwarding_casts_when_the_receiver_implements_explicitly() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let name = model.atom("Method1");
    model.add_member(igoo, MemberSignature::method(name, vec![], TypeId::VOID));

    // Impl implements IGoo explicitly; forwarding must cast the receiver.
    let impl_class = model.add_class("Impl");
    model.add_base_interface(impl_class, InterfaceRef::non_generic(igoo));
    let mut explicit = MemberSignature::method(name, vec![], TypeId::VOID);
    explicit.accessibility = ifx_model::Accessibility::Private;
    explicit.explicit_impl_of = Some(ifx_model::ExplicitImplOf {
        interface: igoo,
        args: Default::default(),
        member: name,
    });
    model.add_member(impl_class, explicit);

    let class = model.add_class("C");
    let impl_ty = model.types.named(impl_class, []);
    let inner = model.atom("inner");
    model.add_member(class, MemberSignature::field(inner, impl_ty));

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ThroughMember
    });
    assert!(text.contains("((IGoo)inner).Method1();"));
}

#[test]
fn property_stub_has_throwing_accessors() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let prop = model.atom("Prop");
    model.add_member(
        igoo,
        MemberSignature::property(prop, TypeId::I32, Accessors::GET | Accessors::SET),
    );
    let class = model.add_class("C");

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ImplicitAll && !s.dispose_pattern
    });
    assert_eq!(
        text,
        "public int Prop\n\
         {\n\
         \x20   get\n\
         \x20   {\n\
         \x20       throw new System.NotImplementedException();\n\
         \x20   }\n\
         \n\
         \x20   set\n\
         \x20   {\n\
         \x20       throw new System.NotImplementedException();\n\
         \x20   }\n\
         }\n"
    );
}

#[test]
fn forwarding_property_reads_and_writes_the_receiver() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let prop = model.atom("Prop");
    model.add_member(
        igoo,
        MemberSignature::property(prop, TypeId::I32, Accessors::GET | Accessors::SET),
    );

    let class = model.add_class("C");
    let igoo_ty = model.types.named(igoo, []);
    let inner = model.atom("inner");
    model.add_member(class, MemberSignature::field(inner, igoo_ty));

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ThroughMember
    });
    assert!(text.contains("return inner.Prop;"));
    assert!(text.contains("inner.Prop = value;"));
}

#[test]
fn implicit_event_is_field_like() {
    let mut model = SemanticModel::new();
    let handler = model.add_delegate("EventHandler");
    let handler_ty = model.types.named(handler, []);
    let igoo = model.add_interface("IGoo");
    let changed = model.atom("Changed");
    model.add_member(igoo, MemberSignature::event(changed, handler_ty));
    let class = model.add_class("C");

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ImplicitAll && !s.dispose_pattern
    });
    assert_eq!(text, "public event EventHandler Changed;\n");

    // The explicit form needs add/remove accessors.
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ExplicitAll && !s.dispose_pattern
    });
    assert!(text.starts_with("event EventHandler IGoo.Changed\n"));
    assert!(text.contains("    add\n"));
    assert!(text.contains("    remove\n"));
}

#[test]
fn abstract_members_have_no_bodies() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let name = model.atom("Method1");
    model.add_member(igoo, MemberSignature::method(name, vec![], TypeId::VOID));
    let prop = model.atom("Prop");
    model.add_member(
        igoo,
        MemberSignature::property(prop, TypeId::I32, Accessors::GET),
    );

    let class = model.add_class("C");
    model.symbol_mut(class).is_abstract = true;

    let declared = [InterfaceRef::non_generic(igoo)];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::Abstract && !s.dispose_pattern
    });
    assert_eq!(
        text,
        "public abstract void Method1();\n\
         \n\
         public abstract int Prop { get; }\n"
    );
}

#[test]
fn implicit_generic_method_keeps_its_constraints_explicit_drops_them() {
    let mut model = SemanticModel::new();
    let ibar = model.add_interface("IBar");
    let ibar_ty = model.types.named(ibar, []);
    let igoo = model.add_interface("IGoo");

    // void Method1<U>(U u) where U : IBar;
    let u = model.atom("U");
    let u_ty = model.types.type_param(u);
    let mut tp = TypeParamInfo::unconstrained(u);
    tp.constraints.push(ibar_ty);
    let name = model.atom("Method1");
    let pu = model.atom("u");
    let mut sig = MemberSignature::method(name, vec![ParamInfo::new(pu, u_ty)], TypeId::VOID);
    sig.type_params.push(tp);
    model.add_member(igoo, sig);

    let class = model.add_class("C");
    let declared = [InterfaceRef::non_generic(igoo)];

    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ImplicitAll && !s.dispose_pattern
    });
    assert!(text.starts_with("public void Method1<U>(U u) where U : IBar\n"));

    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ExplicitAll && !s.dispose_pattern
    });
    assert!(text.starts_with("void IGoo.Method1<U>(U u)\n"));
}

#[test]
fn substituted_default_value_is_rendered() {
    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let params = model.set_type_params(igoo, &["T"]);
    let name = model.atom("Method1");
    let t = model.atom("t");
    let mut param = ParamInfo::new(t, params[0]);
    param.default = Some(ConstValue::Default);
    model.add_member(
        igoo,
        MemberSignature::method(name, vec![param], TypeId::VOID),
    );
    let class = model.add_class("C");

    let declared = [InterfaceRef::new(igoo, [TypeId::STRING])];
    let text = render(&model, class, &declared, |s| {
        s.kind == StrategyKind::ImplicitAll && !s.dispose_pattern
    });
    assert!(text.starts_with("public void Method1(string t = null)\n"));
}

#[test]
fn unrepresentable_members_are_skipped() {
    use ifx_engine::{ImplMode, PlanEntry};
    use ifx_engine::MissingMember;

    let mut model = SemanticModel::new();
    let igoo = model.add_interface("IGoo");
    let name = model.atom("Broken");
    let signature = MemberSignature::method(name, vec![], TypeId::ERROR);

    let plan = ImplementationPlan {
        target: model.add_class("C"),
        entries: vec![PlanEntry {
            interface: InterfaceRef::non_generic(igoo),
            member: MissingMember {
                signature: signature.clone(),
                missing_accessors: signature.accessors,
            },
            mode: ImplMode::Implicit,
        }],
        dispose_guard_field: None,
    };
    assert!(synthesize(&model, &plan).is_empty());
}
