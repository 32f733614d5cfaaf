//! Reference printer.
//!
//! Renders synthesized declarations as source text so the engine's output can
//! be asserted end to end. This is deliberately a single fixed style
//! (block-bodied members, four-space indent); expression-bodied selection,
//! import insertion, and placement are the host renderer's concern.

use crate::declaration::{Body, DisposeBoolVisibility, MemberDecl, Receiver, SynthDecl};
use crate::literals::{DefaultLiteralRenderer, LiteralRenderer};
use ifx_common::Atom;
use ifx_model::{
    Accessors, InterfaceRef, MemberKind, MemberSignature, ParamInfo, SemanticModel,
    SpecialConstraints, TypeParamInfo,
};

const THROW_STMT: &str = "throw new System.NotImplementedException();";

pub struct Printer<'a> {
    model: &'a SemanticModel,
    literals: &'a dyn LiteralRenderer,
    out: String,
}

/// Render declarations with the default literal table, separated by blank
/// lines.
pub fn print_decls(model: &SemanticModel, decls: &[SynthDecl]) -> String {
    Printer::new(model, &DefaultLiteralRenderer).print(decls)
}

impl<'a> Printer<'a> {
    pub fn new(model: &'a SemanticModel, literals: &'a dyn LiteralRenderer) -> Self {
        Self {
            model,
            literals,
            out: String::new(),
        }
    }

    pub fn print(mut self, decls: &[SynthDecl]) -> String {
        for (i, decl) in decls.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.emit_decl(decl);
        }
        self.out
    }

    fn emit_decl(&mut self, decl: &SynthDecl) {
        match decl {
            SynthDecl::Member(member) => self.emit_member(member),
            SynthDecl::DisposeGuardField { name } => {
                let name = self.model.interner.resolve(*name);
                self.line(&format!("private bool {name};"));
            }
            SynthDecl::DisposeBoolMethod { guard, visibility } => {
                self.emit_dispose_bool(*guard, *visibility);
            }
            SynthDecl::FinalizerComment { class_name } => {
                let class_name = self.model.interner.resolve(*class_name);
                self.line("// TODO: override finalizer only if 'Dispose(bool disposing)' has code to free unmanaged resources");
                self.line(&format!("// ~{class_name}()"));
                self.line("// {");
                self.line("//     // Do not change this code. Put cleanup code in 'Dispose(bool disposing)' method");
                self.line("//     Dispose(disposing: false);");
                self.line("// }");
            }
            SynthDecl::DisposeMethod { explicit } => self.emit_dispose_method(explicit.as_ref()),
        }
    }

    // -------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------

    fn emit_member(&mut self, member: &MemberDecl) {
        match member.signature.kind {
            MemberKind::Method => self.emit_method(member),
            MemberKind::Property | MemberKind::Indexer => self.emit_property(member),
            MemberKind::Event => self.emit_event(member),
            MemberKind::OperatorUnary
            | MemberKind::OperatorBinary
            | MemberKind::OperatorConversion => self.emit_operator(member),
            // Fields are never synthesized from interface members.
            MemberKind::Field => {}
        }
    }

    fn emit_method(&mut self, member: &MemberDecl) {
        let sig = &member.signature;
        let name = self.model.interner.resolve(sig.name);
        let mut header = self.member_prefix(member);
        header.push_str(&self.return_spec(sig));
        header.push(' ');
        if let Some(iface) = &member.explicit_interface {
            header.push_str(&self.model.display_interface_ref(iface));
            header.push('.');
        }
        header.push_str(&name);
        header.push_str(&self.type_param_list(&sig.type_params));
        header.push('(');
        header.push_str(&self.param_list(&sig.params));
        header.push(')');
        // Explicit implementations inherit the interface's constraints and
        // must not re-declare them.
        if member.explicit_interface.is_none() {
            header.push_str(&self.where_clauses(&sig.type_params));
        }

        match &member.body {
            Body::None => self.line(&format!("{header};")),
            Body::ThrowNotImplemented => {
                self.line(&header);
                self.line("{");
                self.line(&format!("    {THROW_STMT}"));
                self.line("}");
            }
            Body::Forward(receiver) => {
                let recv = self.receiver_text(receiver);
                let args = self.forward_args(&sig.params);
                let call = format!("{recv}.{name}({args});");
                self.line(&header);
                self.line("{");
                if self.model.display_type(sig.return_type) == "void" {
                    self.line(&format!("    {call}"));
                } else {
                    self.line(&format!("    return {recv}.{name}({args});"));
                }
                self.line("}");
            }
        }
    }

    fn emit_property(&mut self, member: &MemberDecl) {
        let sig = &member.signature;
        let mut header = self.member_prefix(member);
        header.push_str(&self.model.display_type(sig.return_type));
        header.push(' ');
        if let Some(iface) = &member.explicit_interface {
            header.push_str(&self.model.display_interface_ref(iface));
            header.push('.');
        }
        let indexer = sig.kind == MemberKind::Indexer;
        if indexer {
            header.push_str("this[");
            header.push_str(&self.param_list(&sig.params));
            header.push(']');
        } else {
            header.push_str(&self.model.interner.resolve(sig.name));
        }

        if member.body == Body::None {
            // Abstract: accessor list without bodies.
            let mut accessors = Vec::new();
            if sig.accessors.contains(Accessors::GET) {
                accessors.push("get;");
            }
            if sig.accessors.contains(Accessors::SET) {
                accessors.push("set;");
            }
            if sig.accessors.contains(Accessors::INIT) {
                accessors.push("init;");
            }
            self.line(&format!("{header} {{ {} }}", accessors.join(" ")));
            return;
        }

        self.line(&header);
        self.line("{");
        let mut first = true;
        for (accessor, keyword) in [
            (Accessors::GET, "get"),
            (Accessors::SET, "set"),
            (Accessors::INIT, "init"),
        ] {
            if !sig.accessors.contains(accessor) {
                continue;
            }
            if !first {
                self.out.push('\n');
            }
            first = false;
            self.line(&format!("    {keyword}"));
            self.line("    {");
            let stmt = match &member.body {
                Body::Forward(receiver) => {
                    let recv = self.receiver_text(receiver);
                    let access = if indexer {
                        format!("{recv}[{}]", self.forward_args(&sig.params))
                    } else {
                        format!("{recv}.{}", self.model.interner.resolve(sig.name))
                    };
                    if accessor == Accessors::GET {
                        format!("return {access};")
                    } else {
                        format!("{access} = value;")
                    }
                }
                _ => THROW_STMT.to_string(),
            };
            self.line(&format!("        {stmt}"));
            self.line("    }");
        }
        self.line("}");
    }

    fn emit_event(&mut self, member: &MemberDecl) {
        let sig = &member.signature;
        let name = self.model.interner.resolve(sig.name);
        let handler = self.model.display_type(sig.return_type);
        let mut header = self.member_prefix(member);
        header.push_str("event ");
        header.push_str(&handler);
        header.push(' ');
        if let Some(iface) = &member.explicit_interface {
            header.push_str(&self.model.display_interface_ref(iface));
            header.push('.');
        }
        header.push_str(&name);

        match &member.body {
            // Abstract events have no accessor list.
            Body::None => self.line(&format!("{header};")),
            // Implicit stubs are field-like events.
            Body::ThrowNotImplemented if member.explicit_interface.is_none() => {
                self.line(&format!("{header};"));
            }
            body => {
                self.line(&header);
                self.line("{");
                for (i, keyword) in ["add", "remove"].iter().enumerate() {
                    if i > 0 {
                        self.out.push('\n');
                    }
                    self.line(&format!("    {keyword}"));
                    self.line("    {");
                    let stmt = match body {
                        Body::Forward(receiver) => {
                            let recv = self.receiver_text(receiver);
                            let op = if *keyword == "add" { "+=" } else { "-=" };
                            format!("{recv}.{name} {op} value;")
                        }
                        _ => THROW_STMT.to_string(),
                    };
                    self.line(&format!("        {stmt}"));
                    self.line("    }");
                }
                self.line("}");
            }
        }
    }

    fn emit_operator(&mut self, member: &MemberDecl) {
        let sig = &member.signature;
        let token = self.model.interner.resolve(sig.name);
        let ret = self.model.display_type(sig.return_type);
        let params = self.param_list(&sig.params);

        let mut header = String::new();
        if member.explicit_interface.is_none() {
            header.push_str("public static ");
        } else {
            header.push_str("static ");
        }
        if sig.kind == MemberKind::OperatorConversion {
            // `token` is `implicit` or `explicit`; the qualifier sits between
            // it and the `operator` keyword.
            header.push_str(&token);
            header.push(' ');
            if let Some(iface) = &member.explicit_interface {
                header.push_str(&self.model.display_interface_ref(iface));
                header.push('.');
            }
            header.push_str("operator ");
            header.push_str(&ret);
        } else {
            header.push_str(&ret);
            header.push(' ');
            if let Some(iface) = &member.explicit_interface {
                header.push_str(&self.model.display_interface_ref(iface));
                header.push('.');
            }
            header.push_str("operator ");
            header.push_str(&token);
        }
        header.push('(');
        header.push_str(&params);
        header.push(')');

        self.line(&header);
        self.line("{");
        self.line(&format!("    {THROW_STMT}"));
        self.line("}");
    }

    fn emit_dispose_bool(&mut self, guard: Atom, visibility: DisposeBoolVisibility) {
        let guard = self.model.interner.resolve(guard);
        let prefix = match visibility {
            DisposeBoolVisibility::ProtectedVirtual => "protected virtual",
            DisposeBoolVisibility::Private => "private",
        };
        self.line(&format!("{prefix} void Dispose(bool disposing)"));
        self.line("{");
        self.line(&format!("    if (!{guard})"));
        self.line("    {");
        self.line("        if (disposing)");
        self.line("        {");
        self.line("            // TODO: dispose managed state (managed objects)");
        self.line("        }");
        self.out.push('\n');
        self.line("        // TODO: free unmanaged resources (unmanaged objects) and override finalizer");
        self.line("        // TODO: set large fields to null");
        self.line(&format!("        {guard} = true;"));
        self.line("    }");
        self.line("}");
    }

    fn emit_dispose_method(&mut self, explicit: Option<&InterfaceRef>) {
        let header = match explicit {
            Some(iface) => format!("void {}.Dispose()", self.model.display_interface_ref(iface)),
            None => "public void Dispose()".to_string(),
        };
        self.line(&header);
        self.line("{");
        self.line("    // Do not change this code. Put cleanup code in 'Dispose(bool disposing)' method");
        self.line("    Dispose(disposing: true);");
        self.line("    GC.SuppressFinalize(this);");
        self.line("}");
    }

    // -------------------------------------------------------------------
    // Pieces
    // -------------------------------------------------------------------

    /// Modifier prefix: accessibility (implicit members only), `static`,
    /// `abstract`.
    fn member_prefix(&self, member: &MemberDecl) -> String {
        let mut prefix = String::new();
        if member.explicit_interface.is_none() {
            prefix.push_str("public ");
        }
        if member.signature.is_static() {
            prefix.push_str("static ");
        }
        if member.is_abstract {
            prefix.push_str("abstract ");
        }
        prefix
    }

    fn return_spec(&self, sig: &MemberSignature) -> String {
        match sig.return_ref.keyword() {
            Some(keyword) => format!("{keyword} {}", self.model.display_type(sig.return_type)),
            None => self.model.display_type(sig.return_type),
        }
    }

    fn type_param_list(&self, type_params: &[TypeParamInfo]) -> String {
        if type_params.is_empty() {
            return String::new();
        }
        let names: Vec<String> = type_params
            .iter()
            .map(|tp| self.model.interner.resolve(tp.name).to_string())
            .collect();
        format!("<{}>", names.join(", "))
    }

    fn where_clauses(&self, type_params: &[TypeParamInfo]) -> String {
        let mut out = String::new();
        for tp in type_params {
            if !tp.has_constraints() {
                continue;
            }
            let mut parts = Vec::new();
            if tp.special.contains(SpecialConstraints::CLASS) {
                parts.push("class".to_string());
            }
            if tp.special.contains(SpecialConstraints::STRUCT) {
                parts.push("struct".to_string());
            }
            if tp.special.contains(SpecialConstraints::NOTNULL) {
                parts.push("notnull".to_string());
            }
            if tp.special.contains(SpecialConstraints::UNMANAGED) {
                parts.push("unmanaged".to_string());
            }
            for &constraint in &tp.constraints {
                parts.push(self.model.display_type(constraint));
            }
            if tp.special.contains(SpecialConstraints::NEW) {
                parts.push("new()".to_string());
            }
            out.push_str(&format!(
                " where {} : {}",
                self.model.interner.resolve(tp.name),
                parts.join(", ")
            ));
        }
        out
    }

    fn param_list(&self, params: &[ParamInfo]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let mut text = String::new();
                if let Some(keyword) = p.ref_kind.keyword() {
                    text.push_str(keyword);
                    text.push(' ');
                }
                text.push_str(&self.model.display_type(p.ty));
                text.push(' ');
                text.push_str(&self.model.interner.resolve(p.name));
                if let Some(default) = &p.default {
                    text.push_str(" = ");
                    text.push_str(&self.literals.render(self.model, default, p.ty));
                }
                text
            })
            .collect();
        rendered.join(", ")
    }

    /// Argument list of a forwarding call, re-applying passing modes.
    fn forward_args(&self, params: &[ParamInfo]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let name = self.model.interner.resolve(p.name);
                match p.ref_kind.keyword() {
                    Some("ref readonly") => format!("in {name}"),
                    Some(keyword) => format!("{keyword} {name}"),
                    None => name.to_string(),
                }
            })
            .collect();
        rendered.join(", ")
    }

    fn receiver_text(&self, receiver: &Receiver) -> String {
        let name = self.model.interner.resolve(receiver.member);
        match &receiver.cast_to {
            Some(iface) => format!("(({}){})", self.model.display_interface_ref(iface), name),
            None => name.to_string(),
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }
}
