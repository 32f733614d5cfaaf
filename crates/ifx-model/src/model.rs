//! The semantic-model oracle.
//!
//! [`SemanticModel`] owns the interner, the type store, and the symbol table.
//! The engine only reads it; hosts (and tests) populate it through the
//! builder-style mutators. It answers the queries the engine needs:
//! member enumeration, accessibility, and type display.

use crate::signature::{Accessibility, MemberSignature, ParamInfo, TypeParamInfo};
use crate::symbols::{InterfaceRef, SymbolData, SymbolId, TypeDefKind};
use crate::types::{TypeData, TypeId, TypeStore};
use ifx_common::{Atom, Interner};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct SemanticModel {
    pub interner: Interner,
    pub types: TypeStore,
    symbols: Vec<SymbolData>,
}

impl SemanticModel {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Building (host / test side)
    // -------------------------------------------------------------------

    pub fn atom(&self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    pub fn add_symbol(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(data);
        id
    }

    pub fn add_interface(&mut self, name: &str) -> SymbolId {
        let name = self.atom(name);
        let mut data = SymbolData::new(name, TypeDefKind::Interface);
        data.is_abstract = true;
        self.add_symbol(data)
    }

    pub fn add_class(&mut self, name: &str) -> SymbolId {
        let name = self.atom(name);
        self.add_symbol(SymbolData::new(name, TypeDefKind::Class))
    }

    pub fn add_struct(&mut self, name: &str) -> SymbolId {
        let name = self.atom(name);
        self.add_symbol(SymbolData::new(name, TypeDefKind::Struct))
    }

    pub fn add_enum(&mut self, name: &str, members: &[(&str, u64)], flags: bool) -> SymbolId {
        let name = self.atom(name);
        let mut data = SymbolData::new(name, TypeDefKind::Enum);
        data.enum_members = members
            .iter()
            .map(|(member, value)| (self.interner.intern(member), *value))
            .collect();
        data.is_flags_enum = flags;
        self.add_symbol(data)
    }

    pub fn add_delegate(&mut self, name: &str) -> SymbolId {
        let name = self.atom(name);
        self.add_symbol(SymbolData::new(name, TypeDefKind::Delegate))
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolData {
        &mut self.symbols[id.0 as usize]
    }

    /// Declare type parameters on a symbol, returning their `TypeId`s.
    pub fn set_type_params(&mut self, id: SymbolId, names: &[&str]) -> Vec<TypeId> {
        let params: Vec<TypeParamInfo> = names
            .iter()
            .map(|n| TypeParamInfo::unconstrained(self.interner.intern(n)))
            .collect();
        let ids = params
            .iter()
            .map(|p| self.types.type_param(p.name))
            .collect();
        self.symbol_mut(id).type_params = params;
        ids
    }

    pub fn add_base_interface(&mut self, id: SymbolId, base: InterfaceRef) {
        self.symbol_mut(id).base_interfaces.push(base);
    }

    pub fn add_member(&mut self, id: SymbolId, member: MemberSignature) {
        self.symbol_mut(id).members.push(member);
    }

    pub fn add_primary_ctor_param(&mut self, id: SymbolId, param: ParamInfo) {
        self.symbol_mut(id).primary_ctor_params.push(param);
    }

    // -------------------------------------------------------------------
    // Queries (engine side)
    // -------------------------------------------------------------------

    pub fn symbol(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.0 as usize]
    }

    pub fn members(&self, id: SymbolId) -> &[MemberSignature] {
        &self.symbol(id).members
    }

    pub fn name_of(&self, id: SymbolId) -> Arc<str> {
        self.interner.resolve(self.symbol(id).name)
    }

    /// Type parameters in scope at an implementation site: the type's own
    /// parameters plus every lexically containing type's.
    pub fn type_params_in_scope(&self, mut id: SymbolId) -> Vec<Atom> {
        let mut names = Vec::new();
        loop {
            let data = self.symbol(id);
            names.extend(data.type_params.iter().map(|p| p.name));
            match data.containing_type {
                Some(outer) => id = outer,
                None => break,
            }
        }
        names
    }

    /// Base-class chain of a class, nearest first.
    pub fn base_class_chain(&self, id: SymbolId) -> Vec<&InterfaceRef> {
        let mut chain = Vec::new();
        let mut current = self.symbol(id).base_class.as_ref();
        while let Some(base) = current {
            chain.push(base);
            current = self.symbol(base.symbol).base_class.as_ref();
        }
        chain
    }

    /// Is every named type mentioned in `ty` visible from a type declared in
    /// `from_assembly`?
    pub fn is_type_accessible_from(&self, ty: TypeId, from_assembly: u32) -> bool {
        match self.types.lookup(ty) {
            TypeData::Error => false,
            TypeData::Primitive(_) | TypeData::TypeParam { .. } => true,
            TypeData::Array(inner) | TypeData::Nullable(inner) => {
                self.is_type_accessible_from(inner, from_assembly)
            }
            TypeData::Named { symbol, args } => {
                let data = self.symbol(symbol);
                let symbol_visible = match data.accessibility {
                    Accessibility::Public => true,
                    _ => data.assembly == from_assembly,
                };
                symbol_visible
                    && args
                        .iter()
                        .all(|&arg| self.is_type_accessible_from(arg, from_assembly))
            }
        }
    }

    /// Is every type mentioned in the signature visible from `from_assembly`?
    pub fn is_signature_accessible_from(&self, sig: &MemberSignature, from_assembly: u32) -> bool {
        self.is_type_accessible_from(sig.return_type, from_assembly)
            && sig
                .params
                .iter()
                .all(|p| self.is_type_accessible_from(p.ty, from_assembly))
    }

    /// Is the substituted type a reference type? Used when re-validating
    /// `default(T)` defaults. Returns `None` for type parameters, where the
    /// answer is still open.
    pub fn is_reference_type(&self, ty: TypeId) -> Option<bool> {
        match self.types.lookup(ty) {
            TypeData::Error => None,
            TypeData::TypeParam { .. } => None,
            TypeData::Array(_) | TypeData::Nullable(_) => Some(true),
            TypeData::Primitive(kind) => Some(!kind.is_value_type()),
            TypeData::Named { symbol, .. } => Some(matches!(
                self.symbol(symbol).kind,
                TypeDefKind::Class | TypeDefKind::Interface | TypeDefKind::Delegate
            )),
        }
    }

    // -------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------

    /// Render a type reference with minimal qualification. Full qualification
    /// and simplification are the host renderer's job.
    pub fn display_type(&self, ty: TypeId) -> String {
        match self.types.lookup(ty) {
            TypeData::Error => "<error>".to_string(),
            TypeData::Primitive(kind) => kind.keyword().to_string(),
            TypeData::TypeParam { name } => self.interner.resolve(name).to_string(),
            TypeData::Array(inner) => format!("{}[]", self.display_type(inner)),
            TypeData::Nullable(inner) => format!("{}?", self.display_type(inner)),
            TypeData::Named { symbol, args } => {
                let name = self.name_of(symbol);
                if args.is_empty() {
                    name.to_string()
                } else {
                    let rendered: Vec<String> =
                        args.iter().map(|&a| self.display_type(a)).collect();
                    format!("{}<{}>", name, rendered.join(", "))
                }
            }
        }
    }

    /// Render an interface reference (`IInterface1<int>`).
    pub fn display_interface_ref(&self, iface: &InterfaceRef) -> String {
        let named = self.types.named(iface.symbol, iface.args.iter().copied());
        self.display_type(named)
    }
}
