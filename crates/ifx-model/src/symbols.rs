//! Type symbols and the declarations attached to them.

use crate::signature::{Accessibility, MemberSignature, ParamInfo, TypeParamInfo};
use crate::types::TypeArgs;
use ifx_common::Atom;

/// Stable identifier of a named type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Kind of named type declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDefKind {
    Interface,
    Class,
    Struct,
    Enum,
    Delegate,
}

/// An interface (or base class) as referenced from a base list: the raw
/// symbol plus the concrete type arguments used at that declaration site.
///
/// The `(symbol, args)` identity is the visited-set key for closure walks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceRef {
    pub symbol: SymbolId,
    pub args: TypeArgs,
}

impl InterfaceRef {
    pub fn new(symbol: SymbolId, args: impl IntoIterator<Item = crate::types::TypeId>) -> Self {
        Self {
            symbol,
            args: args.into_iter().collect(),
        }
    }

    pub fn non_generic(symbol: SymbolId) -> Self {
        Self {
            symbol,
            args: TypeArgs::new(),
        }
    }
}

/// A named type declaration: kind, shape, bases, and declared members.
#[derive(Clone, Debug)]
pub struct SymbolData {
    pub name: Atom,
    pub kind: TypeDefKind,
    /// Type-level accessibility. `Internal` types are only visible inside
    /// their own assembly.
    pub accessibility: Accessibility,
    /// Owning assembly; accessibility of `internal` symbols is checked
    /// against this.
    pub assembly: u32,
    pub is_abstract: bool,
    pub is_sealed: bool,
    /// Interfaces carrying an ordinal-layout contract (COM-interop style):
    /// member order must never be permuted.
    pub preserves_layout: bool,
    pub type_params: Vec<TypeParamInfo>,
    /// Base interfaces as declared, in base-list order. Arguments may
    /// reference this symbol's own type parameters.
    pub base_interfaces: Vec<InterfaceRef>,
    /// For classes: the base class, if any.
    pub base_class: Option<InterfaceRef>,
    /// For nested types: the lexically containing type. Its type parameters
    /// are in scope at the implementation site.
    pub containing_type: Option<SymbolId>,
    /// Declared members, in declaration order.
    pub members: Vec<MemberSignature>,
    /// Primary-constructor parameters, treated as implicit fields when
    /// looking for delegation targets.
    pub primary_ctor_params: Vec<ParamInfo>,
    /// For enums: member names and raw values, in declaration order.
    pub enum_members: Vec<(Atom, u64)>,
    /// For enums: declared with a flags attribute.
    pub is_flags_enum: bool,
}

impl SymbolData {
    pub fn new(name: Atom, kind: TypeDefKind) -> Self {
        Self {
            name,
            kind,
            accessibility: Accessibility::Public,
            assembly: 0,
            is_abstract: false,
            is_sealed: false,
            preserves_layout: false,
            type_params: Vec::new(),
            base_interfaces: Vec::new(),
            base_class: None,
            containing_type: None,
            members: Vec::new(),
            primary_ctor_params: Vec::new(),
            enum_members: Vec::new(),
            is_flags_enum: false,
        }
    }

    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, TypeDefKind::Interface)
    }

    /// Value types and sealed classes cannot be further derived; a constraint
    /// naming one of them cannot be legally re-declared.
    pub const fn is_unextendable(&self) -> bool {
        self.is_sealed
            || matches!(
                self.kind,
                TypeDefKind::Struct | TypeDefKind::Enum | TypeDefKind::Delegate
            )
    }
}
