//! Normalized member signatures.
//!
//! A [`MemberSignature`] is the engine's vocabulary for "a declarable member":
//! interfaces store their members in this shape (in terms of their own type
//! parameters), classes store their declared members in it, and the
//! substitution engine rewrites it into the implementer's vocabulary.

use crate::types::{TypeArgs, TypeId};
use crate::symbols::SymbolId;
use bitflags::bitflags;
use ifx_common::Atom;
use smallvec::SmallVec;

/// Kind of declarable member. Kind-specific synthesis rules are dispatched by
/// pattern matching on this tag, not by a handler hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Property,
    Indexer,
    Event,
    OperatorUnary,
    OperatorBinary,
    OperatorConversion,
    /// Fields never occur on interfaces; they appear on classes and are
    /// consulted for delegation candidates and name-collision checks.
    Field,
}

/// Declared accessibility, ordered from most to least visible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    ProtectedInternal,
    Internal,
    Protected,
    PrivateProtected,
    Private,
}

impl Accessibility {
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Parameter / return passing mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    #[default]
    Value,
    Ref,
    In,
    Out,
    RefReadonly,
}

impl RefKind {
    /// Whether two passing modes are interchangeable for the purpose of
    /// deciding that an existing member satisfies an interface member.
    /// `ref` / `in` / `ref readonly` are treated as one equivalence class;
    /// `out` and by-value stand alone.
    pub fn matches(self, other: RefKind) -> bool {
        use RefKind::*;
        match (self, other) {
            (Value, Value) | (Out, Out) => true,
            (Ref | In | RefReadonly, Ref | In | RefReadonly) => true,
            _ => false,
        }
    }

    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Value => None,
            Self::Ref => Some("ref"),
            Self::In => Some("in"),
            Self::Out => Some("out"),
            Self::RefReadonly => Some("ref readonly"),
        }
    }
}

bitflags! {
    /// Member modifier set.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MemberMods: u16 {
        const STATIC   = 1 << 0;
        const ABSTRACT = 1 << 1;
        const VIRTUAL  = 1 << 2;
        const SEALED   = 1 << 3;
        const OVERRIDE = 1 << 4;
        /// Property with an `init` accessor instead of `set`.
        const INIT_ONLY = 1 << 5;
    }
}

bitflags! {
    /// Accessors required/provided by a property, indexer, or event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Accessors: u8 {
        const GET    = 1 << 0;
        const SET    = 1 << 1;
        const INIT   = 1 << 2;
        const ADD    = 1 << 3;
        const REMOVE = 1 << 4;
    }
}

/// Compile-time constant value, as used for default parameter values.
///
/// Defaults are carried through substitution unchanged, except `Default`
/// (`default(T)`) whose rendering is re-validated against the substituted
/// type. Rendering to source text is the literal table's job.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Char(char),
    String(String),
    /// All signed integer widths, widened.
    Int(i64),
    /// All unsigned integer widths, widened.
    UInt(u64),
    Float32(f32),
    Float64(f64),
    /// Decimal constants keep their source spelling (possibly exponent form).
    Decimal(String),
    /// An enum constant: the enum symbol plus the raw underlying bits.
    Enum { symbol: SymbolId, bits: u64 },
    Null,
    /// `default` / `default(T)`.
    Default,
}

/// A generic type parameter declared on a member or type, with constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: Atom,
    /// Type constraints (`where T : IList<U>`), in declaration order.
    pub constraints: SmallVec<[TypeId; 1]>,
    pub special: SpecialConstraints,
}

bitflags! {
    /// Keyword constraints that are not types.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SpecialConstraints: u8 {
        const CLASS  = 1 << 0;
        const STRUCT = 1 << 1;
        const NEW    = 1 << 2;
        const NOTNULL = 1 << 3;
        const UNMANAGED = 1 << 4;
    }
}

impl TypeParamInfo {
    pub fn unconstrained(name: Atom) -> Self {
        Self {
            name,
            constraints: SmallVec::new(),
            special: SpecialConstraints::empty(),
        }
    }

    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty() || !self.special.is_empty()
    }
}

/// A value parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamInfo {
    pub name: Atom,
    pub ty: TypeId,
    pub ref_kind: RefKind,
    pub default: Option<ConstValue>,
}

impl ParamInfo {
    pub fn new(name: Atom, ty: TypeId) -> Self {
        Self {
            name,
            ty,
            ref_kind: RefKind::Value,
            default: None,
        }
    }
}

/// Identity of an interface member explicitly implemented by a class member:
/// the substituted interface reference plus the member name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExplicitImplOf {
    pub interface: SymbolId,
    pub args: TypeArgs,
    pub member: Atom,
}

/// Normalized shape of a declarable member.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberSignature {
    pub kind: MemberKind,
    pub name: Atom,
    pub accessibility: Accessibility,
    pub mods: MemberMods,
    pub type_params: Vec<TypeParamInfo>,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub return_ref: RefKind,
    /// Accessors required (interface members) or provided (class members).
    /// Empty for methods and operators.
    pub accessors: Accessors,
    /// Set when the member can only be implemented with explicit interface
    /// syntax: non-public interface member, inaccessible type in the
    /// signature, unexpressible substituted constraint, or a static-abstract
    /// operator.
    pub explicit_only: bool,
    /// For class members: which interface member this explicitly implements.
    pub explicit_impl_of: Option<ExplicitImplOf>,
}

impl MemberSignature {
    /// A plain public instance method `name(params) -> return_type`.
    pub fn method(name: Atom, params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        Self {
            kind: MemberKind::Method,
            name,
            accessibility: Accessibility::Public,
            mods: MemberMods::empty(),
            type_params: Vec::new(),
            params,
            return_type,
            return_ref: RefKind::Value,
            accessors: Accessors::empty(),
            explicit_only: false,
            explicit_impl_of: None,
        }
    }

    /// A public instance property with the given accessors.
    pub fn property(name: Atom, ty: TypeId, accessors: Accessors) -> Self {
        Self {
            kind: MemberKind::Property,
            name,
            accessibility: Accessibility::Public,
            mods: MemberMods::empty(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: ty,
            return_ref: RefKind::Value,
            accessors,
            explicit_only: false,
            explicit_impl_of: None,
        }
    }

    /// A public instance event.
    pub fn event(name: Atom, handler_ty: TypeId) -> Self {
        Self {
            kind: MemberKind::Event,
            name,
            accessibility: Accessibility::Public,
            mods: MemberMods::empty(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: handler_ty,
            return_ref: RefKind::Value,
            accessors: Accessors::ADD | Accessors::REMOVE,
            explicit_only: false,
            explicit_impl_of: None,
        }
    }

    /// A private instance field (class-side only).
    pub fn field(name: Atom, ty: TypeId) -> Self {
        Self {
            kind: MemberKind::Field,
            name,
            accessibility: Accessibility::Private,
            mods: MemberMods::empty(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: ty,
            return_ref: RefKind::Value,
            accessors: Accessors::empty(),
            explicit_only: false,
            explicit_impl_of: None,
        }
    }

    pub fn is_static(&self) -> bool {
        self.mods.contains(MemberMods::STATIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.mods.contains(MemberMods::ABSTRACT)
    }

    /// Static interface members that are not abstract (static virtual/sealed
    /// default members) are inherited for free and never need implementation.
    pub fn is_free_static_default(&self) -> bool {
        self.is_static() && !self.is_abstract()
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::OperatorUnary | MemberKind::OperatorBinary | MemberKind::OperatorConversion
        )
    }
}
