//! Interned structural types.
//!
//! Types are hash-consed into a [`TypeStore`]: structurally equal types get
//! the same [`TypeId`], so signature comparison after substitution is `u32`
//! equality. The store is append-only and safe for concurrent reads, matching
//! the engine's read-parallel batch model.

use crate::symbols::SymbolId;
use dashmap::DashMap;
use ifx_common::Atom;
use smallvec::SmallVec;
use std::sync::RwLock;

/// Interned type identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Sentinel for unrepresentable / erroneous types. Members whose
    /// signature contains it are dropped rather than synthesized.
    pub const ERROR: Self = Self(0);

    pub const BOOL: Self = Self(1);
    pub const CHAR: Self = Self(2);
    pub const STRING: Self = Self(3);
    pub const OBJECT: Self = Self(4);
    pub const VOID: Self = Self(5);
    pub const I8: Self = Self(6);
    pub const I16: Self = Self(7);
    pub const I32: Self = Self(8);
    pub const I64: Self = Self(9);
    pub const U8: Self = Self(10);
    pub const U16: Self = Self(11);
    pub const U32: Self = Self(12);
    pub const U64: Self = Self(13);
    pub const F32: Self = Self(14);
    pub const F64: Self = Self(15);
    pub const DECIMAL: Self = Self(16);

    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }
}

/// Built-in value and reference primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    /// `string`, a sealed reference type.
    String,
    /// `object`, the root reference type.
    Object,
    Void,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
}

impl PrimitiveKind {
    /// Is this a value type (relevant for `default(T)` re-validation)?
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::String | Self::Object)
    }

    /// Keyword spelling used when rendering signatures.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Object => "object",
            Self::Void => "void",
            Self::I8 => "sbyte",
            Self::I16 => "short",
            Self::I32 => "int",
            Self::I64 => "long",
            Self::U8 => "byte",
            Self::U16 => "ushort",
            Self::U32 => "uint",
            Self::U64 => "ulong",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::Decimal => "decimal",
        }
    }
}

/// Type argument list. Most generic instantiations have one or two arguments.
pub type TypeArgs = SmallVec<[TypeId; 2]>;

/// Structural type representation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Error,
    Primitive(PrimitiveKind),
    /// A named (class / interface / struct / enum / delegate) type, possibly
    /// instantiated: `IList<int>` is `Named { symbol: IList, args: [int] }`.
    Named { symbol: SymbolId, args: TypeArgs },
    /// A type parameter in scope, identified by name. Whether it belongs to
    /// the interface, the member, or the implementer is decided by the
    /// substitution applied around it.
    TypeParam { name: Atom },
    /// Single-dimensional array `T[]`.
    Array(TypeId),
    /// Nullable annotation `T?` (reference or value nullability).
    Nullable(TypeId),
}

/// Append-only hash-consing store for types.
#[derive(Debug)]
pub struct TypeStore {
    map: DashMap<TypeData, TypeId>,
    data: RwLock<Vec<TypeData>>,
}

impl Default for TypeStore {
    fn default() -> Self {
        let store = Self {
            map: DashMap::new(),
            data: RwLock::new(Vec::new()),
        };
        // Pre-intern the sentinel and primitives so the TypeId constants hold.
        store.intern(TypeData::Error);
        for kind in [
            PrimitiveKind::Bool,
            PrimitiveKind::Char,
            PrimitiveKind::String,
            PrimitiveKind::Object,
            PrimitiveKind::Void,
            PrimitiveKind::I8,
            PrimitiveKind::I16,
            PrimitiveKind::I32,
            PrimitiveKind::I64,
            PrimitiveKind::U8,
            PrimitiveKind::U16,
            PrimitiveKind::U32,
            PrimitiveKind::U64,
            PrimitiveKind::F32,
            PrimitiveKind::F64,
            PrimitiveKind::Decimal,
        ] {
            store.intern(TypeData::Primitive(kind));
        }
        store
    }
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a type, returning its stable id.
    pub fn intern(&self, ty: TypeData) -> TypeId {
        if let Some(existing) = self.map.get(&ty) {
            return *existing;
        }
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = self.map.get(&ty) {
            return *existing;
        }
        let id = TypeId(data.len() as u32);
        data.push(ty.clone());
        self.map.insert(ty, id);
        id
    }

    /// Look up the structural data for an id.
    pub fn lookup(&self, id: TypeId) -> TypeData {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data[id.0 as usize].clone()
    }

    // Convenience constructors, mirroring common shapes.

    pub fn named(&self, symbol: SymbolId, args: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.intern(TypeData::Named {
            symbol,
            args: args.into_iter().collect(),
        })
    }

    pub fn type_param(&self, name: Atom) -> TypeId {
        self.intern(TypeData::TypeParam { name })
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn nullable(&self, inner: TypeId) -> TypeId {
        self.intern(TypeData::Nullable(inner))
    }
}
