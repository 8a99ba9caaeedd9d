//! Typed RPC values.
//!
//! A [`TypedValue`] unifies the native and the wire representation of one of
//! a small, closed set of kinds. Kinds are looked up by name through a static
//! alias table, so `"Q"`, `"int"` and `"quantity"` all resolve to
//! [`Kind::Integer`]:
//!
//! ```
//! use ethclient::typed::TypedValue;
//!
//! let value = TypedValue::new("integer", 100_u64).unwrap();
//! assert_eq!(value.wire(), "0x64");
//! assert_eq!(value, TypedValue::new("Q", "0x00000000064").unwrap());
//! ```

use crate::{codec, error::ValueError, validate};
use ethprim::{AsU256 as _, U256};
use serde::{Serialize, Serializer};
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The kind of a typed value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// A boolean, encoded as a padded 4-byte word.
    Bool,
    /// A 32-byte hash.
    Hash,
    /// A 20-byte address.
    Address,
    /// An unsigned integer QUANTITY.
    Integer,
    /// A string, passed through unchanged.
    String,
}

/// Type names and the kinds they resolve to.
const ALIASES: [(&str, Kind); 14] = [
    ("bool", Kind::Bool),
    ("boolean", Kind::Bool),
    ("B", Kind::Bool),
    ("hash", Kind::Hash),
    ("tx_hash", Kind::Hash),
    ("D32", Kind::Hash),
    ("address", Kind::Address),
    ("D20", Kind::Address),
    ("integer", Kind::Integer),
    ("int", Kind::Integer),
    ("quantity", Kind::Integer),
    ("Q", Kind::Integer),
    ("string", Kind::String),
    ("S", Kind::String),
];

impl Kind {
    /// Resolves a type name or alias.
    pub fn from_alias(name: &str) -> Result<Self, ValueError> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ValueError::UnknownType(name.to_owned()))
    }

    /// Returns the canonical name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Hash => "hash",
            Self::Address => "address",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    /// Returns all type names that resolve to this kind.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(alias, _)| *alias)
    }
}

impl FromStr for Kind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value to construct a [`TypedValue`] from.
#[derive(Clone, Debug)]
pub enum Input<'a> {
    /// A native boolean.
    Bool(bool),
    /// A native unsigned integer.
    Integer(U256),
    /// A string, either in wire format or a decimal number.
    Str(Cow<'a, str>),
}

impl Display for Input<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Input<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<U256> for Input<'_> {
    fn from(value: U256) -> Self {
        Self::Integer(value)
    }
}

macro_rules! impl_input_from_uint {
    ($($t:ty,)*) => {$(
        impl From<$t> for Input<'_> {
            fn from(value: $t) -> Self {
                Self::Integer(u128::from(value).as_u256())
            }
        }
    )*};
}

impl_input_from_uint! {
    u8,
    u16,
    u32,
    u64,
    u128,
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Input<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

/// A validated value of a given [`Kind`].
///
/// A typed value can only be obtained through validating constructors, so it
/// is always valid for its kind.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypedValue(Repr);

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum Repr {
    Bool(bool),
    Hash(U256),
    Address(U256),
    Integer(U256),
    String(String),
}

/// The native representation of a typed value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Native<'a> {
    /// A boolean.
    Bool(bool),
    /// An unsigned integer (for integers, hashes and addresses).
    Integer(U256),
    /// A string.
    String(&'a str),
}

impl TypedValue {
    /// Creates a new typed value for a type name or alias.
    pub fn new<'a>(kind: &str, value: impl Into<Input<'a>>) -> Result<Self, ValueError> {
        Self::with_kind(Kind::from_alias(kind)?, value)
    }

    /// Creates a new typed value of the specified kind.
    pub fn with_kind<'a>(kind: Kind, value: impl Into<Input<'a>>) -> Result<Self, ValueError> {
        let value = value.into();
        let repr = match kind {
            Kind::Bool => parse_bool(&value).map(Repr::Bool),
            Kind::Hash => parse_word(&value, 32).map(Repr::Hash),
            Kind::Address => parse_word(&value, 20).map(Repr::Address),
            Kind::Integer => parse_integer(&value).map(Repr::Integer),
            Kind::String => match &value {
                Input::Str(value) => Some(Repr::String(value.to_string())),
                _ => None,
            },
        };
        repr.map(Self)
            .ok_or_else(|| ValueError::invalid_argument(kind.name(), &value))
    }

    /// Returns the kind of the value.
    pub fn kind(&self) -> Kind {
        match &self.0 {
            Repr::Bool(_) => Kind::Bool,
            Repr::Hash(_) => Kind::Hash,
            Repr::Address(_) => Kind::Address,
            Repr::Integer(_) => Kind::Integer,
            Repr::String(_) => Kind::String,
        }
    }

    /// Returns the native representation of the value.
    pub fn native(&self) -> Native<'_> {
        match &self.0 {
            Repr::Bool(value) => Native::Bool(*value),
            Repr::Hash(value) | Repr::Address(value) | Repr::Integer(value) => {
                Native::Integer(*value)
            }
            Repr::String(value) => Native::String(value),
        }
    }

    /// Returns the JSON RPC wire representation of the value.
    pub fn wire(&self) -> String {
        match &self.0 {
            Repr::Bool(value) => format!("0x{:08x}", u8::from(*value)),
            Repr::Hash(value) => codec::encode_word(*value, 32),
            Repr::Address(value) => codec::encode_word(*value, 20),
            Repr::Integer(value) => codec::encode_quantity(*value),
            Repr::String(value) => value.clone(),
        }
    }

    /// Returns the value as an integer, if it is numeric.
    pub fn as_u256(&self) -> Option<U256> {
        match self.native() {
            Native::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self.native() {
            Native::Bool(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self.native() {
            Native::String(value) => Some(value),
            _ => None,
        }
    }
}

fn word_to_bool(value: U256) -> Option<bool> {
    if value == U256::ZERO {
        Some(false)
    } else if value == U256::ONE {
        Some(true)
    } else {
        None
    }
}

fn parse_bool(value: &Input) -> Option<bool> {
    match value {
        Input::Bool(value) => Some(*value),
        Input::Integer(value) => word_to_bool(*value),
        Input::Str(value) => match &**value {
            "true" => Some(true),
            "false" => Some(false),
            value if validate::is_valid_quantity(value) => {
                codec::decode_quantity(value).ok().and_then(word_to_bool)
            }
            _ => None,
        },
    }
}

fn parse_word(value: &Input, len: usize) -> Option<U256> {
    let word = match value {
        Input::Bool(_) => return None,
        Input::Integer(value) => *value,
        Input::Str(value) if value.starts_with("0x") => {
            let bytes = codec::decode_fixed(value, len).ok()?;
            codec::word_from_be(&bytes).ok()?
        }
        Input::Str(value) => codec::decode_quantity(value)
            .ok()
            .filter(|_| value.bytes().all(|c| c.is_ascii_digit()))?,
    };

    // The word must fit in `len` bytes.
    (word.leading_zeros() as usize >= 8 * (32 - len)).then_some(word)
}

fn parse_integer(value: &Input) -> Option<U256> {
    match value {
        Input::Bool(value) => Some(u8::from(*value).as_u256()),
        Input::Integer(value) => Some(*value),
        Input::Str(value) => codec::decode_quantity(value).ok(),
    }
}

impl Display for TypedValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.wire())
    }
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.wire())
    }
}
