//! Module containing the concept of an Ethereum RPC method.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;

/// A trait defining an Ethereum RPC method.
///
/// Methods know their name and how to encode their parameters and decode
/// their result. Catalog methods are declared with the [`module!`] macro,
/// while plain strings can be used as methods with raw JSON parameters and
/// results.
pub trait Method {
    type Params;
    type Result;

    fn name(&self) -> Cow<'static, str>;

    fn deserialize_params<'de, D>(deserializer: D) -> Result<Self::Params, D::Error>
    where
        D: Deserializer<'de>;
    fn serialize_params<S>(value: &Self::Params, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer;

    fn deserialize_result<'de, D>(deserializer: D) -> Result<Self::Result, D::Error>
    where
        D: Deserializer<'de>;
    fn serialize_result<S>(value: &Self::Result, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer;
}

macro_rules! impl_method_for_stringlike {
    ($($str:ty,)*) => {$(
        impl Method for $str {
            type Params = Value;
            type Result = Value;

            fn name(&self) -> Cow<'static, str> {
                Cow::Owned(self.to_string())
            }

            fn deserialize_params<'de, D>(deserializer: D) -> Result<Self::Params, D::Error>
            where
                D: Deserializer<'de>,
            {
                Value::deserialize(deserializer)
            }

            fn serialize_params<S>(value: &Self::Params, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                value.serialize(serializer)
            }

            fn deserialize_result<'de, D>(deserializer: D) -> Result<Self::Result, D::Error>
            where
                D: Deserializer<'de>,
            {
                Value::deserialize(deserializer)
            }

            fn serialize_result<S>(value: &Self::Result, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                value.serialize(serializer)
            }
        }
    )*};
}

impl_method_for_stringlike! {
    &'_ str,
    String,
    Cow<'_, str>,
}

/// Declares a single RPC method.
///
/// Parameters and result are (de)serialized with their `serde` implementations
/// unless a module with `serialize` and `deserialize` functions is specified in
/// brackets after the type, in the style of `#[serde(with = "...")]`.
#[macro_export]
macro_rules! method {
    (@deserialize $ty:ty; $deserializer:ident) => {
        <$ty as ::serde::Deserialize>::deserialize($deserializer)
    };
    (@deserialize $ty:ty; $deserializer:ident [$($with:tt)*]) => {
        $($with)*::deserialize($deserializer)
    };
    (@serialize $ty:ty; $value:ident, $serializer:ident) => {
        <$ty as ::serde::Serialize>::serialize($value, $serializer)
    };
    (@serialize $ty:ty; $value:ident, $serializer:ident [$($with:tt)*]) => {
        $($with)*::serialize($value, $serializer)
    };

    (
        $(#[$attr:meta])*
        $pub:vis struct $type:ident as $name:literal
            $params:ty $([$($paramsas:tt)*])? => $result:ty $([$($resultas:tt)*])?;
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default)]
        $pub struct $type;

        impl ::std::fmt::Debug for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.debug_tuple(stringify!($type))
                    .field(&$name)
                    .finish()
            }
        }

        impl $crate::method::Method for $type {
            type Params = $params;
            type Result = $result;

            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($name)
            }

            fn deserialize_params<'de, D>(deserializer: D) -> Result<Self::Params, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::method!(@deserialize $params; deserializer $([$($paramsas)*])?)
            }

            fn serialize_params<S>(value: &Self::Params, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::method!(@serialize $params; value, serializer $([$($paramsas)*])?)
            }

            fn deserialize_result<'de, D>(deserializer: D) -> Result<Self::Result, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::method!(@deserialize $result; deserializer $([$($resultas)*])?)
            }

            fn serialize_result<S>(value: &Self::Result, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::method!(@serialize $result; value, serializer $([$($resultas)*])?)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = ::std::borrow::Cow::<str>::deserialize(deserializer)?;
                if value != $name {
                    return Err(::serde::de::Error::custom(format!(
                        "expected {:?} but got {:?}",
                        $name,
                        value,
                    )));
                }
                Ok(Self)
            }
        }

        impl ::serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($name)
            }
        }
    };
}

/// Declares a namespace module of RPC methods.
#[macro_export]
macro_rules! module {
    (
        $(#[$attr:meta])*
        $pub:vis mod $mod:ident {
            $(
                $(#[$ma:meta])*
                $mv:vis struct $mt:ident as $mn:literal
                    $mp:ty $([$($mpp:tt)*])? => $mr:ty $([$($mrr:tt)*])?;
            )*
        }
    ) => {
        $(#[$attr])*
        $pub mod $mod {
            #[allow(unused_imports)]
            use super::*;

            $(
                $crate::method! {
                    $(#[$ma])* $mv struct $mt as $mn
                        $mp $([$($mpp)*])? => $mr $([$($mrr)*])?;
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eth, net, types::Empty};
    use ethprim::AsU256 as _;
    use serde_json::json;

    #[test]
    fn method_names() {
        assert_eq!(eth::GetBalance.name(), "eth_getBalance");
        assert_eq!(format!("{:?}", net::PeerCount), r#"PeerCount("net_peerCount")"#);
        assert_eq!("custom_method".name(), "custom_method");

        assert_eq!(json!(eth::BlockNumber), json!("eth_blockNumber"));
        assert!(serde_json::from_value::<eth::BlockNumber>(json!("eth_blockNumber")).is_ok());
        assert!(serde_json::from_value::<eth::BlockNumber>(json!("eth_gasPrice")).is_err());
    }

    #[test]
    fn custom_result_serialization() {
        let number = eth::BlockNumber::deserialize_result(json!("0x10")).unwrap();
        assert_eq!(number, 16_u64.as_u256());
        assert_eq!(
            eth::BlockNumber::serialize_result(&number, serde_json::value::Serializer).unwrap(),
            json!("0x10"),
        );
        assert_eq!(
            eth::BlockNumber::serialize_params(&Empty, serde_json::value::Serializer).unwrap(),
            json!([]),
        );
    }
}
