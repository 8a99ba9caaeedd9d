//! JSON serialization helpers built on top of the [`codec`](crate::codec).

use crate::{codec, error::ValueError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

fn custom<E>(err: ValueError) -> E
where
    E: de::Error,
{
    E::custom(err)
}

/// Serialize a variable length `[u8]` as DATA.
pub mod bytes {
    use super::*;
    use std::borrow::Cow;

    #[doc(hidden)]
    pub fn serialize<T, S>(value: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        codec::encode_data(value.as_ref()).serialize(serializer)
    }

    #[doc(hidden)]
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: From<Vec<u8>>,
        D: Deserializer<'de>,
    {
        let hex = Cow::<str>::deserialize(deserializer)?;
        codec::decode_data(&hex).map(T::from).map_err(custom)
    }
}

/// Serialize a fixed size `[u8; N]` as DATA.
pub mod bytearray {
    use super::*;
    use std::borrow::Cow;

    #[doc(hidden)]
    pub fn serialize<const N: usize, S>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        bytes::serialize(value, serializer)
    }

    #[doc(hidden)]
    pub fn deserialize<'de, const N: usize, D>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = Cow::<str>::deserialize(deserializer)?;
        codec::decode_fixed_array(&hex).map_err(custom)
    }
}

/// Serialize a `U256` as QUANTITY.
///
/// Deserialization is lenient and also accepts plain JSON numbers, as some
/// nodes return those for counters such as the peer count.
pub mod quantity {
    use super::*;
    use ethprim::U256;
    use serde_json::Value;

    #[doc(hidden)]
    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        codec::encode_quantity(*value).serialize(serializer)
    }

    #[doc(hidden)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        codec::decode_quantity_value(&value).map_err(custom)
    }
}
