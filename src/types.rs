//! Ethereum RPC parameter and result types.
//!
//! Parameters are validated when they are constructed (usually by parsing
//! them from their wire representation), so a request can only ever be built
//! from well-formed values.

use crate::{codec, debug, error::ValueError, serialization, validate};
use ethprim::AsU256 as _;
use serde::{
    de::{self, Deserializer},
    ser::Serializer,
    Deserialize, Serialize,
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

pub use arrayvec::ArrayVec;
pub use ethprim::U256;

/// Empty JSON RPC parameters.
pub struct Empty;

impl Serialize for Empty {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [(); 0].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[(); 0]>::deserialize(deserializer)?;
        Ok(Empty)
    }
}

/// An unsigned integer QUANTITY.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(with = "serialization::quantity")] pub U256);

impl From<U256> for Quantity {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value.as_u256())
    }
}

impl From<Quantity> for U256 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl FromStr for Quantity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = validate::ensure_quantity("quantity", s)?;
        codec::decode_quantity(s).map(Self)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&codec::encode_quantity(self.0))
    }
}

/// Variable length DATA.
#[derive(Clone, Default, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Data(#[serde(with = "serialization::bytes")] pub Vec<u8>);

impl Debug for Data {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Data").field(&debug::Hex(&self.0)).finish()
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Data {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = validate::ensure_data("data", s)?;
        codec::decode_data(s).map(Self)
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&codec::encode_data(&self.0))
    }
}

/// Fixed length DATA of `N` bytes.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct FixedData<const N: usize>(pub [u8; N]);

/// A 20-byte account address.
pub type Address = FixedData<20>;

/// A 32-byte hash.
pub type Hash = FixedData<32>;

/// An 8-byte proof-of-work nonce.
pub type Nonce = FixedData<8>;

impl<const N: usize> FixedData<N> {
    const FIELD: &'static str = match N {
        8 => "nonce",
        20 => "address",
        32 => "hash",
        _ => "data",
    };

    /// Returns the value as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Default for FixedData<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> Debug for FixedData<N> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        debug::Hex(&self.0).fmt(f)
    }
}

impl<const N: usize> Display for FixedData<N> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&codec::encode_data(&self.0))
    }
}

impl<const N: usize> FromStr for FixedData<N> {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::decode_fixed_array(s)
            .map(Self)
            .map_err(|_| ValueError::invalid_argument(Self::FIELD, s))
    }
}

impl<const N: usize> Serialize for FixedData<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialization::bytearray::serialize(&self.0, serializer)
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedData<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serialization::bytearray::deserialize(deserializer).map(Self)
    }
}

/// Block tag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    /// The earliest (genesis) block.
    Earliest,
    /// The latest mined block.
    #[default]
    Latest,
    /// The pending state and transactions.
    Pending,
}

/// The default block parameter.
///
/// Besides the literal tags, the node API overloads the 20-byte DATA shape as
/// a concrete block identifier. That overload is kept for compatibility, so
/// quantity shaped block numbers are not accepted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BlockParam {
    /// Block by tag.
    Tag(BlockTag),
    /// Block by an address shaped identifier.
    Identifier(Address),
}

impl Default for BlockParam {
    fn default() -> Self {
        Self::Tag(Default::default())
    }
}

impl From<BlockTag> for BlockParam {
    fn from(tag: BlockTag) -> Self {
        Self::Tag(tag)
    }
}

impl FromStr for BlockParam {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = validate::ensure_block_param("block", s)?;
        Ok(match s {
            "earliest" => Self::Tag(BlockTag::Earliest),
            "latest" => Self::Tag(BlockTag::Latest),
            "pending" => Self::Tag(BlockTag::Pending),
            _ => Self::Identifier(
                codec::decode_fixed_array(s)
                    .map(FixedData)
                    .map_err(|_| ValueError::invalid_argument("block", s))?,
            ),
        })
    }
}

/// Whether block transactions should be hydrated.
#[derive(Clone, Copy, Debug, Default)]
pub enum Hydrated {
    /// Only fetch transaction hashes for blocks.
    #[default]
    No,
    /// Fetch full transaction data for blocks.
    Yes,
}

impl Hydrated {
    fn from_bool(value: bool) -> Self {
        match value {
            false => Self::No,
            true => Self::Yes,
        }
    }

    fn as_bool(&self) -> bool {
        match self {
            Self::No => false,
            Self::Yes => true,
        }
    }
}

impl Serialize for Hydrated {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hydrated {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Self::from_bool)
    }
}

/// A transaction or message call object.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The sender address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// The recipient address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Gas provided for the execution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<Quantity>,
    /// Price paid for each unit of gas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Quantity>,
    /// Value sent with the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    /// Method selector and encoded arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    /// The sender nonce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Quantity>,
}

impl Transaction {
    /// Sets the call data from a 4-byte method selector (`0x` followed by 8
    /// hex digits) and its already encoded arguments (hex digits without
    /// prefix).
    pub fn set_argument(&mut self, selector: &str, argument: &str) -> Result<(), ValueError> {
        if !(validate::is_valid_data(selector) && selector.len() == 10) {
            return Err(ValueError::invalid_argument("selector", selector));
        }
        if argument.len() % 2 != 0 || !argument.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValueError::invalid_argument("argument", argument));
        }

        self.data = Some(codec::decode_data(&format!("{selector}{argument}"))?.into());
        Ok(())
    }
}

/// A log filter.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// First block to include logs for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockParam>,
    /// Last block to include logs for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockParam>,
    /// Contract address the logs originate from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Topics to match, by position. `None` matches any topic.
    #[serde(default, skip_serializing_if = "ArrayVec::is_empty")]
    pub topics: ArrayVec<Option<Hash>, 4>,
}

/// A whisper message filter.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct WhisperFilter {
    /// Identity of the receiver.
    pub to: Option<Data>,
    /// Topics to match.
    pub topics: Vec<Data>,
}

/// A whisper message to post.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct WhisperPost {
    /// Identity of the sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Data>,
    /// Identity of the receiver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Data>,
    /// Message topics.
    pub topics: Vec<Data>,
    /// Message payload.
    pub payload: Data,
    /// Message priority.
    pub priority: Quantity,
    /// Time to live in seconds.
    pub ttl: Quantity,
}

/// Syncing progress.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncingProgress {
    /// The block at which the import started.
    pub starting_block: Quantity,
    /// The current block.
    pub current_block: Quantity,
    /// The estimated highest block.
    pub highest_block: Quantity,
}

/// Syncing status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncingStatus {
    /// Syncing is in progress.
    Syncing(SyncingProgress),
    /// Not syncing.
    NotSyncing,
}

impl Serialize for SyncingStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Syncing(progress) => progress.serialize(serializer),
            Self::NotSyncing => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for SyncingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Inner {
            Syncing(SyncingProgress),
            NotSyncing(bool),
        }

        match Inner::deserialize(deserializer)? {
            Inner::Syncing(progress) => Ok(Self::Syncing(progress)),
            Inner::NotSyncing(false) => Ok(Self::NotSyncing),
            Inner::NotSyncing(true) => Err(de::Error::custom("unexpected `true` value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use serde_json::json;

    #[test]
    fn quantities() {
        let value = "0x00ff".parse::<Quantity>().unwrap();
        assert_eq!(value.0, 255_u64.as_u256());
        assert_eq!(value.to_string(), "0xff");
        assert_eq!(json!(value), json!("0xff"));
        assert!("255".parse::<Quantity>().is_err());

        assert_eq!(
            serde_json::from_value::<Quantity>(json!(7)).unwrap(),
            Quantity::from(7_u64),
        );
        assert_eq!(
            serde_json::from_value::<Quantity>(json!("0x7")).unwrap(),
            Quantity::from(7_u64),
        );
    }

    #[test]
    fn data() {
        let data = "0x68656c6c6f".parse::<Data>().unwrap();
        assert_eq!(data.0, b"hello");
        assert_eq!(json!(data), json!("0x68656c6c6f"));
        assert_eq!(format!("{data:?}"), "Data(0x68656c6c6f)");
        assert!("0x686".parse::<Data>().is_err());
    }

    #[test]
    fn addresses() {
        let address = "0xF4C875EE7A70FAE078C9A4B07DC4F6970A804F6F"
            .parse::<Address>()
            .unwrap();
        assert_eq!(address.0, hex!("f4c875ee7a70fae078c9a4b07dc4f6970a804f6f"));
        assert_eq!(
            json!(address),
            json!("0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f"),
        );
        assert_eq!(
            "0x1234".parse::<Address>(),
            Err(ValueError::InvalidArgument {
                field: "address",
                value: "0x1234".to_owned(),
            }),
        );
        assert!(matches!(
            "0x1234".parse::<Hash>(),
            Err(ValueError::InvalidArgument { field: "hash", .. }),
        ));
    }

    #[test]
    fn block_params() {
        assert_eq!(json!(BlockParam::default()), json!("latest"));
        assert_eq!(
            "pending".parse::<BlockParam>().unwrap(),
            BlockParam::Tag(BlockTag::Pending),
        );

        let identifier = format!("0x{}01", "0".repeat(38));
        let block = identifier.parse::<BlockParam>().unwrap();
        assert_eq!(json!(block), json!(identifier));
        assert_eq!(
            serde_json::from_value::<BlockParam>(json!("earliest")).unwrap(),
            BlockParam::Tag(BlockTag::Earliest),
        );

        assert_eq!(
            "0x10".parse::<BlockParam>(),
            Err(ValueError::InvalidArgument {
                field: "block",
                value: "0x10".to_owned(),
            }),
        );
    }

    #[test]
    fn transaction_call_data() {
        let mut transaction = Transaction {
            to: Some("0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f".parse().unwrap()),
            ..Default::default()
        };
        transaction
            .set_argument(
                "0x70a08231",
                "000000000000000000000000f4c875ee7a70fae078c9a4b07dc4f6970a804f6f",
            )
            .unwrap();

        assert_eq!(
            json!(transaction),
            json!({
                "to": "0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f",
                "data": "0x70a08231000000000000000000000000f4c875ee7a70fae078c9a4b07dc4f6970a804f6f",
            }),
        );

        assert!(transaction.set_argument("0x70a082", "").is_err());
        assert!(transaction.set_argument("0x70a08231", "0x00").is_err());
        assert!(transaction.set_argument("0x70a08231", "xyz0").is_err());
    }

    #[test]
    fn filters() {
        let mut filter = Filter {
            from_block: Some(BlockTag::Earliest.into()),
            ..Default::default()
        };
        filter.topics.push(None);
        filter.topics.push(Some(FixedData([0x11; 32])));

        assert_eq!(
            json!(filter),
            json!({
                "fromBlock": "earliest",
                "topics": [null, format!("0x{}", "11".repeat(32))],
            }),
        );
        assert_eq!(json!(Filter::default()), json!({}));
    }

    #[test]
    fn syncing_status() {
        assert_eq!(
            serde_json::from_value::<SyncingStatus>(json!(false)).unwrap(),
            SyncingStatus::NotSyncing,
        );
        assert_eq!(
            serde_json::from_value::<SyncingStatus>(json!({
                "startingBlock": "0x384",
                "currentBlock": "0x386",
                "highestBlock": "0x454",
            }))
            .unwrap(),
            SyncingStatus::Syncing(SyncingProgress {
                starting_block: Quantity::from(0x384_u64),
                current_block: Quantity::from(0x386_u64),
                highest_block: Quantity::from(0x454_u64),
            }),
        );
        assert!(serde_json::from_value::<SyncingStatus>(json!(true)).is_err());
    }
}
