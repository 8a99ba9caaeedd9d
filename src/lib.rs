//! A typed Ethereum JSON RPC client.
//!
//! The crate is split into a pure value layer and a thin call surface on top
//! of it:
//!
//! - [`codec`] converts between integers and their QUANTITY and DATA wire
//!   forms;
//! - [`validate`] checks the shape of wire strings before they are used;
//! - [`typed`] provides [`TypedValue`], a tagged value with both a native and
//!   a wire representation;
//! - [`Client`] executes calls from the method catalog below over a blocking
//!   [`Transport`].
//!
//! Documentation for the node APIs can be found here:
//! <https://ethereum.org/en/developers/docs/apis/json-rpc/>

pub mod client;
pub mod codec;
#[cfg(feature = "curl")]
pub mod curl;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod jsonrpc;
#[macro_use]
pub mod method;
mod debug;
mod serialization;
pub mod typed;
pub mod types;
pub mod validate;

pub use self::{
    client::{Client, Transport},
    error::ValueError,
    typed::{Kind, TypedValue},
};

use self::types::*;
use serde_json::Value;

module! {
    /// The `web3` namespace.
    pub mod web3 {
        /// Returns the current client version.
        pub struct ClientVersion as "web3_clientVersion"
            Empty => String;

        /// Returns the Keccak-256 of the given data.
        pub struct Sha3 as "web3_sha3"
            (Data,) => Hash;
    }
}

module! {
    /// The `net` namespace.
    pub mod net {
        /// Returns the current network ID.
        pub struct Version as "net_version"
            Empty => String;

        /// Returns `true` if the client is actively listening for network
        /// connections.
        pub struct Listening as "net_listening"
            Empty => bool;

        /// Returns the number of peers currently connected to the client.
        ///
        /// Some nodes report this as a JSON number instead of a QUANTITY, both
        /// are accepted.
        pub struct PeerCount as "net_peerCount"
            Empty => U256 [serialization::quantity];
    }
}

module! {
    /// The `eth` namespace.
    pub mod eth {
        /// Returns the current Ethereum protocol version.
        pub struct ProtocolVersion as "eth_protocolVersion"
            Empty => String;

        /// Returns an object with data about the sync status or false.
        pub struct Syncing as "eth_syncing"
            Empty => SyncingStatus;

        /// Returns the client coinbase address.
        pub struct Coinbase as "eth_coinbase"
            Empty => Address;

        /// Returns `true` if the client is actively mining new blocks.
        pub struct Mining as "eth_mining"
            Empty => bool;

        /// Returns the number of hashes per second that the node is mining
        /// with.
        pub struct Hashrate as "eth_hashrate"
            Empty => U256 [serialization::quantity];

        /// Returns the current price per gas in wei.
        pub struct GasPrice as "eth_gasPrice"
            Empty => U256 [serialization::quantity];

        /// Returns a list of addresses owned by client.
        pub struct Accounts as "eth_accounts"
            Empty => Vec<Address>;

        /// Returns the number of most recent block.
        pub struct BlockNumber as "eth_blockNumber"
            Empty => U256 [serialization::quantity];

        /// Returns the balance of the account of given address.
        pub struct GetBalance as "eth_getBalance"
            (Address, BlockParam) => U256 [serialization::quantity];

        /// Returns the value from a storage position at a given address.
        pub struct GetStorageAt as "eth_getStorageAt"
            (Address, Quantity, BlockParam) => Data;

        /// Returns the number of transactions sent from an address.
        pub struct GetTransactionCount as "eth_getTransactionCount"
            (Address, BlockParam) => U256 [serialization::quantity];

        /// Returns the number of transactions in a block from a block matching
        /// the given block hash.
        pub struct GetBlockTransactionCountByHash as "eth_getBlockTransactionCountByHash"
            (Hash,) => Option<Quantity>;

        /// Returns the number of transactions in a block matching the given
        /// block parameter.
        pub struct GetBlockTransactionCountByNumber as "eth_getBlockTransactionCountByNumber"
            (BlockParam,) => Option<Quantity>;

        /// Returns the number of uncles in a block from a block matching the
        /// given block hash.
        pub struct GetUncleCountByBlockHash as "eth_getUncleCountByBlockHash"
            (Hash,) => Option<Quantity>;

        /// Returns the number of uncles in a block matching the given block
        /// parameter.
        pub struct GetUncleCountByBlockNumber as "eth_getUncleCountByBlockNumber"
            (BlockParam,) => Option<Quantity>;

        /// Returns code at a given address.
        pub struct GetCode as "eth_getCode"
            (Address, BlockParam) => Data;

        /// Signs data with the private key of the given account.
        pub struct Sign as "eth_sign"
            (Address, Data) => Data;

        /// Creates a new message call transaction or a contract creation.
        pub struct SendTransaction as "eth_sendTransaction"
            (Transaction,) => Hash;

        /// Executes a new message call immediately without creating a
        /// transaction on the block chain.
        pub struct Call as "eth_call"
            (Transaction, BlockParam) => Data;

        /// Generates and returns an estimate of how much gas is necessary to
        /// allow the transaction to complete.
        pub struct EstimateGas as "eth_estimateGas"
            (Transaction, BlockParam) => U256 [serialization::quantity];

        /// Returns information about a block by hash.
        pub struct GetBlockByHash as "eth_getBlockByHash"
            (Hash, Hydrated) => Option<Value>;

        /// Returns information about a block by block parameter.
        pub struct GetBlockByNumber as "eth_getBlockByNumber"
            (BlockParam, Hydrated) => Option<Value>;

        /// Returns the information about a transaction requested by transaction
        /// hash.
        pub struct GetTransactionByHash as "eth_getTransactionByHash"
            (Hash,) => Option<Value>;

        /// Returns information about a transaction by block hash and
        /// transaction index position.
        pub struct GetTransactionByBlockHashAndIndex as "eth_getTransactionByBlockHashAndIndex"
            (Hash, Quantity) => Option<Value>;

        /// Returns information about a transaction by block parameter and
        /// transaction index position.
        pub struct GetTransactionByBlockNumberAndIndex as "eth_getTransactionByBlockNumberAndIndex"
            (BlockParam, Quantity) => Option<Value>;

        /// Returns the receipt of a transaction by transaction hash.
        pub struct GetTransactionReceipt as "eth_getTransactionReceipt"
            (Hash,) => Option<Value>;

        /// Returns information about an uncle of a block by hash and uncle
        /// index position.
        pub struct GetUncleByBlockHashAndIndex as "eth_getUncleByBlockHashAndIndex"
            (Hash, Quantity) => Option<Value>;

        /// Returns information about an uncle of a block by block parameter and
        /// uncle index position.
        pub struct GetUncleByBlockNumberAndIndex as "eth_getUncleByBlockNumberAndIndex"
            (BlockParam, Quantity) => Option<Value>;

        /// Returns a list of available compilers in the client.
        pub struct GetCompilers as "eth_getCompilers"
            Empty => Vec<String>;

        /// Returns compiled Solidity code.
        pub struct CompileSolidity as "eth_compileSolidity"
            (String,) => Value;

        /// Returns compiled LLL code.
        pub struct CompileLll as "eth_compileLLL"
            (String,) => Value;

        /// Returns compiled Serpent code.
        pub struct CompileSerpent as "eth_compileSerpent"
            (String,) => Value;

        /// Creates a log filter in the node and returns its identifier.
        pub struct NewFilter as "eth_newFilter"
            (Filter,) => U256 [serialization::quantity];

        /// Creates a filter in the node to notify when a new block arrives and
        /// returns its identifier.
        pub struct NewBlockFilter as "eth_newBlockFilter"
            Empty => U256 [serialization::quantity];

        /// Creates a filter in the node to notify when new pending
        /// transactions arrive and returns its identifier.
        pub struct NewPendingTransactionFilter as "eth_newPendingTransactionFilter"
            Empty => U256 [serialization::quantity];

        /// Uninstalls a filter with given id.
        pub struct UninstallFilter as "eth_uninstallFilter"
            (Quantity,) => bool;

        /// Polling method for a filter, which returns an array of logs or
        /// hashes which occurred since last poll.
        pub struct GetFilterChanges as "eth_getFilterChanges"
            (Quantity,) => Value;

        /// Returns an array of all logs matching the filter with the given id.
        pub struct GetFilterLogs as "eth_getFilterLogs"
            (Quantity,) => Value;

        /// Returns an array of all logs matching the specified filter.
        pub struct GetLogs as "eth_getLogs"
            (Filter,) => Value;

        /// Returns the hash of the current block, the seed hash, and the
        /// boundary condition to be met.
        pub struct GetWork as "eth_getWork"
            Empty => Vec<Data>;

        /// Submits a proof-of-work solution.
        pub struct SubmitWork as "eth_submitWork"
            (Nonce, Hash, Hash) => bool;
    }
}

module! {
    /// The `db` namespace.
    pub mod db {
        /// Stores a string in the local database.
        pub struct PutString as "db_putString"
            (String, String, String) => bool;

        /// Returns a string from the local database.
        pub struct GetString as "db_getString"
            (String, String) => String;

        /// Stores binary data in the local database.
        pub struct PutHex as "db_putHex"
            (String, String, Data) => bool;

        /// Returns binary data from the local database.
        pub struct GetHex as "db_getHex"
            (String, String) => Data;
    }
}

module! {
    /// The `shh` (whisper) namespace.
    pub mod shh {
        /// Returns the current whisper protocol version.
        pub struct Version as "shh_version"
            Empty => String;

        /// Sends a whisper message.
        pub struct Post as "shh_post"
            (WhisperPost,) => bool;

        /// Creates a new whisper identity in the client.
        pub struct NewIdentity as "shh_newIdentity"
            Empty => Data;

        /// Checks if the client holds the private keys for a given identity.
        pub struct HasIdentity as "shh_hasIdentity"
            (Data,) => bool;

        /// Creates a filter to notify when the client receives a whisper
        /// message matching the filter options.
        pub struct NewFilter as "shh_newFilter"
            (WhisperFilter,) => U256 [serialization::quantity];

        /// Uninstalls a filter with given id.
        pub struct UninstallFilter as "shh_uninstallFilter"
            (Quantity,) => bool;

        /// Polling method for whisper filters. Returns new messages since the
        /// last call of this method.
        pub struct GetFilterChanges as "shh_getFilterChanges"
            (Quantity,) => Value;

        /// Returns all messages matching a filter.
        pub struct GetMessages as "shh_getMessages"
            (Quantity,) => Value;
    }
}
