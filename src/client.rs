//! Synchronous Ethereum RPC client over a pluggable transport.

use crate::{
    codec,
    error::ValueError,
    jsonrpc::{self, Id},
    method::Method,
    types::{Data, Empty},
    validate, web3,
};
use ethprim::U256;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// A blocking transport that moves serialized JSON RPC requests to a node.
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends the request body and returns the raw response body.
    fn roundtrip(&self, request: String) -> Result<String, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(String) -> Result<String, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn roundtrip(&self, request: String) -> Result<String, Self::Error> {
        self(request)
    }
}

/// An Ethereum RPC client.
///
/// Each call is assigned the next identifier of a per-client counter that
/// starts at 1. The counter is atomic, so a client can be shared between
/// threads whenever its transport allows it.
pub struct Client<T> {
    transport: T,
    id: AtomicU32,
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Creates a new client over the specified transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            id: AtomicU32::new(1),
        }
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn next_id(&self) -> Id {
        Id(self.id.fetch_add(1, Ordering::Relaxed))
    }

    fn roundtrip(&self, request: String) -> Result<String, Error> {
        self.transport
            .roundtrip(request)
            .map_err(|err| Error::Transport(Box::new(err)))
    }

    /// Executes a JSON RPC call.
    pub fn call<M>(&self, method: M, params: M::Params) -> Result<M::Result, Error>
    where
        M: Method + Serialize,
    {
        let id = self.next_id();
        let name = method.name();
        tracing::debug!(id = id.0, method = %name, "calling");

        jsonrpc::call(id, method, params, |request| self.roundtrip(request)).inspect_err(|err| {
            tracing::warn!(id = id.0, method = %name, %err, "call failed");
        })
    }

    /// Executes a JSON RPC call with empty parameters.
    pub fn exec<M>(&self, method: M) -> Result<M::Result, Error>
    where
        M: Method<Params = Empty> + Serialize,
    {
        self.call(method, Empty)
    }

    /// Executes a call by method name with positional JSON parameters,
    /// returning the result unmodified.
    ///
    /// Parameters are expected to already be in their wire form, for example
    /// the serialization of a [`TypedValue`](crate::typed::TypedValue).
    pub fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, Error> {
        self.call(method, Value::Array(params))
    }

    /// Executes a call by method name and decodes its QUANTITY result.
    pub fn request_quantity(&self, method: &str, params: Vec<Value>) -> Result<U256, Error> {
        let result = self.request(method, params)?;
        Ok(codec::decode_quantity_value(&result)?)
    }

    /// Computes the 4-byte selector of a contract method signature, such as
    /// `"transfer(address,uint256)"`, by hashing it on the node.
    ///
    /// Signatures that are already valid DATA are hashed as bytes.
    pub fn method_signature(&self, signature: &str) -> Result<[u8; 4], Error> {
        let data = if validate::is_valid_data(signature) {
            signature.parse::<Data>()?
        } else {
            Data(signature.as_bytes().to_vec())
        };

        let hash = self.call(web3::Sha3, (data,))?;
        let mut selector = [0; 4];
        selector.copy_from_slice(&hash.0[..4]);
        Ok(selector)
    }
}

/// A client call error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rpc(#[from] jsonrpc::Error),
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}
