//! JSON RPC 2.0 envelopes and the single call roundtrip.

use crate::method::Method;
use serde::{
    de::{self, Deserializer},
    Deserialize, Serialize,
};
use serde_json::Value;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Performs a single JSON RPC call.
///
/// The request envelope is serialized and handed to `roundtrip`, which
/// returns the raw response body. Errors returned by `roundtrip` are passed
/// through unchanged.
pub fn call<M, F, E>(id: Id, method: M, params: M::Params, roundtrip: F) -> Result<M::Result, E>
where
    M: Method + Serialize,
    F: FnOnce(String) -> Result<String, E>,
    E: From<Error> + From<serde_json::Error>,
{
    let request = serde_json::to_string(&Request {
        jsonrpc: Version::V2,
        method,
        params,
        id,
    })?;
    tracing::trace!(%request, "sending JSON RPC request");

    let body = roundtrip(request)?;
    tracing::trace!(response = %body, "received JSON RPC response");

    let response = serde_json::from_str::<Response<M>>(&body)?;
    if response.id.is_some_and(|response| response != id) {
        tracing::warn!(
            request = id.0,
            response = ?response.id,
            "JSON RPC response identifier does not match request",
        );
    }
    Ok(response.result?)
}

/// The `jsonrpc` member of every envelope.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Version {
    #[serde(rename = "2.0")]
    V2,
}

/// Identifier correlating a response with its request.
///
/// Identifiers are assigned by the client from a `u32` counter, which keeps
/// them integral and exactly representable as JSON numbers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Id(pub u32);

/// An outgoing request envelope.
#[derive(Debug, Serialize)]
#[serde(bound = "M: Method + Serialize")]
pub struct Request<M>
where
    M: Method,
{
    pub jsonrpc: Version,
    pub method: M,
    #[serde(serialize_with = "M::serialize_params")]
    pub params: M::Params,
    pub id: Id,
}

/// An incoming response envelope.
///
/// Exactly one of `result` and `error` must be present, anything else is
/// rejected while deserializing.
#[derive(Debug)]
pub struct Response<M>
where
    M: Method,
{
    pub jsonrpc: Version,
    pub result: Result<M::Result, Error>,
    pub id: Option<Id>,
}

impl<'de, M> Deserialize<'de> for Response<M>
where
    M: Method,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = envelope::Envelope::<M>::deserialize(deserializer)?;
        let result = match (envelope.result, envelope.error) {
            (Some(payload), None) => Ok(payload.0),
            (None, Some(error)) => Err(error),
            (Some(_), Some(_)) => {
                return Err(de::Error::custom("both 'result' and 'error' fields"))
            }
            (None, None) => return Err(de::Error::custom("missing 'result' or 'error' field")),
        };

        Ok(Self {
            jsonrpc: envelope.jsonrpc,
            result,
            id: envelope.id,
        })
    }
}

mod envelope {
    use super::{Error, Id, Version};
    use crate::method::Method;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(transparent)]
    pub struct Payload<M>(#[serde(deserialize_with = "M::deserialize_result")] pub M::Result)
    where
        M: Method;

    #[derive(Deserialize)]
    #[serde(bound(deserialize = "M: Method"), deny_unknown_fields)]
    pub struct Envelope<M>
    where
        M: Method,
    {
        pub jsonrpc: Version,
        // `null` is a valid result for some methods, so presence of the
        // member is tracked separately from its value.
        #[serde(default, deserialize_with = "present")]
        pub result: Option<Payload<M>>,
        #[serde(default)]
        pub error: Option<Error>,
        #[serde(default)]
        pub id: Option<Id>,
    }

    fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Some)
    }
}

/// The `error` member of a failed response.
#[derive(Clone, Debug, Deserialize, Error, Serialize)]
#[error("RPC error {code}: {message}")]
#[serde(deny_unknown_fields)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Classification of a JSON RPC error code.
#[derive(Clone, Copy, Debug, Deserialize, Error, Eq, PartialEq, Serialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorCode {
    #[error("parse error")]
    ParseError,
    #[error("invalid request")]
    InvalidRequest,
    #[error("method not found")]
    MethodNotFound,
    #[error("invalid params")]
    InvalidParams,
    #[error("internal error")]
    InternalError,
    /// Implementation defined server errors.
    #[error("server error ({0})")]
    ServerError(i32),
    /// Any other code in the range reserved for the protocol.
    #[error("reserved ({0})")]
    Reserved(i32),
    /// Application defined codes.
    #[error("{0}")]
    Other(i32),
}

const SERVER_ERRORS: RangeInclusive<i32> = -32099..=-32000;
const RESERVED: RangeInclusive<i32> = -32768..=-32000;

impl ErrorCode {
    const STANDARD: [Self; 5] = [
        Self::ParseError,
        Self::InvalidRequest,
        Self::MethodNotFound,
        Self::InvalidParams,
        Self::InternalError,
    ];

    /// Returns the numeric code.
    pub fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ServerError(code) | Self::Reserved(code) | Self::Other(code) => code,
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        if let Some(standard) = Self::STANDARD.into_iter().find(|kind| kind.code() == code) {
            standard
        } else if SERVER_ERRORS.contains(&code) {
            Self::ServerError(code)
        } else if RESERVED.contains(&code) {
            Self::Reserved(code)
        } else {
            Self::Other(code)
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eth,
        types::{Address, BlockParam},
        web3,
    };
    use ethprim::AsU256 as _;
    use serde_json::json;

    fn respond(
        response: Value,
    ) -> impl FnOnce(String) -> Result<String, Box<dyn std::error::Error>> {
        move |_| Ok(response.to_string())
    }

    #[test]
    fn serializes_requests() {
        let address = "0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f"
            .parse::<Address>()
            .unwrap();
        let balance = call(
            Id(7),
            eth::GetBalance,
            (address, BlockParam::default()),
            |request| {
                assert_eq!(
                    serde_json::from_str::<Value>(&request).unwrap(),
                    json!({
                        "jsonrpc": "2.0",
                        "method": "eth_getBalance",
                        "params": ["0xf4c875ee7a70fae078c9a4b07dc4f6970a804f6f", "latest"],
                        "id": 7,
                    }),
                );
                Ok::<_, Box<dyn std::error::Error>>(
                    json!({ "jsonrpc": "2.0", "id": 7, "result": "0x0234c8a3397aab58" })
                        .to_string(),
                )
            },
        )
        .unwrap();
        assert_eq!(balance, 158972490234375000_u64.as_u256());
    }

    #[test]
    fn null_results() {
        let block = call(
            Id(1),
            eth::GetBlockByNumber,
            (BlockParam::default(), Default::default()),
            respond(json!({ "jsonrpc": "2.0", "id": 1, "result": null })),
        )
        .unwrap();
        assert_eq!(block, None);
    }

    #[test]
    fn error_responses() {
        let err = call(
            Id(1),
            web3::ClientVersion,
            crate::types::Empty,
            respond(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32601, "message": "method not found" },
            })),
        )
        .unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert_eq!(err.code, ErrorCode::MethodNotFound);
        assert_eq!(err.message, "method not found");
    }

    #[test]
    fn malformed_responses() {
        for response in [
            json!({ "jsonrpc": "2.0", "id": 1 }),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": "a",
                "error": { "code": 1, "message": "" },
            }),
            json!({ "jsonrpc": "1.0", "id": 1, "result": "a" }),
            json!({ "jsonrpc": "2.0", "id": 1, "result": "a", "extra": true }),
        ] {
            let err = call(Id(1), web3::ClientVersion, crate::types::Empty, respond(response))
                .unwrap_err();
            assert!(err.is::<serde_json::Error>());
        }
    }

    #[test]
    fn error_codes() {
        assert_eq!(ErrorCode::from(-32000), ErrorCode::ServerError(-32000));
        assert_eq!(ErrorCode::from(-32100), ErrorCode::Reserved(-32100));
        assert_eq!(ErrorCode::from(3), ErrorCode::Other(3));
        assert_eq!(i32::from(ErrorCode::InvalidParams), -32602);
        assert_eq!(ErrorCode::from(-32601), ErrorCode::MethodNotFound);
        assert_eq!(ErrorCode::Other(42).code(), 42);
    }
}
