//! Endpoint Dispatch
//!
//! The closed set of protocol endpoints and the typed body each one
//! carries. Decoding picks the body type from the endpoint, never from the
//! shape of the JSON, and validation routes on the resulting variant.

use crate::asserter::{self, Asserter, AsserterError};
use crate::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    NetworkList,
    NetworkOptions,
    NetworkStatus,
    AccountBalance,
    Block,
    BlockTransaction,
    Mempool,
    MempoolTransaction,
    ConstructionDerive,
    ConstructionPreprocess,
    ConstructionMetadata,
    ConstructionPayloads,
    ConstructionCombine,
    ConstructionParse,
    ConstructionHash,
    ConstructionSubmit,
}

impl Endpoint {
    pub const ALL: [Endpoint; 16] = [
        Endpoint::NetworkList,
        Endpoint::NetworkOptions,
        Endpoint::NetworkStatus,
        Endpoint::AccountBalance,
        Endpoint::Block,
        Endpoint::BlockTransaction,
        Endpoint::Mempool,
        Endpoint::MempoolTransaction,
        Endpoint::ConstructionDerive,
        Endpoint::ConstructionPreprocess,
        Endpoint::ConstructionMetadata,
        Endpoint::ConstructionPayloads,
        Endpoint::ConstructionCombine,
        Endpoint::ConstructionParse,
        Endpoint::ConstructionHash,
        Endpoint::ConstructionSubmit,
    ];

    /// HTTP path the endpoint is served under.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::NetworkList => "/network/list",
            Endpoint::NetworkOptions => "/network/options",
            Endpoint::NetworkStatus => "/network/status",
            Endpoint::AccountBalance => "/account/balance",
            Endpoint::Block => "/block",
            Endpoint::BlockTransaction => "/block/transaction",
            Endpoint::Mempool => "/mempool",
            Endpoint::MempoolTransaction => "/mempool/transaction",
            Endpoint::ConstructionDerive => "/construction/derive",
            Endpoint::ConstructionPreprocess => "/construction/preprocess",
            Endpoint::ConstructionMetadata => "/construction/metadata",
            Endpoint::ConstructionPayloads => "/construction/payloads",
            Endpoint::ConstructionCombine => "/construction/combine",
            Endpoint::ConstructionParse => "/construction/parse",
            Endpoint::ConstructionHash => "/construction/hash",
            Endpoint::ConstructionSubmit => "/construction/submit",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.path() == path)
    }

    /// Name of the request body type, as used in error messages.
    pub fn request_name(self) -> &'static str {
        match self {
            Endpoint::NetworkList => "MetadataRequest",
            Endpoint::NetworkOptions | Endpoint::NetworkStatus | Endpoint::Mempool => {
                "NetworkRequest"
            }
            Endpoint::AccountBalance => "AccountBalanceRequest",
            Endpoint::Block => "BlockRequest",
            Endpoint::BlockTransaction => "BlockTransactionRequest",
            Endpoint::MempoolTransaction => "MempoolTransactionRequest",
            Endpoint::ConstructionDerive => "ConstructionDeriveRequest",
            Endpoint::ConstructionPreprocess => "ConstructionPreprocessRequest",
            Endpoint::ConstructionMetadata => "ConstructionMetadataRequest",
            Endpoint::ConstructionPayloads => "ConstructionPayloadsRequest",
            Endpoint::ConstructionCombine => "ConstructionCombineRequest",
            Endpoint::ConstructionParse => "ConstructionParseRequest",
            Endpoint::ConstructionHash => "ConstructionHashRequest",
            Endpoint::ConstructionSubmit => "ConstructionSubmitRequest",
        }
    }

    /// Name of the response body type, as used in error messages.
    pub fn response_name(self) -> &'static str {
        match self {
            Endpoint::NetworkList => "NetworkListResponse",
            Endpoint::NetworkOptions => "NetworkOptionsResponse",
            Endpoint::NetworkStatus => "NetworkStatusResponse",
            Endpoint::AccountBalance => "AccountBalanceResponse",
            Endpoint::Block => "BlockResponse",
            Endpoint::BlockTransaction => "BlockTransactionResponse",
            Endpoint::Mempool => "MempoolResponse",
            Endpoint::MempoolTransaction => "MempoolTransactionResponse",
            Endpoint::ConstructionDerive => "ConstructionDeriveResponse",
            Endpoint::ConstructionPreprocess => "ConstructionPreprocessResponse",
            Endpoint::ConstructionMetadata => "ConstructionMetadataResponse",
            Endpoint::ConstructionPayloads => "ConstructionPayloadsResponse",
            Endpoint::ConstructionCombine => "ConstructionCombineResponse",
            Endpoint::ConstructionParse => "ConstructionParseResponse",
            Endpoint::ConstructionHash | Endpoint::ConstructionSubmit => {
                "TransactionIdentifierResponse"
            }
        }
    }
}

/// A decoded request body, tagged with the endpoint it was sent to.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    NetworkList(MetadataRequest),
    NetworkOptions(NetworkRequest),
    NetworkStatus(NetworkRequest),
    AccountBalance(AccountBalanceRequest),
    Block(BlockRequest),
    BlockTransaction(BlockTransactionRequest),
    Mempool(NetworkRequest),
    MempoolTransaction(MempoolTransactionRequest),
    ConstructionDerive(ConstructionDeriveRequest),
    ConstructionPreprocess(ConstructionPreprocessRequest),
    ConstructionMetadata(ConstructionMetadataRequest),
    ConstructionPayloads(ConstructionPayloadsRequest),
    ConstructionCombine(ConstructionCombineRequest),
    ConstructionParse(ConstructionParseRequest),
    ConstructionHash(ConstructionHashRequest),
    ConstructionSubmit(ConstructionSubmitRequest),
}

impl Request {
    /// Decodes `body` as the request type `endpoint` expects.
    ///
    /// A JSON `null` body is reported as a nil request.
    pub fn decode(endpoint: Endpoint, body: Value) -> Result<Self, AsserterError> {
        let name = endpoint.request_name();
        if body.is_null() {
            return Err(AsserterError::RequestIsNil(name));
        }

        Ok(match endpoint {
            Endpoint::NetworkList => Request::NetworkList(parse(name, body)?),
            Endpoint::NetworkOptions => Request::NetworkOptions(parse(name, body)?),
            Endpoint::NetworkStatus => Request::NetworkStatus(parse(name, body)?),
            Endpoint::AccountBalance => Request::AccountBalance(parse(name, body)?),
            Endpoint::Block => Request::Block(parse(name, body)?),
            Endpoint::BlockTransaction => Request::BlockTransaction(parse(name, body)?),
            Endpoint::Mempool => Request::Mempool(parse(name, body)?),
            Endpoint::MempoolTransaction => Request::MempoolTransaction(parse(name, body)?),
            Endpoint::ConstructionDerive => Request::ConstructionDerive(parse(name, body)?),
            Endpoint::ConstructionPreprocess => {
                Request::ConstructionPreprocess(parse(name, body)?)
            }
            Endpoint::ConstructionMetadata => Request::ConstructionMetadata(parse(name, body)?),
            Endpoint::ConstructionPayloads => Request::ConstructionPayloads(parse(name, body)?),
            Endpoint::ConstructionCombine => Request::ConstructionCombine(parse(name, body)?),
            Endpoint::ConstructionParse => Request::ConstructionParse(parse(name, body)?),
            Endpoint::ConstructionHash => Request::ConstructionHash(parse(name, body)?),
            Endpoint::ConstructionSubmit => Request::ConstructionSubmit(parse(name, body)?),
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Request::NetworkList(_) => Endpoint::NetworkList,
            Request::NetworkOptions(_) => Endpoint::NetworkOptions,
            Request::NetworkStatus(_) => Endpoint::NetworkStatus,
            Request::AccountBalance(_) => Endpoint::AccountBalance,
            Request::Block(_) => Endpoint::Block,
            Request::BlockTransaction(_) => Endpoint::BlockTransaction,
            Request::Mempool(_) => Endpoint::Mempool,
            Request::MempoolTransaction(_) => Endpoint::MempoolTransaction,
            Request::ConstructionDerive(_) => Endpoint::ConstructionDerive,
            Request::ConstructionPreprocess(_) => Endpoint::ConstructionPreprocess,
            Request::ConstructionMetadata(_) => Endpoint::ConstructionMetadata,
            Request::ConstructionPayloads(_) => Endpoint::ConstructionPayloads,
            Request::ConstructionCombine(_) => Endpoint::ConstructionCombine,
            Request::ConstructionParse(_) => Endpoint::ConstructionParse,
            Request::ConstructionHash(_) => Endpoint::ConstructionHash,
            Request::ConstructionSubmit(_) => Endpoint::ConstructionSubmit,
        }
    }
}

/// A decoded response body, tagged with the endpoint that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    NetworkList(NetworkListResponse),
    NetworkOptions(NetworkOptionsResponse),
    NetworkStatus(NetworkStatusResponse),
    AccountBalance(AccountBalanceResponse),
    Block(BlockResponse),
    BlockTransaction(BlockTransactionResponse),
    Mempool(MempoolResponse),
    MempoolTransaction(MempoolTransactionResponse),
    ConstructionDerive(ConstructionDeriveResponse),
    ConstructionPreprocess(ConstructionPreprocessResponse),
    ConstructionMetadata(ConstructionMetadataResponse),
    ConstructionPayloads(ConstructionPayloadsResponse),
    ConstructionCombine(ConstructionCombineResponse),
    ConstructionParse(ConstructionParseResponse),
    ConstructionHash(TransactionIdentifierResponse),
    ConstructionSubmit(TransactionIdentifierResponse),
}

impl Response {
    pub fn decode(endpoint: Endpoint, body: Value) -> Result<Self, AsserterError> {
        let name = endpoint.response_name();
        if body.is_null() {
            return Err(AsserterError::ResponseIsNil(name));
        }

        Ok(match endpoint {
            Endpoint::NetworkList => Response::NetworkList(parse(name, body)?),
            Endpoint::NetworkOptions => Response::NetworkOptions(parse(name, body)?),
            Endpoint::NetworkStatus => Response::NetworkStatus(parse(name, body)?),
            Endpoint::AccountBalance => Response::AccountBalance(parse(name, body)?),
            Endpoint::Block => Response::Block(parse(name, body)?),
            Endpoint::BlockTransaction => Response::BlockTransaction(parse(name, body)?),
            Endpoint::Mempool => Response::Mempool(parse(name, body)?),
            Endpoint::MempoolTransaction => Response::MempoolTransaction(parse(name, body)?),
            Endpoint::ConstructionDerive => Response::ConstructionDerive(parse(name, body)?),
            Endpoint::ConstructionPreprocess => {
                Response::ConstructionPreprocess(parse(name, body)?)
            }
            Endpoint::ConstructionMetadata => Response::ConstructionMetadata(parse(name, body)?),
            Endpoint::ConstructionPayloads => Response::ConstructionPayloads(parse(name, body)?),
            Endpoint::ConstructionCombine => Response::ConstructionCombine(parse(name, body)?),
            Endpoint::ConstructionParse => Response::ConstructionParse(parse(name, body)?),
            Endpoint::ConstructionHash => Response::ConstructionHash(parse(name, body)?),
            Endpoint::ConstructionSubmit => Response::ConstructionSubmit(parse(name, body)?),
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Response::NetworkList(_) => Endpoint::NetworkList,
            Response::NetworkOptions(_) => Endpoint::NetworkOptions,
            Response::NetworkStatus(_) => Endpoint::NetworkStatus,
            Response::AccountBalance(_) => Endpoint::AccountBalance,
            Response::Block(_) => Endpoint::Block,
            Response::BlockTransaction(_) => Endpoint::BlockTransaction,
            Response::Mempool(_) => Endpoint::Mempool,
            Response::MempoolTransaction(_) => Endpoint::MempoolTransaction,
            Response::ConstructionDerive(_) => Endpoint::ConstructionDerive,
            Response::ConstructionPreprocess(_) => Endpoint::ConstructionPreprocess,
            Response::ConstructionMetadata(_) => Endpoint::ConstructionMetadata,
            Response::ConstructionPayloads(_) => Endpoint::ConstructionPayloads,
            Response::ConstructionCombine(_) => Endpoint::ConstructionCombine,
            Response::ConstructionParse(_) => Endpoint::ConstructionParse,
            Response::ConstructionHash(_) => Endpoint::ConstructionHash,
            Response::ConstructionSubmit(_) => Endpoint::ConstructionSubmit,
        }
    }
}

fn parse<T: DeserializeOwned>(name: &'static str, body: Value) -> Result<T, AsserterError> {
    serde_json::from_value(body).map_err(|e| AsserterError::Decode {
        name,
        reason: e.to_string(),
    })
}

impl Asserter {
    /// Routes a request to its endpoint's validator.
    pub fn validate_request(&self, request: &Request) -> Result<(), AsserterError> {
        match request {
            Request::NetworkList(req) => self.metadata_request(req),
            Request::NetworkOptions(req)
            | Request::NetworkStatus(req)
            | Request::Mempool(req) => self.network_request(req),
            Request::AccountBalance(req) => self.account_balance_request(req),
            Request::Block(req) => self.block_request(req),
            Request::BlockTransaction(req) => self.block_transaction_request(req),
            Request::MempoolTransaction(req) => self.mempool_transaction_request(req),
            Request::ConstructionDerive(req) => self.construction_derive_request(req),
            Request::ConstructionPreprocess(req) => self.construction_preprocess_request(req),
            Request::ConstructionMetadata(req) => self.construction_metadata_request(req),
            Request::ConstructionPayloads(req) => self.construction_payloads_request(req),
            Request::ConstructionCombine(req) => self.construction_combine_request(req),
            Request::ConstructionParse(req) => self.construction_parse_request(req),
            Request::ConstructionHash(req) => self.construction_hash_request(req),
            Request::ConstructionSubmit(req) => self.construction_submit_request(req),
        }
    }

    /// Routes a response to its endpoint's validator.
    ///
    /// `request` supplies context some responses are checked against: the
    /// block an account balance was requested at, and whether a parsed
    /// transaction was signed. Without it, a parse response is judged
    /// signed exactly when it lists signers.
    pub fn validate_response(
        &self,
        response: &Response,
        request: Option<&Request>,
    ) -> Result<(), AsserterError> {
        match response {
            Response::NetworkList(resp) => asserter::network_list_response(Some(resp)),
            Response::NetworkOptions(resp) => asserter::network_options_response(Some(resp)),
            Response::NetworkStatus(resp) => asserter::network_status_response(Some(resp)),
            Response::AccountBalance(resp) => {
                let requested = match request {
                    Some(Request::AccountBalance(req)) => req.block_identifier.as_ref(),
                    _ => None,
                };
                self.account_balance_response(requested, resp)
            }
            Response::Block(resp) => self.block_response(resp),
            Response::BlockTransaction(resp) => self.block_transaction_response(resp),
            Response::Mempool(resp) => self.mempool_response(resp),
            Response::MempoolTransaction(resp) => self.mempool_transaction_response(resp),
            Response::ConstructionDerive(resp) => self.construction_derive_response(resp),
            Response::ConstructionPreprocess(resp) => self.construction_preprocess_response(resp),
            Response::ConstructionMetadata(resp) => self.construction_metadata_response(resp),
            Response::ConstructionPayloads(resp) => self.construction_payloads_response(resp),
            Response::ConstructionCombine(resp) => self.construction_combine_response(resp),
            Response::ConstructionParse(resp) => {
                let signed = match request {
                    Some(Request::ConstructionParse(req)) => req.signed,
                    _ => !resp.account_identifier_signers.is_empty(),
                };
                self.construction_parse_response(signed, resp)
            }
            Response::ConstructionHash(resp) | Response::ConstructionSubmit(resp) => {
                self.transaction_identifier_response(resp)
            }
        }
    }
}

/// Decodes and validates a raw request body.
///
/// This is the boundary where an asserter may still be missing (for
/// example, while a client is waiting on a node to derive one from), so the
/// check for it comes before anything in the body is looked at.
///
/// # Returns
/// The decoded request if it passed validation
pub fn check_request(
    asserter: Option<&Asserter>,
    endpoint: Endpoint,
    body: Value,
) -> Result<Request, AsserterError> {
    let asserter = asserter.ok_or(AsserterError::AsserterNotInitialized)?;
    let request = Request::decode(endpoint, body)?;
    asserter.validate_request(&request)?;
    Ok(request)
}

/// Decodes and validates a raw response body, optionally alongside the raw
/// request that produced it.
pub fn check_response(
    asserter: Option<&Asserter>,
    endpoint: Endpoint,
    body: Value,
    request: Option<Value>,
) -> Result<Response, AsserterError> {
    let asserter = asserter.ok_or(AsserterError::AsserterNotInitialized)?;
    let request = request
        .map(|body| Request::decode(endpoint, body))
        .transpose()?;
    let response = Response::decode(endpoint, body)?;
    asserter.validate_response(&response, request.as_ref())?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asserter() -> Asserter {
        Asserter::new_server(
            vec![NetworkIdentifier::new("Bitcoin", "Mainnet")],
            vec!["TRANSFER".to_string()],
            vec![OperationStatus::new("SUCCESS", true)],
            false,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_paths_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_path(endpoint.path()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_path("/call"), None);
    }

    #[test]
    fn test_decode_tags_request_with_endpoint() {
        for endpoint in Endpoint::ALL {
            let request = Request::decode(endpoint, json!({})).unwrap();
            assert_eq!(request.endpoint(), endpoint);

            let response = Response::decode(endpoint, json!({})).unwrap();
            assert_eq!(response.endpoint(), endpoint);
        }
    }

    #[test]
    fn test_null_body_is_nil_request() {
        assert_eq!(
            Request::decode(Endpoint::AccountBalance, Value::Null),
            Err(AsserterError::RequestIsNil("AccountBalanceRequest"))
        );
        assert_eq!(
            Response::decode(Endpoint::ConstructionSubmit, Value::Null),
            Err(AsserterError::ResponseIsNil("TransactionIdentifierResponse"))
        );
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let err = Request::decode(Endpoint::Block, json!({ "block_identifier": "tip" }))
            .unwrap_err();
        assert!(matches!(err, AsserterError::Decode { name: "BlockRequest", .. }));
    }

    #[test]
    fn test_check_request_without_asserter_fails_first() {
        // Even a null body is not inspected.
        for endpoint in Endpoint::ALL {
            assert_eq!(
                check_request(None, endpoint, Value::Null),
                Err(AsserterError::AsserterNotInitialized)
            );
            assert_eq!(
                check_response(None, endpoint, Value::Null, None),
                Err(AsserterError::AsserterNotInitialized)
            );
        }
    }

    #[test]
    fn test_check_request_validates_after_decoding() {
        let asserter = asserter();
        let body = json!({
            "network_identifier": { "blockchain": "Bitcoin", "network": "Mainnet" },
            "block_identifier": { "index": 7 }
        });
        let request = check_request(Some(&asserter), Endpoint::Block, body).unwrap();
        assert_eq!(request.endpoint(), Endpoint::Block);

        let body = json!({
            "network_identifier": { "blockchain": "Bitcoin", "network": "Testnet" },
            "block_identifier": { "index": 7 }
        });
        assert_eq!(
            check_request(Some(&asserter), Endpoint::Block, body),
            Err(AsserterError::NetworkNotSupported(NetworkIdentifier::new(
                "Bitcoin", "Testnet"
            )))
        );
    }

    #[test]
    fn test_parse_response_uses_request_signed_flag() {
        let asserter = asserter();
        let response = json!({
            "operations": [{ "operation_identifier": { "index": 0 }, "type": "TRANSFER" }]
        });
        let request = json!({
            "network_identifier": { "blockchain": "Bitcoin", "network": "Mainnet" },
            "signed": true,
            "transaction": "deadbeef"
        });

        assert!(
            check_response(Some(&asserter), Endpoint::ConstructionParse, response.clone(), None)
                .is_ok()
        );
        assert_eq!(
            check_response(
                Some(&asserter),
                Endpoint::ConstructionParse,
                response,
                Some(request)
            ),
            Err(AsserterError::ConstructionParseResponseSignersEmpty)
        );
    }
}
