use std::{any::Any, sync::Arc};

use ibc_proto::{
    cosmos::base::query::v1beta1::PageRequest,
    ibc::{
        applications::transfer::v1::{
            QueryDenomTraceRequest, QueryDenomTraceResponse, QueryDenomTracesRequest,
            QueryDenomTracesResponse, QueryParamsRequest, QueryParamsResponse,
        },
        core::channel::v1::{
            QueryChannelClientStateRequest, QueryChannelClientStateResponse,
            QueryChannelConsensusStateRequest, QueryChannelConsensusStateResponse,
            QueryChannelRequest, QueryChannelResponse, QueryChannelsRequest,
            QueryChannelsResponse, QueryConnectionChannelsRequest,
            QueryConnectionChannelsResponse, QueryNextSequenceReceiveRequest,
            QueryNextSequenceReceiveResponse, QueryPacketAcknowledgementRequest,
            QueryPacketAcknowledgementResponse, QueryPacketAcknowledgementsRequest,
            QueryPacketAcknowledgementsResponse, QueryPacketCommitmentRequest,
            QueryPacketCommitmentResponse, QueryPacketCommitmentsRequest,
            QueryPacketCommitmentsResponse, QueryPacketReceiptRequest,
            QueryPacketReceiptResponse, QueryUnreceivedAcksRequest, QueryUnreceivedAcksResponse,
            QueryUnreceivedPacketsRequest, QueryUnreceivedPacketsResponse,
        },
    },
};
use types::{
    address::{AccAddress, ADDRESS_LENGTH},
    ibc::{
        height::Height,
        identifier::{ChannelId, PortId},
        transfer::{MsgTransfer, ICS20_VERSION},
    },
    tx::TxResponse,
};
use utils::crypto::sha256;

use crate::{
    base::BaseClient,
    codec::Codec,
    error::Error,
    keyring::KeyInfo,
    module::params::{check_coin, check_key_params, check_page},
    query::types::{HeaderAtHeight, TxResult},
};

use super::{broadcast_msgs, Module};

pub const MODULE_NAME: &str = "ibc";

const TRANSFER_QUERY_SERVICE: &str = "/ibc.applications.transfer.v1.Query";

/// Validators fetched per header, enough for the whole active set.
const HEADER_VALIDATORS_PER_PAGE: u32 = 100_000;

/// Escrow account of an ics20 channel end:
/// `sha256("ics20-1" || 0x00 || "<port>/<channel>")[..20]`.
pub fn escrow_address(port_id: &str, channel_id: &str) -> AccAddress {
    let contents = format!("{}/{}", port_id, channel_id);

    let mut pre_image = ICS20_VERSION.as_bytes().to_vec();
    pre_image.push(0);
    pre_image.extend_from_slice(contents.as_bytes());

    let hash = sha256(&pre_image);
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes.copy_from_slice(&hash[..ADDRESS_LENGTH]);
    AccAddress::from_bytes(bytes)
}

pub struct IbcClient {
    base: Arc<BaseClient>,
}

/// Typed queries of the channel service, each sent to
/// `/ibc.core.channel.v1.Query/<Method>`.
macro_rules! channel_queries {
    ($($fn_name:ident: $method:literal, $req:ty => $resp:ty;)*) => {
        impl IbcClient {
            $(
                pub fn $fn_name(&self, request: &$req) -> Result<$resp, Error> {
                    self.base
                        .invoke(concat!("/ibc.core.channel.v1.Query/", $method), request)
                }
            )*
        }

        fn register_channel_responses(codec: &mut Codec) {
            $(
                codec.register_proto::<$resp>(concat!("ibc.core.channel.v1.Query", $method, "Response"));
            )*
        }
    };
}

channel_queries! {
    query_channel: "Channel", QueryChannelRequest => QueryChannelResponse;
    connection_channels: "ConnectionChannels", QueryConnectionChannelsRequest => QueryConnectionChannelsResponse;
    channel_client_state: "ChannelClientState", QueryChannelClientStateRequest => QueryChannelClientStateResponse;
    channel_consensus_state: "ChannelConsensusState", QueryChannelConsensusStateRequest => QueryChannelConsensusStateResponse;
    packet_commitment: "PacketCommitment", QueryPacketCommitmentRequest => QueryPacketCommitmentResponse;
    packet_commitments: "PacketCommitments", QueryPacketCommitmentsRequest => QueryPacketCommitmentsResponse;
    packet_receipt: "PacketReceipt", QueryPacketReceiptRequest => QueryPacketReceiptResponse;
    packet_acknowledgement: "PacketAcknowledgement", QueryPacketAcknowledgementRequest => QueryPacketAcknowledgementResponse;
    packet_acknowledgements: "PacketAcknowledgements", QueryPacketAcknowledgementsRequest => QueryPacketAcknowledgementsResponse;
    unreceived_packets: "UnreceivedPackets", QueryUnreceivedPacketsRequest => QueryUnreceivedPacketsResponse;
    unreceived_acks: "UnreceivedAcks", QueryUnreceivedAcksRequest => QueryUnreceivedAcksResponse;
    next_sequence_receive: "NextSequenceReceive", QueryNextSequenceReceiveRequest => QueryNextSequenceReceiveResponse;
}

impl IbcClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Sends `coin` over `transfer/<src_channel>` to `receiver` on the
    /// counterparty chain. `timeout_height` is `<revision>-<height>`.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        from: &KeyInfo,
        password: &str,
        src_channel: &str,
        receiver: &str,
        coin: &str,
        timeout_height: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let source_channel: ChannelId = src_channel
            .parse()
            .map_err(|e| Error::types(types::error::TypesError::identifier(e)))?;
        let token = check_coin(coin)?;
        let timeout_height: Height = timeout_height.parse().map_err(Error::types)?;

        let msg = MsgTransfer {
            source_port: PortId::transfer(),
            source_channel,
            token,
            sender: from.address.clone(),
            receiver: receiver.trim().to_string(),
            timeout_height,
            timeout_timestamp: 0,
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    pub fn query_denom_trace(&self, hash: &str) -> Result<QueryDenomTraceResponse, Error> {
        let request = QueryDenomTraceRequest {
            hash: hash.to_string(),
        };
        self.base
            .invoke(&format!("{}/DenomTrace", TRANSFER_QUERY_SERVICE), &request)
    }

    pub fn query_denom_traces(
        &self,
        pagination: Option<PageRequest>,
    ) -> Result<QueryDenomTracesResponse, Error> {
        let request = QueryDenomTracesRequest { pagination };
        self.base
            .invoke(&format!("{}/DenomTraces", TRANSFER_QUERY_SERVICE), &request)
    }

    pub fn query_ibc_params(&self) -> Result<QueryParamsResponse, Error> {
        self.base
            .invoke(&format!("{}/Params", TRANSFER_QUERY_SERVICE), &QueryParamsRequest {})
    }

    pub fn query_channels(&self) -> Result<QueryChannelsResponse, Error> {
        let request = QueryChannelsRequest { pagination: None };
        self.base
            .invoke("/ibc.core.channel.v1.Query/Channels", &request)
    }

    pub fn query_tx(&self, hash: &str) -> Result<TxResult, Error> {
        self.base.tx(hash, true)
    }

    /// Txs matching every condition of `events`, e.g. `send_packet.packet_sequence='1'`.
    pub fn query_txs(&self, page: u32, limit: u32, events: &[&str]) -> Result<Vec<TxResult>, Error> {
        if events.is_empty() {
            return Err(Error::invalid_param(
                "events".to_string(),
                "must declare at least one event to search".to_string(),
            ));
        }
        check_page(page, limit)?;

        let result = self
            .base
            .tx_search(&events.join(" AND "), true, page, limit, "")?;
        Ok(result.txs)
    }

    pub fn query_header_at_height(&self, height: i64) -> Result<HeaderAtHeight, Error> {
        if height <= 0 {
            return Err(Error::invalid_param(
                "height".to_string(),
                format!("must pass in valid height, {} not valid", height),
            ));
        }

        let commit = self.base.commit(Some(height))?;
        let validators = self
            .base
            .validators(Some(height), 1, HEADER_VALIDATORS_PER_PAGE)?;

        Ok(HeaderAtHeight { commit, validators })
    }

    pub fn escrow_address(&self, port_id: &str, channel_id: &str) -> AccAddress {
        escrow_address(port_id, channel_id)
    }
}

impl Module for IbcClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_msg::<MsgTransfer>();

        codec.register_proto::<QueryDenomTraceResponse>(
            "ibc.applications.transfer.v1.QueryDenomTraceResponse",
        );
        codec.register_proto::<QueryDenomTracesResponse>(
            "ibc.applications.transfer.v1.QueryDenomTracesResponse",
        );
        codec.register_proto::<QueryParamsResponse>("ibc.applications.transfer.v1.QueryParamsResponse");
        codec.register_proto::<QueryChannelsResponse>("ibc.core.channel.v1.QueryChannelsResponse");
        register_channel_responses(codec);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
pub mod ibc_client_tests {
    use ibc_proto::ibc::{
        applications::transfer::v1::{DenomTrace, QueryDenomTraceResponse},
        core::channel::v1::{QueryChannelRequest, QueryChannelResponse},
    };
    use prost::Message;
    use types::address::AccAddress;
    use utils::encode::systems::hex_encode;

    use crate::{
        mock::{mock_client, MockTransport, PASSWORD},
        query::types::{TxResult, TxSearchResult},
    };

    use super::escrow_address;

    #[test]
    pub fn escrow_address_vectors() {
        let hex = |addr: &AccAddress| String::from_utf8(hex_encode(addr.as_bytes())).unwrap();

        let addr = escrow_address("transfer", "channel-0");
        assert_eq!(hex(&addr), "ed23c6f4443f49c4b08f856350a5d2c65a203235");
        assert_eq!(addr.to_string(), "ex1a53udazy8ayufvy0s434pfwjcedzqv34795qze");

        let addr = escrow_address("transfer", "channel-1");
        assert_eq!(hex(&addr), "b014310b490281e4c39ea74a8f6022967b3ddb47");

        assert_eq!(escrow_address("transfer", "channel-0"), escrow_address("transfer", "channel-0"));
        assert_ne!(escrow_address("transfer", "channel-0"), escrow_address("transfers", "channel-0"));
    }

    #[test]
    pub fn transfer() {
        let transport = MockTransport::new();
        let (client, from) = mock_client(transport.clone());
        let ibc = client.ibc();
        let receiver = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";

        ibc.transfer(&from, PASSWORD, "channel-0", receiver, "1okt", "1-1000", "", 1, 2)
            .unwrap();
        let (tx_bytes, _) = transport.broadcasts().pop().unwrap();
        let tx: serde_json::Value = serde_json::from_slice(&tx_bytes).unwrap();
        let msg = &tx["value"]["msg"][0];
        assert_eq!(msg["type"], "cosmos-sdk/MsgTransfer");
        assert_eq!(msg["value"]["source_port"], "transfer");
        assert_eq!(msg["value"]["timeout_height"]["revision_height"], "1000");

        assert!(ibc
            .transfer(&from, PASSWORD, "channel-0", receiver, "1okt", "0-0", "", 1, 3)
            .is_err());
        assert!(ibc
            .transfer(&from, PASSWORD, "chan/0", receiver, "1okt", "1-1000", "", 1, 3)
            .is_err());
        assert!(ibc
            .transfer(&from, PASSWORD, "channel-0", "", "1okt", "1-1000", "", 1, 3)
            .is_err());
        assert_eq!(transport.broadcasts().len(), 1);
    }

    #[test]
    pub fn typed_queries() {
        let transport = MockTransport::new();
        let denom_trace = QueryDenomTraceResponse {
            denom_trace: Some(DenomTrace {
                path: "transfer/channel-0".to_string(),
                base_denom: "uatom".to_string(),
            }),
        };
        transport.set_response(
            "/ibc.applications.transfer.v1.Query/DenomTrace",
            denom_trace.encode_to_vec(),
        );
        transport.set_response(
            "/ibc.core.channel.v1.Query/Channel",
            QueryChannelResponse::default().encode_to_vec(),
        );
        let (client, _) = mock_client(transport.clone());
        let ibc = client.ibc();

        assert_eq!(ibc.query_denom_trace("ABCD").unwrap(), denom_trace);
        let request = QueryChannelRequest {
            port_id: "transfer".to_string(),
            channel_id: "channel-0".to_string(),
        };
        assert!(ibc.query_channel(&request).unwrap().channel.is_none());

        let query = transport.queries().pop().unwrap();
        assert_eq!(query.data, request.encode_to_vec());

        assert!(ibc.query_ibc_params().is_err());
    }

    #[test]
    pub fn txs_and_headers() {
        let transport = MockTransport::new();
        transport.set_tx_search_result(TxSearchResult {
            txs: vec![TxResult::default()],
            total_count: 1,
        });
        let (client, _) = mock_client(transport.clone());
        let ibc = client.ibc();

        let txs = ibc
            .query_txs(1, 10, &["send_packet.packet_src_channel='channel-0'", "tx.height=5"])
            .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(
            transport.tx_searches(),
            vec!["send_packet.packet_src_channel='channel-0' AND tx.height=5".to_string()]
        );

        let header = ibc.query_header_at_height(1000).unwrap();
        assert_eq!(header.commit.header.height, 1000);
        assert_eq!(header.validators.block_height, 1000);

        let calls = transport.calls();
        assert!(ibc.query_txs(1, 10, &[]).is_err());
        assert!(ibc.query_txs(0, 10, &["tx.height=5"]).is_err());
        assert!(ibc.query_txs(1, 0, &["tx.height=5"]).is_err());
        assert!(ibc.query_header_at_height(0).is_err());
        assert_eq!(transport.calls(), calls);
    }
}
