use std::{any::Any, sync::Arc};

use types::{
    governance::{
        MsgDeposit, MsgSubmitProposal, MsgVote, Proposal, ProposalContent, ProposalStatus,
        QueryProposalParams, QueryProposalsParams, TextProposal, VoteOption,
    },
    tx::TxResponse,
};

use crate::{
    base::BaseClient,
    codec::Codec,
    error::Error,
    keyring::KeyInfo,
    module::params::{check_acc_addr, check_coins, check_key_params, check_proposal_id},
};

use super::{broadcast_msgs, Module};

pub const MODULE_NAME: &str = "governance";

pub const PROPOSALS_PATH: &str = "custom/gov/proposals";
pub const PROPOSAL_PATH: &str = "custom/gov/proposal";

pub struct GovClient {
    base: Arc<BaseClient>,
}

impl GovClient {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn submit_text_proposal(
        &self,
        from: &KeyInfo,
        password: &str,
        title: &str,
        description: &str,
        init_deposit: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        let initial_deposit = check_coins(init_deposit)?;

        let content = ProposalContent::text(&TextProposal {
            title: title.to_string(),
            description: description.to_string(),
        })
        .map_err(Error::types)?;

        let msg = MsgSubmitProposal {
            content,
            initial_deposit,
            proposer: from.address.clone(),
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn deposit(
        &self,
        from: &KeyInfo,
        password: &str,
        proposal_id: u64,
        coins: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        check_proposal_id(proposal_id)?;
        let amount = check_coins(coins)?;

        let msg = MsgDeposit {
            proposal_id,
            depositor: from.address.clone(),
            amount,
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    /// `option` is one of `yes`, `no`, `no_with_veto` or `abstain`.
    #[allow(clippy::too_many_arguments)]
    pub fn vote(
        &self,
        from: &KeyInfo,
        password: &str,
        proposal_id: u64,
        option: &str,
        memo: &str,
        account_number: u64,
        sequence: u64,
    ) -> Result<TxResponse, Error> {
        check_key_params(from, password)?;
        check_proposal_id(proposal_id)?;
        let option: VoteOption = option.parse().map_err(Error::types)?;

        let msg = MsgVote {
            proposal_id,
            voter: from.address.clone(),
            option,
        };
        broadcast_msgs(&self.base, from, password, memo, &[msg], account_number, sequence)
    }

    /// Every filter is optional: empty strings and a zero `limit` match all
    /// proposals.
    pub fn query_proposals(
        &self,
        depositor: &str,
        voter: &str,
        status: &str,
        limit: u64,
    ) -> Result<Vec<Proposal>, Error> {
        let mut params = QueryProposalsParams {
            limit,
            ..Default::default()
        };
        if !depositor.is_empty() {
            params.depositor = Some(check_acc_addr("depositor", depositor)?);
        }
        if !voter.is_empty() {
            params.voter = Some(check_acc_addr("voter", voter)?);
        }
        if !status.is_empty() {
            params.proposal_status = ProposalStatus::from_filter(status).map_err(Error::types)?;
        }

        let codec = self.base.codec()?;
        let data = codec.marshal_json(&params)?;
        let (value, _) = self.base.query(PROPOSALS_PATH, &data)?;

        codec.unmarshal_json(&value)
    }

    pub fn query_proposal(&self, proposal_id: u64) -> Result<Proposal, Error> {
        check_proposal_id(proposal_id)?;

        let codec = self.base.codec()?;
        let data = codec.marshal_json(&QueryProposalParams { proposal_id })?;
        let (value, _) = self.base.query(PROPOSAL_PATH, &data)?;

        codec.unmarshal_json(&value)
    }
}

impl Module for GovClient {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn register_codec(&self, codec: &mut Codec) {
        codec.register_msg::<MsgSubmitProposal>();
        codec.register_msg::<MsgDeposit>();
        codec.register_msg::<MsgVote>();
        codec.register_concrete::<TextProposal>(types::governance::TEXT_PROPOSAL_TYPE);

        codec.register_plain::<QueryProposalsParams>("okexchain/gov/QueryProposalsParams");
        codec.register_plain::<QueryProposalParams>("okexchain/gov/QueryProposalParams");
        codec.register_plain::<Proposal>("okexchain/gov/Proposal");
        codec.register_plain::<Vec<Proposal>>("okexchain/gov/Proposals");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
