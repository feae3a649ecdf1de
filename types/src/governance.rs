use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tendermint_proto::serializers::from_str;

use crate::{
    address::AccAddress,
    decimal::{Dec, DecCoin},
    error::TypesError,
    message::{invalid_msg, Msg},
};

pub const ROUTER_KEY: &str = "gov";
pub const TEXT_PROPOSAL_TYPE: &str = "okexchain/gov/TextProposal";

pub const MAX_TITLE_LENGTH: usize = 140;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProposal {
    pub title: String,
    pub description: String,
}

/// Amino envelope around a concrete proposal content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: Value,
}

impl ProposalContent {
    pub fn text(proposal: &TextProposal) -> Result<Self, TypesError> {
        Ok(ProposalContent {
            content_type: TEXT_PROPOSAL_TYPE.to_string(),
            value: serde_json::to_value(proposal).map_err(TypesError::serde_json)?,
        })
    }

    pub fn as_text(&self) -> Option<TextProposal> {
        if self.content_type != TEXT_PROPOSAL_TYPE {
            return None;
        }
        serde_json::from_value(self.value.clone()).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoteOption {
    #[default]
    Empty,
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

impl VoteOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOption::Empty => "",
            VoteOption::Yes => "Yes",
            VoteOption::Abstain => "Abstain",
            VoteOption::No => "No",
            VoteOption::NoWithVeto => "NoWithVeto",
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the chain spelling (`NoWithVeto`) and the cli spelling (`no_with_veto`).
impl FromStr for VoteOption {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "").as_str() {
            "yes" => Ok(VoteOption::Yes),
            "abstain" => Ok(VoteOption::Abstain),
            "no" => Ok(VoteOption::No),
            "nowithveto" => Ok(VoteOption::NoWithVeto),
            _ => Err(TypesError::invalid_vote_option(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProposalStatus {
    #[default]
    Nil,
    DepositPeriod,
    VotingPeriod,
    Passed,
    Rejected,
    Failed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Nil => "",
            ProposalStatus::DepositPeriod => "DepositPeriod",
            ProposalStatus::VotingPeriod => "VotingPeriod",
            ProposalStatus::Passed => "Passed",
            ProposalStatus::Rejected => "Rejected",
            ProposalStatus::Failed => "Failed",
        }
    }

    /// Statuses a proposal query may filter on.
    pub fn from_filter(status: &str) -> Result<Self, TypesError> {
        match status.trim().to_ascii_lowercase().replace('_', "").as_str() {
            "depositperiod" => Ok(ProposalStatus::DepositPeriod),
            "votingperiod" => Ok(ProposalStatus::VotingPeriod),
            "passed" => Ok(ProposalStatus::Passed),
            "rejected" => Ok(ProposalStatus::Rejected),
            _ => Err(TypesError::invalid_proposal_status(status.to_string())),
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(ProposalStatus::Nil),
            "Failed" => Ok(ProposalStatus::Failed),
            other => ProposalStatus::from_filter(other),
        }
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                if s.is_empty() {
                    return Ok(<$ty>::default());
                }
                s.parse()
                    .map_err(|e: TypesError| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

string_serde!(VoteOption);
string_serde!(ProposalStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgSubmitProposal {
    pub content: ProposalContent,
    pub initial_deposit: Vec<DecCoin>,
    pub proposer: AccAddress,
}

impl Msg for MsgSubmitProposal {
    const TYPE_NAME: &'static str = "okexchain/gov/MsgSubmitProposal";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "submit_proposal"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        if let Some(text) = self.content.as_text() {
            if text.title.trim().is_empty() || text.title.len() > MAX_TITLE_LENGTH {
                return Err(invalid_msg::<Self>(format!(
                    "title must be 1-{} characters",
                    MAX_TITLE_LENGTH
                )));
            }
            if text.description.trim().is_empty() || text.description.len() > MAX_DESCRIPTION_LENGTH {
                return Err(invalid_msg::<Self>(format!(
                    "description must be 1-{} characters",
                    MAX_DESCRIPTION_LENGTH
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeposit {
    #[serde(with = "from_str")]
    pub proposal_id: u64,
    pub depositor: AccAddress,
    pub amount: Vec<DecCoin>,
}

impl Msg for MsgDeposit {
    const TYPE_NAME: &'static str = "okexchain/gov/MsgDeposit";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "deposit"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        if self.amount.is_empty() || self.amount.iter().any(|c| !c.is_positive()) {
            return Err(invalid_msg::<Self>("deposit amount must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgVote {
    #[serde(with = "from_str")]
    pub proposal_id: u64,
    pub voter: AccAddress,
    pub option: VoteOption,
}

impl Msg for MsgVote {
    const TYPE_NAME: &'static str = "okexchain/gov/MsgVote";

    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn msg_type(&self) -> &'static str {
        "vote"
    }

    fn validate_basic(&self) -> Result<(), TypesError> {
        if self.option == VoteOption::Empty {
            return Err(invalid_msg::<Self>("empty vote option"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: Dec,
    pub abstain: Dec,
    pub no: Dec,
    pub no_with_veto: Dec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub content: ProposalContent,
    #[serde(with = "from_str")]
    pub id: u64,
    pub proposal_status: ProposalStatus,
    pub final_tally_result: TallyResult,
    #[serde(default)]
    pub submit_time: String,
    #[serde(default)]
    pub deposit_end_time: String,
    #[serde(default)]
    pub total_deposit: Vec<DecCoin>,
    #[serde(default)]
    pub voting_start_time: String,
    #[serde(default)]
    pub voting_end_time: String,
}

fn serialize_optional_address<S: Serializer>(
    address: &Option<AccAddress>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => serializer.collect_str(address),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_optional_address<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AccAddress>, D::Error> {
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|e: TypesError| serde::de::Error::custom(e.to_string()))
}

/// Filter sent to `custom/gov/proposals`; field names follow the node's
/// untagged query struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProposalsParams {
    #[serde(
        rename = "Voter",
        serialize_with = "serialize_optional_address",
        deserialize_with = "deserialize_optional_address"
    )]
    pub voter: Option<AccAddress>,
    #[serde(
        rename = "Depositor",
        serialize_with = "serialize_optional_address",
        deserialize_with = "deserialize_optional_address"
    )]
    pub depositor: Option<AccAddress>,
    #[serde(rename = "ProposalStatus")]
    pub proposal_status: ProposalStatus,
    #[serde(rename = "Limit", with = "from_str")]
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryProposalParams {
    #[serde(rename = "ProposalID", with = "from_str")]
    pub proposal_id: u64,
}

#[cfg(test)]
pub mod governance_tests {
    use serde_json::json;

    use super::{
        Proposal, ProposalContent, ProposalStatus, QueryProposalsParams, TextProposal, VoteOption,
    };

    #[test]
    pub fn vote_option_spellings() {
        assert_eq!("yes".parse::<VoteOption>().unwrap(), VoteOption::Yes);
        assert_eq!("no_with_veto".parse::<VoteOption>().unwrap(), VoteOption::NoWithVeto);
        assert_eq!("NoWithVeto".parse::<VoteOption>().unwrap(), VoteOption::NoWithVeto);
        assert!("maybe".parse::<VoteOption>().is_err());
        assert_eq!(serde_json::to_string(&VoteOption::Abstain).unwrap(), "\"Abstain\"");
    }

    #[test]
    pub fn proposal_status_filter() {
        assert_eq!(ProposalStatus::from_filter("Passed").unwrap(), ProposalStatus::Passed);
        assert_eq!(
            ProposalStatus::from_filter("voting_period").unwrap(),
            ProposalStatus::VotingPeriod
        );
        assert!(ProposalStatus::from_filter("Failed").is_err());
        assert!(ProposalStatus::from_filter("").is_err());
    }

    #[test]
    pub fn query_params_json() {
        let params = QueryProposalsParams {
            limit: 10,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"Voter": "", "Depositor": "", "ProposalStatus": "", "Limit": "10"})
        );
    }

    #[test]
    pub fn proposal_from_node_json() {
        let raw = json!({
            "content": {
                "type": "okexchain/gov/TextProposal",
                "value": {"title": "upgrade", "description": "v1"}
            },
            "id": "3",
            "proposal_status": "VotingPeriod",
            "final_tally_result": {
                "yes": "0.000000000000000000",
                "abstain": "0.000000000000000000",
                "no": "0.000000000000000000",
                "no_with_veto": "0.000000000000000000"
            },
            "total_deposit": [{"denom": "okt", "amount": "100.000000000000000000"}]
        });

        let proposal: Proposal = serde_json::from_value(raw).unwrap();
        assert_eq!(proposal.id, 3);
        assert_eq!(proposal.proposal_status, ProposalStatus::VotingPeriod);
        assert_eq!(
            proposal.content.as_text().unwrap(),
            TextProposal {
                title: "upgrade".to_string(),
                description: "v1".to_string()
            }
        );

        let content = ProposalContent::text(&TextProposal {
            title: "a".to_string(),
            description: "b".to_string(),
        })
        .unwrap();
        assert!(content.as_text().is_some());
    }
}
