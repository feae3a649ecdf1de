use tendermint::block::{CommitSig, Height};
use tendermint_rpc::{Client, HttpClient, Paging};

use crate::{
    error::Error,
    query::{
        trpc::block_header,
        types::{CommitResult, CommitSignature, ValidatorInfo, ValidatorsResult},
    },
};

pub async fn commit(trpc: &HttpClient, height: Option<u32>) -> Result<CommitResult, Error> {
    let response = match height {
        Some(height) => trpc.commit(Height::from(height)).await,
        None => trpc.latest_commit().await,
    }
    .map_err(|e| Error::trpc("commit".to_string(), e))?;

    let commit = &response.signed_header.commit;
    let signatures = commit
        .signatures
        .iter()
        .map(|sig| match sig {
            CommitSig::BlockIdFlagAbsent => CommitSignature::default(),
            CommitSig::BlockIdFlagCommit {
                validator_address, ..
            } => CommitSignature {
                validator_address: validator_address.to_string(),
                signed: true,
            },
            CommitSig::BlockIdFlagNil {
                validator_address, ..
            } => CommitSignature {
                validator_address: validator_address.to_string(),
                signed: false,
            },
        })
        .collect();

    Ok(CommitResult {
        header: block_header(&response.signed_header.header),
        block_hash: commit.block_id.hash.to_string(),
        round: commit.round.value(),
        signatures,
        canonical: response.canonical,
    })
}

/// Page sizes above what the node accepts per request fetch every page.
pub async fn validators(
    trpc: &HttpClient,
    height: Option<u32>,
    page: usize,
    per_page: usize,
) -> Result<ValidatorsResult, Error> {
    let paging = match u8::try_from(per_page) {
        Ok(per_page) => Paging::Specific {
            page_number: page.into(),
            per_page: per_page.into(),
        },
        Err(_) => Paging::All,
    };

    let height = match height {
        Some(height) => Height::from(height),
        None => {
            trpc.status()
                .await
                .map_err(|e| Error::trpc("status".to_string(), e))?
                .sync_info
                .latest_block_height
        }
    };

    let response = trpc
        .validators(height, paging)
        .await
        .map_err(|e| Error::trpc("validators".to_string(), e))?;

    Ok(ValidatorsResult {
        block_height: response.block_height.value() as i64,
        validators: response
            .validators
            .iter()
            .map(|v| ValidatorInfo {
                address: v.address.to_string(),
                pub_key: v.pub_key.to_bytes(),
                voting_power: v.power.value(),
                proposer_priority: v.proposer_priority.value(),
            })
            .collect(),
        total: response.total,
    })
}
