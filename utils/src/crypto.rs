use sha2::{Digest, Sha256};
use sha3::Keccak256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashOp {
    Sha256,
    Keccak256,
}

pub fn do_hash(hash_op: HashOp, data: &[u8]) -> [u8; 32] {
    match hash_op {
        HashOp::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(data);
            hasher.finalize().into()
        }
        HashOp::Keccak256 => {
            let mut hasher = Keccak256::new();
            hasher.update(data);
            hasher.finalize().into()
        }
    }
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    do_hash(HashOp::Sha256, data)
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    do_hash(HashOp::Keccak256, data)
}
