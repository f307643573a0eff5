// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON shape of a served proof.
//!
//! The node renders these and the verifier reads them back, so both sides
//! share one definition.

use crate::proof::{MerkleStep, Position, UserProof};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Success";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub position: Position,
    pub node_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProofView {
    pub merkle_root: String,
    pub user_hash: String,
    /// Leaf-to-root order.
    pub merkle_path: Vec<PathNode>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: u64,
    pub balance: u64,
    pub proof: ProofView,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PorResponse {
    pub error_message: String,
    pub user: UserView,
}

impl From<&UserProof> for UserView {
    fn from(proof: &UserProof) -> Self {
        Self {
            id: proof.id(),
            balance: proof.balance(),
            proof: ProofView {
                merkle_root: proof.root().to_string(),
                user_hash: proof.user_hash().to_string(),
                merkle_path: proof
                    .path()
                    .iter()
                    .map(|step| PathNode {
                        position: step.position,
                        node_hash: step.hash.clone(),
                    })
                    .collect(),
            },
        }
    }
}

impl From<UserView> for UserProof {
    fn from(view: UserView) -> Self {
        let path = view
            .proof
            .merkle_path
            .into_iter()
            .map(|node| MerkleStep::new(node.position, node.node_hash))
            .collect();
        UserProof::new(view.id, view.balance, view.proof.user_hash, path, view.proof.merkle_root)
    }
}

impl PorResponse {
    pub fn success(proof: &UserProof) -> Self {
        Self {
            error_message: SUCCESS_MESSAGE.to_string(),
            user: UserView::from(proof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> UserProof {
        UserProof::new(
            8,
            8888,
            "0xabc",
            vec![
                MerkleStep::new(Position::Left, "0x111"),
                MerkleStep::new(Position::Right, "0x222"),
            ],
            "0xdef",
        )
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(PorResponse::success(&sample())).unwrap();
        assert_eq!(
            value,
            json!({
                "error_message": "Success",
                "user": {
                    "id": 8,
                    "balance": 8888,
                    "proof": {
                        "merkle_root": "0xdef",
                        "user_hash": "0xabc",
                        "merkle_path": [
                            { "position": "left", "node_hash": "0x111" },
                            { "position": "right", "node_hash": "0x222" }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_render_then_extract_preserves_proof() {
        let proof = sample();
        let bytes = serde_json::to_vec(&PorResponse::success(&proof)).unwrap();
        let back: PorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(UserProof::from(back.user), proof);
    }

    #[test]
    fn test_unknown_position_is_rejected_on_read() {
        let raw = r#"{"position":"up","node_hash":"0x1"}"#;
        assert!(serde_json::from_str::<PathNode>(raw).is_err());
    }
}
