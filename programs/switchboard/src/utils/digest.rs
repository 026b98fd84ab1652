use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;

use crate::constants::{ACTION_TAGS, GLOBAL_SCOPE};
use crate::state::Role;
use crate::utils::packet::packet_origin_chain;

/// Action type, one per signed instruction. Indexes `ACTION_TAGS`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ActionKind {
    TripGlobal = 0,
    UntripGlobal = 1,
    TripPath = 2,
    UntripPath = 3,
    TripProposal = 4,
    UntripProposal = 5,
    SetFees = 6,
    SetExecutionOverhead = 7,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::TripGlobal,
        ActionKind::UntripGlobal,
        ActionKind::TripPath,
        ActionKind::UntripPath,
        ActionKind::TripProposal,
        ActionKind::UntripProposal,
        ActionKind::SetFees,
        ActionKind::SetExecutionOverhead,
    ];

    pub fn tag(self) -> &'static [u8] {
        ACTION_TAGS[self as usize]
    }
}

/// A state change that must be signed by a role holder and gated by their nonce
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SignedAction {
    TripGlobal,
    UntripGlobal,
    TripPath {
        src_chain_slug: u32,
    },
    UntripPath {
        src_chain_slug: u32,
    },
    TripProposal {
        packet_id: [u8; 32],
        proposal_count: u64,
    },
    UntripProposal {
        packet_id: [u8; 32],
        proposal_count: u64,
    },
    SetFees {
        dst_chain_slug: u32,
        switchboard_fees: u64,
        verification_overhead_fees: u64,
    },
    SetExecutionOverhead {
        dst_chain_slug: u32,
        verification_overhead_fees: u64,
    },
}

impl SignedAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            SignedAction::TripGlobal => ActionKind::TripGlobal,
            SignedAction::UntripGlobal => ActionKind::UntripGlobal,
            SignedAction::TripPath { .. } => ActionKind::TripPath,
            SignedAction::UntripPath { .. } => ActionKind::UntripPath,
            SignedAction::TripProposal { .. } => ActionKind::TripProposal,
            SignedAction::UntripProposal { .. } => ActionKind::UntripProposal,
            SignedAction::SetFees { .. } => ActionKind::SetFees,
            SignedAction::SetExecutionOverhead { .. } => ActionKind::SetExecutionOverhead,
        }
    }

    /// Role and scope the signer must hold. Proposal scopes come from the packet id,
    /// never from a caller-supplied slug.
    pub fn required_role(&self) -> (Role, u32) {
        match self {
            SignedAction::TripGlobal => (Role::Trip, GLOBAL_SCOPE),
            SignedAction::UntripGlobal
            | SignedAction::UntripPath { .. }
            | SignedAction::UntripProposal { .. } => (Role::Untrip, GLOBAL_SCOPE),
            SignedAction::TripPath { src_chain_slug } => (Role::Watcher, *src_chain_slug),
            SignedAction::TripProposal { packet_id, .. } => {
                (Role::Watcher, packet_origin_chain(packet_id))
            }
            SignedAction::SetFees { dst_chain_slug, .. }
            | SignedAction::SetExecutionOverhead { dst_chain_slug, .. } => {
                (Role::FeesUpdater, *dst_chain_slug)
            }
        }
    }

    /// Trip intent baked into the digest; `None` for fee actions
    pub fn trip_intent(&self) -> Option<bool> {
        match self {
            SignedAction::TripGlobal
            | SignedAction::TripPath { .. }
            | SignedAction::TripProposal { .. } => Some(true),
            SignedAction::UntripGlobal
            | SignedAction::UntripPath { .. }
            | SignedAction::UntripProposal { .. } => Some(false),
            SignedAction::SetFees { .. } | SignedAction::SetExecutionOverhead { .. } => None,
        }
    }

    /// Canonical byte encoding that signers sign over (before hashing).
    ///
    /// Layout: len(tag) || tag || switchboard || chain_slug || target fields || nonce
    /// || intent-or-fee-values. All integers little endian.
    pub fn encode(&self, switchboard: &Pubkey, chain_slug: u32, nonce: u64) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(160);

        encode_length_prefixed(&mut encoded, self.kind().tag());
        encoded.extend_from_slice(switchboard.as_ref());
        encoded.extend_from_slice(&chain_slug.to_le_bytes());

        match self {
            SignedAction::TripGlobal | SignedAction::UntripGlobal => {}
            SignedAction::TripPath { src_chain_slug }
            | SignedAction::UntripPath { src_chain_slug } => {
                encoded.extend_from_slice(&src_chain_slug.to_le_bytes());
            }
            SignedAction::TripProposal {
                packet_id,
                proposal_count,
            }
            | SignedAction::UntripProposal {
                packet_id,
                proposal_count,
            } => {
                encoded.extend_from_slice(&packet_origin_chain(packet_id).to_le_bytes());
                encoded.extend_from_slice(packet_id);
                encoded.extend_from_slice(&proposal_count.to_le_bytes());
            }
            SignedAction::SetFees { dst_chain_slug, .. }
            | SignedAction::SetExecutionOverhead { dst_chain_slug, .. } => {
                encoded.extend_from_slice(&dst_chain_slug.to_le_bytes());
            }
        }

        encoded.extend_from_slice(&nonce.to_le_bytes());

        match self {
            SignedAction::SetFees {
                switchboard_fees,
                verification_overhead_fees,
                ..
            } => {
                encoded.extend_from_slice(&switchboard_fees.to_le_bytes());
                encoded.extend_from_slice(&verification_overhead_fees.to_le_bytes());
            }
            SignedAction::SetExecutionOverhead {
                verification_overhead_fees,
                ..
            } => {
                encoded.extend_from_slice(&verification_overhead_fees.to_le_bytes());
            }
            _ => {
                let intent = self.trip_intent().unwrap_or_default();
                encoded.push(intent as u8);
            }
        }

        encoded
    }

    /// keccak-256 of `encode`
    pub fn digest(&self, switchboard: &Pubkey, chain_slug: u32, nonce: u64) -> [u8; 32] {
        keccak::hash(&self.encode(switchboard, chain_slug, nonce)).to_bytes()
    }
}

/// Encode data with length prefix (u32 length + data bytes)
fn encode_length_prefixed(buffer: &mut Vec<u8>, data: &[u8]) {
    buffer.extend_from_slice(&(data.len() as u32).to_le_bytes());
    buffer.extend_from_slice(data);
}
