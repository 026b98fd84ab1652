//! End-to-end flows over the same authorization and state code the instruction
//! handlers run, with keyed PDAs modelled as in-memory maps.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::errors::SwitchboardError;
use crate::state::{
    FeeSchedule, MinFees, PathTrip, ProposalTrip, Role, SiblingConfig, SiblingRegistration,
    SignerNonce, SwitchboardConfig,
};
use crate::utils::{
    access::mock::MockAccessControl,
    authorize::{mock::MockVerifier, Authorizer},
    digest::SignedAction,
    funds::{available_balance, native_rescue_amount, reserve_shortfall, withdrawal_amount},
    packet::{make_packet_id, packet_count, packet_origin_chain},
    signature::WatcherSignature,
    socket::{mock::MockRouter, register_sibling},
};

const LOCAL_CHAIN: u32 = 1;

struct Harness {
    verifier: MockVerifier,
    access: MockAccessControl,
    switchboard: Pubkey,
    config: SwitchboardConfig,
    nonces: BTreeMap<Pubkey, SignerNonce>,
    paths: BTreeMap<u32, PathTrip>,
    proposals: BTreeMap<([u8; 32], u64), ProposalTrip>,
    fees: BTreeMap<u32, FeeSchedule>,
}

impl Harness {
    fn new() -> Self {
        Self {
            verifier: MockVerifier::default(),
            access: MockAccessControl::default(),
            switchboard: Pubkey::new_unique(),
            config: SwitchboardConfig {
                chain_slug: LOCAL_CHAIN,
                timeout_in_seconds: 3_600,
                ..Default::default()
            },
            nonces: BTreeMap::new(),
            paths: BTreeMap::new(),
            proposals: BTreeMap::new(),
            fees: BTreeMap::new(),
        }
    }

    fn sign(&mut self, signer: Pubkey, action: &SignedAction, nonce: u64) -> WatcherSignature {
        let digest = action.digest(&self.switchboard, LOCAL_CHAIN, nonce);
        self.verifier.sign(signer, digest)
    }

    /// Apply a signed action the way a transaction does: every write is staged and
    /// only committed if authorization succeeds.
    fn submit(
        &mut self,
        action: SignedAction,
        nonce: u64,
        signature: &WatcherSignature,
    ) -> Result<()> {
        let mut ledger = self.nonces.get(&signature.signer).cloned().unwrap_or_default();
        ledger.bind(signature.signer, 255);

        let authorizer = Authorizer::new(
            &self.verifier,
            &self.access,
            self.switchboard,
            self.config.chain_slug,
        );
        authorizer.authorize(&mut ledger, &action, nonce, signature)?;
        self.nonces.insert(signature.signer, ledger);

        let tripped = action.trip_intent().unwrap_or_default();
        match action {
            SignedAction::TripGlobal | SignedAction::UntripGlobal => {
                self.config.set_global_tripped(tripped);
            }
            SignedAction::TripPath { src_chain_slug }
            | SignedAction::UntripPath { src_chain_slug } => {
                self.paths
                    .entry(src_chain_slug)
                    .or_default()
                    .apply(src_chain_slug, tripped, 255);
            }
            SignedAction::TripProposal {
                packet_id,
                proposal_count,
            }
            | SignedAction::UntripProposal {
                packet_id,
                proposal_count,
            } => {
                self.proposals
                    .entry((packet_id, proposal_count))
                    .or_default()
                    .apply(packet_id, proposal_count, tripped, 255);
            }
            SignedAction::SetFees {
                dst_chain_slug,
                switchboard_fees,
                verification_overhead_fees,
            } => {
                self.fees.entry(dst_chain_slug).or_default().set_fees(
                    dst_chain_slug,
                    switchboard_fees,
                    verification_overhead_fees,
                    255,
                );
            }
            SignedAction::SetExecutionOverhead {
                dst_chain_slug,
                verification_overhead_fees,
            } => {
                self.fees
                    .entry(dst_chain_slug)
                    .or_default()
                    .set_verification_overhead(dst_chain_slug, verification_overhead_fees, 255);
            }
        }
        Ok(())
    }

    fn next_nonce(&self, signer: &Pubkey) -> u64 {
        self.nonces.get(signer).map(|n| n.next_nonce).unwrap_or_default()
    }

    fn path_tripped(&self, src_chain_slug: u32) -> bool {
        self.paths
            .get(&src_chain_slug)
            .map(|p| p.tripped)
            .unwrap_or_default()
    }

    fn proposal_tripped(&self, packet_id: [u8; 32], proposal_count: u64) -> bool {
        self.proposals
            .get(&(packet_id, proposal_count))
            .map(|p| p.tripped)
            .unwrap_or_default()
    }

    fn min_fees(&self, dst_chain_slug: u32) -> MinFees {
        self.fees
            .get(&dst_chain_slug)
            .map(FeeSchedule::min_fees)
            .unwrap_or_default()
    }
}

#[test]
fn every_flag_and_counter_reads_default_before_first_write() {
    let h = Harness::new();
    let packet_id = make_packet_id(9, [1; 20], 1);

    assert!(!h.config.global_tripped);
    assert!(!h.path_tripped(7));
    assert!(!h.proposal_tripped(packet_id, 0));
    assert_eq!(h.next_nonce(&Pubkey::new_unique()), 0);
    assert_eq!(h.min_fees(7), MinFees::default());
}

#[test]
fn watcher_trips_and_untrip_role_clears_a_path() {
    let mut h = Harness::new();
    let watcher = Pubkey::new_unique();
    h.access.grant(Role::Watcher, 7, watcher);
    h.access.grant(Role::Untrip, 0, watcher);

    let trip = SignedAction::TripPath { src_chain_slug: 7 };
    let signature = h.sign(watcher, &trip, 0);
    h.submit(trip, 0, &signature).unwrap();
    assert!(h.path_tripped(7));
    assert_eq!(h.next_nonce(&watcher), 1);

    let err = h.submit(trip, 0, &signature).unwrap_err();
    assert_eq!(err, SwitchboardError::InvalidNonce.into());
    assert!(h.path_tripped(7));

    let untrip = SignedAction::UntripPath { src_chain_slug: 7 };
    let resigned = h.sign(watcher, &untrip, 1);
    h.submit(untrip, 1, &resigned).unwrap();
    assert!(!h.path_tripped(7));
    assert_eq!(h.next_nonce(&watcher), 2);
}

#[test]
fn proposal_trip_requires_watcher_of_packet_origin() {
    let mut h = Harness::new();
    let packet_id = make_packet_id(9, [1; 20], 12);
    let trip = SignedAction::TripProposal {
        packet_id,
        proposal_count: 3,
    };

    let local_watcher = Pubkey::new_unique();
    h.access.grant(Role::Watcher, LOCAL_CHAIN, local_watcher);
    let signature = h.sign(local_watcher, &trip, 0);
    let err = h.submit(trip, 0, &signature).unwrap_err();
    assert_eq!(err, SwitchboardError::Unauthorized.into());
    assert!(!h.proposal_tripped(packet_id, 3));
    assert_eq!(h.next_nonce(&local_watcher), 0);

    let origin_watcher = Pubkey::new_unique();
    h.access.grant(Role::Watcher, 9, origin_watcher);
    let signature = h.sign(origin_watcher, &trip, 0);
    h.submit(trip, 0, &signature).unwrap();
    assert!(h.proposal_tripped(packet_id, 3));
}

#[test]
fn trip_scopes_are_independent() {
    let mut h = Harness::new();
    let watcher = Pubkey::new_unique();
    let fuse_holder = Pubkey::new_unique();
    h.access.grant(Role::Watcher, 7, watcher);
    h.access.grant(Role::Trip, 0, fuse_holder);

    let packet_id = make_packet_id(7, [2; 20], 1);

    let trip_path = SignedAction::TripPath { src_chain_slug: 7 };
    let signature = h.sign(watcher, &trip_path, 0);
    h.submit(trip_path, 0, &signature).unwrap();

    assert!(h.path_tripped(7));
    assert!(!h.path_tripped(8));
    assert!(!h.proposal_tripped(packet_id, 0));
    assert!(!h.config.global_tripped);

    let trip_global = SignedAction::TripGlobal;
    let signature = h.sign(fuse_holder, &trip_global, 0);
    h.submit(trip_global, 0, &signature).unwrap();

    assert!(h.config.global_tripped);
    assert!(!h.path_tripped(8));
    assert!(!h.proposal_tripped(packet_id, 0));
}

#[test]
fn racing_submissions_with_one_nonce_have_one_winner() {
    let mut h = Harness::new();
    let watcher = Pubkey::new_unique();
    h.access.grant(Role::Watcher, 7, watcher);
    h.access.grant(Role::Watcher, 8, watcher);

    let first = SignedAction::TripPath { src_chain_slug: 7 };
    let second = SignedAction::TripPath { src_chain_slug: 8 };
    let first_sig = h.sign(watcher, &first, 0);
    let second_sig = h.sign(watcher, &second, 0);

    h.submit(first, 0, &first_sig).unwrap();
    let err = h.submit(second, 0, &second_sig).unwrap_err();
    assert_eq!(err, SwitchboardError::InvalidNonce.into());
    assert!(!h.path_tripped(8));
}

#[test]
fn revoked_watcher_can_no_longer_trip() {
    let mut h = Harness::new();
    let watcher = Pubkey::new_unique();
    h.access.grant(Role::Watcher, 7, watcher);
    h.access.revoke(Role::Watcher, 7, watcher);

    let trip = SignedAction::TripPath { src_chain_slug: 7 };
    let signature = h.sign(watcher, &trip, 0);
    let err = h.submit(trip, 0, &signature).unwrap_err();
    assert_eq!(err, SwitchboardError::Unauthorized.into());
}

#[test]
fn fee_updates_are_scoped_to_destination() {
    let mut h = Harness::new();
    let updater = Pubkey::new_unique();
    h.access.grant(Role::FeesUpdater, 5, updater);

    let set = SignedAction::SetFees {
        dst_chain_slug: 5,
        switchboard_fees: 1_000,
        verification_overhead_fees: 50,
    };
    let signature = h.sign(updater, &set, 0);
    h.submit(set, 0, &signature).unwrap();

    let overhead = SignedAction::SetExecutionOverhead {
        dst_chain_slug: 5,
        verification_overhead_fees: 75,
    };
    let signature = h.sign(updater, &overhead, 1);
    h.submit(overhead, 1, &signature).unwrap();

    assert_eq!(
        h.min_fees(5),
        MinFees {
            switchboard_fees: 1_000,
            verification_overhead_fees: 75,
        }
    );

    let elsewhere = SignedAction::SetFees {
        dst_chain_slug: 6,
        switchboard_fees: 1,
        verification_overhead_fees: 1,
    };
    let signature = h.sign(updater, &elsewhere, 2);
    let err = h.submit(elsewhere, 2, &signature).unwrap_err();
    assert_eq!(err, SwitchboardError::Unauthorized.into());
    assert_eq!(h.min_fees(6), MinFees::default());
}

#[test]
fn sibling_watermark_gates_packets_after_reregistration() {
    let router = MockRouter::default();
    let mut sibling = SiblingConfig::default();
    let registration = SiblingRegistration {
        sibling_chain_slug: 9,
        max_packet_length: 10,
        capacitor_type: 1,
        initial_packet_count: 100,
        sibling_switchboard: [7u8; 32],
    };

    register_sibling(&router, &mut sibling, &registration, 254).unwrap();
    register_sibling(&router, &mut sibling, &registration, 254).unwrap();
    assert_eq!(router.registered.borrow().len(), 2);

    let early = make_packet_id(9, [3; 20], 99);
    let current = make_packet_id(9, [3; 20], 100);
    assert_eq!(packet_origin_chain(&current), sibling.sibling_chain_slug);
    assert!(!sibling.accepts_packet_count(packet_count(&early)));
    assert!(sibling.accepts_packet_count(packet_count(&current)));

    let raised = SiblingRegistration {
        initial_packet_count: 200,
        ..registration
    };
    register_sibling(&router, &mut sibling, &raised, 254).unwrap();
    assert!(!sibling.accepts_packet_count(packet_count(&current)));
}

#[test]
fn small_deposits_accumulate_and_withdrawal_keeps_the_reserve() {
    const RESERVE: u64 = 890_880;
    let to = Pubkey::new_unique();

    // initialization funds only the missing reserve
    let mut vault = 0u64;
    vault += reserve_shortfall(vault, RESERVE);
    assert_eq!(vault, RESERVE);

    // deposits well below the rent minimum
    for received in [1_500u64, 2_500, 6_000] {
        vault += received;
    }

    let amount = withdrawal_amount(&to, &to, vault, RESERVE).unwrap();
    vault -= amount;
    assert_eq!(amount, 10_000);
    assert_eq!(vault, RESERVE);

    // a drained vault takes small deposits again
    vault += 1;
    assert_eq!(available_balance(vault, RESERVE), 1);
    let err = native_rescue_amount(&to, &to, vault, RESERVE, 2).unwrap_err();
    assert_eq!(err, SwitchboardError::InsufficientFunds.into());

    let err = withdrawal_amount(&Pubkey::default(), &Pubkey::default(), vault, RESERVE)
        .unwrap_err();
    assert_eq!(err, SwitchboardError::ZeroAddress.into());
}
