use anchor_lang::prelude::Pubkey;

/// PDA seeds
pub const CONFIG_SEED: &[u8] = b"switchboard_config";
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault";
pub const NONCE_SEED: &[u8] = b"nonce";
pub const ROLE_SEED: &[u8] = b"role";
pub const PATH_TRIP_SEED: &[u8] = b"path_trip";
pub const PROPOSAL_TRIP_SEED: &[u8] = b"proposal_trip";
pub const FEES_SEED: &[u8] = b"fees";
pub const SIBLING_SEED: &[u8] = b"sibling";

/// The fee vault is a data-less system account
pub const FEE_VAULT_SPACE: usize = 0;

/// Role scope for roles that are not bound to a chain
pub const GLOBAL_SCOPE: u32 = 0;

/// `rescue_funds` token value meaning lamports rather than an SPL mint
pub const NATIVE_TOKEN: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Packet id layout: origin chain slug in the top 4 bytes, packet count in the low 8
pub const PACKET_ID_SIZE: usize = 32;
pub const PACKET_ORIGIN_BYTES: usize = 4;
pub const PACKET_COUNT_BYTES: usize = 8;

/// Ed25519 precompile instruction layout
pub const ED25519_SIGNATURE_SIZE: usize = 64;
pub const ED25519_PUBKEY_SIZE: usize = 32;
pub const ED25519_HEADER_SIZE: usize = 2;
pub const ED25519_OFFSETS_SIZE: usize = 14;
/// Instruction index value meaning "data lives in the precompile instruction itself"
pub const ED25519_CURRENT_INSTRUCTION: u16 = u16::MAX;

/// Domain separation tags for signed actions, indexed by `ActionKind`
pub const ACTION_TAGS: [&[u8]; 8] = [
    b"SWITCHBOARD_TRIP_GLOBAL",
    b"SWITCHBOARD_UNTRIP_GLOBAL",
    b"SWITCHBOARD_TRIP_PATH",
    b"SWITCHBOARD_UNTRIP_PATH",
    b"SWITCHBOARD_TRIP_PROPOSAL",
    b"SWITCHBOARD_UNTRIP_PROPOSAL",
    b"SWITCHBOARD_SET_FEES",
    b"SWITCHBOARD_SET_EXECUTION_OVERHEAD",
];

/// Socket program entrypoints reached by CPI
pub const SOCKET_REGISTER_SIBLING_IX: &str = "global:register_switchboard_for_sibling";
pub const SOCKET_USE_SIBLING_IX: &str = "global:use_sibling_switchboard";
