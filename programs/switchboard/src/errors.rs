use anchor_lang::prelude::*;

#[error_code]
pub enum SwitchboardError {
    #[msg("Signer does not hold the required role for this scope")]
    Unauthorized,

    #[msg("Nonce does not match the signer's next expected nonce")]
    InvalidNonce,

    #[msg("Nonce counter exhausted")]
    NonceOverflow,

    #[msg("No matching ed25519 verification for this signature")]
    InvalidSignature,

    #[msg("Address must not be the null address")]
    ZeroAddress,

    #[msg("Chain slug must be non-zero")]
    InvalidChainSlug,

    #[msg("Re-entrant call rejected")]
    ReentrantCall,

    #[msg("Sibling chain has not been registered")]
    SiblingNotRegistered,

    #[msg("Supplied socket program does not match configuration")]
    InvalidSocketProgram,

    #[msg("Caller is not the registered execution manager")]
    UnauthorizedExecutionManager,

    #[msg("Recipient account does not match the requested address")]
    RecipientMismatch,

    #[msg("Insufficient funds in fee vault")]
    InsufficientFunds,

    #[msg("Token accounts are required for SPL rescue")]
    MissingTokenAccounts,

    #[msg("Token account mint does not match rescued token")]
    TokenMismatch,

    #[msg("Account is not owned by this program")]
    InvalidAccountOwner,

    #[msg("Unauthorized authority")]
    UnauthorizedAuthority,
}
