// ------------------------------------------------
//      entity type names
// ------------------------------------------------
pub const PROTOCOL_ENTITY: &str = "Protocol";
pub const POOL_ENTITY: &str = "LiquidityPool";
pub const SWAP_ENTITY: &str = "Swap";
pub const ACCOUNT_ENTITY: &str = "Account";

// ------------------------------------------------
//      protocol
// ------------------------------------------------
/* single Protocol row shared by all three Jupiter programs */
pub const PROTOCOL_ID: &str = "jupiter";

// ------------------------------------------------
//      liquidity pool
// ------------------------------------------------
pub fn pool_key(protocol: &str, token_in: &str, token_out: &str) -> String {
    format!("{}-{}-{}", protocol, token_in, token_out)
}
