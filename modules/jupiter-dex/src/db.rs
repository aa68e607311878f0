//! Entity materialization against the host store.
//!
//! Protocol and LiquidityPool are get-or-create: at most one instance per
//! key, fields written only on first creation, counters the only mutation
//! path afterwards. Swap and Account are write-once-per-id; re-delivery of
//! the same id overwrites with identical data.

use std::collections::HashMap;

use crate::feed::{FeedValue, OP_DELETE};
use crate::pb::jupiter::{Account, LiquidityPool, Protocol, Swap};
use crate::store::EntityStore;
use crate::{keyer, proto, utils};

pub fn get_or_create_protocol(store: &mut dyn EntityStore, id: &str) -> Protocol {
    if let Some(bytes) = store.get(keyer::PROTOCOL_ENTITY, id) {
        match proto::decode::<Protocol>(&bytes) {
            Ok(existing) => return existing,
            Err(e) => log::warn!("protocol {}: unreadable stored row, rebuilding: {}", id, e),
        }
    }

    let protocol = Protocol {
        id: id.to_string(),
        name: "Jupiter".to_string(),
        version: "v6".to_string(),
        total_volume_usd: utils::zero_big_decimal().to_string(),
        total_unique_users: 0,
        last_update_timestamp: 0,
        total_pools: 0,
    };
    store.set(keyer::PROTOCOL_ENTITY, id, proto::encode(&protocol));
    protocol
}

/// One tracked transaction entry touched the protocol: bump the unique-user
/// counter and stamp the batch ordinal.
pub fn record_protocol_activity(store: &mut dyn EntityStore, id: &str, ordinal: i64) {
    let mut protocol = get_or_create_protocol(store, id);
    protocol.total_unique_users += 1;
    protocol.last_update_timestamp = ordinal;
    store.set(keyer::PROTOCOL_ENTITY, id, proto::encode(&protocol));
}

pub fn get_or_create_pool(
    store: &mut dyn EntityStore,
    pool_id: &str,
    protocol_id: &str,
    token_in: &str,
    token_out: &str,
) -> LiquidityPool {
    if let Some(bytes) = store.get(keyer::POOL_ENTITY, pool_id) {
        match proto::decode::<LiquidityPool>(&bytes) {
            Ok(existing) => return existing,
            Err(e) => log::warn!("pool {}: unreadable stored row, rebuilding: {}", pool_id, e),
        }
    }

    let pool = LiquidityPool {
        id: pool_id.to_string(),
        protocol: protocol_id.to_string(),
        input_tokens: vec![token_in.to_string(), token_out.to_string()],
        token0_balance: "0".to_string(),
        token1_balance: "0".to_string(),
        output_token_supply: "0".to_string(),
        volume_token0: "0".to_string(),
        volume_token1: "0".to_string(),
        created_timestamp: 0,
        created_block_number: 0,
    };
    store.set(keyer::POOL_ENTITY, pool_id, proto::encode(&pool));

    let mut protocol = get_or_create_protocol(store, protocol_id);
    protocol.total_pools += 1;
    store.set(keyer::PROTOCOL_ENTITY, protocol_id, proto::encode(&protocol));

    pool
}

/// A decoded trade, fields still in their wire string form.
#[derive(Debug, Clone, Default)]
pub struct SwapEvent {
    pub id: String,
    pub block_hash: String,
    pub protocol: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out: String,
    pub slot: String,
    pub block_number: String,
    pub timestamp: String,
    pub from: String,
    pub to: String,
}

/// Writes one Swap plus its referential Protocol and LiquidityPool. Every
/// numeric field must parse before anything is written; a failure abandons
/// the whole swap so no partially-built entity ever lands in the store.
pub fn create_swap(store: &mut dyn EntityStore, event: &SwapEvent) -> bool {
    if event.id.is_empty() || event.protocol.is_empty() {
        log::warn!("swap without id or protocol, dropping");
        return false;
    }

    let amount_in = match utils::parse_big_int(&event.amount_in) {
        Some(v) => v,
        None => {
            log::warn!("swap {}: unparseable amountIn {:?}", event.id, event.amount_in);
            return false;
        }
    };
    let amount_out = match utils::parse_big_int(&event.amount_out) {
        Some(v) => v,
        None => {
            log::warn!("swap {}: unparseable amountOut {:?}", event.id, event.amount_out);
            return false;
        }
    };
    let slot = match utils::parse_i64(&event.slot) {
        Some(v) => v,
        None => {
            log::warn!("swap {}: unparseable slot {:?}", event.id, event.slot);
            return false;
        }
    };
    let block_number = match utils::parse_i64(&event.block_number) {
        Some(v) => v,
        None => {
            log::warn!(
                "swap {}: unparseable blockNumber {:?}",
                event.id,
                event.block_number
            );
            return false;
        }
    };
    let timestamp = match utils::parse_i64(&event.timestamp) {
        Some(v) => v,
        None => {
            log::warn!("swap {}: unparseable timestamp {:?}", event.id, event.timestamp);
            return false;
        }
    };

    get_or_create_protocol(store, &event.protocol);
    let pool_id = keyer::pool_key(&event.protocol, &event.token_in, &event.token_out);
    get_or_create_pool(
        store,
        &pool_id,
        &event.protocol,
        &event.token_in,
        &event.token_out,
    );

    let swap = Swap {
        id: event.id.clone(),
        block_hash: event.block_hash.clone(),
        protocol: event.protocol.clone(),
        pool: pool_id,
        from: event.from.clone(),
        to: event.to.clone(),
        token_in: event.token_in.clone(),
        token_out: event.token_out.clone(),
        amount_in: amount_in.to_string(),
        amount_out: amount_out.to_string(),
        // USD legs stay zero until price enrichment lands
        amount_in_usd: utils::zero_big_decimal().to_string(),
        amount_out_usd: utils::zero_big_decimal().to_string(),
        slot,
        block_number,
        timestamp,
    };
    store.set(keyer::SWAP_ENTITY, &event.id, proto::encode(&swap));
    true
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountOutcome {
    Upserted,
    Deleted,
}

/// Full-replacement upsert, or removal on the delete operation code. A
/// field that is missing or fails its typed decode is omitted from the
/// replacement, never a reason to abort it.
pub fn apply_account_change(
    store: &mut dyn EntityStore,
    id: &str,
    operation: i64,
    fields: &HashMap<String, FeedValue>,
) -> AccountOutcome {
    if operation == OP_DELETE {
        // removal of a nonexistent id is a no-op
        store.delete(keyer::ACCOUNT_ENTITY, id);
        return AccountOutcome::Deleted;
    }

    let mut account = Account {
        pubkey: id.to_string(),
        ..Account::default()
    };
    for (name, value) in fields {
        match name.as_str() {
            "pubkey" => {
                if let Some(v) = value.as_text() {
                    account.pubkey = v;
                }
            }
            "owner" => {
                if let Some(v) = value.as_text() {
                    account.owner = v;
                }
            }
            "lamports" => {
                if let Some(v) = value.as_u64() {
                    account.lamports = v;
                }
            }
            "slot" => {
                if let Some(v) = value.as_u64() {
                    account.slot = v;
                }
            }
            "rentEpoch" => {
                if let Some(v) = value.as_u64() {
                    account.rent_epoch = v;
                }
            }
            "executable" => {
                if let Some(v) = value.as_bool() {
                    account.executable = v;
                }
            }
            "data" => {
                if let Some(payload) = value.as_bytes() {
                    account.data = payload;
                }
            }
            other => log::debug!("account {}: ignoring unknown field {}", id, other),
        }
    }
    store.set(keyer::ACCOUNT_ENTITY, id, proto::encode(&account));
    AccountOutcome::Upserted
}
