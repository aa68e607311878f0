//! Jupiter DEX entity-materialization pipeline.
//!
//! Invoked by the host once per delivered batch, either with a raw
//! protobuf-framed transaction batch or with a pre-extracted entity
//! change-feed. Matching activity against the tracked Jupiter programs and
//! every derived entity write goes through the [`store::EntityStore`] seam.

use serde::Serialize;
use serde_json::Value;

use crate::db::SwapEvent;
use crate::feed::{FeedValue, FieldKind, FieldPolicy};
use crate::store::EntityStore;

pub mod address;
pub mod db;
pub mod error;
pub mod feed;
pub mod keyer;
pub mod pb;
pub mod proto;
pub mod store;
pub mod utils;

pub use crate::error::Error;

/// One host delivery. Raw transaction bytes still need framing; the
/// change-feed arrives already decoded into a generic value tree.
#[derive(Debug, Clone)]
pub enum TriggerInput {
    Transactions(Vec<u8>),
    ChangeFeed(Value),
}

/// Per-invocation statistics, reported back to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub transactions: u64,
    pub matched_transactions: u64,
    pub swaps_written: u64,
    pub accounts_upserted: u64,
    pub accounts_deleted: u64,
    pub records_skipped: u64,
}

const SWAP_FIELDS: &[(&str, FieldKind)] = &[
    ("id", FieldKind::Text),
    ("blockHash", FieldKind::Text),
    ("protocol", FieldKind::Text),
    ("tokenIn", FieldKind::Text),
    ("tokenOut", FieldKind::Text),
    ("amountIn", FieldKind::Numeric),
    ("amountOut", FieldKind::Numeric),
    ("slot", FieldKind::Numeric),
    ("blockNumber", FieldKind::Numeric),
    ("timestamp", FieldKind::Numeric),
    ("from", FieldKind::Text),
    ("to", FieldKind::Text),
];

/// Entry point for the host trigger. The only fatal outcome is a byte
/// stream that cannot be framed; it is detected before any store write so a
/// failed batch never half-applies.
pub fn process_batch(
    input: &TriggerInput,
    store: &mut dyn EntityStore,
) -> Result<BatchSummary, Error> {
    match input {
        TriggerInput::Transactions(bytes) => {
            let batch: pb::sol::Transactions = proto::decode(bytes)?;
            Ok(map_jupiter_activity(&batch, store))
        }
        TriggerInput::ChangeFeed(tree) => Ok(map_entity_changes(tree, store)),
    }
}

/// Raw mode: walk every transaction entry, match account keys against the
/// tracked programs, and count at most one protocol touch per entry.
pub fn map_jupiter_activity(
    batch: &pb::sol::Transactions,
    store: &mut dyn EntityStore,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    if batch.transactions.is_empty() {
        return summary;
    }
    log::info!("processing batch of {} transactions", batch.transactions.len());

    for (i, trx) in batch.transactions.iter().enumerate() {
        summary.transactions += 1;

        if trx.meta.is_none() {
            log::debug!("transaction {}: no meta, skipping", i);
            summary.records_skipped += 1;
            continue;
        }
        let tt = match &trx.transaction {
            Some(tt) => tt,
            None => {
                log::debug!("transaction {}: no transaction body, skipping", i);
                summary.records_skipped += 1;
                continue;
            }
        };
        let msg = match &tt.message {
            Some(msg) => msg,
            None => {
                log::debug!("transaction {}: no message, skipping", i);
                summary.records_skipped += 1;
                continue;
            }
        };

        for key in &msg.account_keys {
            let account_key = match address::normalize_key(key) {
                Some(account_key) => account_key,
                None => continue,
            };
            if address::is_known_program(&account_key) {
                db::record_protocol_activity(store, keyer::PROTOCOL_ID, i as i64);
                summary.matched_transactions += 1;
                // one increment per entry, however many keys match
                break;
            }
        }
    }

    summary
}

/// Change-feed mode: flatten the tree into records and hand each one to the
/// materializer for its entity type. A failed record is dropped; iteration
/// always reaches the end of the feed.
pub fn map_entity_changes(tree: &Value, store: &mut dyn EntityStore) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let records = feed::change_records(tree);
    if records.is_empty() {
        return summary;
    }
    log::info!("processing change-feed with {} records", records.len());

    for record in records {
        match record.entity_type.as_str() {
            "Swap" | "Trade" => {
                let fields = match feed::take_fields(&record, SWAP_FIELDS, FieldPolicy::Strict) {
                    Some(fields) => fields,
                    None => {
                        summary.records_skipped += 1;
                        continue;
                    }
                };
                match swap_event(&fields) {
                    Some(event) => {
                        if db::create_swap(store, &event) {
                            summary.swaps_written += 1;
                        } else {
                            summary.records_skipped += 1;
                        }
                    }
                    None => summary.records_skipped += 1,
                }
            }
            "Account" => {
                let id = record
                    .id
                    .clone()
                    .or_else(|| record.fields.get("pubkey").and_then(FeedValue::as_text));
                let id = match id {
                    Some(id) if !id.is_empty() => id,
                    _ => {
                        log::debug!("account change without an id, skipping");
                        summary.records_skipped += 1;
                        continue;
                    }
                };
                match db::apply_account_change(store, &id, record.operation, &record.fields) {
                    db::AccountOutcome::Upserted => summary.accounts_upserted += 1,
                    db::AccountOutcome::Deleted => summary.accounts_deleted += 1,
                }
            }
            other => log::debug!("change record of type {} is not tracked, ignoring", other),
        }
    }

    summary
}

fn swap_event(fields: &std::collections::HashMap<String, FeedValue>) -> Option<SwapEvent> {
    let text = |name: &str| fields.get(name).and_then(FeedValue::as_text);
    Some(SwapEvent {
        id: text("id")?,
        block_hash: text("blockHash")?,
        protocol: text("protocol")?,
        token_in: text("tokenIn")?,
        token_out: text("tokenOut")?,
        amount_in: text("amountIn")?,
        amount_out: text("amountOut")?,
        slot: text("slot")?,
        block_number: text("blockNumber")?,
        timestamp: text("timestamp")?,
        from: text("from")?,
        to: text("to")?,
    })
}
