//! Integration test modules.

mod lottery_flow;
mod reconstruction;

use std::sync::Arc;

use lotto_indexer::IndexerConfig;
use lotto_ledger::LedgerConfig;
use lotto_read_api::ReadApiConfig;
use lotto_runtime::{Node, RuntimeConfig};
use shared_types::{Address, Amount, InboundMessage};

pub const OWNER: Address = [0x01; 32];
pub const ALICE: Address = [0xA1; 32];
pub const BOB: Address = [0xB2; 32];
pub const CAROL: Address = [0xC3; 32];

pub const PRICE: Amount = 1_000;
pub const GAS: Amount = 10;
pub const NOW: u64 = 1_700_000_000;

/// Standard test wiring: a real node with a fast poll interval.
pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        ledger: LedgerConfig {
            owner: OWNER,
            ticket_price: PRICE,
            gas_reserve: GAS,
        },
        indexer: IndexerConfig {
            poll_interval: std::time::Duration::from_millis(20),
            ..Default::default()
        },
        read_api: ReadApiConfig::default(),
    }
}

pub fn build_node() -> Node {
    Node::build(&test_config()).expect("test config must wire")
}

pub fn msg(sender: Address, value: Amount, opcode: u32) -> InboundMessage {
    InboundMessage {
        sender,
        value,
        opcode,
    }
}

/// Wait until the indexer has published a reconstruction covering the
/// current log length, bounded so a broken loop fails the test instead of
/// hanging it.
pub async fn wait_for_reconstruction(node: &Node) -> Arc<lotto_indexer::Reconstruction> {
    for _ in 0..200 {
        let status = node.indexer.status();
        if let Some(view) = status.reconstruction {
            if view.stats.total_records >= node.log.len() {
                return view;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("indexer never caught up with the log");
}
