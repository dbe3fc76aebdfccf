//! # LottoChain Node
//!
//! Entry point: wires the ledger, the simulated chain, the indexer and
//! the read API, runs one demo round end to end, and prints the
//! reconstructed history as JSON.

use anyhow::Context;
use shared_types::{opcodes, Address, InboundMessage};

use lotto_read_api::Page;
use lotto_runtime::{Node, RuntimeConfig};
use lotto_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_telemetry(&TelemetryConfig::from_env()).context("telemetry init")?;

    let config = RuntimeConfig::from_env().context("config load")?;
    let node = Node::build(&config)?;

    run_demo_round(&node, &config).await?;

    tracing::info!("demo complete; Ctrl-C to exit");
    tokio::signal::ctrl_c().await.context("signal handler")?;
    node.shutdown().await;
    Ok(())
}

/// Drive one full round against the simulated chain: three entries, a
/// draw, the winner's claim, a reset — then print what the reconstructor
/// derived from the log alone.
async fn run_demo_round(node: &Node, config: &RuntimeConfig) -> anyhow::Result<()> {
    let owner = config.ledger.owner;
    let price = config.ledger.ticket_price;
    let now = unix_now();

    let wallets: [Address; 3] = [[0xA1; 32], [0xB2; 32], [0xC3; 32]];
    for (i, wallet) in wallets.iter().enumerate() {
        node.ledger.apply(
            &InboundMessage {
                sender: *wallet,
                value: price,
                opcode: opcodes::ENTER,
            },
            now + i as u64,
        )?;
    }

    node.ledger.apply(
        &InboundMessage {
            sender: owner,
            value: 0,
            opcode: opcodes::DRAW,
        },
        now + 10,
    )?;

    let winner = node
        .ledger
        .snapshot()
        .winner
        .context("draw must set a winner")?;
    node.ledger.apply(
        &InboundMessage {
            sender: winner,
            value: 0,
            opcode: opcodes::CLAIM,
        },
        now + 20,
    )?;

    node.ledger.apply(
        &InboundMessage {
            sender: owner,
            value: 0,
            opcode: opcodes::RESET,
        },
        now + 30,
    )?;

    // Give the fetch loop one poll to pick up the finished round.
    tokio::time::sleep(config.indexer.poll_interval + std::time::Duration::from_millis(100)).await;

    let rounds = node
        .read_api
        .list_rounds(Page::default())
        .context("reconstruction should be available after a poll")?;
    println!("{}", serde_json::to_string_pretty(&rounds)?);

    let state = node.read_api.ledger_state();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
