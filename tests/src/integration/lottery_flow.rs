//! # Round Lifecycle Flows
//!
//! End-to-end scenarios through the real ledger service, chain log,
//! indexer and read API.

use super::*;
use lotto_ledger::{LedgerError, OpOutcome};
use lotto_read_api::Page;
use shared_types::opcodes;

#[tokio::test]
async fn three_wallets_full_round() {
    let node = build_node();

    // Three wallets enter at the exact ticket price.
    for (i, wallet) in [ALICE, BOB, CAROL].iter().enumerate() {
        let out = node
            .ledger
            .apply(&msg(*wallet, PRICE, opcodes::ENTER), NOW + i as u64)
            .unwrap();
        assert_eq!(out, OpOutcome::Entered { slot: i as u32 });
    }
    let state = node.ledger.snapshot();
    assert_eq!(state.participant_count, 3);
    assert_eq!(state.pool, 3 * PRICE);

    // Owner draws; the winner is one of the entrants.
    node.ledger
        .apply(&msg(OWNER, 0, opcodes::DRAW), NOW + 10)
        .unwrap();
    let winner = node.ledger.snapshot().winner.unwrap();
    assert!([ALICE, BOB, CAROL].contains(&winner));

    // Both non-winners fail with the winner-only error.
    for wallet in [ALICE, BOB, CAROL] {
        if wallet == winner {
            continue;
        }
        assert_eq!(
            node.ledger
                .apply(&msg(wallet, 0, opcodes::CLAIM), NOW + 11)
                .unwrap_err(),
            LedgerError::OnlyWinnerCanClaim
        );
    }

    // The winner claims once; a second attempt fails.
    let out = node
        .ledger
        .apply(&msg(winner, 0, opcodes::CLAIM), NOW + 12)
        .unwrap();
    assert_eq!(
        out,
        OpOutcome::PrizeClaimed {
            amount: 3 * PRICE - GAS
        }
    );
    assert_eq!(
        node.ledger
            .apply(&msg(winner, 0, opcodes::CLAIM), NOW + 13)
            .unwrap_err(),
        LedgerError::PrizeAlreadyClaimed
    );

    // Reset succeeds and the registry is empty again.
    node.ledger
        .apply(&msg(OWNER, 0, opcodes::RESET), NOW + 14)
        .unwrap();
    let state = node.ledger.snapshot();
    assert_eq!(state.participant_count, 0);
    assert_eq!(state.winner, None);
    assert!(state.round_active);

    node.shutdown().await;
}

#[tokio::test]
async fn half_stake_entry_rejected() {
    let node = build_node();

    let err = node
        .ledger
        .apply(&msg(ALICE, PRICE / 2, opcodes::ENTER), NOW)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::IncorrectStake {
            expected: PRICE,
            got: PRICE / 2
        }
    );
    assert_eq!(node.ledger.snapshot().participant_count, 0);
    // Nothing hit the chain either.
    assert!(node.log.is_empty());

    node.shutdown().await;
}

#[tokio::test]
async fn read_api_serves_round_history() {
    let node = build_node();

    node.ledger
        .apply(&msg(ALICE, PRICE, opcodes::ENTER), NOW)
        .unwrap();
    node.ledger
        .apply(&msg(BOB, PRICE, opcodes::ENTER), NOW + 1)
        .unwrap();
    node.ledger
        .apply(&msg(OWNER, 0, opcodes::DRAW), NOW + 2)
        .unwrap();

    wait_for_reconstruction(&node).await;

    let page = node.read_api.list_rounds(Page::default()).unwrap();
    assert_eq!(page.total, 2);
    let past = &page.rounds[1];
    assert!(past.closed);
    assert_eq!(past.entry_count(), 2);
    assert_eq!(past.stake_total, 2 * PRICE);

    let alice_events = node
        .read_api
        .list_events_for_wallet(ALICE, Page::default())
        .unwrap();
    assert_eq!(alice_events.total, 1);

    node.shutdown().await;
}

#[tokio::test]
async fn emergency_withdraw_only_after_close() {
    let node = build_node();

    node.ledger
        .apply(&msg(ALICE, PRICE, opcodes::ENTER), NOW)
        .unwrap();
    assert_eq!(
        node.ledger
            .apply(&msg(OWNER, 0, opcodes::EMERGENCY_WITHDRAW), NOW + 1)
            .unwrap_err(),
        LedgerError::CannotWithdrawDuringActiveRound
    );

    node.ledger
        .apply(&msg(OWNER, 0, opcodes::DRAW), NOW + 2)
        .unwrap();
    let out = node
        .ledger
        .apply(&msg(OWNER, 0, opcodes::EMERGENCY_WITHDRAW), NOW + 3)
        .unwrap();
    assert_eq!(out, OpOutcome::PoolSwept { amount: PRICE });

    node.shutdown().await;
}

#[tokio::test]
async fn unknown_opcode_never_reaches_state() {
    let node = build_node();
    let before = node.ledger.snapshot();

    let err = node
        .ledger
        .apply(&msg(ALICE, PRICE, 0xFFFF_FFFF), NOW)
        .unwrap_err();
    assert!(matches!(err, LedgerError::Decode(_)));
    assert_eq!(node.ledger.snapshot(), before);
    assert!(node.log.is_empty());

    node.shutdown().await;
}
