//! # Attack Simulations
//!
//! Groups that try to move escrow funds or inflate an entitlement. Each
//! must be rejected as a whole with state left untouched.

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use dao_authorization::fixtures::*;
    use dao_authorization::{
        Address, ApplicationCall, AssetTransfer, AuthorizationError,
        DrainAmounts, GroupAuthorizationApi, GroupRejected, Payment, RejectionReason,
        Transaction, TransactionGroup, GLOBAL_RECEIVED_TOTAL,
    };

    use crate::integration::harness::{service, Service};

    fn attacker() -> Address {
        Address::new([0xEE; 32])
    }

    fn with_slot(group: TransactionGroup, slot: usize, tx: impl Into<Transaction>) -> TransactionGroup {
        let mut txs = group.transactions().to_vec();
        txs[slot] = tx.into();
        TransactionGroup::new(txs)
    }

    /// Submit `group` and assert it is rejected without touching state.
    fn assert_rejected(svc: &Service, group: &TransactionGroup) -> RejectionReason {
        let before = svc.store().snapshot();
        let reason = match svc.submit(group) {
            Err(AuthorizationError::Rejected(e)) => e.reason(),
            other => panic!("expected rejection, got {other:?}"),
        };
        assert_eq!(svc.store().snapshot(), before, "rejected group left writes behind");
        reason
    }

    /// Investor with 10% of shares and 1_000_000 received.
    fn funded() -> Result<Service> {
        let svc = service()?;
        svc.submit(&lock_group(investor(), 100_000))?;
        svc.submit(&drain_group(drainer(), DrainAmounts { dao: 0, capi: 1_000_000 }))?;
        Ok(svc)
    }

    // =============================================================================
    // HARVEST
    // =============================================================================

    #[test]
    fn test_harvest_above_entitlement() -> Result<()> {
        let svc = funded()?;
        let reason = assert_rejected(&svc, &harvest_group(investor(), 100_001));
        assert_eq!(reason, RejectionReason::AmountViolation);
        Ok(())
    }

    #[test]
    fn test_harvest_without_shares() -> Result<()> {
        let svc = funded()?;
        let reason = assert_rejected(&svc, &harvest_group(attacker(), 1));
        assert_eq!(reason, RejectionReason::AmountViolation);
        Ok(())
    }

    /// Investor's call, attacker's wallet.
    #[test]
    fn test_harvest_redirected_to_attacker() -> Result<()> {
        let svc = funded()?;
        let group = with_slot(
            harvest_group(investor(), 100_000),
            1,
            AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 100_000, attacker()),
        );
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        Ok(())
    }

    /// A legitimate harvest that also closes the escrow out or rekeys it.
    #[test]
    fn test_harvest_that_takes_over_the_escrow() -> Result<()> {
        let svc = funded()?;
        let transfer = AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 100_000, investor());

        for hijack in [
            transfer.clone().with_close_to(attacker()),
            transfer.clone().with_rekey_to(attacker()),
            transfer.with_fee(10_000),
        ] {
            let group = with_slot(harvest_group(investor(), 100_000), 1, hijack);
            assert_eq!(
                assert_rejected(&svc, &group),
                RejectionReason::SafetyFieldViolation
            );
        }
        Ok(())
    }

    #[test]
    fn test_harvest_with_overflowing_entitlement_fails_closed() -> Result<()> {
        let svc = funded()?;
        svc.store()
            .set_global(CENTRAL_APP_ID, GLOBAL_RECEIVED_TOTAL, u64::MAX / 2);
        let reason = assert_rejected(&svc, &harvest_group(investor(), 1));
        assert_eq!(reason, RejectionReason::AmountViolation);
        assert!(matches!(
            svc.pending_harvest(&investor()),
            Err(GroupRejected::Arithmetic(_))
        ));
        Ok(())
    }

    // =============================================================================
    // ESCROW PAYOUTS
    // =============================================================================

    #[test]
    fn test_drain_to_attacker() -> Result<()> {
        let svc = service()?;
        let group = with_slot(
            drain_group(drainer(), DrainAmounts { dao: 900, capi: 100 }),
            2,
            AssetTransfer::new(customer_escrow(), FUNDS_ASSET_ID, 900, attacker()),
        );
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        Ok(())
    }

    /// Central app and capi app called by different accounts.
    #[test]
    fn test_drain_with_mismatched_callers() -> Result<()> {
        let svc = service()?;
        let group = with_slot(
            drain_group(drainer(), DrainAmounts { dao: 900, capi: 100 }),
            1,
            ApplicationCall::new(attacker(), CAPI_APP_ID),
        );
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        Ok(())
    }

    /// Customer escrow paying out while the calls go to unrelated apps.
    #[test]
    fn test_drain_through_foreign_apps() -> Result<()> {
        let svc = service()?;
        let group = with_slot(
            with_slot(
                drain_group(drainer(), DrainAmounts { dao: 900, capi: 100 }),
                0,
                ApplicationCall::new(drainer(), 999),
            ),
            1,
            ApplicationCall::new(drainer(), 998),
        );
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        assert_eq!(svc.received_total(), 0);
        Ok(())
    }

    /// A Drain the customer escrow never signs: self transfers of a
    /// worthless asset, then a harvest against the inflated total.
    #[test]
    fn test_drain_without_customer_escrow() -> Result<()> {
        let svc = service()?;
        svc.submit(&lock_group(investor(), 1_000_000))?;

        let group = TransactionGroup::new(vec![
            ApplicationCall::new(investor(), CENTRAL_APP_ID).into(),
            ApplicationCall::new(investor(), CAPI_APP_ID).into(),
            AssetTransfer::new(investor(), 777, 0, investor()).into(),
            AssetTransfer::new(investor(), 777, 50_000_000, investor()).into(),
        ]);
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        assert_eq!(svc.received_total(), 0);
        assert_eq!(svc.pending_harvest(&investor()), Ok(0));

        let reason = assert_rejected(&svc, &harvest_group(investor(), 50_000_000));
        assert_eq!(reason, RejectionReason::AmountViolation);
        Ok(())
    }

    #[test]
    fn test_withdrawal_by_non_creator() -> Result<()> {
        let svc = service()?;
        let paid_by_attacker = with_slot(
            withdrawal_group(1_000),
            0,
            Payment::new(attacker(), central_escrow(), 1_000),
        );
        assert_eq!(
            assert_rejected(&svc, &paid_by_attacker),
            RejectionReason::FieldMismatch
        );

        let to_attacker = with_slot(
            withdrawal_group(1_000),
            1,
            AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 1_000, attacker()),
        );
        assert_eq!(
            assert_rejected(&svc, &to_attacker),
            RejectionReason::FieldMismatch
        );
        Ok(())
    }

    /// SetupDao that rekeys the customer escrow during its opt-in.
    #[test]
    fn test_setup_dao_rekeying_an_escrow() -> Result<()> {
        let svc = service()?;
        let group = with_slot(
            setup_dao_group(),
            8,
            AssetTransfer::opt_in(customer_escrow(), FUNDS_ASSET_ID).with_rekey_to(attacker()),
        );
        assert_eq!(
            assert_rejected(&svc, &group),
            RejectionReason::SafetyFieldViolation
        );
        Ok(())
    }

    // =============================================================================
    // SHARES
    // =============================================================================

    #[test]
    fn test_unlock_more_than_locked() -> Result<()> {
        let svc = funded()?;
        let reason = assert_rejected(&svc, &unlock_group(investor(), 100_001));
        assert_eq!(reason, RejectionReason::AmountViolation);
        Ok(())
    }

    /// Crediting shares someone else sent.
    #[test]
    fn test_lock_with_foreign_transfer() -> Result<()> {
        let svc = funded()?;
        let group = with_slot(
            lock_group(attacker(), 50_000),
            1,
            AssetTransfer::new(investor(), SHARE_ASSET_ID, 50_000, locking_escrow()),
        );
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::FieldMismatch);
        Ok(())
    }

    // =============================================================================
    // SHAPE
    // =============================================================================

    #[test]
    fn test_groups_of_unknown_length() -> Result<()> {
        let svc = service()?;
        for len in [0usize, 3, 5, 9, 11] {
            let txs: Vec<Transaction> = (0..len)
                .map(|_| ApplicationCall::new(drainer(), CENTRAL_APP_ID).into())
                .collect();
            let reason = assert_rejected(&svc, &TransactionGroup::new(txs));
            assert_eq!(reason, RejectionReason::ShapeMismatch, "length {len}");
        }
        Ok(())
    }

    /// A harvest argument with a second argument attached matches nothing.
    #[test]
    fn test_extra_app_argument() -> Result<()> {
        let svc = funded()?;
        let call = ApplicationCall::new(investor(), CENTRAL_APP_ID)
            .with_arg("harvest")
            .with_arg("again");
        let group = with_slot(harvest_group(investor(), 1), 0, call);
        assert_eq!(assert_rejected(&svc, &group), RejectionReason::ShapeMismatch);
        Ok(())
    }
}
