//! # DAO Lifecycle Flows
//!
//! Every group below is evaluated by all of its participating validators
//! against one shared store:
//!
//! 1. **Create / SetupDao**: the central app is created and the escrows are
//!    funded and opted in
//! 2. **OptIn / Lock**: an investor registers and locks shares
//! 3. **Drain**: customer funds move to the central and capi escrows
//! 4. **Harvest**: the investor claims exactly their entitlement, once
//! 5. **Withdrawal / Unlock**: the creator withdraws, the investor leaves

#[cfg(test)]
mod tests {
    use anyhow::{ensure, Context, Result};

    use dao_authorization::fixtures::*;
    use dao_authorization::{
        ActionKind, AppStateStore, DrainAmounts, GroupAuthorizationApi, InvestorState,
        StateSnapshot, TransactionGroup, DEFAULT_PRECISION,
    };

    use crate::integration::harness::service;

    const LOCKED_SHARES: u64 = 100_000;
    const CUSTOMER_FUNDS: u64 = 10_000_000;

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    /// Setup, lock, drain, harvest, withdraw and unlock through one service.
    #[test]
    fn test_full_dao_lifecycle() -> Result<()> {
        let svc = service()?;

        // 1. Create and set up the DAO
        let created = svc.submit(&create_group(dao_creator()))?;
        ensure!(created.action == ActionKind::Create);
        let setup = svc.submit(&setup_dao_group())?;
        ensure!(setup.writes.is_empty(), "SetupDao has no state effect");

        // 2. Investor opts in and locks shares
        svc.submit(&opt_in_group(investor()))?;
        svc.submit(&lock_group(investor(), LOCKED_SHARES))?;
        assert_eq!(
            svc.investor_state(&investor()),
            InvestorState {
                shares: LOCKED_SHARES,
                harvested_total: 0,
            }
        );

        // 3. Drain customer funds
        let amounts = DrainAmounts::split(CUSTOMER_FUNDS, CAPI_SHARE, DEFAULT_PRECISION)
            .context("capi share within precision")?;
        assert_eq!(amounts, DrainAmounts { dao: 9_000_000, capi: 1_000_000 });
        svc.submit(&drain_group(drainer(), amounts))?;

        // Both registries count the capi cut
        assert_eq!(svc.received_total(), amounts.capi);
        svc.store().read(|state| {
            assert_eq!(state.received_total(CAPI_APP_ID), amounts.capi);
        });

        // 4. Harvest the full entitlement: 100_000 * 1_000_000 / 1_000_000
        let pending = svc.pending_harvest(&investor())?;
        assert_eq!(pending, 100_000);
        svc.submit(&harvest_group(investor(), pending))?;
        assert_eq!(svc.pending_harvest(&investor())?, 0);

        // A second harvest finds nothing left
        ensure!(svc.submit(&harvest_group(investor(), 1)).is_err());

        // 5. Creator withdraws, investor unlocks and closes out
        svc.submit(&withdrawal_group(amounts.dao))?;
        svc.submit(&unlock_group(investor(), LOCKED_SHARES))?;
        ensure!(!svc.store().has_local(CENTRAL_APP_ID, &investor()));

        let stats = svc.stats();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.admitted, 8);
        Ok(())
    }

    /// Drains accumulate; entitlement follows the running total.
    #[test]
    fn test_entitlement_follows_repeated_drains() -> Result<()> {
        let svc = service()?;
        svc.submit(&lock_group(investor(), 500_000))?;
        svc.submit(&lock_group(other_investor(), 250_000))?;

        for _ in 0..3 {
            svc.submit(&drain_group(drainer(), DrainAmounts { dao: 0, capi: 400 }))?;
        }
        assert_eq!(svc.received_total(), 1_200);
        assert_eq!(svc.pending_harvest(&investor())?, 600);
        assert_eq!(svc.pending_harvest(&other_investor())?, 300);

        // Partial harvests add up to the entitlement
        svc.submit(&harvest_group(investor(), 250))?;
        svc.submit(&harvest_group(investor(), 350))?;
        assert_eq!(svc.investor_state(&investor()).harvested_total, 600);
        assert_eq!(svc.pending_harvest(&investor())?, 0);
        Ok(())
    }

    /// Locking more shares forfeits dividends not yet harvested.
    #[test]
    fn test_lock_forfeits_unharvested_dividends() -> Result<()> {
        let svc = service()?;
        svc.submit(&lock_group(investor(), 1_000_000))?;
        svc.submit(&drain_group(drainer(), DrainAmounts { dao: 0, capi: 5_000_000 }))?;
        assert_eq!(svc.pending_harvest(&investor())?, 5_000_000);

        svc.submit(&lock_group(investor(), 10))?;
        assert_eq!(svc.investor_state(&investor()).shares, 1_000_010);
        assert_eq!(svc.pending_harvest(&investor())?, 50);
        Ok(())
    }

    // =============================================================================
    // SIMULATION
    // =============================================================================

    /// Simulating any group, admitted or not, never changes state.
    #[test]
    fn test_simulate_is_idempotent() -> Result<()> {
        let svc = service()?;
        svc.submit(&lock_group(investor(), 1_000))?;
        let before = svc.store().snapshot();

        let groups = [
            drain_group(drainer(), DrainAmounts { dao: 10, capi: 5 }),
            harvest_group(investor(), 1),
            unlock_group(investor(), 1_000),
        ];
        for group in &groups {
            let first = svc.simulate(group);
            let second = svc.simulate(group);
            assert_eq!(format!("{first:?}"), format!("{second:?}"));
        }

        assert_eq!(svc.store().snapshot(), before);
        Ok(())
    }

    /// A SetupDao bundle one transaction short matches no action.
    #[test]
    fn test_truncated_setup_dao_is_rejected() -> Result<()> {
        let svc = service()?;
        let mut txs = setup_dao_group().transactions().to_vec();
        txs.truncate(9);

        let result = svc.submit(&TransactionGroup::new(txs));
        ensure!(result.is_err(), "nine-member group must not classify");
        assert_eq!(svc.stats().admitted, 0);
        Ok(())
    }
}
