//! Group Authorization Service
//!
//! Plays the host ledger: decides which validators take part in a group,
//! runs them all against one state snapshot and admits the group only if
//! every one of them approves.

use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind};
use crate::domain::classifier::GroupClassifier;
use crate::domain::effects::StateWrite;
use crate::domain::entities::TransactionGroup;
use crate::domain::entitlement::{EntitlementCalculator, InvestorState};
use crate::domain::errors::{AuthorizationError, ConfigError, GroupRejected};
use crate::domain::value_objects::{Address, Amount, OnCompletion};
use crate::ports::inbound::GroupAuthorizationApi;
use crate::ports::outbound::{AppStateStore, StateSnapshot};
use crate::validators::{
    CapiAppValidator, CentralAppValidator, CentralEscrowValidator, CustomerEscrowValidator,
    GroupValidator,
};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

/// Outcome of an admitted group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Admission {
    pub action: ActionKind,
    /// Validators that approved, in evaluation order.
    pub validators: Vec<&'static str>,
    /// Combined state effects, including ledger CloseOut effects.
    pub writes: Vec<StateWrite>,
}

/// Counters of evaluated groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ServiceStats {
    pub evaluated: u64,
    pub admitted: u64,
    pub rejected: u64,
}

pub struct GroupAuthorizationService<S: AppStateStore> {
    params: TemplateParameters,
    store: S,
    classifier: GroupClassifier,
    calculator: EntitlementCalculator,
    central_app: CentralAppValidator,
    capi_app: CapiAppValidator,
    central_escrow: CentralEscrowValidator,
    customer_escrow: CustomerEscrowValidator,
    stats: RwLock<ServiceStats>,
}

impl<S: AppStateStore> GroupAuthorizationService<S> {
    /// Build the validators for one deployment.
    pub fn new(params: TemplateParameters, store: S) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            classifier: GroupClassifier::new(),
            calculator: EntitlementCalculator::new(params.precision),
            central_app: CentralAppValidator::new(params.clone()),
            capi_app: CapiAppValidator::new(params.clone()),
            central_escrow: CentralEscrowValidator::new(params.clone()),
            customer_escrow: CustomerEscrowValidator::new(params.clone()),
            params,
            store,
            stats: RwLock::new(ServiceStats::default()),
        })
    }

    pub fn params(&self) -> &TemplateParameters {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> ServiceStats {
        *self.stats.read()
    }

    /// Validators whose account takes part in `group`.
    fn participants(&self, group: &TransactionGroup) -> Vec<&dyn GroupValidator> {
        let mut participants: Vec<&dyn GroupValidator> = Vec::new();
        if group.calls_app(self.params.central_app_id) || group.calls_app(0) {
            participants.push(&self.central_app);
        }
        if group.calls_app(self.params.capi_app_id) {
            participants.push(&self.capi_app);
        }
        if group.is_signed_by(&self.params.central_escrow) {
            participants.push(&self.central_escrow);
        }
        if group.is_signed_by(&self.params.customer_escrow) {
            participants.push(&self.customer_escrow);
        }
        participants
    }

    fn evaluate(
        &self,
        group: &TransactionGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Admission, GroupRejected> {
        let action = self.classifier.classify(group)?;
        let participants = self.participants(group);
        if participants.is_empty() {
            return Err(GroupRejected::shape("no validator takes part in the group"));
        }

        let mut admission = Admission {
            action: action.kind(),
            validators: Vec::with_capacity(participants.len()),
            writes: Vec::new(),
        };
        for validator in participants {
            let approval = validator.authorize(&action, state).map_err(|e| {
                debug!(validator = validator.name(), reason = %e.reason(), "Validator rejected group");
                e
            })?;
            debug!(validator = validator.name(), writes = approval.writes.len(), "Approved");
            admission.validators.push(validator.name());
            admission.writes.extend(approval.writes);
        }

        admission.writes.extend(close_out_effects(&action, group));
        Ok(admission)
    }

    fn record(&self, outcome: &Result<Admission, AuthorizationError>) {
        let mut stats = self.stats.write();
        stats.evaluated += 1;
        match outcome {
            Ok(admission) => {
                stats.admitted += 1;
                info!(
                    action = %admission.action,
                    validators = admission.validators.len(),
                    writes = admission.writes.len(),
                    "Group admitted"
                );
            }
            Err(e) => {
                stats.rejected += 1;
                warn!(error = %e, "Group rejected");
            }
        }
    }
}

/// The ledger drops an account's local state when it closes out of an app.
fn close_out_effects(action: &Action, group: &TransactionGroup) -> Vec<StateWrite> {
    if !matches!(action, Action::Unlock(_)) {
        return Vec::new();
    }
    group
        .iter()
        .filter_map(|tx| tx.as_app_call())
        .filter(|call| call.on_completion == OnCompletion::CloseOut)
        .map(|call| StateWrite::ClearLocal {
            app_id: call.app_id,
            account: call.sender,
        })
        .collect()
}

impl<S: AppStateStore> GroupAuthorizationApi for GroupAuthorizationService<S> {
    #[instrument(skip(self, group), fields(group_size = group.len()))]
    fn simulate(&self, group: &TransactionGroup) -> Result<Admission, AuthorizationError> {
        let outcome = self
            .store
            .read(|state| self.evaluate(group, state))
            .map_err(AuthorizationError::from);
        self.record(&outcome);
        outcome
    }

    #[instrument(skip(self, group), fields(group_size = group.len()))]
    fn submit(&self, group: &TransactionGroup) -> Result<Admission, AuthorizationError> {
        let outcome = self.store.transact(|state| {
            let admission = self.evaluate(group, state)?;
            let writes = admission.writes.clone();
            Ok::<_, AuthorizationError>((admission, writes))
        });
        self.record(&outcome);
        outcome
    }

    fn investor_state(&self, account: &Address) -> InvestorState {
        self.store
            .read(|state| state.investor_state(self.params.central_app_id, account))
    }

    fn pending_harvest(&self, account: &Address) -> Result<Amount, GroupRejected> {
        let app_id = self.params.central_app_id;
        self.store.read(|state| {
            self.calculator
                .pending_harvest(&state.investor_state(app_id, account), state.received_total(app_id))
        })
    }

    fn received_total(&self) -> Amount {
        self.store
            .read(|state| state.received_total(self.params.central_app_id))
    }
}
