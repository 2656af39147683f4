//! Deployment template parameters
//!
//! Fixed when a DAO is deployed and never mutated afterwards. A validator
//! instance is only valid for the one parameter set it was built with.

use crate::domain::errors::ConfigError;
use crate::domain::value_objects::{Address, AppId, AssetId};
use serde::{Deserialize, Serialize};

/// Default fixed-point scale for shares and percentages.
pub const DEFAULT_PRECISION: u64 = 1_000_000;

fn default_precision() -> u64 {
    DEFAULT_PRECISION
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParameters {
    /// Asset distributed as dividends.
    pub funds_asset_id: AssetId,
    /// Asset investors lock to claim dividends.
    pub share_asset_id: AssetId,
    /// Capi platform token.
    pub capi_asset_id: AssetId,
    pub central_app_id: AppId,
    pub capi_app_id: AppId,
    pub dao_creator: Address,
    pub central_escrow: Address,
    pub customer_escrow: Address,
    pub capi_escrow: Address,
    /// Fixed-point scale.
    #[serde(default = "default_precision")]
    pub precision: u64,
    pub share_supply: u64,
    /// Capi's cut of drained funds, scaled by `precision`.
    pub capi_share: u64,
    /// Investors' share of the DAO's income, scaled by `precision`. Reserved.
    pub investors_share: u64,
    /// Reserved.
    pub share_price: u64,
}

impl TemplateParameters {
    /// Parse and validate parameters from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision == 0 {
            return Err(ConfigError::ZeroPrecision);
        }
        if self.share_supply == 0 {
            return Err(ConfigError::ZeroShareSupply);
        }
        for (name, value) in [
            ("capi_share", self.capi_share),
            ("investors_share", self.investors_share),
        ] {
            if value > self.precision {
                return Err(ConfigError::ShareAbovePrecision {
                    name,
                    value,
                    precision: self.precision,
                });
            }
        }
        if self.central_escrow == self.customer_escrow {
            return Err(ConfigError::DuplicateEscrow("central == customer"));
        }
        if self.central_escrow == self.capi_escrow || self.customer_escrow == self.capi_escrow {
            return Err(ConfigError::DuplicateEscrow("capi escrow reused"));
        }
        Ok(())
    }
}
