//! Calculation logic for the cost engine.
//!
//! This module contains the three pipeline stages and the terms they
//! compose: progressive income tax over a configurable bracket table, the
//! net-to-gross solver for net contracts, overtime pay, statutory employer
//! costs (insurance, absorbed tax, severance, Eidi and leave accruals),
//! welfare and hidden HR costs, and the composer that assembles the final
//! breakdown. Every function here is pure.

mod common;
mod cost_composer;
mod gross_up;
mod overtime;
mod statutory;
mod tax_brackets;
mod welfare;

pub use common::{MONTHS_PER_YEAR, round_currency};
pub use cost_composer::{
    CostComposition, GROSS_UP_NOT_CONVERGED, NET_MODE_ALLOWANCES_SUPPRESSED, ZERO_NET_SALARY,
    compose, compose_with_limit,
};
pub use gross_up::{
    GROSS_UP_TOLERANCE, GrossUpResult, MAX_GROSS_UP_ITERATIONS, calculate_gross_up,
    ensure_converged, gross_up_from_net, gross_up_with_limit, net_from_gross,
    try_gross_up_from_net,
};
pub use overtime::{
    DEFAULT_OVERTIME_BASE_HOURS, OVERTIME_PREMIUM_MULTIPLIER, OvertimeResult,
    calculate_overtime_pay,
};
pub use statutory::{
    AccrualResult, DAYS_PER_MONTH, EIDI_MONTHS_PER_YEAR, EMPLOYEE_INSURANCE_RATE,
    EMPLOYER_INSURANCE_RATE, InsuranceResult, LEAVE_REDEMPTION_DAYS_PER_MONTH,
    NET_CONTRACT_INSURANCE_RATE, SEVERANCE_MONTHS_PER_YEAR, TaxBurdenResult, calculate_accruals,
    calculate_employer_insurance, calculate_employer_tax_burden, employer_insurance_rate,
};
pub use tax_brackets::{
    IncomeTaxResult, annual_tax, calculate_income_tax, marginal_rate, monthly_tax,
};
pub use welfare::{SecondaryCostResult, calculate_hidden_hr_cost, calculate_welfare_cost};
