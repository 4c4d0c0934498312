//! Mock procedure pricing, in whole rupees.

use crate::models::HospitalTier;

/// Flat co-pay shown for cashless admissions.
pub const CASHLESS_COPAY: u64 = 2_500;

/// Share of the procedure cost paid upfront at an out-of-network
/// hospital, in percent.
pub const REIMBURSEMENT_UPFRONT_PERCENT: u64 = 30;

const FALLBACK_COST: u64 = 1_500;

const PROCEDURE_COSTS: [(&str, u64); 4] = [
    ("Total Knee Arthroplasty", 350_000),
    ("Coronary Angiography", 45_000),
    ("MRI Brain Contrast", 12_000),
    ("Endoscopy", 8_000),
];

/// Budget-tier list price of a procedure.
pub fn base_cost(procedure: &str) -> u64 {
    PROCEDURE_COSTS
        .iter()
        .find(|(p, _)| *p == procedure)
        .map(|(_, cost)| *cost)
        .unwrap_or(FALLBACK_COST)
}

/// List price at a hospital of the given tier. Premium is 1.6x budget.
pub fn tier_cost(procedure: &str, tier: HospitalTier) -> u64 {
    let base = base_cost(procedure);
    match tier {
        HospitalTier::Premium => base * 8 / 5,
        HospitalTier::Budget => base,
    }
}

pub fn reimbursement_upfront(procedure: &str, tier: HospitalTier) -> u64 {
    tier_cost(procedure, tier) * REIMBURSEMENT_UPFRONT_PERCENT / 100
}

/// Format rupees with Indian digit grouping: `₹12,34,567`.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), last_three)
}
