//! Project net totals and per-collaborator commission splits.
//!
//! Tax and fund deductions compound: `net = gross × (1 − tax/100) × (1 − fund/100)`.
//! All percentages are 0–100 scalars and all amounts are plain decimal
//! values in the local currency unit.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Default role percentages
// ---------------------------------------------------------------------------

/// Fixed-role percentage applied when a project does not set one.
pub const DEFAULT_PCT_FIXED: f64 = 10.0;
/// Presales percentage applied when a project does not set one.
pub const DEFAULT_PCT_PRESALES: f64 = 10.0;
/// Implementation percentage applied when a project does not set one.
pub const DEFAULT_PCT_IMPLEMENTATION: f64 = 5.0;
/// Commercial percentage applied when a project does not set one.
pub const DEFAULT_PCT_COMMERCIAL: f64 = 5.0;
/// Referral percentage applied when a project does not set one.
pub const DEFAULT_PCT_REFERRAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Commission role a collaborator can hold on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionRole {
    Fixed,
    Presales,
    Implementation,
    Commercial,
    Referral,
}

impl CommissionRole {
    pub const ALL: [CommissionRole; 5] = [
        Self::Fixed,
        Self::Presales,
        Self::Implementation,
        Self::Commercial,
        Self::Referral,
    ];

    /// The fixed role is paid on the total net; every other role on net service.
    pub fn base(self, totals: &ProjectTotals) -> f64 {
        match self {
            Self::Fixed => totals.total_net,
            _ => totals.net_service,
        }
    }
}

/// Percentage per role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RolePercentages {
    pub fixed: f64,
    pub presales: f64,
    pub implementation: f64,
    pub commercial: f64,
    pub referral: f64,
}

impl Default for RolePercentages {
    fn default() -> Self {
        Self {
            fixed: DEFAULT_PCT_FIXED,
            presales: DEFAULT_PCT_PRESALES,
            implementation: DEFAULT_PCT_IMPLEMENTATION,
            commercial: DEFAULT_PCT_COMMERCIAL,
            referral: DEFAULT_PCT_REFERRAL,
        }
    }
}

impl RolePercentages {
    pub fn get(&self, role: CommissionRole) -> f64 {
        match role {
            CommissionRole::Fixed => self.fixed,
            CommissionRole::Presales => self.presales,
            CommissionRole::Implementation => self.implementation,
            CommissionRole::Commercial => self.commercial,
            CommissionRole::Referral => self.referral,
        }
    }
}

/// Collaborator ids assigned to each role. Ids need not exist in the roster;
/// unknown ids are ignored when computing commissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignments {
    pub fixed: Vec<DbId>,
    pub presales: Vec<DbId>,
    pub implementation: Vec<DbId>,
    pub commercial: Vec<DbId>,
    pub referral: Vec<DbId>,
}

impl RoleAssignments {
    pub fn ids(&self, role: CommissionRole) -> &[DbId] {
        match role {
            CommissionRole::Fixed => &self.fixed,
            CommissionRole::Presales => &self.presales,
            CommissionRole::Implementation => &self.implementation,
            CommissionRole::Commercial => &self.commercial,
            CommissionRole::Referral => &self.referral,
        }
    }

    pub fn holds(&self, role: CommissionRole, collaborator_id: DbId) -> bool {
        self.ids(role).contains(&collaborator_id)
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// The financial slice of a project the engine operates on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFinance {
    pub gross_licenses: f64,
    pub gross_license_commission: f64,
    pub gross_service: f64,
    pub tax_pct: f64,
    pub fund_pct: f64,
    pub percentages: RolePercentages,
    pub assignments: RoleAssignments,
}

/// Computed project fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectTotals {
    /// Gross licenses minus gross license commission.
    pub pass_through: f64,
    pub net_service: f64,
    pub net_license_commission: f64,
    pub total_net: f64,
}

/// Anything the engine can pay: roster members only need an id and a name.
pub trait Payee {
    fn payee_id(&self) -> DbId;
    fn payee_name(&self) -> &str;
}

/// One collaborator's commission broken down by role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaboratorCommission {
    pub collaborator_id: DbId,
    pub collaborator_name: String,
    pub fixed: f64,
    pub presales: f64,
    pub implementation: f64,
    pub commercial: f64,
    pub referral: f64,
    pub total: f64,
}

impl CollaboratorCommission {
    pub fn amount(&self, role: CommissionRole) -> f64 {
        match role {
            CommissionRole::Fixed => self.fixed,
            CommissionRole::Presales => self.presales,
            CommissionRole::Implementation => self.implementation,
            CommissionRole::Commercial => self.commercial,
            CommissionRole::Referral => self.referral,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Apply the compounding tax and fund deductions to a gross amount.
pub fn net_of(gross: f64, tax_pct: f64, fund_pct: f64) -> f64 {
    gross * (1.0 - tax_pct / 100.0) * (1.0 - fund_pct / 100.0)
}

/// Compute pass-through and net figures for a project.
pub fn compute_project_totals(finance: &ProjectFinance) -> ProjectTotals {
    let pass_through = finance.gross_licenses - finance.gross_license_commission;
    let net_service = net_of(finance.gross_service, finance.tax_pct, finance.fund_pct);
    let net_license_commission = net_of(
        finance.gross_license_commission,
        finance.tax_pct,
        finance.fund_pct,
    );
    ProjectTotals {
        pass_through,
        net_service,
        net_license_commission,
        total_net: net_service + net_license_commission,
    }
}

/// Split commissions across the roster.
///
/// A collaborator holding several roles accumulates every award. Rows whose
/// total is exactly zero are dropped; negative percentages flow through.
/// Output follows roster order.
pub fn compute_commissions<P: Payee>(
    finance: &ProjectFinance,
    roster: &[P],
) -> Vec<CollaboratorCommission> {
    let totals = compute_project_totals(finance);

    roster
        .iter()
        .filter_map(|payee| {
            let id = payee.payee_id();
            let award = |role: CommissionRole| {
                if finance.assignments.holds(role, id) {
                    role.base(&totals) * (finance.percentages.get(role) / 100.0)
                } else {
                    0.0
                }
            };

            let fixed = award(CommissionRole::Fixed);
            let presales = award(CommissionRole::Presales);
            let implementation = award(CommissionRole::Implementation);
            let commercial = award(CommissionRole::Commercial);
            let referral = award(CommissionRole::Referral);
            let total = fixed + presales + implementation + commercial + referral;

            (total != 0.0).then(|| CollaboratorCommission {
                collaborator_id: id,
                collaborator_name: payee.payee_name().to_string(),
                fixed,
                presales,
                implementation,
                commercial,
                referral,
                total,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
