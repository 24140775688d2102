//! Project entity model and DTO.

use leadbook_core::commission::{
    compute_project_totals, ProjectFinance, ProjectTotals, RoleAssignments, RolePercentages,
    DEFAULT_PCT_COMMERCIAL, DEFAULT_PCT_FIXED, DEFAULT_PCT_IMPLEMENTATION, DEFAULT_PCT_PRESALES,
    DEFAULT_PCT_REFERRAL,
};
use leadbook_core::project_status::ProjectStatus;
use leadbook_core::types::{DbId, Timestamp};
use leadbook_core::validation::not_blank_rule;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A fee-bearing engagement linked to a Lead.
///
/// `pass_through`, `net_service`, `net_license_commission` and `total_net`
/// are computed from the gross fields whenever the project is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: DbId,
    pub lead_id: DbId,
    pub name: String,
    pub status: ProjectStatus,
    pub description: String,
    pub estimated_value: Option<f64>,
    pub gross_negotiated: f64,
    pub gross_licenses: f64,
    pub gross_license_commission: f64,
    pub gross_service: f64,
    pub tax_pct: f64,
    pub fund_pct: f64,
    pub pct_fixed: f64,
    pub pct_presales: f64,
    pub pct_implementation: f64,
    pub pct_commercial: f64,
    pub pct_referral: f64,
    pub billing_forecast: String,
    pub pass_through: f64,
    pub net_service: f64,
    pub net_license_commission: f64,
    pub total_net: f64,
    pub fixed_ids: Vec<DbId>,
    pub presales_ids: Vec<DbId>,
    pub implementation_ids: Vec<DbId>,
    pub commercial_ids: Vec<DbId>,
    pub referral_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The financial slice the commission engine works on.
    pub fn finance(&self) -> ProjectFinance {
        ProjectFinance {
            gross_licenses: self.gross_licenses,
            gross_license_commission: self.gross_license_commission,
            gross_service: self.gross_service,
            tax_pct: self.tax_pct,
            fund_pct: self.fund_pct,
            percentages: RolePercentages {
                fixed: self.pct_fixed,
                presales: self.pct_presales,
                implementation: self.pct_implementation,
                commercial: self.pct_commercial,
                referral: self.pct_referral,
            },
            assignments: RoleAssignments {
                fixed: self.fixed_ids.clone(),
                presales: self.presales_ids.clone(),
                implementation: self.implementation_ids.clone(),
                commercial: self.commercial_ids.clone(),
                referral: self.referral_ids.clone(),
            },
        }
    }

    /// Stamp the computed fields from the current gross figures.
    pub fn apply_totals(&mut self) -> ProjectTotals {
        let totals = compute_project_totals(&self.finance());
        self.pass_through = totals.pass_through;
        self.net_service = totals.net_service;
        self.net_license_commission = totals.net_license_commission;
        self.total_net = totals.total_net;
        totals
    }
}

/// DTO for creating or updating a project. Omitted amounts are zero and
/// omitted role percentages take the engine defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectPayload {
    #[validate(range(min = 1))]
    pub lead_id: DbId,
    #[validate(custom(function = "not_blank_rule"))]
    pub name: String,
    pub status: ProjectStatus,
    pub description: Option<String>,
    pub estimated_value: Option<f64>,
    pub gross_negotiated: Option<f64>,
    pub gross_licenses: Option<f64>,
    pub gross_license_commission: Option<f64>,
    pub gross_service: Option<f64>,
    pub tax_pct: Option<f64>,
    pub fund_pct: Option<f64>,
    pub pct_fixed: Option<f64>,
    pub pct_presales: Option<f64>,
    pub pct_implementation: Option<f64>,
    pub pct_commercial: Option<f64>,
    pub pct_referral: Option<f64>,
    pub billing_forecast: Option<String>,
    pub fixed_ids: Option<Vec<DbId>>,
    pub presales_ids: Option<Vec<DbId>>,
    pub implementation_ids: Option<Vec<DbId>>,
    pub commercial_ids: Option<Vec<DbId>>,
    pub referral_ids: Option<Vec<DbId>>,
}

impl ProjectPayload {
    /// Build the stored record, filling defaults and computed fields.
    pub fn into_project(self, id: DbId, created_at: Timestamp, updated_at: Timestamp) -> Project {
        let mut project = Project {
            id,
            lead_id: self.lead_id,
            name: self.name.trim().to_string(),
            status: self.status,
            description: self.description.unwrap_or_default().trim().to_string(),
            estimated_value: self.estimated_value,
            gross_negotiated: self.gross_negotiated.unwrap_or(0.0),
            gross_licenses: self.gross_licenses.unwrap_or(0.0),
            gross_license_commission: self.gross_license_commission.unwrap_or(0.0),
            gross_service: self.gross_service.unwrap_or(0.0),
            tax_pct: self.tax_pct.unwrap_or(0.0),
            fund_pct: self.fund_pct.unwrap_or(0.0),
            pct_fixed: self.pct_fixed.unwrap_or(DEFAULT_PCT_FIXED),
            pct_presales: self.pct_presales.unwrap_or(DEFAULT_PCT_PRESALES),
            pct_implementation: self.pct_implementation.unwrap_or(DEFAULT_PCT_IMPLEMENTATION),
            pct_commercial: self.pct_commercial.unwrap_or(DEFAULT_PCT_COMMERCIAL),
            pct_referral: self.pct_referral.unwrap_or(DEFAULT_PCT_REFERRAL),
            billing_forecast: self.billing_forecast.unwrap_or_default(),
            fixed_ids: self.fixed_ids.unwrap_or_default(),
            presales_ids: self.presales_ids.unwrap_or_default(),
            implementation_ids: self.implementation_ids.unwrap_or_default(),
            commercial_ids: self.commercial_ids.unwrap_or_default(),
            referral_ids: self.referral_ids.unwrap_or_default(),
            created_at,
            updated_at,
            ..Default::default()
        };
        project.apply_totals();
        project
    }
}
