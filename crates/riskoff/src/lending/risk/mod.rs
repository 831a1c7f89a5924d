mod dti;
mod tiered;

pub use dti::{assess_risk, DtiAssessment, DtiStatus, DTI_ANNUAL_RATE_PERCENT};
pub use tiered::{predict, Prediction, PredictorDecision, RiskCategory, TIERED_ANNUAL_RATE_PERCENT};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantSignals, LoanRequest, PredictorInput};
use super::limits::EngineError;
use crate::config::EngineConfig;

/// Named risk pathways callers can select between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyProfile {
    /// 0-100 score from DTI and disposable-income ratios, APPROVED/REJECTED.
    DtiScoring,
    /// Legacy 0-1 risk tiered on EMI-to-income, LOW/MEDIUM/HIGH.
    TieredEmi,
}

impl PolicyProfile {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dti" | "dti_scoring" | "dti-scoring" => Some(Self::DtiScoring),
            "tiered" | "tiered_emi" | "tiered-emi" | "legacy" => Some(Self::TieredEmi),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PolicyProfile::DtiScoring => "dti_scoring",
            PolicyProfile::TieredEmi => "tiered_emi",
        }
    }

    pub fn policy(&self) -> &'static dyn RiskPolicy {
        match self {
            PolicyProfile::DtiScoring => &DtiScoring,
            PolicyProfile::TieredEmi => &TieredEmi,
        }
    }
}

/// Final routing for an application, shared by both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    ManualReview,
    Reject,
}

/// Category label in the vocabulary of the policy that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentLabel {
    Status(DtiStatus),
    Category(RiskCategory),
}

impl AssessmentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentLabel::Status(status) => status.label(),
            AssessmentLabel::Category(category) => category.label(),
        }
    }
}

/// Policy-agnostic view of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub policy: PolicyProfile,
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    pub category: AssessmentLabel,
    pub decision: Decision,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Decimal,
    pub factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recommendation: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub max_recommended_loan: Option<Decimal>,
}

impl From<DtiAssessment> for RiskAssessment {
    fn from(value: DtiAssessment) -> Self {
        let decision = match value.status {
            DtiStatus::Approved => Decision::Approve,
            DtiStatus::Rejected => Decision::Reject,
        };
        Self {
            policy: PolicyProfile::DtiScoring,
            score: value.score,
            category: AssessmentLabel::Status(value.status),
            decision,
            emi: value.emi,
            factors: value.reasons,
            recommendation: None,
            max_recommended_loan: None,
        }
    }
}

impl From<Prediction> for RiskAssessment {
    fn from(value: Prediction) -> Self {
        let decision = match value.decision {
            PredictorDecision::AutoApprove => Decision::Approve,
            PredictorDecision::ManualReview => Decision::ManualReview,
            PredictorDecision::AutoReject => Decision::Reject,
        };
        Self {
            policy: PolicyProfile::TieredEmi,
            score: value.risk_score,
            category: AssessmentLabel::Category(value.risk_category),
            decision,
            emi: value.monthly_emi,
            factors: value.risk_factors,
            recommendation: Some(value.recommendation),
            max_recommended_loan: Some(value.max_recommended_loan),
        }
    }
}

/// A risk pathway that turns a loan request into an assessment.
pub trait RiskPolicy: Send + Sync {
    fn profile(&self) -> PolicyProfile;

    fn assess(
        &self,
        request: &LoanRequest,
        signals: &ApplicantSignals,
    ) -> Result<RiskAssessment, EngineError>;
}

/// DTI scoring at the fixed 12% pricing rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtiScoring;

impl RiskPolicy for DtiScoring {
    fn profile(&self) -> PolicyProfile {
        PolicyProfile::DtiScoring
    }

    fn assess(
        &self,
        request: &LoanRequest,
        _signals: &ApplicantSignals,
    ) -> Result<RiskAssessment, EngineError> {
        assess_risk(
            request.principal,
            request.tenure_months,
            request.monthly_income,
            request.monthly_expenses,
            request.existing_emi,
        )
        .map(RiskAssessment::from)
    }
}

/// Legacy EMI-tiered predictor at the fixed 10% pricing rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredEmi;

impl RiskPolicy for TieredEmi {
    fn profile(&self) -> PolicyProfile {
        PolicyProfile::TieredEmi
    }

    fn assess(
        &self,
        request: &LoanRequest,
        signals: &ApplicantSignals,
    ) -> Result<RiskAssessment, EngineError> {
        predict(&PredictorInput::from_request(request, signals)).map(RiskAssessment::from)
    }
}

/// Stateless dispatcher that applies the configured default policy unless told otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn default_policy(&self) -> PolicyProfile {
        self.config.default_policy
    }

    pub fn assess(
        &self,
        profile: Option<PolicyProfile>,
        request: &LoanRequest,
        signals: &ApplicantSignals,
    ) -> Result<RiskAssessment, EngineError> {
        let profile = profile.unwrap_or(self.config.default_policy);
        profile.policy().assess(request, signals)
    }
}
