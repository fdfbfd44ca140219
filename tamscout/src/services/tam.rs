use serde::Serialize;

use crate::config::TamConfig;
use crate::error::{Result, ScoutError};
use crate::models::{is_hvac_name, KeywordResult, Opportunity, ResearchRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTotals {
    pub phrases: u32,
    pub search_volume: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TierBreakdown {
    pub high: TierTotals,
    pub medium: TierTotals,
    pub low: TierTotals,
}

impl TierBreakdown {
    fn add(&mut self, result: &KeywordResult) {
        let tier = match result.opportunity {
            Opportunity::High => &mut self.high,
            Opportunity::Medium => &mut self.medium,
            Opportunity::Low => &mut self.low,
        };
        tier.phrases = tier.phrases.saturating_add(1);
        tier.search_volume = tier.search_volume.saturating_add(result.search_volume);
    }
}

/// Total addressable market for one HVAC research run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TamEstimate {
    pub research_id: String,
    pub industry: String,
    pub keyword_count: u32,
    pub monthly_search_volume: u64,
    pub tiers: TierBreakdown,
    pub monthly_clicks: f64,
    pub monthly_leads: f64,
    pub monthly_jobs: f64,
    pub annual_revenue: f64,
    pub monthly_ppc_budget: u64,
    pub assumptions: TamConfig,
}

/// Funnel: searches -> clicks -> leads -> jobs -> revenue.
pub struct TamCalculator {
    assumptions: TamConfig,
}

impl TamCalculator {
    pub fn new(assumptions: TamConfig) -> Self {
        Self { assumptions }
    }

    pub fn estimate(&self, record: &ResearchRecord) -> Result<TamEstimate> {
        if !is_hvac_name(&record.industry) {
            return Err(ScoutError::Validation(format!(
                "market sizing is only available for HVAC research, not '{}'",
                record.industry
            )));
        }

        let mut tiers = TierBreakdown::default();
        let mut monthly_search_volume = 0_u64;
        let mut monthly_ppc_budget = 0_u64;
        for result in &record.results {
            tiers.add(result);
            monthly_search_volume = monthly_search_volume.saturating_add(result.search_volume);
            monthly_ppc_budget = monthly_ppc_budget.saturating_add(result.ppc_budget());
        }

        let a = &self.assumptions;
        let clicks = monthly_search_volume as f64 * a.click_through_rate;
        let leads = clicks * a.lead_conversion_rate;
        let jobs = leads * a.close_rate;
        let annual_revenue = jobs * a.average_ticket * 12.0;

        Ok(TamEstimate {
            research_id: record.id.clone(),
            industry: record.industry.clone(),
            keyword_count: record.results.len() as u32,
            monthly_search_volume,
            tiers,
            monthly_clicks: round2(clicks),
            monthly_leads: round2(leads),
            monthly_jobs: round2(jobs),
            annual_revenue: round2(annual_revenue),
            monthly_ppc_budget,
            assumptions: self.assumptions,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(volume: u64, cpc: f64, opportunity: Opportunity) -> KeywordResult {
        KeywordResult {
            keyword: format!("kw {volume}"),
            search_volume: volume,
            cpc,
            competition: 10,
            opportunity,
        }
    }

    fn record(industry: &str, results: Vec<KeywordResult>) -> ResearchRecord {
        ResearchRecord {
            id: "r1".into(),
            title: None,
            industry: industry.into(),
            cities: vec!["Boise".into()],
            results,
            source: "test".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hvac_funnel() {
        let calc = TamCalculator::new(TamConfig::default());
        let estimate = calc
            .estimate(&record(
                "HVAC",
                vec![
                    result(1000, 10.0, Opportunity::High),
                    result(120, 4.5, Opportunity::Medium),
                    result(0, 0.0, Opportunity::Low),
                ],
            ))
            .unwrap();

        assert_eq!(estimate.monthly_search_volume, 1120);
        assert_eq!(estimate.keyword_count, 3);
        // 1120 * 0.30 = 336 clicks, 33.6 leads, 13.44 jobs
        assert_eq!(estimate.monthly_clicks, 336.0);
        assert_eq!(estimate.monthly_leads, 33.6);
        assert_eq!(estimate.monthly_jobs, 13.44);
        assert_eq!(estimate.annual_revenue, 72576.0);
        // round(1000*10*0.3) + round(120*4.5*0.3) = 3000 + 162
        assert_eq!(estimate.monthly_ppc_budget, 3162);
        assert_eq!(estimate.tiers.high.phrases, 1);
        assert_eq!(estimate.tiers.medium.search_volume, 120);
        assert_eq!(estimate.tiers.low.phrases, 1);
    }

    #[test]
    fn empty_results_are_all_zero() {
        let estimate = TamCalculator::new(TamConfig::default())
            .estimate(&record("hvac", vec![]))
            .unwrap();
        assert_eq!(estimate.monthly_search_volume, 0);
        assert_eq!(estimate.annual_revenue, 0.0);
    }

    #[test]
    fn other_industries_are_rejected() {
        let err = TamCalculator::new(TamConfig::default())
            .estimate(&record("plumbing", vec![]))
            .unwrap_err();
        assert!(matches!(err, ScoutError::Validation(_)));
    }

    #[test]
    fn huge_volumes_saturate_instead_of_overflowing() {
        let calc = TamCalculator::new(TamConfig::default());
        let estimate = calc
            .estimate(&record(
                "hvac",
                vec![
                    result(u64::MAX, 5.0, Opportunity::Low),
                    result(u64::MAX, 5.0, Opportunity::Low),
                ],
            ))
            .unwrap();

        assert_eq!(estimate.monthly_search_volume, u64::MAX);
        assert_eq!(estimate.monthly_ppc_budget, u64::MAX);
        assert_eq!(estimate.tiers.low.search_volume, u64::MAX);
        assert_eq!(estimate.tiers.low.phrases, 2);
        assert!(estimate.annual_revenue.is_finite());
    }
}
