use crate::analysis::recommender::Recommender;
use crate::analysis::scoring::{ScoringEngine, COUNTER_PICK_NOTE};
use crate::analysis::stats::StatsProvider;
use crate::catalog::Catalog;
use crate::config::SimulationConfig;
use crate::draft::DraftState;
use crate::error::AppError;
use governor::{clock::DefaultClock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::models::*;

const USER_AGENT: &str = "rift_mind/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_RETRIES: u32 = 3;
const OFFLINE_PREDICTIONS: usize = 2;
const SYNERGY_FACTOR: f64 = 0.8;

/// Blocking client for the remote draft analysis service.
pub struct AnalysisClient {
    base_url: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        // the backend re-runs a full analysis per call, keep it to a handful per second
        let per_second = NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN);
        AnalysisClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        }
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AppError> {
        let url = format!("{}/analyze", self.base_url);
        let mut retry_count = 0;

        loop {
            while self.rate_limiter.check().is_err() {
                thread::sleep(Duration::from_millis(50));
            }

            let response = ureq::post(&url)
                .set("User-Agent", USER_AGENT)
                .timeout(REQUEST_TIMEOUT)
                .send_json(request);

            match response {
                Ok(resp) => {
                    return resp
                        .into_json::<AnalysisResponse>()
                        .map_err(|e| AppError::JsonError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::ApiError("analysis backend kept rate limiting".to_string()));
                    }
                    let wait_ms = 500 * (retry_count + 1) as u64;
                    debug!(wait_ms, "rate limited by analysis backend, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!("analysis backend returned {}", code)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Backend,
    Offline,
}

/// Front door for a full analysis: asks the backend when one is configured and
/// rebuilds an equivalent response from the local engines when it is not reachable.
pub struct DraftAdvisor<'a> {
    catalog: &'a Catalog,
    stats: &'a dyn StatsProvider,
    client: Option<AnalysisClient>,
    config: SimulationConfig,
}

impl<'a> DraftAdvisor<'a> {
    pub fn new(
        catalog: &'a Catalog,
        stats: &'a dyn StatsProvider,
        client: Option<AnalysisClient>,
        config: SimulationConfig,
    ) -> Self {
        DraftAdvisor {
            catalog,
            stats,
            client,
            config,
        }
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    pub fn analyze(&self, draft: &DraftState) -> (AnalysisResponse, AnalysisSource) {
        if let Some(client) = &self.client {
            match client.analyze(&AnalysisRequest::from_draft(draft)) {
                Ok(response) => {
                    info!(
                        probability = response.blue_win_probability,
                        "analysis served by backend"
                    );
                    return (response, AnalysisSource::Backend);
                }
                Err(e) => {
                    warn!(error = %e, "analysis backend unavailable, switching to offline heuristic mode");
                }
            }
        }

        (self.offline_response(draft), AnalysisSource::Offline)
    }

    pub fn offline_response(&self, draft: &DraftState) -> AnalysisResponse {
        let local = ScoringEngine::new(self.stats).analyze(draft, &self.config);
        let probability = f64::from(local.blue_win_probability);

        let predictions = if draft.filled_count() > 0 {
            Recommender::new(self.catalog, self.stats)
                .meta_picks(draft, &self.config)
                .into_iter()
                .take(OFFLINE_PREDICTIONS)
                .map(|rec| Prediction {
                    champion: rec.champion_name,
                    confidence: f64::from(rec.score),
                    reason: format!("Offline mode: {}", rec.reasoning),
                })
                .collect()
        } else {
            Vec::new()
        };

        let alerts = local
            .opponent_threats
            .iter()
            .map(|threat| Alert {
                champion: threat.trim_end_matches(COUNTER_PICK_NOTE).trim().to_string(),
                alert_type: "THREAT".to_string(),
                message: threat.clone(),
            })
            .collect();

        AnalysisResponse {
            blue_win_probability: probability,
            blue_synergy_score: (probability * SYNERGY_FACTOR).round(),
            red_synergy_score: ((100.0 - probability) * SYNERGY_FACTOR).round(),
            predictions,
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::{MockStatsProvider, StatsSnapshot};

    fn place(draft: &mut DraftState, catalog: &Catalog, index: usize, id: &str) {
        draft.slots[index].champion = catalog.get(id).cloned();
    }

    #[test]
    fn empty_draft_offline_response_is_neutral() {
        let catalog = Catalog::builtin();
        let stats = MockStatsProvider;
        let advisor = DraftAdvisor::new(&catalog, &stats, None, SimulationConfig::default());

        let (response, source) = advisor.analyze(&DraftState::standard());
        assert_eq!(source, AnalysisSource::Offline);
        assert!(!advisor.is_online());
        assert_eq!(response.blue_win_probability, 50.0);
        assert_eq!(response.blue_synergy_score, 40.0);
        assert_eq!(response.red_synergy_score, 40.0);
        assert!(response.predictions.is_empty());
        assert!(response.alerts.is_empty());
    }

    #[test]
    fn synergy_scores_follow_win_probability() {
        let catalog = Catalog::builtin();
        let stats = StatsSnapshot::new()
            .with_win_rate("Malphite", 50.0)
            .with_win_rate("Yasuo", 50.0);
        let advisor = DraftAdvisor::new(&catalog, &stats, None, SimulationConfig::default());

        let mut draft = DraftState::standard();
        place(&mut draft, &catalog, 6, "Malphite"); // BluePick1
        place(&mut draft, &catalog, 7, "Yasuo"); // RedPick1

        let response = advisor.offline_response(&draft);
        assert_eq!(response.blue_win_probability, 54.0);
        assert_eq!(response.blue_synergy_score, 43.0); // 43.2
        assert_eq!(response.red_synergy_score, 37.0); // 36.8
    }

    #[test]
    fn threats_become_alerts_and_meta_picks_become_predictions() {
        let catalog = Catalog::builtin();
        let stats = MockStatsProvider;
        let advisor = DraftAdvisor::new(&catalog, &stats, None, SimulationConfig::default());

        let mut draft = DraftState::standard();
        place(&mut draft, &catalog, 6, "LeeSin"); // BluePick1
        place(&mut draft, &catalog, 7, "Sejuani"); // RedPick1, counters Lee Sin

        let response = advisor.offline_response(&draft);
        assert_eq!(response.alerts.len(), 1);
        assert_eq!(response.alerts[0].champion, "Sejuani");
        assert_eq!(response.alerts[0].alert_type, "THREAT");
        assert_eq!(response.alerts[0].message, "Sejuani (Counter Pick!)");

        assert_eq!(response.predictions.len(), 2);
        assert!(response.predictions.iter().all(|p| p.reason.starts_with("Offline mode")));
        assert!(response
            .predictions
            .iter()
            .all(|p| p.champion != "Lee Sin" && p.champion != "Sejuani"));
    }

    #[test]
    fn unreachable_backend_falls_back_to_local_engines() {
        let catalog = Catalog::builtin();
        let stats = MockStatsProvider;
        let client = AnalysisClient::new("http://127.0.0.1:1/");
        let advisor = DraftAdvisor::new(&catalog, &stats, Some(client), SimulationConfig::default());

        let draft = DraftState::standard();
        let (response, source) = advisor.analyze(&draft);
        assert_eq!(source, AnalysisSource::Offline);
        assert_eq!(response, advisor.offline_response(&draft));
    }
}
