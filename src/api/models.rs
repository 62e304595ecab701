use crate::catalog::Champion;
use crate::draft::{DraftState, Team};
use serde::{Deserialize, Serialize};

// POST /analyze request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub blue_picks: Vec<String>,
    pub red_picks: Vec<String>,
    pub blue_bans: Vec<String>,
    pub red_bans: Vec<String>,
}

impl AnalysisRequest {
    pub fn from_draft(draft: &DraftState) -> Self {
        AnalysisRequest {
            blue_picks: ids(draft.picks(Team::Blue)),
            red_picks: ids(draft.picks(Team::Red)),
            blue_bans: ids(draft.bans(Team::Blue)),
            red_bans: ids(draft.bans(Team::Red)),
        }
    }
}

fn ids(champs: Vec<&Champion>) -> Vec<String> {
    champs.into_iter().map(|c| c.id.clone()).collect()
}

// POST /analyze response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub blue_win_probability: f64,
    pub blue_synergy_score: f64,
    pub red_synergy_score: f64,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub champion: String,
    pub confidence: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub champion: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn request_splits_picks_and_bans_per_team() {
        let catalog = Catalog::builtin();
        let mut draft = DraftState::standard();
        draft.slots[0].champion = catalog.get("Draven").cloned(); // BlueBan1
        draft.slots[1].champion = catalog.get("Bard").cloned(); // RedBan1
        draft.slots[6].champion = catalog.get("Jinx").cloned(); // BluePick1
        draft.slots[7].champion = catalog.get("LeeSin").cloned(); // RedPick1

        let request = AnalysisRequest::from_draft(&draft);
        assert_eq!(request.blue_picks, vec!["Jinx"]);
        assert_eq!(request.red_picks, vec!["LeeSin"]);
        assert_eq!(request.blue_bans, vec!["Draven"]);
        assert_eq!(request.red_bans, vec!["Bard"]);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["red_picks"][0], "LeeSin");
    }

    #[test]
    fn response_parses_backend_payload() {
        let body = r#"{
            "blue_win_probability": 57.3,
            "blue_synergy_score": 61.0,
            "red_synergy_score": 48.5,
            "predictions": [{"champion": "Azir", "confidence": 82, "reason": "Fills missing role"}],
            "alerts": [{"champion": "Draven", "type": "ONE-TRICK ALERT", "message": "Respect ban"}]
        }"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.blue_win_probability, 57.3);
        assert_eq!(response.predictions[0].confidence, 82.0);
        assert_eq!(response.alerts[0].alert_type, "ONE-TRICK ALERT");
    }

    #[test]
    fn response_tolerates_missing_lists() {
        let body = r#"{"blue_win_probability": 50, "blue_synergy_score": 0, "red_synergy_score": 0}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(response.predictions.is_empty());
        assert!(response.alerts.is_empty());
    }
}
