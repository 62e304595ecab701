use crate::analysis::recommender::{Recommendation, RecommendationKind};
use crate::analysis::scoring::DraftAnalysis;
use crate::analysis::stats::{PatchStats, Tier};
use crate::api::client::AnalysisSource;
use crate::api::models::AnalysisResponse;
use crate::draft::{DraftSlot, DraftState, SlotKind, Team};
use crate::session::{GameRecord, ProbabilityPoint, SeriesScore};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct SlotRow {
    #[tabled(rename = "#")]
    index: String,
    phase: String,
    team: String,
    action: String,
    champion: String,
}

#[derive(Tabled)]
struct RecommendationRow {
    rank: String,
    champion: String,
    score: String,
    kind: String,
    reasoning: String,
}

#[derive(Tabled)]
struct HistoryRow {
    step: String,
    blue: String,
    trend: String,
}

#[derive(Tabled)]
struct PatchRow {
    rank: String,
    champion: String,
    role: String,
    tier: String,
    win_rate: String,
    pick_rate: String,
    ban_rate: String,
}

#[derive(Tabled)]
struct GameRow {
    game: String,
    winner: String,
    final_blue: String,
    finished: String,
}

fn team_label(team: Team) -> ColoredString {
    match team {
        Team::Blue => "BLUE".blue().bold(),
        Team::Red => "RED".red().bold(),
    }
}

pub fn display_draft_board(draft: &DraftState) {
    println!("\n{}", "🗺️  DRAFT BOARD".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<SlotRow> = draft
        .slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let champion = match (&slot.champion, slot.is_active) {
                (Some(c), true) => format!("{} ◀ editing", c.name).yellow().to_string(),
                (None, true) => "SELECT ◀ editing".yellow().to_string(),
                (Some(c), false) => c.name.clone(),
                (None, false) => "-".dimmed().to_string(),
            };
            let action = match slot.kind {
                SlotKind::Pick => "pick".to_string(),
                SlotKind::Ban => "ban".dimmed().to_string(),
            };
            SlotRow {
                index: idx.to_string(),
                phase: format!("{:?}", slot.phase),
                team: team_label(slot.team).to_string(),
                action,
                champion,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_probability_history(history: &[ProbabilityPoint]) {
    println!("{}", "📈 WIN PROBABILITY (Blue)".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|point| {
            let filled = (point.probability.clamp(0, 100) / 5) as usize;
            let bar = format!(
                "{}{}",
                "█".repeat(filled).blue(),
                "█".repeat(20 - filled).red()
            );
            HistoryRow {
                step: point.step.to_string(),
                blue: format!("{}%", point.probability),
                trend: bar,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_analysis(
    analysis: &DraftAnalysis,
    response: &AnalysisResponse,
    source: AnalysisSource,
) {
    println!("{}", "🧠 DRAFT ANALYSIS".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let source_label = match source {
        AnalysisSource::Backend => "backend".green(),
        AnalysisSource::Offline => "offline heuristic".yellow(),
    };
    println!("{} {}", "Source:".bold(), source_label);

    let blue = response.blue_win_probability;
    let prob = format!("{:.0}% blue / {:.0}% red", blue, 100.0 - blue);
    let prob = if blue > 50.0 {
        prob.blue().bold()
    } else if blue < 50.0 {
        prob.red().bold()
    } else {
        prob.bold()
    };
    println!("{} {}", "Win probability:".bold(), prob);
    println!(
        "{} blue {} / red {}",
        "Synergy:".bold(),
        format!("{:.0}", response.blue_synergy_score).blue(),
        format!("{:.0}", response.red_synergy_score).red()
    );
    println!("{} {}\n", "Insight:".bold(), analysis.strategic_insight);

    if analysis.opponent_threats.is_empty() {
        println!("{}", "No red-side threats flagged".green());
    } else {
        println!("{}", "Opponent Threats".bold().red());
        for threat in &analysis.opponent_threats {
            println!("  {} {}", "⚠️".red(), threat);
        }
    }

    for alert in response
        .alerts
        .iter()
        .filter(|a| !analysis.opponent_threats.contains(&a.message))
    {
        println!("  {} {}: {}", "⚠️".red(), alert.alert_type.bold(), alert.message);
    }

    if !response.predictions.is_empty() {
        println!("\n{}", "🔮 Predicted Next Picks".bold().purple());
        for prediction in &response.predictions {
            println!(
                "  {} {:.0}% conf. {}",
                prediction.champion.bold(),
                prediction.confidence,
                prediction.reason.dimmed()
            );
        }
    }

    println!();
}

pub fn display_recommendations(recommendations: &[Recommendation], active: Option<&DraftSlot>) {
    let context = match active {
        None => "global meta".to_string(),
        Some(slot) => match &slot.champion {
            Some(c) => format!("answers to {}", c.name),
            None => format!("{} {} ({:?})", slot.team, slot.kind, slot.phase),
        },
    };
    println!(
        "{}",
        format!("🎯 RECOMMENDATIONS: {}", context).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if recommendations.is_empty() {
        println!("{}\n", "Every champion is already picked or banned".yellow());
        return;
    }

    let rows: Vec<RecommendationRow> = recommendations
        .iter()
        .enumerate()
        .map(|(idx, rec)| {
            let kind = match rec.kind {
                RecommendationKind::Counter => rec.kind.to_string().red().to_string(),
                RecommendationKind::Synergy => rec.kind.to_string().green().to_string(),
                RecommendationKind::Comfort => rec.kind.to_string().yellow().to_string(),
            };
            RecommendationRow {
                rank: format!("#{}", idx + 1),
                champion: rec.champion_name.clone(),
                score: format!("{} pts", rec.score),
                kind,
                reasoning: rec.reasoning.clone(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_patch_data(rows: &[PatchStats], patch_version: &str) {
    println!(
        "\n{}",
        format!("📋 Patch {} Metadata", patch_version).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<PatchRow> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let tier = match row.tier {
                Tier::S => row.tier.to_string().yellow().bold().to_string(),
                Tier::A => row.tier.to_string().cyan().to_string(),
                Tier::D => row.tier.to_string().red().to_string(),
                Tier::B => row.tier.to_string(),
            };
            PatchRow {
                rank: format!("#{}", idx + 1),
                champion: row.champion_name.clone(),
                role: row.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
                tier,
                win_rate: format!("{:.1}%", row.win_rate),
                pick_rate: format!("{:.1}%", row.pick_rate),
                ban_rate: format!("{:.1}%", row.ban_rate),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_series(score: SeriesScore, games: &[GameRecord]) {
    println!(
        "{} {} {} {}",
        "🏆 Series:".bold(),
        score.blue.to_string().blue().bold(),
        "VS".dimmed(),
        score.red.to_string().red().bold()
    );

    if games.is_empty() {
        return;
    }

    let rows: Vec<GameRow> = games
        .iter()
        .enumerate()
        .map(|(idx, game)| GameRow {
            game: game
                .game_id
                .clone()
                .unwrap_or_else(|| format!("#{}", idx + 1)),
            winner: team_label(game.winner).to_string(),
            final_blue: format!("{}%", game.final_probability),
            finished: game.finished_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
