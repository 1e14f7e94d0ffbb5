use lithos_game::{
    CraftResult, ExploreOutcome, GameError, GameSession, ItemKind, ItemOutcome, has_event,
};
use serde::Serialize;

use crate::logic::policy::{GameplayStrategy, PlayerAction};
use crate::logic::seeds::SeedInfo;

/// Hard ceiling on actions in one day before the harness forces sleep.
const ACTIONS_PER_DAY_CAP: u32 = 200;

/// Counters collected over one playthrough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaythroughMetrics {
    pub explorations: u32,
    pub units_gathered: u32,
    pub empty_explorations: u32,
    pub hazards: u32,
    pub akio_thefts: u32,
    pub akio_wipes: u32,
    pub gacha_bonuses: u32,
    pub crafts_attempted: u32,
    pub crafts_succeeded: u32,
    pub potions_used: u32,
    pub meals_eaten: u32,
    pub rejected_actions: u32,
    pub forced_sleeps: u32,
}

/// Result of running one strategy against one seed.
#[derive(Debug, Clone, Serialize)]
pub struct PlaythroughRecord {
    pub strategy: String,
    pub seed: u64,
    pub share_code: String,
    pub won: bool,
    pub days: u32,
    pub metrics: PlaythroughMetrics,
    pub violations: Vec<String>,
}

impl PlaythroughRecord {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Per-strategy rollup of many playthroughs.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAggregate {
    pub strategy: String,
    pub runs: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub mean_days_to_win: Option<f64>,
    pub mean_units_gathered: f64,
    pub craft_success_rate: f64,
    pub violations: usize,
}

/// Play `strategy` on one seed until every companion is revived or
/// `max_days` have passed.
#[must_use]
pub fn run_playthrough(strategy: GameplayStrategy, seed: &SeedInfo, max_days: u32) -> PlaythroughRecord {
    let mut session = GameSession::new(seed.seed);
    let mut policy = strategy.create_policy(seed.seed);
    let mut metrics = PlaythroughMetrics::default();
    let mut violations = Vec::new();
    let mut actions_today = 0;

    log::debug!("{} starting on seed {}", policy.name(), seed.seed);

    while session.current_day() <= max_days && !session.has_won() {
        let action = if actions_today >= ACTIONS_PER_DAY_CAP {
            metrics.forced_sleeps += 1;
            PlayerAction::Sleep
        } else {
            policy.next_action(&session)
        };

        if action == PlayerAction::Sleep {
            session.sleep();
            actions_today = 0;
        } else {
            actions_today += 1;
            if let Err(err) = apply_action(&mut session, action, &mut metrics) {
                log::debug!("{} rejected {action:?}: {err}", policy.name());
                metrics.rejected_actions += 1;
            }
        }

        check_invariants(&session, &mut violations);
    }

    PlaythroughRecord {
        strategy: strategy.label().to_string(),
        seed: seed.seed,
        share_code: seed.share_code(),
        won: session.has_won(),
        days: session.current_day(),
        metrics,
        violations,
    }
}

fn apply_action(
    session: &mut GameSession,
    action: PlayerAction,
    metrics: &mut PlaythroughMetrics,
) -> Result<(), GameError> {
    match action {
        PlayerAction::Explore(place) => {
            let report = session.explore(place.name())?;
            metrics.explorations += 1;
            metrics.units_gathered += u32::try_from(report.found.len()).unwrap_or(u32::MAX);
            if has_event(&report.events, "log.deep-sea.bonus") {
                metrics.gacha_bonuses += 1;
            }
            match report.outcome {
                ExploreOutcome::Gathered => {}
                ExploreOutcome::NothingFound => metrics.empty_explorations += 1,
                ExploreOutcome::Hazard(_) => metrics.hazards += 1,
                ExploreOutcome::AkioTheft(_) => metrics.akio_thefts += 1,
                ExploreOutcome::AkioWipe => metrics.akio_wipes += 1,
            }
        }
        PlayerAction::Craft(recipe, options) => {
            metrics.crafts_attempted += 1;
            let report = session.craft(recipe, options)?;
            if matches!(report.result, CraftResult::Success(_)) {
                metrics.crafts_succeeded += 1;
            }
        }
        PlayerAction::UseItem { index, target } => {
            let report = session.use_item(index, target)?;
            if report.item == ItemKind::RevivalPotion
                && matches!(report.outcome, ItemOutcome::Revived(_))
            {
                metrics.potions_used += 1;
            }
        }
        PlayerAction::Cook => {
            session.cook()?;
        }
        PlayerAction::Eat => {
            session.eat()?;
            metrics.meals_eaten += 1;
        }
        PlayerAction::Sleep => {
            session.sleep();
        }
    }
    Ok(())
}

fn check_invariants(session: &GameSession, violations: &mut Vec<String>) {
    let cfg = session.config();
    let day = session.current_day();
    if session.explorations_left() > cfg.max_explorations {
        violations.push(format!(
            "day {day}: {} explorations left exceeds the daily maximum {}",
            session.explorations_left(),
            cfg.max_explorations
        ));
    }
    if session.fullness() > cfg.max_fullness {
        violations.push(format!(
            "day {day}: fullness {} exceeds {}",
            session.fullness(),
            cfg.max_fullness
        ));
    }
    if let Some((material, _)) = session.materials().iter().find(|(_, qty)| **qty == 0) {
        violations.push(format!("day {day}: zero-count entry kept for {material}"));
    }
}

/// Roll playthrough records up per strategy, in first-seen order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_playthroughs(records: &[PlaythroughRecord]) -> Vec<StrategyAggregate> {
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.strategy.as_str()) {
            order.push(&record.strategy);
        }
    }

    order
        .into_iter()
        .map(|strategy| {
            let runs: Vec<&PlaythroughRecord> =
                records.iter().filter(|r| r.strategy == strategy).collect();
            let wins: Vec<&&PlaythroughRecord> = runs.iter().filter(|r| r.won).collect();
            let attempted: u32 = runs.iter().map(|r| r.metrics.crafts_attempted).sum();
            let succeeded: u32 = runs.iter().map(|r| r.metrics.crafts_succeeded).sum();
            let gathered: u32 = runs.iter().map(|r| r.metrics.units_gathered).sum();
            let mean_days_to_win = (!wins.is_empty()).then(|| {
                wins.iter().map(|r| f64::from(r.days)).sum::<f64>() / wins.len() as f64
            });
            StrategyAggregate {
                strategy: strategy.to_string(),
                runs: runs.len(),
                wins: wins.len(),
                win_rate: ratio(wins.len() as f64, runs.len() as f64),
                mean_days_to_win,
                mean_units_gathered: ratio(f64::from(gathered), runs.len() as f64),
                craft_success_rate: ratio(f64::from(succeeded), f64::from(attempted)),
                violations: runs.iter().map(|r| r.violations.len()).sum(),
            }
        })
        .collect()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
