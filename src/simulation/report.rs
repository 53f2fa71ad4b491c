//! Run summaries and the aggregated simulation report.

use super::world::{RunCounters, World};
use crate::enemy::EnemyVariant;
use serde::{Deserialize, Serialize};

/// Final state of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u64,
    pub elapsed_seconds: f64,
    pub survived: bool,
    pub final_level: u32,
    pub final_health: u32,
    pub max_health: u32,
    pub gold: u32,
    /// Names of the selected talents in tree order.
    pub talents: Vec<String>,
    pub weapons: Vec<String>,
    pub counters: RunCounters,
}

impl RunSummary {
    pub fn from_world(world: &World, seed: u64) -> Self {
        let player = &world.player;
        Self {
            seed,
            frames: world.frame(),
            elapsed_seconds: world.elapsed(),
            survived: player.is_alive(),
            final_level: player.level(),
            final_health: player.health(),
            max_health: player.max_health(),
            gold: player.gold(),
            talents: player
                .talent_tree()
                .nodes()
                .iter()
                .filter(|n| n.is_selected)
                .map(|n| n.talent.name().to_string())
                .collect(),
            weapons: player.weapons().iter().map(|w| w.name.clone()).collect(),
            counters: world.counters.clone(),
        }
    }

    /// Kills for one variant.
    pub fn kills_of(&self, variant: EnemyVariant) -> u32 {
        self.counters.kills.get(&variant).copied().unwrap_or(0)
    }

    /// One-line summary for `--quiet` output.
    pub fn to_line(&self) -> String {
        format!(
            "seed={} frames={} time={} level={} kills={} gold={} {}",
            self.seed,
            self.frames,
            format_time(self.elapsed_seconds),
            self.final_level,
            self.counters.total_kills(),
            self.gold,
            if self.survived { "SURVIVED" } else { "DIED" }
        )
    }

    pub fn to_text(&self) -> String {
        let c = &self.counters;
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!("  Survivor Simulation Report  (seed={})\n", self.seed));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Duration: {} frames ({})\n",
            self.frames,
            format_time(self.elapsed_seconds)
        ));
        report.push_str(&format!(
            "Outcome:  {}\n\n",
            if self.survived { "survived" } else { "died" }
        ));

        report.push_str("── FINAL STATE ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Level:   {}\n", self.final_level));
        report.push_str(&format!(
            "  Health:  {}/{}\n",
            self.final_health, self.max_health
        ));
        report.push_str(&format!("  Gold:    {}\n", self.gold));
        report.push_str(&format!("  Weapons: {}\n\n", self.weapons.join(", ")));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Damage Dealt:   {}\n", c.damage_dealt));
        report.push_str(&format!("  Damage Taken:   {}\n", c.damage_taken));
        report.push_str(&format!(
            "  Swings: {}  |  Projectiles: {}  |  Crits: {}\n",
            c.swings, c.projectiles_fired, c.crits
        ));
        report.push_str(&format!(
            "  Dodged: {}  |  Absorbed: {}\n",
            c.hits_dodged, c.hits_absorbed
        ));
        report.push_str(&format!(
            "  Life Stolen: {}  |  Regenerated: {}\n\n",
            c.life_stolen, c.health_regenerated
        ));

        report.push_str("── KILLS ────────────────────────────────────────────────────────\n");
        for variant in EnemyVariant::ALL {
            report.push_str(&format!(
                "  {:<10} {:>5}\n",
                variant.name(),
                self.kills_of(variant)
            ));
        }
        report.push_str(&format!(
            "  {:<10} {:>5}  (of {} spawned)\n\n",
            "Total",
            c.total_kills(),
            c.enemies_spawned
        ));

        report.push_str("── PICKUPS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Gold Collected: {}\n", c.gold_collected));
        report.push_str(&format!(
            "  Health Packs:   {}\n\n",
            c.health_packs_collected
        ));

        if !self.talents.is_empty() {
            report.push_str("── TALENTS ──────────────────────────────────────────────────────\n");
            for talent in &self.talents {
                report.push_str(&format!("  {}\n", talent));
            }
            report.push('\n');
        }

        report
    }
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_survived: u32,
    pub avg_final_level: f64,
    pub avg_total_kills: f64,
    pub avg_damage_dealt: f64,
    pub avg_damage_taken: f64,
    pub avg_gold_collected: f64,
    pub avg_survival_seconds: f64,
    pub runs: Vec<RunSummary>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunSummary>) -> Self {
        let num_runs = runs.len() as u32;
        let n = num_runs.max(1) as f64;
        let avg = |f: &dyn Fn(&RunSummary) -> f64| runs.iter().map(f).sum::<f64>() / n;

        let runs_survived = runs.iter().filter(|r| r.survived).count() as u32;
        let avg_final_level = avg(&|r| r.final_level as f64);
        let avg_total_kills = avg(&|r| r.counters.total_kills() as f64);
        let avg_damage_dealt = avg(&|r| r.counters.damage_dealt as f64);
        let avg_damage_taken = avg(&|r| r.counters.damage_taken as f64);
        let avg_gold_collected = avg(&|r| r.counters.gold_collected as f64);
        let avg_survival_seconds = avg(&|r| r.elapsed_seconds);

        Self {
            num_runs,
            runs_survived,
            avg_final_level,
            avg_total_kills,
            avg_damage_dealt,
            avg_damage_taken,
            avg_gold_collected,
            avg_survival_seconds,
            runs,
        }
    }

    pub fn survival_rate(&self) -> f64 {
        if self.num_runs == 0 {
            0.0
        } else {
            self.runs_survived as f64 / self.num_runs as f64
        }
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!("  Aggregate Results ({} runs)\n", self.num_runs));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        let metric = |name: &str, f: &dyn Fn(&RunSummary) -> u64| -> String {
            let values: Vec<u64> = self.runs.iter().map(f).collect();
            let min = values.iter().min().copied().unwrap_or(0);
            let max = values.iter().max().copied().unwrap_or(0);
            let avg = values.iter().sum::<u64>() as f64 / values.len().max(1) as f64;
            format!("  {:<18} {:>10} {:>10.1} {:>10}\n", name, min, avg, max)
        };

        report.push_str(&format!(
            "  {:<18} {:>10} {:>10} {:>10}\n",
            "Metric", "Min", "Avg", "Max"
        ));
        report.push_str(&format!("  {}\n", "─".repeat(50)));
        report.push_str(&metric("Final Level", &|r| r.final_level as u64));
        report.push_str(&metric("Kills", &|r| r.counters.total_kills() as u64));
        report.push_str(&metric("Damage Dealt", &|r| r.counters.damage_dealt));
        report.push_str(&metric("Damage Taken", &|r| r.counters.damage_taken));
        report.push_str(&metric("Gold Collected", &|r| r.counters.gold_collected));
        report.push_str(&metric("Frames Survived", &|r| r.frames));
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rate = self.survival_rate() * 100.0;
        let rating = if rate > 90.0 {
            "TOO EASY - Nearly every run survives"
        } else if rate > 50.0 {
            "GOOD - Challenging but fair"
        } else if rate > 10.0 {
            "HARD - Most runs die"
        } else {
            "TOO HARD - Runs rarely survive"
        };
        report.push_str(&format!("  Survival Rate: {:.1}%\n", rate));
        report.push_str(&format!("  Rating:        {}\n", rating));
        report.push_str(&format!(
            "  Avg Survival:  {}\n",
            format_time(self.avg_survival_seconds)
        ));

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Seconds as `Xm YYs`.
pub fn format_time(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}m {:02}s", whole / 60, whole % 60)
}
