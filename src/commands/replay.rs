use clap::Args;
use fitledger_core::{
    DailyStats, Ledger, MacroRatio, MealGroup, MealKey, MealType, TimelineItem, WorkoutGroup,
};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use super::OutputFormat;
use crate::config::Config;
use crate::session::{SessionScript, Step};

#[derive(Args)]
pub struct ReplayCommand {
    /// Session script (YAML) to replay
    pub script: PathBuf,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print every published stats snapshot to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

/// Result of applying one script step.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    pub applied: bool,
    pub detail: String,
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    steps: &'a [StepReport],
    timeline: &'a [TimelineItem],
    stats: &'a DailyStats,
    macro_ratio: MacroRatio,
}

impl ReplayCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let script = SessionScript::load(&self.script)?;
        let targets = script.targets.unwrap_or(config.targets.value);
        tracing::info!(
            "Replaying {} step(s) from {}",
            script.steps.len(),
            self.script.display()
        );

        let mut ledger = Ledger::new(targets);
        if self.verbose {
            ledger.observers().daily_stats().subscribe(|stats: &DailyStats| {
                eprintln!(
                    "stats: {:.1} kcal in, {:.1} kcal burned, net {:.1}",
                    stats.calories.current,
                    stats.calories_burned,
                    stats.net_calories()
                );
            });
        }

        let reports = replay(&mut ledger, &script.steps);
        let timeline = ledger.timeline();
        let stats = ledger.daily_stats();

        match self.format {
            OutputFormat::Json => {
                let output = ReplayOutput {
                    steps: &reports,
                    timeline: &timeline,
                    stats: &stats,
                    macro_ratio: stats.macro_ratio(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("Steps");
                println!("=====");
                for report in &reports {
                    let marker = if report.applied { " " } else { "!" };
                    println!(
                        "{} {:>3}. {:<18} {}",
                        marker, report.step, report.op, report.detail
                    );
                }

                println!("\nTimeline");
                println!("========");
                if timeline.is_empty() {
                    println!("(empty)");
                }
                for item in timeline.iter() {
                    print!("{}", item);
                }

                println!("\nDaily Stats");
                println!("===========");
                println!("{}", stats);
                let ratio = stats.macro_ratio();
                println!(
                    "Macros:   P {:.0}% / C {:.0}% / F {:.0}%",
                    ratio.protein_percent, ratio.carbs_percent, ratio.fat_percent
                );
            }
        }

        Ok(())
    }
}

/// Applies every step in order and reports what each one did.
pub fn replay(ledger: &mut Ledger, steps: &[Step]) -> Vec<StepReport> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let (applied, detail) = apply_step(ledger, step);
            if !applied {
                tracing::warn!("Step {} ({}) skipped: {}", i + 1, step.name(), detail);
            }
            StepReport {
                step: i + 1,
                op: step.name(),
                applied,
                detail,
            }
        })
        .collect()
}

fn apply_step(ledger: &mut Ledger, step: &Step) -> (bool, String) {
    match step {
        Step::SubmitFood { entries } => {
            let outcome =
                ledger.submit_food_entries(entries.iter().map(|e| e.to_entry()).collect());
            (
                true,
                format!(
                    "{} merged, {} re-timed, {} added",
                    outcome.exact, outcome.relaxed, outcome.appended
                ),
            )
        }
        Step::SubmitExercise { entries } => {
            let added =
                ledger.submit_exercise_entries(entries.iter().map(|e| e.to_entry()).collect());
            (true, format!("{} added", added))
        }
        Step::UpdateMealGroup {
            time,
            meal_type,
            entries,
        } => {
            let key = MealKey::new(time.clone(), *meal_type);
            let existing = find_meal_group(ledger, time, *meal_type);
            let found = existing.is_some();
            // An unknown group becomes a new one: nothing to remove, entries are inserted
            let group = MealGroup {
                id: existing.map(|g| g.id).unwrap_or_else(Uuid::new_v4),
                entries: entries.iter().map(|e| e.to_entry()).collect(),
                time_label: time.clone(),
                meal_type: *meal_type,
            };
            ledger.update_meal_group(group);
            if found {
                (true, format!("{} replaced", key))
            } else {
                (true, format!("{} created", key))
            }
        }
        Step::UpdateWorkout { name, time, entry } => match find_workout(ledger, name, time) {
            Some(mut group) => {
                let mut replacement = entry.to_entry();
                replacement.id = group.id;
                group.entries = vec![replacement];
                ledger.update_workout_group(group);
                (true, format!("{} at {} replaced", name, time))
            }
            None => (false, format!("no workout '{}' at {}", name, time)),
        },
        Step::DeleteMealGroup { time, meal_type } => {
            let key = MealKey::new(time.clone(), *meal_type);
            let id = find_meal_group(ledger, time, *meal_type)
                .map(|g| g.id)
                .unwrap_or_else(Uuid::new_v4);
            if ledger.delete_meal_group(id) {
                (true, format!("{} deleted", key))
            } else {
                (false, format!("no meal group {}", key))
            }
        }
        Step::DeleteWorkout { name, time } => {
            let id = find_workout(ledger, name, time)
                .map(|g| g.id)
                .unwrap_or_else(Uuid::new_v4);
            if ledger.delete_workout_group(id) {
                (true, format!("{} at {} deleted", name, time))
            } else {
                (false, format!("no workout '{}' at {}", name, time))
            }
        }
        Step::SetTargets { targets } => {
            ledger.set_targets(*targets);
            (true, format!("calorie target {}", targets.calories))
        }
    }
}

fn find_meal_group(ledger: &Ledger, time: &str, meal_type: MealType) -> Option<MealGroup> {
    ledger
        .timeline()
        .iter()
        .filter_map(TimelineItem::as_meal)
        .find(|g| g.time_label == time && g.meal_type == meal_type)
        .cloned()
}

fn find_workout(ledger: &Ledger, name: &str, time: &str) -> Option<WorkoutGroup> {
    ledger
        .timeline()
        .iter()
        .filter_map(TimelineItem::as_workout)
        .find(|g| g.time_label == time && g.entries.iter().any(|e| e.name == name))
        .cloned()
}
