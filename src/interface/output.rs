use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::MealRecord;
use crate::error::Result;
use crate::interface::changes::total_changed;
use crate::models::Diet;
use crate::optimizer::OptimizationResult;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write one CSV row per front member.
pub fn write_front_csv(result: &OptimizationResult, seed: &Diet, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "nutrition",
        "cost",
        "harmony",
        "diversity",
        "improved_objectives",
        "changed_slots",
    ])?;

    for (i, member) in result.front.iter().enumerate() {
        let f = &member.fitness;
        wtr.write_record([
            (i + 1).to_string(),
            format!("{:.0}", f.nutrition()),
            format!("{:.3}", f.cost()),
            format!("{:.3}", f.harmony()),
            format!("{:.3}", f.diversity()),
            f.improvements_over(&result.seed_fitness).to_string(),
            total_changed(seed, &member.diet).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the run summary and every front plan to a JSON file.
pub fn write_front_json(result: &OptimizationResult, path: &Path) -> Result<()> {
    let scores = |f: &crate::optimizer::Fitness| {
        serde_json::json!({
            "nutrition": f.nutrition(),
            "cost": truncate(f.cost(), 3),
            "harmony": truncate(f.harmony(), 3),
            "diversity": truncate(f.diversity(), 3),
        })
    };

    let json = serde_json::json!({
        "termination": result.termination.to_string(),
        "generations": result.generations,
        "seed_scores": scores(&result.seed_fitness),
        "front": result.front.iter().map(|member| {
            serde_json::json!({
                "scores": scores(&member.fitness),
                "plan": member
                    .diet
                    .meals
                    .iter()
                    .map(MealRecord::from_meal)
                    .collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}
