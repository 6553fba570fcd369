use crate::interface::changes::{count_menu_changes, total_changed};
use crate::models::{Diet, Meal};
use crate::optimizer::{
    Fitness, MAX_SUGGESTIONS, OBJECTIVE_COUNT, OBJECTIVE_NAMES, OptimizationResult, ScoredDiet,
    TerminationRule,
};

/// One slot as shown to the user.
fn slot_label(meal: &Meal) -> String {
    if meal.menus.is_empty() {
        return "(empty)".to_string();
    }
    meal.menus
        .iter()
        .map(|m| format!("({}) {}", m.category, m.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Plan as text, grouped by day in plan order.
pub fn format_plan(diet: &Diet, title: &str) -> String {
    let mut out = format!("=== {} ===\n", title);
    let mut current_day: Option<&str> = None;

    for meal in &diet.meals {
        if current_day != Some(meal.day.as_str()) {
            out.push_str(&format!("Day {}\n", meal.day));
            current_day = Some(meal.day.as_str());
        }
        out.push_str(&format!("  {:<9} {}\n", meal.meal_type, slot_label(meal)));
    }

    out
}

/// Display a plan in a day-by-day table.
pub fn display_plan(diet: &Diet, title: &str) {
    println!();
    print!("{}", format_plan(diet, title));
    println!();
}

/// Scores on one line, in objective order.
pub fn format_scores(fitness: &Fitness) -> String {
    OBJECTIVE_NAMES
        .iter()
        .zip(fitness.values())
        .map(|(name, value)| format!("{}={:.2}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Percent change of each objective against the seed score.
///
/// A seed score of zero gives +inf, 0 or -inf by the sign of the new score.
pub fn improvement_percentages(seed: &Fitness, fitness: &Fitness) -> [f64; OBJECTIVE_COUNT] {
    let mut percentages = [0.0; OBJECTIVE_COUNT];
    for ((pct, init), current) in percentages
        .iter_mut()
        .zip(seed.values())
        .zip(fitness.values())
    {
        *pct = if init != 0.0 {
            (current - init) / init.abs() * 100.0
        } else if current > 0.0 {
            f64::INFINITY
        } else if current < 0.0 {
            f64::NEG_INFINITY
        } else {
            0.0
        };
    }
    percentages
}

/// Percent changes on one line, in objective order.
pub fn format_improvements(percentages: &[f64; OBJECTIVE_COUNT]) -> String {
    OBJECTIVE_NAMES
        .iter()
        .zip(percentages)
        .map(|(name, pct)| format!("{}={:+.2}%", name, pct))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Front members that beat the seed on enough objectives, in front order,
/// at most `limit` of them.
pub fn suggested_plans<'a>(
    result: &'a OptimizationResult,
    rule: &TerminationRule,
    limit: usize,
) -> Vec<&'a ScoredDiet> {
    result
        .front
        .iter()
        .filter(|m| rule.counts_as_improved(&m.fitness, &result.seed_fitness))
        .take(limit)
        .collect()
}

/// Display an optimizer run: termination, seed scores, every front member
/// with the slots it changed, then the suggested plans in full.
pub fn display_front(result: &OptimizationResult, seed: &Diet, rule: &TerminationRule) {
    println!();
    println!("=== Optimization Result ===");
    println!(
        "Stopped after {} generation(s): {}",
        result.generations, result.termination
    );
    println!("Seed:  {}", format_scores(&result.seed_fitness));
    println!();
    println!(
        "=== Pareto Front ({} non-dominated plans) ===",
        result.front.len()
    );
    println!();

    for (i, member) in result.front.iter().enumerate() {
        let improved = member.fitness.improvements_over(&result.seed_fitness);
        println!(
            "#{}: {}  [{} objective(s) improved, {} slot(s) changed]",
            i + 1,
            format_scores(&member.fitness),
            improved,
            total_changed(seed, &member.diet)
        );

        for (category, counts) in count_menu_changes(seed, &member.diet) {
            if counts.changed > 0 {
                println!("    {}: {}/{} changed", category, counts.changed, counts.total);
            }
        }
    }

    let suggestions = suggested_plans(result, rule, MAX_SUGGESTIONS);
    if suggestions.is_empty() {
        println!();
        println!(
            "No plan improves on {} or more objectives.",
            rule.min_improved_objectives
        );
        println!();
        return;
    }

    for (i, member) in suggestions.iter().enumerate() {
        let percentages = improvement_percentages(&result.seed_fitness, &member.fitness);
        println!();
        println!("Suggested plan {}: {}", i + 1, format_scores(&member.fitness));
        println!("  vs seed: {}", format_improvements(&percentages));
        print!("{}", format_plan(&member.diet, &format!("Suggested Plan {}", i + 1)));
    }
    println!();
}

/// Display the most frequent historical menus.
pub fn display_top_menus(menus: &[(&str, u32)]) {
    if menus.is_empty() {
        return;
    }

    println!();
    println!("=== Top {} Menus ===", menus.len());
    println!();
    for (rank, (name, count)) in menus.iter().enumerate() {
        println!("{:>3}. {} ({} meals)", rank + 1, name, count);
    }
}

/// Display the strongest historical menu pairings.
pub fn display_harmony_pairs(pairs: &[(&str, &str, u32)]) {
    if pairs.is_empty() {
        println!("No menu pairs found in history.");
        return;
    }

    println!();
    println!("=== Top {} Menu Pairs ===", pairs.len());
    println!();
    for (rank, (a, b, count)) in pairs.iter().enumerate() {
        println!("{:>3}. {} + {} ({} meals)", rank + 1, a, b, count);
    }
    println!();
}
