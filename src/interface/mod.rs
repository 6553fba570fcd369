pub mod changes;
pub mod output;
pub mod prompts;
pub mod render;

pub use changes::{CategoryChanges, count_menu_changes, total_changed};
pub use output::{write_front_csv, write_front_json};
pub use prompts::{confirm_overwrite, prompt_yes_no};
pub use render::{
    display_front, display_harmony_pairs, display_plan, display_top_menus, format_improvements,
    format_plan, format_scores, improvement_percentages, suggested_plans,
};
