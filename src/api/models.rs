//! The fixed set of selectable models.

use anyhow::Result;

use crate::ui::Style;

/// A selectable model: API identifier plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models offered in the selector, in display order.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "claude-sonnet-4-20250514",
        name: "Claude Sonnet 4",
    },
    ModelInfo {
        id: "claude-opus-4-20250514",
        name: "Claude Opus 4",
    },
    ModelInfo {
        id: "claude-3-5-sonnet-20241022",
        name: "Claude 3.5 Sonnet",
    },
];

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Looks up a model by its identifier.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

/// Validates that `id` is one of the known models.
///
/// # Errors
///
/// Returns an error listing the valid identifiers if `id` is unknown.
pub fn validate_model(id: &str) -> Result<()> {
    if find_model(id).is_some() {
        return Ok(());
    }

    let valid: Vec<&str> = MODELS.iter().map(|m| m.id).collect();
    anyhow::bail!(
        "Unknown model: '{id}'\n\n\
         Valid models:\n  - {}\n\n\
         Run 'apollo models' to see display names.",
        valid.join("\n  - ")
    )
}

/// Prints the model table, marking `selected` if given.
pub fn print_models(selected: Option<&str>) {
    println!("{}", Style::header("Available models"));
    for model in MODELS {
        let marker = if selected == Some(model.id) {
            format!(" {}", Style::success("(selected)"))
        } else {
            String::new()
        };
        println!(
            "  {:28} {}{marker}",
            Style::value(model.id),
            Style::secondary(model.name)
        );
    }
}
