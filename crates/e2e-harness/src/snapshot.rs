//! Board snapshots, the harness's stand-in for failure screenshots

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use item_board_core::{BoardState, FormField};

use crate::error::{HarnessError, Result};

/// Plain-text rendering of what the page would show
pub fn render(state: &BoardState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Draft ==");
    for field in FormField::ALL {
        let _ = writeln!(out, "{:<12} {}", field.name(), state.draft.get(field));
    }

    let _ = writeln!(out, "\n== Created Items ({}) ==", state.items.len());
    for item in &state.items {
        let coord = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "[{}] {} @ {},{} | {} | {}",
            item.id,
            item.user_id,
            coord(item.lat),
            coord(item.lon),
            item.keywords,
            item.description
        );
    }

    let _ = writeln!(out, "\n== Message ==");
    let _ = writeln!(out, "{}", state.message);
    out
}

/// Keep file names portable
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Write `<folder>/<spec> -- <test> (failed).txt` and return its path
pub fn save_failure(folder: &Path, spec: &str, test: &str, state: &BoardState) -> Result<PathBuf> {
    std::fs::create_dir_all(folder).map_err(|e| HarnessError::io(folder, e))?;
    let path = folder.join(format!("{} -- {} (failed).txt", sanitize(spec), sanitize(test)));
    std::fs::write(&path, render(state)).map_err(|e| HarnessError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_board_core::{Item, ItemId};

    #[test]
    fn test_render_lists_items_and_message() {
        let mut state = BoardState::new("https://img".into());
        state.items.push(Item {
            id: ItemId::Number(1),
            user_id: "alice".into(),
            lat: Some(10.0),
            lon: None,
            image: String::new(),
            keywords: "k".into(),
            description: "d".into(),
        });
        state.message = "Item created successfully.".into();

        let text = render(&state);
        assert!(text.contains("image        https://img"));
        assert!(text.contains("== Created Items (1) =="));
        assert!(text.contains("[1] alice @ 10,- | k | d"));
        assert!(text.ends_with("Item created successfully.\n"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("specs/a.e2e.toml"), "specs_a.e2e.toml");
        assert_eq!(sanitize("why? no"), "why_ no");
    }
}
