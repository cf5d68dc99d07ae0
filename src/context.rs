//! Board Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use item_board_core::{ApiConfig, BoardState, HttpItemApi};

/// Board-wide signals provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    /// Draft, items, reload trigger and status message
    pub board: RwSignal<BoardState>,
    /// Resolved API base, fixed for the app's lifetime
    config: StoredValue<ApiConfig>,
}

impl BoardContext {
    pub fn new(board: RwSignal<BoardState>, config: ApiConfig) -> Self {
        Self {
            board,
            config: StoredValue::new(config),
        }
    }

    /// Client for one request
    pub fn api(&self) -> HttpItemApi {
        HttpItemApi::new(self.config.get_value())
    }

    /// Changes only when the reload trigger is bumped
    pub fn reload_trigger(&self) -> Memo<u32> {
        let board = self.board;
        Memo::new(move |_| board.with(|s| s.reload_trigger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_board_core::{Item, ItemId};

    fn item(id: i64) -> Item {
        Item {
            id: ItemId::Number(id),
            user_id: "alice".into(),
            lat: None,
            lon: None,
            image: String::new(),
            keywords: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_reload_trigger_follows_create_only() {
        let owner = Owner::new();
        owner.set();

        let board = RwSignal::new(BoardState::new("img-0".into()));
        let ctx = BoardContext::new(board, ApiConfig::default());
        let trigger = ctx.reload_trigger();
        assert_eq!(trigger.get_untracked(), 0);

        board.update(|s| s.handle_change("user_id", "alice"));
        assert_eq!(trigger.get_untracked(), 0);

        board.update(|s| {
            s.apply_created(Ok(item(1)), || "img-1".into());
        });
        assert_eq!(trigger.get_untracked(), 1);

        board.update(|s| s.apply_loaded(Ok(vec![item(1)])));
        board.update(|s| s.apply_deleted(&ItemId::Number(1), Ok(())));
        assert_eq!(trigger.get_untracked(), 1);
        assert!(board.with_untracked(|s| s.items.is_empty()));
    }
}
