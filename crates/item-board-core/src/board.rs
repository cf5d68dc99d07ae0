//! Board State
//!
//! Draft, item list, refetch trigger and status message, plus the
//! transitions each API outcome applies. `BoardState` is pure; `Board`
//! pairs it with an `ItemApi` and awaits the calls in sequence.

use log::{error, info, warn};

use crate::api::ItemApi;
use crate::error::ApiResult;
use crate::models::{FormField, FormState, Item, ItemId};

pub const MSG_CREATED: &str = "Item created successfully.";
pub const MSG_CREATE_FAILED: &str = "Failed to create item.";
pub const MSG_DELETED: &str = "Item deleted successfully.";

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub draft: FormState,
    pub items: Vec<Item>,
    /// Bumped whenever the list must be reloaded from the server
    pub reload_trigger: u32,
    /// Last status shown to the user, empty until something happens
    pub message: String,
}

impl BoardState {
    pub fn new(image: String) -> Self {
        Self {
            draft: FormState::new(image),
            items: Vec::new(),
            reload_trigger: 0,
            message: String::new(),
        }
    }

    /// Merge an input change into the draft
    pub fn handle_change(&mut self, name: &str, value: impl Into<String>) {
        match name.parse::<FormField>() {
            Ok(field) => self.draft.set(field, value.into()),
            Err(e) => warn!("[Board] Ignoring change: {}", e),
        }
    }

    pub fn request_reload(&mut self) {
        self.reload_trigger = self.reload_trigger.wrapping_add(1);
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Apply the outcome of a create call.
    ///
    /// The created item is not appended: the list is reconciled by the
    /// reload this requests. `next_image` is only called on success.
    /// Returns whether a reload was requested.
    pub fn apply_created(
        &mut self,
        result: ApiResult<Item>,
        next_image: impl FnOnce() -> String,
    ) -> bool {
        let reload = match result {
            Ok(item) => {
                info!("[Board] Created item {}", item.id);
                self.draft = FormState::new(next_image());
                self.message = MSG_CREATED.to_string();
                self.request_reload();
                true
            }
            Err(e) if e.status().is_some() => {
                error!("[Board] {} ({})", MSG_CREATE_FAILED, e);
                self.message = MSG_CREATE_FAILED.to_string();
                false
            }
            Err(e) => {
                error!("[Board] Error: {}", e);
                self.message = format!("Error: {}", e);
                false
            }
        };
        info!("[Board] Form posted");
        reload
    }

    /// Apply the outcome of a list call; a failure keeps the stale list
    pub fn apply_loaded(&mut self, result: ApiResult<Vec<Item>>) {
        match result {
            Ok(items) => {
                info!("[Board] Loaded {} items", items.len());
                self.items = items;
            }
            Err(e) => {
                error!("[Board] Error fetching items: {}", e);
                self.message = format!("Error fetching items: {}", e);
            }
        }
    }

    /// Apply the outcome of a delete call; success filters locally
    pub fn apply_deleted(&mut self, id: &ItemId, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                info!("[Board] Deleted item {}", id);
                self.items.retain(|item| &item.id != id);
                self.message = MSG_DELETED.to_string();
            }
            Err(e) => {
                error!("[Board] Error deleting item {}: {}", id, e);
                self.message = format!("Error deleting item: {}", e);
            }
        }
    }
}

/// A mounted board driving an `ItemApi`
pub struct Board<A: ItemApi> {
    api: A,
    state: BoardState,
    images: Box<dyn FnMut() -> String>,
}

impl<A: ItemApi> Board<A> {
    /// `images` yields a fresh placeholder image URL per draft
    pub fn new(api: A, mut images: impl FnMut() -> String + 'static) -> Self {
        let state = BoardState::new(images());
        Self { api, state, images: Box::new(images) }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn handle_change(&mut self, name: &str, value: impl Into<String>) {
        self.state.handle_change(name, value);
    }

    /// Initial load
    pub async fn mount(&mut self) {
        self.load().await;
    }

    pub async fn load(&mut self) {
        let result = self.api.list_items().await;
        self.state.apply_loaded(result);
    }

    /// Create from the current draft, then reload if the trigger moved
    pub async fn submit(&mut self) {
        let result = self.api.create_item(&self.state.draft).await;
        let images = &mut self.images;
        if self.state.apply_created(result, || images()) {
            self.load().await;
        }
    }

    pub async fn delete(&mut self, id: &ItemId) {
        let result = self.api.delete_item(id).await;
        self.state.apply_deleted(id, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    fn item(id: i64) -> Item {
        Item {
            id: ItemId::Number(id),
            user_id: "alice".into(),
            lat: Some(10.0),
            lon: Some(20.0),
            image: "https://img".into(),
            keywords: "k".into(),
            description: "d".into(),
        }
    }

    /// In-memory server with scripted failures
    #[derive(Default)]
    struct FakeApi {
        items: RefCell<Vec<Item>>,
        next_id: Cell<i64>,
        list_status: Cell<Option<u16>>,
        create_status: Cell<Option<u16>>,
        delete_status: Cell<Option<u16>>,
        list_calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ItemApi for FakeApi {
        async fn list_items(&self) -> ApiResult<Vec<Item>> {
            self.list_calls.set(self.list_calls.get() + 1);
            if let Some(status) = self.list_status.get() {
                return Err(ApiError::Status { status });
            }
            Ok(self.items.borrow().clone())
        }

        async fn create_item(&self, draft: &FormState) -> ApiResult<Item> {
            if let Some(status) = self.create_status.get() {
                return Err(ApiError::Status { status });
            }
            self.next_id.set(self.next_id.get() + 1);
            let created = Item {
                id: ItemId::Number(self.next_id.get()),
                user_id: draft.user_id.clone(),
                lat: draft.lat.parse().ok(),
                lon: draft.lon.parse().ok(),
                image: draft.image.clone(),
                keywords: draft.keywords.clone(),
                description: draft.description.clone(),
            };
            self.items.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn delete_item(&self, id: &ItemId) -> ApiResult<()> {
            match self.delete_status.get() {
                Some(200) => Err(ApiError::UnexpectedStatus { status: 200, reason: "OK".into() }),
                Some(status) => Err(ApiError::Status { status }),
                None => {
                    self.items.borrow_mut().retain(|i| &i.id != id);
                    Ok(())
                }
            }
        }
    }

    fn board(api: FakeApi) -> Board<FakeApi> {
        let counter = Cell::new(0u32);
        Board::new(api, move || {
            counter.set(counter.get() + 1);
            format!("https://picsum.photos/450/520?random={}", counter.get())
        })
    }

    fn fill_alice(board: &mut Board<FakeApi>) {
        board.handle_change("user_id", "alice");
        board.handle_change("lat", "10");
        board.handle_change("lon", "20");
        board.handle_change("image", "https://img");
        board.handle_change("keywords", "k");
        board.handle_change("description", "d");
    }

    #[test]
    fn test_handle_change_merges_and_ignores_unknown() {
        let mut state = BoardState::new("img".into());
        state.handle_change("keywords", "rust");
        state.handle_change("bogus", "x");
        assert_eq!(state.draft.keywords, "rust");
        assert_eq!(state.draft.image, "img");
    }

    #[test]
    fn test_created_requests_reload_without_append() {
        let mut state = BoardState::new("img-0".into());
        state.handle_change("user_id", "alice");

        let reload = state.apply_created(Ok(item(1)), || "img-1".into());

        assert!(reload);
        assert!(state.items.is_empty());
        assert_eq!(state.reload_trigger, 1);
        assert_eq!(state.draft, FormState::new("img-1".into()));
        assert_eq!(state.message, MSG_CREATED);
    }

    #[test]
    fn test_create_transport_error_keeps_draft() {
        let mut state = BoardState::new("img-0".into());
        state.handle_change("user_id", "alice");
        let before = state.draft.clone();

        let reload = state.apply_created(
            Err(ApiError::Transport("Failed to fetch".into())),
            || panic!("no new image on failure"),
        );

        assert!(!reload);
        assert_eq!(state.draft, before);
        assert_eq!(state.message, "Error: Failed to fetch");
        assert_eq!(state.reload_trigger, 0);
    }

    #[test]
    fn test_create_unreadable_response_is_not_a_rejection() {
        let mut state = BoardState::new("img-0".into());
        state.handle_change("user_id", "alice");
        let before = state.draft.clone();

        let reload = state.apply_created(
            Err(ApiError::Parse("expected value at line 1 column 1".into())),
            || panic!("no new image on failure"),
        );

        assert!(!reload);
        assert_eq!(state.draft, before);
        assert_ne!(state.message, MSG_CREATE_FAILED);
        assert!(state.message.starts_with("Error: "), "{}", state.message);
        assert!(state.message.contains("line 1 column 1"));
        assert_eq!(state.reload_trigger, 0);
    }

    #[test]
    fn test_unreadable_list_keeps_stale_items() {
        let mut state = BoardState::new(String::new());
        state.apply_loaded(Ok(vec![item(1), item(2)]));

        state.apply_loaded(Err(ApiError::Parse("invalid type: map".into())));

        assert_eq!(state.items.len(), 2);
        assert!(state.message.starts_with("Error fetching items: "), "{}", state.message);
        assert!(state.message.contains("invalid type: map"));
    }

    #[test]
    fn test_delete_failure_keeps_list() {
        let mut state = BoardState::new(String::new());
        state.apply_loaded(Ok(vec![item(1), item(2)]));

        state.apply_deleted(
            &ItemId::Number(1),
            Err(ApiError::UnexpectedStatus { status: 200, reason: "OK".into() }),
        );

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.message, "Error deleting item: OK");
    }

    #[tokio::test]
    async fn test_submit_scenario_creates_and_reloads() {
        let mut board = board(FakeApi::default());
        board.mount().await;
        let first_image = board.state().draft.image.clone();
        fill_alice(&mut board);

        board.submit().await;

        let state = board.state();
        assert_eq!(state.items.len(), 1);
        assert!(state.contains(&ItemId::Number(1)));
        assert_eq!(state.message, "Item created successfully.");
        assert_eq!(state.draft.user_id, "");
        assert_ne!(state.draft.image, first_image);
        assert_eq!(board.api().list_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_submit_rejected_keeps_draft() {
        let api = FakeApi::default();
        api.create_status.set(Some(400));
        let mut board = board(api);
        board.mount().await;
        fill_alice(&mut board);

        board.submit().await;

        let state = board.state();
        assert_eq!(state.message, "Failed to create item.");
        assert_eq!(state.draft.user_id, "alice");
        assert_eq!(state.draft.lat, "10");
        assert!(state.items.is_empty());
        assert_eq!(board.api().list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_delete_no_content_filters_without_refetch() {
        let mut board = board(FakeApi::default());
        fill_alice(&mut board);
        board.submit().await;
        let calls = board.api().list_calls.get();

        board.delete(&ItemId::Number(1)).await;

        assert!(!board.state().contains(&ItemId::Number(1)));
        assert_eq!(board.state().message, "Item deleted successfully.");
        assert_eq!(board.api().list_calls.get(), calls);
    }

    #[tokio::test]
    async fn test_delete_error_status_leaves_list() {
        let mut board = board(FakeApi::default());
        fill_alice(&mut board);
        board.submit().await;
        board.api().delete_status.set(Some(404));

        board.delete(&ItemId::Number(1)).await;

        assert!(board.state().contains(&ItemId::Number(1)));
        assert_eq!(
            board.state().message,
            "Error deleting item: HTTP error! status: 404"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_stale_list() {
        let mut board = board(FakeApi::default());
        fill_alice(&mut board);
        board.submit().await;
        board.api().list_status.set(Some(500));

        board.load().await;

        assert_eq!(board.state().items.len(), 1);
        assert_eq!(
            board.state().message,
            "Error fetching items: HTTP error! status: 500"
        );
    }
}
