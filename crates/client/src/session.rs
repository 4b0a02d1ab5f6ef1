use tracing::debug;

use catalogo_core::ui::{Action, Effect, SearchFailure, UiState};

use crate::api::ApiClient;

/// Drives a [`UiState`] against the HTTP API.
///
/// Effects are executed one at a time and their completions dispatched
/// back until the reducer stops asking for work.
pub struct Session {
    state: UiState,
    api: ApiClient,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self {
            state: UiState::new(),
            api,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub async fn dispatch(&mut self, action: Action) {
        let mut pending = self.state.dispatch(action);
        while let Some(effect) = pending.take() {
            let completion = self.perform(effect).await;
            pending = self.state.dispatch(completion);
        }
    }

    async fn perform(&self, effect: Effect) -> Action {
        debug!(stage = "client", ?effect, "performing request");
        match effect {
            Effect::FetchList => Action::ListLoaded(
                self.api
                    .list_productos()
                    .await
                    .map_err(|err| err.user_message()),
            ),
            Effect::Search(codigo) => Action::SearchResolved(
                self.api.fetch_producto(&codigo).await.map_err(|err| {
                    if err.is_status() {
                        SearchFailure::NotFound
                    } else {
                        SearchFailure::Unreachable(err.to_string())
                    }
                }),
            ),
            Effect::Create(body) => Action::Created(
                self.api
                    .create_producto(&body)
                    .await
                    .map_err(|err| err.user_message()),
            ),
            Effect::Update(body) => Action::Updated(
                self.api
                    .update_producto(&body)
                    .await
                    .map_err(|err| err.user_message()),
            ),
        }
    }
}
