use yew::prelude::*;

use crate::models::User;
use crate::services::auth_service::{clear_auth, perform_login, restore_session};

#[derive(Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseAuthHandle {
    pub state: UseStateHandle<AuthState>,
    pub login: Callback<(String, String)>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_auth() -> UseAuthHandle {
    let state = use_state(|| AuthState {
        user: None,
        loading: false,
        error: None,
    });

    // Pick up a surviving session on mount; expired tokens were already
    // cleared by restore_session.
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            if let Some(user) = restore_session() {
                state.set(AuthState {
                    user: Some(user),
                    loading: false,
                    error: None,
                });
            }
            || ()
        });
    }

    let login = {
        let state = state.clone();
        Callback::from(move |(phone, password): (String, String)| {
            let state = state.clone();
            state.set(AuthState {
                user: None,
                loading: true,
                error: None,
            });
            wasm_bindgen_futures::spawn_local(async move {
                match perform_login(&phone, &password).await {
                    Ok(user) => {
                        state.set(AuthState {
                            user: Some(user),
                            loading: false,
                            error: None,
                        });
                    }
                    Err(e) => {
                        log::error!("❌ Login failed: {}", e);
                        state.set(AuthState {
                            user: None,
                            loading: false,
                            error: Some(e.to_string()),
                        });
                    }
                }
            });
        })
    };

    let logout = {
        let state = state.clone();
        Callback::from(move |_| {
            clear_auth();
            state.set(AuthState {
                user: None,
                loading: false,
                error: None,
            });
        })
    };

    UseAuthHandle { state, login, logout }
}
