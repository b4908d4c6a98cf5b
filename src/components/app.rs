use yew::prelude::*;

use crate::components::login_screen::LoginScreen;
use crate::components::map_container::MapContainer;
use crate::hooks::use_auth;

#[function_component(App)]
pub fn app() -> Html {
    let auth = use_auth();

    match &auth.state.user {
        Some(user) => html! {
            <MapContainer user={user.clone()} on_logout={auth.logout.clone()} />
        },
        None => html! {
            <LoginScreen
                on_login={auth.login.clone()}
                loading={auth.state.loading}
                error={auth.state.error.clone()}
            />
        },
    }
}
