use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub on_login: Callback<(String, String)>,
    pub loading: bool,
    pub error: Option<String>,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let phone_ref = use_node_ref();
    let password_ref = use_node_ref();
    let validation = use_state(|| None::<String>);

    let on_submit = {
        let phone_ref = phone_ref.clone();
        let password_ref = password_ref.clone();
        let validation = validation.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let (Some(phone_input), Some(password_input)) = (
                phone_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) {
                let phone = phone_input.value();
                let password = password_input.value();

                if phone.trim().is_empty() || password.is_empty() {
                    validation.set(Some("Please enter your phone number and password".to_string()));
                    return;
                }

                validation.set(None);
                on_login.emit((phone.trim().to_string(), password));
            }
        })
    };

    let error = validation.as_ref().or(props.error.as_ref());

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <div class="login-logo">
                        <div class="logo-icon">{"🏟️"}</div>
                    </div>
                    <h1>{"ClayGrounds Tycoon"}</h1>
                    <p>{"Build your sports facility empire"}</p>
                </div>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="phone">{"Phone Number"}</label>
                        <input
                            type="tel"
                            id="phone"
                            name="phone"
                            placeholder="Enter your phone number"
                            ref={phone_ref}
                            disabled={props.loading}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Enter your password"
                            ref={password_ref}
                            disabled={props.loading}
                            required=true
                        />
                    </div>

                    if let Some(message) = error {
                        <div class="login-error">{message}</div>
                    }

                    <button type="submit" class="btn-login" disabled={props.loading}>
                        <span class="btn-text">
                            { if props.loading { "Signing in..." } else { "Start Playing" } }
                        </span>
                    </button>
                </form>
            </div>
        </div>
    }
}
