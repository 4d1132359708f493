use yew::prelude::*;
use web_sys::HtmlInputElement;

use crate::config::CONFIG;
use crate::utils::t;

#[derive(Properties, PartialEq)]
pub struct LoginScreenProps {
    pub on_login: Callback<(String, String)>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(LoginScreen)]
pub fn login_screen(props: &LoginScreenProps) -> Html {
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let validation = use_state(|| None::<String>);
    let lang = CONFIG.language.clone();

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let on_login = props.on_login.clone();
        let validation = validation.clone();
        let lang = lang.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) {
                let email = email_input.value().trim().to_string();
                let password = password_input.value();

                if email.is_empty() || password.is_empty() {
                    validation.set(Some(t("fill_all_fields", &lang)));
                    return;
                }

                validation.set(None);
                on_login.emit((email, password));
            }
        })
    };

    let message = (*validation).clone().or_else(|| props.error.clone());

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <h1>{ t("login_title", &lang) }</h1>
                </div>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{ t("email", &lang) }</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            autocomplete="username"
                            ref={email_ref}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{ t("password", &lang) }</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            ref={password_ref}
                            required=true
                        />
                    </div>

                    if let Some(message) = message {
                        <p class="login-error">{ message }</p>
                    }

                    <button type="submit" class="btn-login" disabled={props.busy}>
                        { t("login", &lang) }
                    </button>
                </form>
            </div>
        </div>
    }
}
