//! Login screen: credential form plus the identity-provider button.

use biblio_api_models::LoginRequest;
use gloo::utils::window;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::ApiCtx;
use crate::core::session::{Session, session_from_login};
use crate::features::auth::state::{CredentialForm, decode_credential};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

/// Name of the global callback the identity-provider widget invokes.
const CREDENTIAL_CALLBACK: &str = "handleGoogleCredential";

#[derive(Properties, PartialEq)]
pub(crate) struct LoginPageProps {
    pub on_login: Callback<Session>,
}

#[function_component(LoginPage)]
pub(crate) fn login_page(props: &LoginPageProps) -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let form = use_state(CredentialForm::default);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let credential_hook = use_mut_ref(|| None::<Closure<dyn FnMut(JsValue)>>);

    // The provider widget calls a global function with the signed
    // credential; it is installed for the lifetime of this screen only.
    {
        let api = api.clone();
        let on_login = props.on_login.clone();
        let error = error.clone();
        let bundle = bundle.clone();
        let credential_hook = credential_hook.clone();
        use_effect_with_deps(
            move |_| {
                let closure = Closure::wrap(Box::new(move |response: JsValue| {
                    let credential = js_sys::Reflect::get(&response, &JsValue::from_str("credential"))
                        .ok()
                        .and_then(|value| value.as_string());
                    let Some(credential) = credential else {
                        error.set(Some(bundle.text("auth.google_error", "")));
                        return;
                    };
                    let Some(username) = decode_credential(&credential)
                        .and_then(|claims| claims.email)
                    else {
                        error.set(Some(bundle.text("auth.google_error", "")));
                        return;
                    };
                    let api = api.clone();
                    let on_login = on_login.clone();
                    let error = error.clone();
                    let bundle = bundle.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.login_with_credential(&credential).await {
                            Ok(response) => match session_from_login(&username, &response) {
                                Some(session) => on_login.emit(session),
                                None => error.set(Some(bundle.text("auth.not_found", ""))),
                            },
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    });
                }) as Box<dyn FnMut(JsValue)>);

                let win = window();
                let _ = js_sys::Reflect::set(
                    win.as_ref(),
                    &JsValue::from_str(CREDENTIAL_CALLBACK),
                    closure.as_ref().unchecked_ref(),
                );
                *credential_hook.borrow_mut() = Some(closure);

                move || {
                    let win = window();
                    let _ = js_sys::Reflect::delete_property(
                        win.unchecked_ref(),
                        &JsValue::from_str(CREDENTIAL_CALLBACK),
                    );
                    credential_hook.borrow_mut().take();
                }
            },
            (),
        );
    }

    let set_username = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = input_of(&event) {
                form.set(CredentialForm {
                    username: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };
    let set_password = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = input_of(&event) {
                form.set(CredentialForm {
                    password: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };

    let submit = {
        let api = api;
        let form = form.clone();
        let busy = busy.clone();
        let error = error.clone();
        let bundle = bundle.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy || !form.is_complete() {
                return;
            }
            busy.set(true);
            error.set(None);
            let request = LoginRequest {
                username: form.username.trim().to_string(),
                password: form.password.clone(),
            };
            let api = api.clone();
            let busy = busy.clone();
            let error = error.clone();
            let bundle = bundle.clone();
            let on_login = on_login.clone();
            yew::platform::spawn_local(async move {
                match api.client.login(&request).await {
                    Ok(response) => match session_from_login(&request.username, &response) {
                        Some(session) => on_login.emit(session),
                        None => error.set(Some(bundle.text("auth.not_found", ""))),
                    },
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <section class="login">
            <h1>{bundle.text("auth.title", "Login")}</h1>
            <form onsubmit={submit}>
                <label>{bundle.text("auth.username", "")}</label>
                <input
                    type="text"
                    value={form.username.clone()}
                    placeholder={bundle.text("auth.username_placeholder", "")}
                    oninput={set_username}
                />
                <label>{bundle.text("auth.password", "")}</label>
                <input
                    type="password"
                    value={form.password.clone()}
                    placeholder={bundle.text("auth.password_placeholder", "")}
                    oninput={set_password}
                />
                <button type="submit" disabled={*busy || !form.is_complete()}>
                    {bundle.text("auth.submit", "")}
                </button>
            </form>
            { if let Some(message) = (*error).clone() {
                html! { <p class="error">{message}</p> }
            } else {
                html! {}
            } }
            // The provider script renders its button into this node.
            <div id="google-signin"></div>
        </section>
    }
}

fn input_of(event: &InputEvent) -> Option<HtmlInputElement> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
}
