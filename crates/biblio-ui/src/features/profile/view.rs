//! Profile screen: read-only identity plus the editable contact fields.

use std::cell::Cell;
use std::rc::Rc;

use biblio_api_models::Profile;
use gloo::dialogs::prompt;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::app::ApiCtx;
use crate::components::toast::Toaster;
use crate::core::screen::NavIntent;
use crate::core::store::AppStore;
use crate::features::profile::state::ProfileForm;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(ProfilePage)]
pub(crate) fn profile_page() -> Html {
    let api = use_context::<ApiCtx>().expect("api context");
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let toaster = use_context::<Toaster>();
    let (store, dispatch) = use_store::<AppStore>();
    let username = store.session.username.clone().unwrap_or_default();

    let profile = use_state(|| None::<Profile>);
    let form = use_state(ProfileForm::default);
    let failed = use_state(|| false);
    let busy = use_state(|| false);

    {
        let api = api.clone();
        let profile = profile.clone();
        let form = form.clone();
        let failed = failed.clone();
        use_effect_with_deps(
            move |username: &String| {
                let username = username.clone();
                profile.set(None);
                failed.set(false);
                let alive = Rc::new(Cell::new(true));
                {
                    let alive = alive.clone();
                    yew::platform::spawn_local(async move {
                        match api.client.fetch_profile(&username).await {
                            Ok(record) if alive.get() => {
                                form.set(ProfileForm::from_profile(&record));
                                profile.set(Some(record));
                            }
                            Err(_) if alive.get() => failed.set(true),
                            _ => {}
                        }
                    });
                }
                move || alive.set(false)
            },
            username.clone(),
        );
    }

    let back = {
        let dispatch = dispatch;
        Callback::from(move |_| dispatch.reduce_mut(|store| store.navigate(NavIntent::Home)))
    };

    if *failed {
        return html! {
            <section class="profile">
                <button onclick={back}>{bundle.text("profile.back", "")}</button>
                <p class="error">{bundle.text("profile.load_error", "")}</p>
            </section>
        };
    }
    let Some(record) = (*profile).clone() else {
        return html! { <p class="loading">{bundle.text("profile.loading", "")}</p> };
    };

    let set_email = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = input_of(&event) {
                form.set(ProfileForm {
                    email: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };
    let set_phone = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = input_of(&event) {
                form.set(ProfileForm {
                    telefon: input.value(),
                    ..(*form).clone()
                });
            }
        })
    };
    // The avatar is a plain URL; a prompt keeps the screen free of an
    // upload widget the backend does not offer.
    let pick_avatar = {
        let form = form.clone();
        let bundle = bundle.clone();
        Callback::from(move |_| {
            if let Some(url) = prompt(&bundle.text("profile.no_avatar", ""), Some(&form.imatge)) {
                form.set(ProfileForm {
                    imatge: url.trim().to_string(),
                    ..(*form).clone()
                });
            }
        })
    };

    let save = {
        let api = api;
        let form = form.clone();
        let busy = busy.clone();
        let bundle = bundle.clone();
        let toaster = toaster;
        let username = username.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let update = match form.to_update(&username) {
                Ok(update) => update,
                Err(err) => {
                    if let Some(toaster) = &toaster {
                        toaster.error(bundle.text(err.message_key(), ""));
                    }
                    return;
                }
            };
            busy.set(true);
            let api = api.clone();
            let busy = busy.clone();
            let bundle = bundle.clone();
            let toaster = toaster.clone();
            yew::platform::spawn_local(async move {
                let outcome = async {
                    let check = api.client.check_profile(&update).await?;
                    if !check.modified {
                        return Ok(false);
                    }
                    let saved = api.client.save_profile(&update).await?;
                    Ok(saved.success)
                }
                .await;
                if let Some(toaster) = &toaster {
                    match outcome {
                        Ok(false) => toaster.info(bundle.text("profile.no_changes", "")),
                        Ok(true) => toaster.success(bundle.text("profile.saved", "")),
                        Err(crate::core::gateway::ApiError::Http { .. }) => {
                            toaster.error(bundle.text("profile.save_error", ""));
                        }
                        Err(err) => toaster.error(err.to_string()),
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <section class="profile">
            <button onclick={back}>{bundle.text("profile.back", "")}</button>
            <h1>{format!("{} {}", bundle.text("profile.title_prefix", ""), record.nombre)}</h1>
            <div class="avatar" onclick={pick_avatar}>
                { if form.imatge.trim().is_empty() {
                    html! { <div class="placeholder">{bundle.text("profile.no_avatar", "")}</div> }
                } else {
                    html! { <img src={form.imatge.clone()} alt={record.nombre.clone()} /> }
                } }
            </div>
            <dl class="identity">
                { if let Some(centre) = &record.centre {
                    html! {
                        <>
                            <dt>{bundle.text("loans.form.exemplar_centre", "")}</dt>
                            <dd>{centre.clone()}</dd>
                        </>
                    }
                } else {
                    html! {}
                } }
                { if let Some(grup) = &record.grup {
                    html! {
                        <>
                            <dt>{bundle.text("profile.group", "")}</dt>
                            <dd>{grup.clone()}</dd>
                        </>
                    }
                } else {
                    html! {}
                } }
            </dl>
            <form onsubmit={save}>
                <label>{bundle.text("profile.email", "")}</label>
                <input type="email" value={form.email.clone()} oninput={set_email} />
                <label>{bundle.text("profile.phone", "")}</label>
                <input type="tel" value={form.telefon.clone()} oninput={set_phone} />
                <button type="submit" class="primary" disabled={*busy}>
                    {bundle.text("profile.save", "")}
                </button>
            </form>
        </section>
    }
}

fn input_of(event: &InputEvent) -> Option<HtmlInputElement> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
}
