use yew::prelude::*;
use web_sys::HtmlInputElement;

use crate::config::CONFIG;
use crate::hooks::use_auth;
use crate::models::{Product, User};
use crate::state::AuthPhase;
use crate::utils::t;

#[derive(Properties, PartialEq)]
struct ShiftEditorProps {
    user_id: String,
    on_save: Callback<(String, String, String)>,
}

#[function_component(ShiftEditor)]
fn shift_editor(props: &ShiftEditorProps) -> Html {
    let day_ref = use_node_ref();
    let shift_ref = use_node_ref();
    let lang = CONFIG.language.clone();

    let on_submit = {
        let day_ref = day_ref.clone();
        let shift_ref = shift_ref.clone();
        let user_id = props.user_id.clone();
        let on_save = props.on_save.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let (Some(day), Some(shift)) = (
                day_ref.cast::<HtmlInputElement>(),
                shift_ref.cast::<HtmlInputElement>(),
            ) {
                let (day, shift) = (day.value(), shift.value());
                if !day.is_empty() && !shift.is_empty() {
                    on_save.emit((user_id.clone(), day, shift));
                }
            }
        })
    };

    html! {
        <form class="shift-editor" onsubmit={on_submit}>
            <input type="text" placeholder={t("day", &lang)} ref={day_ref} />
            <input type="text" placeholder={t("shift", &lang)} ref={shift_ref} />
            <button type="submit">{ t("save", &lang) }</button>
        </form>
    }
}

fn team_member(member: &User, lang: &str, on_save: &Callback<(String, String, String)>) -> Html {
    html! {
        <li class="team-member" key={member.id.clone()}>
            <img class="avatar" src={member.avatar_url.clone()} alt={member.name.clone()} />
            <span class="member-name">{ &member.name }</span>
            <span class="member-title">{ &member.title }</span>
            if member.on_break {
                <span class="badge-break">{ t("on_break", lang) }</span>
            }
            <ShiftEditor user_id={member.id.clone()} on_save={on_save.clone()} />
        </li>
    }
}

fn inventory_row(product: &Product, lang: &str, on_delete: &Callback<i64>) -> Html {
    let onclick = {
        let on_delete = on_delete.clone();
        let id = product.id;
        Callback::from(move |_: MouseEvent| on_delete.emit(id))
    };

    html! {
        <li class="inventory-item" key={product.id.to_string()}>
            <img class="product-image" src={product.image_url.clone()} alt={product.name.clone()} />
            <span class="product-name">{ &product.name }</span>
            <span class="product-quantity">{ format!("{}: {}", t("quantity", lang), product.quantity) }</span>
            <span class="product-expiry">{ format!("{}: {}", t("expiry_date", lang), product.expiry_date) }</span>
            <button class="btn-delete" {onclick}>{ t("delete", lang) }</button>
        </li>
    }
}

/// Signed-in view: profile, team roster with shift editing, branch inventory
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let auth = use_auth();
    let inventory = use_state(Vec::<Product>::new);
    let notice = use_state(|| None::<String>);
    let reload = use_state(|| 0u32);
    let lang = CONFIG.language.clone();

    // Reload inventory when the branch becomes known or after a delete
    {
        let inventory = inventory.clone();
        let manager = auth.as_ref().map(|a| a.manager.clone());
        let branch_id = auth
            .as_ref()
            .and_then(|a| a.state.user.as_ref().map(|u| u.branch_id.clone()));

        use_effect_with((branch_id, *reload), move |(branch_id, _)| {
            if let (Some(manager), Some(_)) = (manager, branch_id) {
                wasm_bindgen_futures::spawn_local(async move {
                    inventory.set(manager.fetch_inventory().await);
                });
            }
            || ()
        });
    }

    let Some(auth) = auth else {
        return html! {};
    };

    let on_logout = {
        let manager = auth.manager.clone();
        Callback::from(move |_: MouseEvent| {
            let manager = manager.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = manager.logout().await {
                    log::warn!("⚠️ Logout finished with error: {}", e);
                }
            });
        })
    };

    let on_delete = {
        let manager = auth.manager.clone();
        let notice = notice.clone();
        let reload = reload.clone();
        Callback::from(move |id: i64| {
            let manager = manager.clone();
            let notice = notice.clone();
            let reload = reload.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match manager.delete_inventory(id).await {
                    Ok(()) => {
                        notice.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(e) => notice.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_shift = {
        let manager = auth.manager.clone();
        let notice = notice.clone();
        Callback::from(move |(user_id, day, shift): (String, String, String)| {
            let manager = manager.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match manager.set_team_shift(&user_id, &day, &shift).await {
                    Ok(()) => notice.set(None),
                    Err(e) => notice.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_retry = {
        let manager = auth.manager.clone();
        Callback::from(move |_: MouseEvent| manager.refresh())
    };

    let status = match &auth.state.phase {
        AuthPhase::ProfilePending | AuthPhase::TeamPending => html! {
            <p class="status-loading">{ t("loading_profile", &lang) }</p>
        },
        AuthPhase::Failed { message, .. } => html! {
            <div class="status-error">
                <p>{ t("profile_error", &lang) }</p>
                <small>{ message }</small>
                <button onclick={on_retry}>{ t("retry", &lang) }</button>
            </div>
        },
        _ => html! {},
    };

    html! {
        <div class="dashboard">
            <header class="dashboard-header">
                if let Some(user) = &auth.state.user {
                    <img class="avatar" src={user.avatar_url.clone()} alt={user.name.clone()} />
                    <div class="user-info">
                        <span class="user-name">{ &user.name }</span>
                        <span class="user-title">{ &user.title }</span>
                    </div>
                }
                <button class="btn-logout" onclick={on_logout}>{ t("logout", &lang) }</button>
            </header>

            { status }

            if let Some(message) = (*notice).clone() {
                <p class="notice-error">{ message }</p>
            }

            <section class="team">
                <h2>{ t("team", &lang) }</h2>
                <ul>
                    { for auth.state.team.iter().map(|member| team_member(member, &lang, &on_shift)) }
                </ul>
            </section>

            <section class="inventory">
                <h2>{ t("inventory", &lang) }</h2>
                <ul>
                    { for inventory.iter().map(|product| inventory_row(product, &lang, &on_delete)) }
                </ul>
            </section>
        </div>
    }
}
