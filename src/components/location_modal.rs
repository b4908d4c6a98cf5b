use yew::prelude::*;

use crate::models::Location;

#[derive(Properties, PartialEq)]
pub struct LocationModalProps {
    pub location: Location,
    pub on_close: Callback<()>,
}

fn detail_row(label: &str, value: Option<&str>) -> Html {
    match value {
        Some(value) if !value.is_empty() => html! {
            <div class="detail-row">
                <span class="detail-label">{label}</span>
                <span class="detail-value">{value}</span>
            </div>
        },
        _ => Html::default(),
    }
}

#[function_component(LocationModal)]
pub fn location_modal(props: &LocationModalProps) -> Html {
    let location = &props.location;

    let on_backdrop = props.on_close.reform(|_| ());
    // Clicks inside the card must not close the modal
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={on_backdrop}>
            <div class="modal-card" onclick={stop}>
                <div class="modal-header">
                    <h2>{&location.location_name}</h2>
                    <button class="btn-close" onclick={props.on_close.reform(|_| ())}>
                        {"✕"}
                    </button>
                </div>

                <div class="modal-body">
                    <div class="detail-row">
                        <span class="detail-label">{"Status"}</span>
                        <span class={classes!(
                            "detail-value",
                            location.is_active().then_some("active")
                        )}>
                            {location.status()}
                        </span>
                    </div>
                    { detail_row("Nickname", location.nickname.as_deref()) }
                    { detail_row("City", location.city.as_deref()) }
                    { detail_row("State", location.state.as_deref()) }
                    { detail_row("Property type", location.property_type.as_deref()) }
                    { detail_row("Management", location.management_status.as_deref()) }
                    { detail_row("Google listing", location.google_business_name.as_deref()) }
                    { detail_row("Opened", location.opening_date.as_deref()) }
                </div>
            </div>
        </div>
    }
}
