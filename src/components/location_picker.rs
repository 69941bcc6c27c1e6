// src/components/location_picker.rs
use gloo::events::EventListener;
use gloo::utils::window;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LocationPickerProps {
    pub id: AttrValue,
    pub placeholder: AttrValue,
    pub selected: Option<String>,
    pub options: Vec<String>,
    pub on_search: Callback<String>,
    pub on_pick: Callback<String>,
}

/// Dropdown button that opens a searchable list of locations.
#[function_component(LocationPicker)]
pub fn location_picker(props: &LocationPickerProps) -> Html {
    let open = use_state(|| false);

    // ------ CLOSE ON OUTSIDE CLICK ------
    {
        let open = open.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&window(), "click", move |_| open.set(false));
            || drop(listener)
        });
    }

    let toggle = {
        let open = open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            open.set(!*open);
        })
    };

    let onkeypress = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    on_search.emit(input.value());
                }
            }
        })
    };

    let label = props
        .selected
        .clone()
        .unwrap_or_else(|| props.placeholder.to_string());

    html! {
        <div class="location-picker" id={props.id.clone()}>
            <button class="dropdown-button" onclick={toggle}>
                <span>{ label }</span>
            </button>
            <div
                class={classes!("dropdown-menu", (!*open).then_some("hidden"))}
                onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
            >
                <input type="text" placeholder="Cari lokasi..." {onkeypress} />
                <ul>
                    { for props.options.iter().map(|name| {
                        let on_pick = props.on_pick.clone();
                        let open = open.clone();
                        let picked = name.clone();
                        let onclick = Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            on_pick.emit(picked.clone());
                            open.set(false);
                        });
                        html! {
                            <li><a href="#" {onclick}>{ name }</a></li>
                        }
                    }) }
                </ul>
            </div>
        </div>
    }
}
