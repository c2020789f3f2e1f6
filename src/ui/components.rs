/// Reusable UI components

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use gloo_timers::callback::Interval;
use patternfly_yew::prelude::*;
use crate::config::QuickLink;
use crate::tab_data::{Tab, TabId};
use crate::title::truncate_title;
use crate::widgets::{meteor_left, now_label, BatteryStatus};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getBatteryStatus() -> Result<JsValue, JsValue>;
}

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    pub visible: bool,
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    let style = if props.visible { "display: block;" } else { "display: none;" };

    html! {
        <div id="loader" class="loading-container" style={style}>
            <Spinner />
            if let Some(msg) = &props.message {
                <p class="loading-message">{msg}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TabListProps {
    pub tabs: Vec<Tab>,
    pub active_id: TabId,
    pub title_max_chars: usize,
    pub on_select: Callback<TabId>,
    pub on_close: Callback<TabId>,
}

/// Sidebar list of tabs
#[function_component(TabList)]
pub fn tab_list(props: &TabListProps) -> Html {
    html! {
        <ul id="tabList" class="tab-list">
            {for props.tabs.iter().map(|tab| {
                let class = if tab.id == props.active_id { "tab-item active" } else { "tab-item" };

                let on_select = {
                    let id = tab.id.clone();
                    props.on_select.reform(move |_: MouseEvent| id.clone())
                };
                let on_close = {
                    let id = tab.id.clone();
                    props.on_close.reform(move |e: MouseEvent| {
                        // keep the click from also selecting the tab
                        e.stop_propagation();
                        id.clone()
                    })
                };

                html! {
                    <li key={tab.id.clone()} class={class} title={tab.title.clone()} onclick={on_select}>
                        <span class="tab-title">{truncate_title(&tab.title, props.title_max_chars)}</span>
                        <button class="tab-close" onclick={on_close}>{"×"}</button>
                    </li>
                }
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct HomePlaceholderProps {
    pub links: Vec<QuickLink>,
    pub on_open: Callback<QuickLink>,
}

#[function_component(HomePlaceholder)]
pub fn home_placeholder(props: &HomePlaceholderProps) -> Html {
    html! {
        <div class="home-placeholder">
            <h1 class="home-title">{"Veil"}</h1>
            <p class="home-hint">{"Search or type a URL"}</p>
            if !props.links.is_empty() {
                <ul class="quick-links">
                    {for props.links.iter().map(|link| {
                        let onclick = {
                            let link = link.clone();
                            props.on_open.reform(move |e: MouseEvent| {
                                e.prevent_default();
                                link.clone()
                            })
                        };
                        html! {
                            <li key={link.url.clone()} class="quick-link">
                                <a href={link.url.clone()} onclick={onclick}>{&link.name}</a>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ClockProps {
    pub refresh_ms: u32,
}

#[function_component(Clock)]
pub fn clock(props: &ClockProps) -> Html {
    let label = use_state(now_label);

    {
        let label = label.clone();
        use_effect_with(props.refresh_ms, move |refresh_ms| {
            let interval = Interval::new(*refresh_ms, move || label.set(now_label()));
            move || drop(interval)
        });
    }

    html! {
        <span id="clock" class="widget-clock">{(*label).clone()}</span>
    }
}

#[function_component(Battery)]
pub fn battery() -> Html {
    let status = use_state(|| None::<BatteryStatus>);

    // Query battery once on mount
    {
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match getBatteryStatus().await {
                    Ok(js) if !js.is_null() && !js.is_undefined() => {
                        match serde_wasm_bindgen::from_value::<BatteryStatus>(js) {
                            Ok(battery) => status.set(Some(battery)),
                            Err(e) => log::warn!("Failed to parse battery status: {:?}", e),
                        }
                    }
                    Ok(_) => log::debug!("Battery API unavailable"),
                    Err(e) => log::warn!("Battery query failed: {:?}", e),
                }
            });
            || ()
        });
    }

    match *status {
        Some(battery) => html! {
            <span id="battery" class="widget-battery">{battery.label()}</span>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct MeteorProps {
    pub respawn_ms: u32,
}

/// Decorative meteor, respawned at a random position
#[function_component(Meteor)]
pub fn meteor(props: &MeteorProps) -> Html {
    // (generation, left) - a new generation remounts the element so its
    // animation restarts
    let spawn = use_state(|| (0u32, viewport_left()));

    {
        let spawn = spawn.clone();
        use_effect_with(props.respawn_ms, move |respawn_ms| {
            let mut generation = spawn.0;
            let interval = Interval::new(*respawn_ms, move || {
                generation = generation.wrapping_add(1);
                spawn.set((generation, viewport_left()));
            });
            move || drop(interval)
        });
    }

    let (generation, left) = *spawn;

    html! {
        <div id="meteorZone" class="meteor-zone">
            <div key={generation.to_string()} class="meteor" style={format!("left: {}px; top: 0px;", left)}></div>
        </div>
    }
}

fn viewport_left() -> f64 {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    meteor_left(width)
}
