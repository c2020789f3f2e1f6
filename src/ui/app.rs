/// Main Veil page: tab sidebar, address bar, frames and widgets

use std::rc::Rc;
use yew::prelude::*;
use web_sys::HtmlInputElement;
use gloo_timers::callback::Interval;
use patternfly_yew::prelude::*;
use crate::config::{AppConfig, QuickLink};
use crate::frame;
use crate::proxy::{ProxyService, UvProxy};
use crate::resolver::{quick_link_command, search_command};
use crate::session::{NavStep, SessionCommand, SessionState};
use crate::stealth::{self, Disguise};
use crate::storage::{load_stealth_flag, save_stealth_flag, LocalStore};
use crate::tab_data::TabId;
use crate::ui::components::{Battery, Clock, HomePlaceholder, Loader, Meteor, TabList};

impl Reducible for SessionState {
    type Action = SessionCommand;

    fn reduce(self: Rc<Self>, action: SessionCommand) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::load_from_document());
    let session = use_reducer(SessionState::new);
    let proxy = use_state(UvProxy::detect);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let input = use_state(String::new);
    let stealth_enabled = {
        let key = config.stealth_storage_key.clone();
        use_state(move || read_stealth_flag(&key))
    };

    // Poll until the proxy engine publishes its configuration
    {
        let proxy = proxy.clone();
        let poll_ms = config.proxy_poll_ms;
        use_effect_with(proxy.is_some(), move |ready| {
            let interval = (!*ready).then(|| {
                log::debug!("Waiting for proxy configuration");
                Interval::new(poll_ms, move || {
                    if let Some(found) = UvProxy::detect() {
                        log::info!("Proxy configuration available");
                        proxy.set(Some(found));
                    }
                })
            });
            move || drop(interval)
        });
    }

    // Re-enter stealth mode on startup when it was left enabled
    {
        let enabled = *stealth_enabled;
        let disguise = Disguise::from_config(&config);
        use_effect_with((), move |_| {
            if enabled {
                stealth::launch_in_browser(&disguise);
            }
            || ()
        });
    }

    // Keep the address bar in sync with the active tab
    {
        let input = input.clone();
        let current = session.active_tab().current_url().map(str::to_string);
        use_effect_with((session.active_id().to_string(), current), move |(_, current)| {
            input.set(current.clone().unwrap_or_default());
            || ()
        });
    }

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(field) = e.target_dyn_into::<HtmlInputElement>() {
                input.set(field.value());
            }
        })
    };

    let on_submit = {
        let session = session.clone();
        let config = config.clone();
        let proxy = proxy.clone();
        let input = input.clone();
        let loading = loading.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            match search_command(input.as_str(), &config, (*proxy).as_ref()) {
                Ok(Some(command)) => {
                    error.set(None);
                    loading.set(true);
                    session.dispatch(command);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Search failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        })
    };

    let on_quick_link = {
        let session = session.clone();
        let proxy = proxy.clone();
        let loading = loading.clone();
        let error = error.clone();

        Callback::from(move |link: QuickLink| {
            match quick_link_command(&link, (*proxy).as_ref()) {
                Ok(command) => {
                    error.set(None);
                    loading.set(true);
                    session.dispatch(command);
                }
                Err(e) => {
                    log::warn!("Could not open {}: {}", link.name, e);
                    error.set(Some(e.to_string()));
                }
            }
        })
    };

    let on_new_tab = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            session.dispatch(SessionCommand::CreateTab { url: None, title: None });
        })
    };

    let on_select = {
        let session = session.clone();
        Callback::from(move |id: TabId| session.dispatch(SessionCommand::SwitchTab(id)))
    };

    let on_close = {
        let session = session.clone();
        Callback::from(move |id: TabId| session.dispatch(SessionCommand::CloseTab(id)))
    };

    let on_step = {
        let session = session.clone();
        move |step: NavStep| {
            let session = session.clone();
            Callback::from(move |_: MouseEvent| {
                let tab = session.active_tab();
                let possible = match step {
                    NavStep::Back => tab.can_go_back(),
                    NavStep::Forward => tab.can_go_forward(),
                };
                if !possible {
                    return;
                }

                let id = tab.id.clone();
                let frame_id = tab.frame_id();
                session.dispatch(match step {
                    NavStep::Back => SessionCommand::Back(id),
                    NavStep::Forward => SessionCommand::Forward(id),
                });
                frame::step(&frame_id, step);
            })
        }
    };

    let on_reload = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            let tab = session.active_tab();
            if !tab.is_home() {
                frame::reload(&tab.frame_id());
            }
        })
    };

    let on_stealth_change = {
        let stealth_enabled = stealth_enabled.clone();
        let key = config.stealth_storage_key.clone();
        let disguise = Disguise::from_config(&config);

        Callback::from(move |e: Event| {
            let checked = e.target_unchecked_into::<HtmlInputElement>().checked();
            stealth_enabled.set(checked);
            write_stealth_flag(&key, checked);

            if checked {
                stealth::launch_in_browser(&disguise);
            }
        })
    };

    let on_frame_load = {
        let session = session.clone();
        let loading = loading.clone();
        move |tab_id: TabId, frame_id: String| {
            let session = session.clone();
            let loading = loading.clone();
            Callback::from(move |_: Event| {
                loading.set(false);
                if let Some(title) = frame::document_title(&frame_id) {
                    session.dispatch(SessionCommand::SetTitle { id: tab_id.clone(), title });
                }
            })
        }
    };

    let active = session.active_tab();

    html! {
        <>
            <Loader
                visible={loader_message(*loading, proxy.is_some()).is_some()}
                message={loader_message(*loading, proxy.is_some()).map(str::to_string)}
            />

            <div id="content" class="veil-shell">
                <Meteor respawn_ms={config.meteor_respawn_ms} />

                <aside class="sidebar">
                    <Button onclick={on_new_tab} variant={ButtonVariant::Secondary} block={true}>
                        {"+ New Tab"}
                    </Button>

                    <h2 class="sidebar-title">{format!("Tabs ({})", session.len())}</h2>

                    <TabList
                        tabs={session.tabs().to_vec()}
                        active_id={session.active_id().to_string()}
                        title_max_chars={config.title_max_chars}
                        on_select={on_select}
                        on_close={on_close}
                    />

                    <label class="stealth-toggle">
                        <input
                            type="checkbox"
                            id="blankMode"
                            checked={*stealth_enabled}
                            onchange={on_stealth_change}
                        />
                        {" Stealth mode"}
                    </label>

                    <div class="widgets">
                        <Clock refresh_ms={config.clock_refresh_ms} />
                        <Battery />
                    </div>
                </aside>

                <main class="main-pane">
                    <div class="toolbar">
                        <button id="backBtn" class="nav-button" disabled={!active.can_go_back()} onclick={on_step(NavStep::Back)}>
                            {"←"}
                        </button>
                        <button id="forwardBtn" class="nav-button" disabled={!active.can_go_forward()} onclick={on_step(NavStep::Forward)}>
                            {"→"}
                        </button>
                        <button id="reloadBtn" class="nav-button" disabled={active.is_home()} onclick={on_reload}>
                            {"⟳"}
                        </button>

                        <form id="searchForm" class="search-form" onsubmit={on_submit}>
                            <input
                                id="urlInput"
                                type="text"
                                placeholder="Search or enter a URL"
                                value={(*input).clone()}
                                oninput={on_input}
                            />
                        </form>
                    </div>

                    if let Some(err) = (*error).clone() {
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err}
                        </Alert>
                    }

                    <div class="frames">
                        {for session.tabs().iter().map(|tab| {
                            let style = if tab.id == session.active_id() { "display: block;" } else { "display: none;" };

                            let body = match (&tab.url, &*proxy) {
                                (None, _) => html! {
                                    <HomePlaceholder links={config.quick_links.clone()} on_open={on_quick_link.clone()} />
                                },
                                (Some(url), Some(proxy)) => match proxy.frame_src(url) {
                                    Ok(src) => html! {
                                        <iframe
                                            id={tab.frame_id()}
                                            class="tab-frame"
                                            src={src}
                                            onload={on_frame_load(tab.id.clone(), tab.frame_id())}
                                        ></iframe>
                                    },
                                    Err(e) => html! { <p class="frame-error">{e.to_string()}</p> },
                                },
                                (Some(_), None) => html! { <Spinner /> },
                            };

                            html! {
                                <div key={tab.id.clone()} class="tab-content" style={style}>
                                    {body}
                                </div>
                            }
                        })}
                    </div>
                </main>
            </div>
        </>
    }
}

/// Loader text, or `None` when the loader should be hidden
fn loader_message(loading: bool, proxy_ready: bool) -> Option<&'static str> {
    if !proxy_ready {
        Some("Connecting to proxy...")
    } else if loading {
        Some("Loading...")
    } else {
        None
    }
}

fn read_stealth_flag(key: &str) -> bool {
    match LocalStore::open() {
        Ok(store) => load_stealth_flag(&store, key),
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    }
}

fn write_stealth_flag(key: &str, enabled: bool) {
    let result = LocalStore::open().and_then(|mut store| save_stealth_flag(&mut store, key, enabled));
    if let Err(e) = result {
        log::warn!("Failed to persist stealth flag: {}", e);
    }
}
