/// Popup UI for Tab Corral
///
/// Renders the census snapshot as stats tiles plus a ranked domain list and
/// wires the two consolidation actions. The snapshot is plain component
/// state handed to the action handlers; nothing ambient survives a refresh.
use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::browser;
use crate::census::{self, Snapshot};
use crate::operations::{self, GroupOutcome};
use crate::tab_data::{BackgroundCommand, TabInfo};

use super::components::{MessageBanner, MessageKind, StatTile};

/// Auto-refresh period while the popup stays open.
const REFRESH_INTERVAL_MS: i32 = 30_000;
/// Delay before re-running the census after a group action, letting host
/// window state settle.
const SETTLE_DELAY_MS: i32 = 1_000;
/// Lifetime of a feedback banner.
const MESSAGE_DISMISS_MS: i32 = 5_000;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

#[derive(Clone, PartialEq)]
struct Banner {
    kind: MessageKind,
    text: String,
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let snapshot = use_state(|| None::<Snapshot>);
    let banner = use_state(|| None::<Banner>);
    let banner_seq = use_mut_ref(|| 0u64);
    let refresh_in_flight = use_mut_ref(|| false);

    // Rebuild the snapshot. Requests arriving while one census is running
    // are dropped so overlapping refreshes cannot race the display.
    let refresh = {
        let state = state.clone();
        let snapshot = snapshot.clone();
        let refresh_in_flight = refresh_in_flight.clone();

        Callback::from(move |_: ()| {
            if *refresh_in_flight.borrow() {
                log::debug!("Refresh already in flight, ignoring");
                return;
            }
            *refresh_in_flight.borrow_mut() = true;

            let state = state.clone();
            let snapshot = snapshot.clone();
            let refresh_in_flight = refresh_in_flight.clone();

            state.set(AppState::Loading);

            spawn_local(async move {
                match census::compute_snapshot().await {
                    Ok(fresh) => {
                        snapshot.set(Some(fresh));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(e));
                    }
                }
                *refresh_in_flight.borrow_mut() = false;
            });
        })
    };

    // Census on popup open, then periodically while it stays visible
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());

            let tick = refresh.clone();
            let closure = Closure::wrap(Box::new(move || tick.emit(())) as Box<dyn Fn()>);
            let handle = web_sys::window().and_then(|window| {
                window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        REFRESH_INTERVAL_MS,
                    )
                    .ok()
            });

            move || {
                if let (Some(window), Some(handle)) = (web_sys::window(), handle) {
                    window.clear_interval_with_handle(handle);
                }
                drop(closure);
            }
        });
    }

    // Show a banner and schedule its dismissal; a newer banner cancels the
    // older timer by bumping the sequence number
    let show_banner = {
        let banner = banner.clone();
        let banner_seq = banner_seq.clone();

        Callback::from(move |(kind, text): (MessageKind, String)| {
            let seq = {
                let mut current = banner_seq.borrow_mut();
                *current += 1;
                *current
            };
            banner.set(Some(Banner { kind, text }));

            let banner = banner.clone();
            let banner_seq = banner_seq.clone();
            after_delay(MESSAGE_DISMISS_MS, move || {
                if *banner_seq.borrow() == seq {
                    banner.set(None);
                }
            });
        })
    };

    let on_refresh = {
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let is_busy = matches!(*state, AppState::Loading);

    html! {
        <div class="popup">
            <div class="popup-header">
                <h1 class="popup-title">{"Tab Corral"}</h1>
                <Button onclick={on_refresh} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"Refresh"}
                </Button>
            </div>

            if let Some(current) = &*banner {
                <MessageBanner kind={current.kind} text={current.text.clone()} />
            }

            {match &*state {
                AppState::Loading if snapshot.is_none() => html! {
                    <div class="loading-center">
                        <Spinner />
                        <p class="loading-text">{"Counting tabs..."}</p>
                    </div>
                },
                AppState::Error(e) => html! {
                    <Alert r#type={AlertType::Danger} title={"Could not read tabs"} inline={true}>
                        {e.clone()}
                    </Alert>
                },
                _ => html! {},
            }}

            if let Some(current) = &*snapshot {
                {render_snapshot(current, is_busy, &show_banner, &refresh)}
            }

            <p class="popup-footer">{"Tab Corral v0.1.0"}</p>
        </div>
    }
}

fn render_snapshot(
    snapshot: &Snapshot,
    is_busy: bool,
    show_banner: &Callback<(MessageKind, String)>,
    refresh: &Callback<()>,
) -> Html {
    html! {
        <>
            <div class="stats-grid">
                <StatTile label="Windows" value={snapshot.total_windows.to_string()} />
                <StatTile label="Tabs" value={snapshot.total_tabs.to_string()} />
                <StatTile label="Domains" value={snapshot.unique_domains().to_string()} />
                <StatTile label="Tabs/window" value={format!("{:.1}", snapshot.avg_tabs_per_window())} />
            </div>

            <div class="domain-list">
                if snapshot.top_domains.is_empty() {
                    <p class="empty-state">{"No tabs found"}</p>
                } else {
                    {for snapshot.top_domains.iter().enumerate().map(|(rank, (domain, count))| {
                        render_domain_row(snapshot, rank, domain, *count, is_busy, show_banner, refresh)
                    })}
                }
            </div>
        </>
    }
}

fn render_domain_row(
    snapshot: &Snapshot,
    rank: usize,
    domain: &str,
    count: usize,
    is_busy: bool,
    show_banner: &Callback<(MessageKind, String)>,
    refresh: &Callback<()>,
) -> Html {
    let windows_spanned = snapshot.window_ids_for(domain).len();
    let domain_tabs: Vec<TabInfo> = snapshot
        .tabs_by_domain
        .get(domain)
        .cloned()
        .unwrap_or_default();

    let on_new_window = {
        let domain_tabs = domain_tabs.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("Requesting new window for {} tabs", domain_tabs.len());
            browser::send_background_command(&BackgroundCommand::create_window_with_tabs(
                domain_tabs.clone(),
            ));
        })
    };

    let on_group = {
        let domain = domain.to_string();
        let domain_tabs = domain_tabs.clone();
        let show_banner = show_banner.clone();
        let refresh = refresh.clone();

        Callback::from(move |_: MouseEvent| {
            let domain = domain.clone();
            let domain_tabs = domain_tabs.clone();
            let show_banner = show_banner.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match operations::group_domain_into_window(&domain_tabs).await {
                    GroupOutcome::OnlyOneTab => {
                        show_banner.emit((
                            MessageKind::Error,
                            "Only one tab found for this domain".to_string(),
                        ));
                    }
                    GroupOutcome::AlreadyConsolidated => {
                        show_banner.emit((
                            MessageKind::Error,
                            "All tabs are already in the same window".to_string(),
                        ));
                    }
                    GroupOutcome::Done { moved, failed, .. } => {
                        if failed == 0 {
                            show_banner.emit((
                                MessageKind::Success,
                                format!("Moved {} tab(s) for {} to the same window", moved, domain),
                            ));
                        } else {
                            show_banner.emit((
                                MessageKind::Error,
                                format!(
                                    "Moved {} tab(s) for {}; {} could not be moved",
                                    moved, domain, failed
                                ),
                            ));
                        }
                        after_delay(SETTLE_DELAY_MS, move || refresh.emit(()));
                    }
                }
            });
        })
    };

    html! {
        <div class="domain-row" key={domain.to_string()}>
            <div class="domain-info">
                <span class="domain-rank">{format!("{}.", rank + 1)}</span>
                <span class="domain-name" title={format!("{} ({} windows)", domain, windows_spanned)}>
                    {domain}
                </span>
            </div>
            <div class="domain-actions">
                if count > 1 {
                    <Button onclick={on_new_window} disabled={is_busy} variant={ButtonVariant::Secondary}>
                        {"New"}
                    </Button>
                    if windows_spanned > 1 {
                        <Button onclick={on_group} disabled={is_busy} variant={ButtonVariant::Secondary}>
                            {"Group"}
                        </Button>
                    }
                } else {
                    <small class="window-indicator">{format!("{}w", windows_spanned)}</small>
                }
                <span class="domain-count">{count}</span>
            </div>
        </div>
    }
}

/// Run `f` once after `delay_ms` on the host event loop.
fn after_delay(delay_ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms,
        )
        .is_err()
    {
        log::warn!("Failed to schedule delayed callback");
    }
}
