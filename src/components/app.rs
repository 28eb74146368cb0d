use super::{
    alt_routes::AltRoutes,
    location_panel::{LocationPanel, LocationStatus},
    map_view::MapView,
    network_panel::NetworkPanel,
    notification::Notification,
    suggestions_panel::SuggestionsPanel,
    time_controls::TimeControls,
    traffic_chart::TrafficChart,
    weather_tab::WeatherTab,
};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, LocationError};
use crate::location::{self, LocationWatch};
use crate::model::{ActionKind, LocationFix, Tab};
use crate::network::{self, EffectiveType, NetworkReport, NetworkSample};
use crate::state::{Clock, FeedAction, RevealSchedule, SuggestionFeed, SystemClock};
use crate::suggest;
use crate::util::{self, Interval, Listener, format_hour_label, fractional_hour};
use crate::weather::{WeatherReport, congestion_curve, mock_weather};
use chrono::Timelike;
use rand::SeedableRng;
use rand::rngs::StdRng;
use yew::prelude::*;

/// Check delay folded into the simulated latency.
const CHECK_MS: u32 = 50;
const WEATHER_LOAD_MS: u32 = 500;
const REFRESH_SETTLE_MS: u32 = 1000;

#[derive(Clone, Debug, PartialEq)]
struct SuggestRequest {
    fix: Option<LocationFix>,
    detecting: bool,
    hour: u8,
    link: EffectiveType,
}

fn location_failed(err: &LocationError) -> LocationStatus {
    LocationStatus::Failed(format!("Error getting location: {}", err).into())
}

#[function_component(App)]
pub fn app() -> Html {
    let cfg = use_memo((), |_| DashboardConfig::from_document());
    let rng = use_mut_ref(StdRng::from_entropy);
    let now = use_state(|| SystemClock.now());
    let hour = use_state(|| cfg.default_hour);
    let tab = use_state(|| Tab::Suggestions);
    let notice = use_state(|| None::<AttrValue>);
    let notice_timer = use_mut_ref(|| None::<i32>);
    let location = use_state(|| LocationStatus::Detecting);
    let fix_ref = use_mut_ref(|| None::<LocationFix>);
    let network = use_state(|| None::<NetworkReport>);
    let network_error = use_state(|| None::<AttrValue>);
    let link = use_state(|| EffectiveType::Unknown);
    let checking = use_state(|| true);
    let refreshing = use_state(|| false);
    let refresh_nonce = use_state(|| 0u32);
    let feed = use_reducer(SuggestionFeed::default);
    let schedule = use_mut_ref(RevealSchedule::default);
    let weather = use_state(|| None::<WeatherReport>);
    let weather_at_ms = use_mut_ref(|| None::<i64>);
    let curve = {
        let rng = rng.clone();
        use_memo((), move |_| congestion_curve(&mut *rng.borrow_mut()))
    };

    let show_notice = {
        let notice = notice.clone();
        let notice_timer = notice_timer.clone();
        let notice_ms = cfg.notice_ms;
        Callback::from(move |msg: String| {
            if let Some(prev) = notice_timer.borrow_mut().take() {
                util::clear_timeout(prev);
            }
            notice.set(Some(msg.into()));
            let notice = notice.clone();
            *notice_timer.borrow_mut() = util::set_timeout(notice_ms, move || notice.set(None));
        })
    };

    let request_suggestions = {
        let feed = feed.clone();
        let schedule = schedule.clone();
        let rng = rng.clone();
        let cfg = cfg.clone();
        Callback::from(move |req: SuggestRequest| {
            let generation = schedule.borrow_mut().begin();
            let Some(fix) = req.fix else {
                let reason = if req.detecting {
                    "Waiting for your location..."
                } else {
                    "Location required for suggestions"
                };
                feed.dispatch(FeedAction::Unavailable {
                    generation,
                    reason: reason.to_string(),
                });
                return;
            };
            feed.dispatch(FeedAction::Begin { generation });
            let is_weekend = SystemClock.time_context().is_weekend;
            let options = suggest::generate(
                fix.latitude,
                fix.longitude,
                req.hour,
                is_weekend,
                req.link,
                &mut *rng.borrow_mut(),
            );
            tracing::info!(generation, count = options.len(), hour = req.hour, "suggestions computed");
            let steps = schedule.borrow().plan(generation, options, cfg.stagger_ms);
            let feed = feed.clone();
            let schedule = schedule.clone();
            util::set_timeout(cfg.compute_delay_ms, move || {
                if !schedule.borrow().is_current(generation) {
                    tracing::debug!(generation, "suggestions superseded before reveal");
                    return;
                }
                feed.dispatch(FeedAction::Computed { generation });
                for step in steps {
                    let feed = feed.clone();
                    let schedule = schedule.clone();
                    util::set_timeout(step.delay_ms, move || {
                        if schedule.borrow().is_current(step.generation) {
                            feed.dispatch(FeedAction::Reveal(step));
                        }
                    });
                }
            });
        })
    };

    let load_weather = {
        let weather = weather.clone();
        let weather_at_ms = weather_at_ms.clone();
        let fix_ref = fix_ref.clone();
        let rng = rng.clone();
        Callback::from(move |_: ()| {
            if fix_ref.borrow().is_none() {
                weather.set(None);
                return;
            }
            let weather = weather.clone();
            let weather_at_ms = weather_at_ms.clone();
            let rng = rng.clone();
            util::set_timeout(WEATHER_LOAD_MS, move || {
                let hour = SystemClock.now().hour() as u8;
                weather.set(Some(mock_weather(hour, &mut *rng.borrow_mut())));
                *weather_at_ms.borrow_mut() = Some(SystemClock.now_ms());
            });
        })
    };

    let check_network = {
        let network = network.clone();
        let network_error = network_error.clone();
        let link = link.clone();
        let checking = checking.clone();
        let rng = rng.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |_: ()| {
            checking.set(true);
            match network::read_connection() {
                Ok(info) => {
                    let network = network.clone();
                    let network_error = network_error.clone();
                    let link = link.clone();
                    let checking = checking.clone();
                    let rng = rng.clone();
                    util::set_timeout(CHECK_MS, move || {
                        let latency_ms = network::simulated_latency_ms(
                            info.effective_type,
                            CHECK_MS as f64,
                            &mut *rng.borrow_mut(),
                        );
                        let report = NetworkReport::from_sample(NetworkSample {
                            effective_type: info.effective_type,
                            downlink_mbps: info.downlink_mbps,
                            latency_ms,
                        });
                        tracing::info!(class = ?report.class, latency_ms, "network checked");
                        network.set(Some(report));
                        network_error.set(None);
                        link.set(info.effective_type);
                        checking.set(false);
                    });
                }
                Err(e) => {
                    let err = DashboardError::from(e.clone());
                    tracing::warn!(%err, kind = ?err.kind(), "network check failed");
                    network.set(None);
                    link.set(network::fallback_link(&e));
                    network_error.set(Some(err.notice().into()));
                    checking.set(false);
                    show_notice.emit(err.notice().to_string());
                }
            }
        })
    };

    let apply_fix = {
        let location = location.clone();
        let fix_ref = fix_ref.clone();
        Callback::from(move |fix: LocationFix| {
            tracing::info!(lat = fix.latitude, lng = fix.longitude, accuracy = fix.accuracy_m, "location fix");
            *fix_ref.borrow_mut() = Some(fix);
            location.set(LocationStatus::Fixed(fix));
        })
    };

    // Mount: location fix + watch, network check, connection change events, clock
    {
        let cfg = cfg.clone();
        let apply_fix = apply_fix.clone();
        let location = location.clone();
        let fix_ref = fix_ref.clone();
        let show_notice = show_notice.clone();
        let check_network = check_network.clone();
        let load_weather = load_weather.clone();
        let now = now.clone();
        let weather_at_ms = weather_at_ms.clone();
        use_effect_with((), move |_| {
            let on_error = {
                let location = location.clone();
                let show_notice = show_notice.clone();
                move |e: LocationError| {
                    location.set(location_failed(&e));
                    let err = DashboardError::Location(e);
                    tracing::warn!(%err, kind = ?err.kind(), "location unavailable");
                    show_notice.emit(err.notice().to_string());
                }
            };
            let on_fix = {
                let apply_fix = apply_fix.clone();
                move |fix| apply_fix.emit(fix)
            };
            if let Err(e) = location::request_fix(cfg.location_timeout_ms, on_fix, on_error.clone()) {
                on_error(e);
            }

            let watch = LocationWatch::start(
                cfg.watch_max_age_ms,
                {
                    let apply_fix = apply_fix.clone();
                    let fix_ref = fix_ref.clone();
                    let show_notice = show_notice.clone();
                    move |fix: LocationFix| {
                        let prev = *fix_ref.borrow();
                        match prev {
                            Some(prev) if !fix.moved_from(&prev) => {}
                            Some(_) => {
                                apply_fix.emit(fix);
                                show_notice.emit("Your location has been updated".to_string());
                            }
                            None => apply_fix.emit(fix),
                        }
                    }
                },
                {
                    let fix_ref = fix_ref.clone();
                    let show_notice = show_notice.clone();
                    move |e: LocationError| {
                        tracing::debug!(err = %e, "location watch error");
                        if fix_ref.borrow().is_some() {
                            show_notice.emit("Error tracking location".to_string());
                        }
                    }
                },
            )
            .map_err(|e| tracing::warn!(err = %e, "location watch not started"))
            .ok();

            check_network.emit(());
            let change_listener = network::connection_target().map(|target| {
                let check_network = check_network.clone();
                let show_notice = show_notice.clone();
                Listener::new(&target, "change", move |_e: web_sys::Event| {
                    let label = network::read_connection()
                        .map(|c| c.effective_type.label())
                        .unwrap_or("Unknown");
                    show_notice.emit(format!("Network changed to {}", label));
                    check_network.emit(());
                })
            });

            let weather_refresh_ms = cfg.weather_refresh_ms as i64;
            let clock_tick = Interval::start(cfg.clock_refresh_ms, move || {
                now.set(SystemClock.now());
                let stale = weather_at_ms
                    .borrow()
                    .is_some_and(|at| SystemClock.now_ms() - at > weather_refresh_ms);
                if stale {
                    load_weather.emit(());
                }
            });

            move || {
                drop(watch);
                drop(change_listener);
                drop(clock_tick);
            }
        });
    }

    // Re-request whenever location, departure hour, link type or refresh changes
    {
        let fix = location.fix();
        let detecting = *location == LocationStatus::Detecting;
        let request_suggestions = request_suggestions.clone();
        use_effect_with(
            (fix, detecting, *hour, *link, *refresh_nonce),
            move |(fix, detecting, hour, link, _)| {
                request_suggestions.emit(SuggestRequest {
                    fix: *fix,
                    detecting: *detecting,
                    hour: *hour,
                    link: *link,
                });
                || ()
            },
        );
    }

    // First fix loads the weather
    {
        let has_fix = location.fix().is_some();
        let load_weather = load_weather.clone();
        use_effect_with(has_fix, move |has_fix| {
            if *has_fix {
                load_weather.emit(());
            }
            || ()
        });
    }

    let on_refresh = {
        let refreshing = refreshing.clone();
        let refresh_nonce = refresh_nonce.clone();
        let check_network = check_network.clone();
        let load_weather = load_weather.clone();
        let apply_fix = apply_fix.clone();
        let show_notice = show_notice.clone();
        let timeout_ms = cfg.location_timeout_ms;
        Callback::from(move |_| {
            refreshing.set(true);
            check_network.emit(());
            let on_fix = {
                let refreshing = refreshing.clone();
                let refresh_nonce = refresh_nonce.clone();
                let apply_fix = apply_fix.clone();
                let load_weather = load_weather.clone();
                let show_notice = show_notice.clone();
                move |fix| {
                    apply_fix.emit(fix);
                    refresh_nonce.set(refresh_nonce.wrapping_add(1));
                    load_weather.emit(());
                    util::set_timeout(REFRESH_SETTLE_MS, move || {
                        refreshing.set(false);
                        show_notice.emit("Data refreshed successfully".to_string());
                    });
                }
            };
            let on_error = {
                let refreshing = refreshing.clone();
                let show_notice = show_notice.clone();
                move |e: LocationError| {
                    tracing::warn!(err = %e, "refresh failed");
                    refreshing.set(false);
                    show_notice.emit("Failed to refresh location".to_string());
                }
            };
            if let Err(e) = location::request_fix(timeout_ms, on_fix, on_error.clone()) {
                on_error(e);
            }
        })
    };

    let on_slider = {
        let hour = hour.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |h: u8| {
            hour.set(h);
            show_notice.emit(format!("Updated to {} departure", format_hour_label(h)));
        })
    };
    let on_departure = {
        let hour = hour.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |raw: String| match util::parse_time_input(&raw) {
            Some(h) => {
                hour.set(h);
                show_notice.emit(format!("Updated to {} departure", raw));
            }
            None => tracing::debug!(%raw, "ignoring unparsable departure time"),
        })
    };

    let on_select = {
        let tab = tab.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |action: ActionKind| {
            let effect = action.effect();
            tracing::info!(?action, "suggestion selected");
            show_notice.emit(effect.notice.to_string());
            if let Some(t) = effect.switch_to {
                tab.set(t);
            }
        })
    };
    let on_route = {
        let show_notice = show_notice.clone();
        Callback::from(move |title: &'static str| {
            tracing::info!(route = title, "alternative route selected");
            show_notice.emit("Route selected".to_string());
        })
    };
    let on_weather_refresh = {
        let load_weather = load_weather.clone();
        let show_notice = show_notice.clone();
        Callback::from(move |_| {
            show_notice.emit("Weather data refreshed".to_string());
            load_weather.emit(());
        })
    };

    let has_location = location.fix().is_some();
    let tab_bar = Tab::ALL.iter().map(|t| {
        let t = *t;
        let active = *tab == t;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_| tab.set(t))
        };
        let style = if active {
            "padding:6px 12px; border:none; border-bottom:2px solid #4361ee; background:none; font-weight:600; cursor:pointer;"
        } else {
            "padding:6px 12px; border:none; border-bottom:2px solid transparent; background:none; color:#6c757d; cursor:pointer;"
        };
        html! {<button {onclick} {style}>{ t.label() }</button>}
    });
    let tab_content = match *tab {
        Tab::Suggestions => html! {<SuggestionsPanel feed={(*feed).clone()} on_select={on_select} />},
        Tab::Traffic => html! {<TrafficChart curve={(*curve).clone()} now_hour={fractional_hour(&now)} />},
        Tab::Weather => html! {<WeatherTab report={(*weather).clone()} {has_location} on_refresh={on_weather_refresh} />},
        Tab::AltRoutes => html! {<AltRoutes {has_location} on_select={on_route} />},
    };

    html! {<div style="font-family:system-ui, sans-serif; background:#f1f3f5; color:#212529; min-height:100vh; padding:16px; box-sizing:border-box;">
        <header id="top-bar" style="margin-bottom:12px;">
            <h1 style="margin:0; font-size:22px;">{"Smart Commute Dashboard"}</h1>
        </header>
        <div style="display:grid; grid-template-columns:minmax(0, 2fr) minmax(260px, 1fr); gap:16px; align-items:start;">
            <main style="display:flex; flex-direction:column; gap:12px;">
                <MapView has_fix={has_location} frame_interval_ms={cfg.frame_interval_ms} on_notice={show_notice.clone()} />
                <nav style="display:flex; gap:4px; border-bottom:1px solid #dee2e6;">{ for tab_bar }</nav>
                <div>{ tab_content }</div>
            </main>
            <aside style="display:flex; flex-direction:column; gap:12px;">
                <TimeControls now={*now} hour={*hour} refreshing={*refreshing} {on_slider} {on_departure} {on_refresh} />
                <LocationPanel status={(*location).clone()} />
                <NetworkPanel report={(*network).clone()} checking={*checking} error={(*network_error).clone()} />
            </aside>
        </div>
        <Notification message={(*notice).clone()} />
    </div>}
}
