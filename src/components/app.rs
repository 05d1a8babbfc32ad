use super::{
    game_over_overlay::GameOverOverlay, intro_overlay::IntroOverlay, play_view::PlayView, round_overlay::RoundOverlay,
    stats_panel::StatsPanel, time_display::TimeDisplay,
};
use crate::catalog::default_rounds;
use crate::config::GameConfig;
use crate::engine::{Cue, GameAction, GameEvent, GameState, Phase};
use crate::model::{Outcome, Point, Size};
use crate::util::{describe_js, now_ms, viewport_size};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{CustomEvent, CustomEventInit, HtmlAudioElement, HtmlElement};
use yew::prelude::*;

fn load_config() -> GameConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("game-config"))
        .and_then(|el| el.text_content());
    match raw {
        None => {
            log::info!("no #game-config block, using defaults");
            GameConfig::default()
        }
        Some(raw) => GameConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("ignoring game config: {e}");
            GameConfig::default()
        }),
    }
}

fn cue_sound(cue: Cue) -> Option<&'static str> {
    match cue {
        Cue::Place => Some("audio/place.mp3"),
        Cue::WrongCell => Some("audio/wrong.mp3"),
        Cue::Hit => Some("audio/hit.mp3"),
        Cue::Win => Some("audio/win.mp3"),
        Cue::Fail => Some("audio/fail.mp3"),
        Cue::Confetti => None,
    }
}

fn play_cue(cue: Cue) {
    if cue == Cue::Confetti {
        fire_confetti();
        return;
    }
    let Some(src) = cue_sound(cue) else { return };
    match HtmlAudioElement::new_with_src(src).and_then(|audio| audio.play()) {
        Ok(promise) => spawn_local(async move {
            // Autoplay policies reject until the page had a user gesture.
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("cue {src} not played: {}", describe_js(&e));
            }
        }),
        Err(e) => log::warn!("cue {src}: {}", describe_js(&e)),
    }
}

fn fire_confetti() {
    let Some(win) = web_sys::window() else { return };
    match Reflect::get(&win, &JsValue::from_str("confetti")).map(|f| f.dyn_into::<Function>()) {
        Ok(Ok(confetti)) => {
            if let Err(e) = confetti.call0(&win) {
                log::warn!("confetti failed: {}", describe_js(&e));
            }
        }
        _ => log::debug!("no confetti on this page"),
    }
}

/// `gameStarted` / `gameEnded` for whatever embeds the game.
fn signal_session(name: &str, outcome: Option<Outcome>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    let init = CustomEventInit::new();
    if let Some(outcome) = outcome {
        let detail = serde_json::to_string(&outcome)
            .ok()
            .and_then(|raw| js_sys::JSON::parse(&raw).ok())
            .unwrap_or(JsValue::NULL);
        init.set_detail(&detail);
    }
    match CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(event) => {
            let _ = document.dispatch_event(&event);
        }
        Err(e) => log::warn!("{name}: {}", describe_js(&e)),
    }
}

/// Air taps and Space press whatever is under the pointer.
fn click_at(p: Point) {
    let target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.element_from_point(p.x as f32, p.y as f32))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(el) = target {
        el.click();
    }
}

fn handle_event(event: &GameEvent) {
    match event {
        GameEvent::GameStarted => signal_session("gameStarted", None),
        GameEvent::GameEnded(outcome) => signal_session("gameEnded", Some(*outcome)),
        GameEvent::Activation(p) => click_at(*p),
        GameEvent::Cue(cue) => play_cue(*cue),
        other => log::debug!("{other:?}"),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(|| {
        let (w, h) = viewport_size();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        GameState::new(load_config(), default_rounds(), seed, Size::new(w, h))
    });

    // Drain the outbox once per new version.
    {
        let seen = use_mut_ref(|| 0u64);
        let state = state.clone();
        use_effect_with(state.version, move |_| {
            let mut last = *seen.borrow();
            for (seq, event) in state.events_after(last) {
                handle_event(event);
                last = *seq;
            }
            *seen.borrow_mut() = last;
            || ()
        });
    }

    let on_start = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(GameAction::Start { now: now_ms() }))
    };
    let on_restart = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(GameAction::Restart { now: now_ms() }))
    };

    let board = state.board.as_ref();
    let interlude = match &state.phase {
        Phase::Interlude { round, fact } => Some((round.clone(), fact.clone())),
        _ => None,
    };

    html! {
        <div style="position:fixed; inset:0; overflow:hidden; background:#0d1117; color:#c9d1d9; font-family:system-ui, sans-serif;">
            <PlayView state={state.clone()} />
            <TimeDisplay secs={state.display_secs} running={state.is_running()} />
            <StatsPanel
                score={state.score}
                progress={state.progress()}
                placed={board.map_or(0, |b| b.placed)}
                total={board.map_or(state.dims().len(), |b| b.total())}
                hits={state.hazards.hits}
                hit_limit={state.hazards.hit_limit()}
                round_label={state.round.as_ref().map(|r| r.label.clone())}
            />
            <IntroOverlay show={state.phase == Phase::Menu} hand_visible={state.hand_visible} start={on_start} />
            <RoundOverlay interlude={interlude} />
            <GameOverOverlay
                phase={state.phase.clone()}
                time_secs={state.display_secs}
                score={state.score}
                rounds_completed={state.rounds_completed}
                restart={on_restart}
            />
        </div>
    }
}
