use super::{board_view::BoardView, hazard_layer::HazardLayer, pointer::Pointer, warning_toast::WarningToast};
use crate::engine::{GameAction, GameState};
use crate::input::{FrameGate, HandSample};
use crate::recognizer::{HandRecognizer, start_camera};
use crate::util::{now_ms, viewport_size};
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlVideoElement, KeyboardEvent, TouchEvent};
use yew::prelude::*;

/// Timed tasks keep running even when the camera stalls.
const PUMP_MS: u32 = 100;
/// `HAVE_CURRENT_DATA`
const VIDEO_READY: u16 = 2;

#[derive(Properties, PartialEq, Clone)]
pub struct PlayViewProps {
    pub state: UseReducerHandle<GameState>,
}

#[function_component(PlayView)]
pub fn play_view(props: &PlayViewProps) -> Html {
    let video_ref = use_node_ref();
    let state_ref = use_mut_ref(|| props.state.clone());
    let recognizer = use_mut_ref(|| None::<HandRecognizer>);

    // Closures below always dispatch through the latest handle.
    {
        let state_ref = state_ref.clone();
        let current = props.state.clone();
        use_effect_with(props.state.version, move |_| {
            *state_ref.borrow_mut() = current;
            || ()
        });
    }

    {
        let video_ref = video_ref.clone();
        let state_ref = state_ref.clone();
        let recognizer = recognizer.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let video = video_ref.cast::<HtmlVideoElement>();

            let (w, h) = viewport_size();
            state_ref.borrow().dispatch(GameAction::Resize { width: w, height: h });

            // Camera, then model. Either failing leaves the game unavailable.
            if let Some(video) = video.clone() {
                let state_ref = state_ref.clone();
                let recognizer = recognizer.clone();
                spawn_local(async move {
                    let ready = match start_camera(&video).await {
                        Ok(()) => HandRecognizer::create().await,
                        Err(e) => Err(e),
                    };
                    match ready {
                        Ok(r) => *recognizer.borrow_mut() = Some(r),
                        Err(e) => {
                            log::error!("{e}");
                            state_ref.borrow().dispatch(GameAction::RecognizerFailed { reason: e.to_string() });
                        }
                    }
                });
            } else {
                log::error!("video element missing");
            }

            // RAF loop: one recognizer call per new video frame.
            let raf_id = Rc::new(RefCell::new(None::<i32>));
            let raf_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let raf_cell_loop = raf_cell.clone();
                let window_loop = window.clone();
                let state_ref = state_ref.clone();
                let recognizer = recognizer.clone();
                let mut gate = FrameGate::default();
                *raf_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
                    if let (Some(video), Some(rec)) = (video.as_ref(), recognizer.borrow().as_ref()) {
                        if video.ready_state() >= VIDEO_READY && gate.admit(video.current_time() * 1000.0) {
                            let now = now_ms();
                            let sample = rec.recognize(video, now).unwrap_or_else(|e| {
                                log::debug!("{e}");
                                HandSample::default()
                            });
                            state_ref.borrow().dispatch(GameAction::Frame { sample, now });
                        }
                    }
                    if let Some(cb) = raf_cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            *raf_id_loop.borrow_mut() = Some(id);
                        }
                    }
                }) as Box<dyn FnMut(f64)>));
                if let Some(cb) = raf_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        *raf_id.borrow_mut() = Some(id);
                    }
                }
            }

            let pump = {
                let state_ref = state_ref.clone();
                Interval::new(PUMP_MS, move || {
                    state_ref.borrow().dispatch(GameAction::Advance { now: now_ms() });
                })
            };

            let keydown_cb = {
                let state_ref = state_ref.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let now = now_ms();
                    if e.code() == "Space" || e.key() == " " {
                        e.prevent_default();
                        state_ref.borrow().dispatch(GameAction::Key { now });
                    } else {
                        state_ref.borrow().dispatch(GameAction::Interaction { now });
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_cb = {
                let state_ref = state_ref.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    state_ref.borrow().dispatch(GameAction::Touch { now: now_ms() });
                }) as Box<dyn FnMut(_)>)
            };
            let resize_cb = {
                let state_ref = state_ref.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let (width, height) = viewport_size();
                    state_ref.borrow().dispatch(GameAction::Resize { width, height });
                }) as Box<dyn FnMut(_)>)
            };
            let _ = window.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback("touchstart", touch_cb.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

            move || {
                let _ = window.remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback("touchstart", touch_cb.as_ref().unchecked_ref());
                let _ = window.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window.cancel_animation_frame(id);
                }
                raf_cell.borrow_mut().take();
                drop(pump);
            }
        });
    }

    let state = &props.state;
    let on_image_error = {
        let state = state.clone();
        let slug = state.round.as_ref().map(|r| r.slug.clone());
        Callback::from(move |_: Event| {
            if let Some(slug) = slug.clone() {
                state.dispatch(GameAction::AssetFailed { slug, now: now_ms() });
            }
        })
    };

    html! {
        <>
            <video ref={video_ref} playsinline=true
                style="position:absolute; right:12px; bottom:12px; width:200px; transform:scaleX(-1); opacity:0.55; border-radius:8px; border:1px solid #30363d;" />
            if let Some(round) = &state.round {
                <img key={round.slug.clone()} src={round.src.clone()} onerror={on_image_error} style="display:none;" alt="" />
            }
            <BoardView board={state.board.clone()} round={state.round.clone()} area={state.layout.play_area} flash={state.hit_flash()} />
            <HazardLayer obstacles={state.obstacle_rects()} />
            <WarningToast show={state.hazards.warning} hits={state.hazards.hits} hit_limit={state.hazards.hit_limit()} />
            <Pointer at={state.pointer} size={state.cursor_size()} visible={state.hand_visible} />
        </>
    }
}
