use crate::engine::Phase;
use crate::model::{LossReason, Outcome};
use crate::share::{ShareTarget, open_share};
use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub phase: Phase,
    pub time_secs: u64,
    pub score: i64,
    pub rounds_completed: u32,
    pub restart: Callback<()>,
}

fn reload_page() {
    if let Some(win) = web_sys::window() {
        let _ = win.location().reload();
    }
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    let (title, color, detail) = match &props.phase {
        Phase::Over(Outcome::Won) => ("You did it!", "#3fb950", "Every picture is back together."),
        Phase::Over(Outcome::Lost(LossReason::Hazards)) => ("Game Over", "#f85149", "Too many hits."),
        Phase::Over(Outcome::Lost(LossReason::Idle)) | Phase::IdleStopped => {
            ("Are you still there?", "#d29922", "The game stopped and will restart shortly.")
        }
        Phase::Over(Outcome::Lost(LossReason::Assets)) => ("Game Over", "#f85149", "The pictures could not be loaded."),
        Phase::Unavailable(_) => ("Camera unavailable", "#f85149", "Allow camera access and reload the page."),
        _ => return html! {},
    };
    let unavailable = matches!(props.phase, Phase::Unavailable(_));
    let restart_cb = props.restart.clone();
    let button = if unavailable {
        html! { <button onclick={Callback::from(|_| reload_page())}>{"Reload"}</button> }
    } else if props.phase == Phase::IdleStopped {
        html! {}
    } else {
        html! { <button onclick={Callback::from(move |_| restart_cb.emit(()))} style="padding:12px 32px; font-size:18px;">{"Play again"}</button> }
    };
    let shares = if props.phase == Phase::Over(Outcome::Won) {
        let (secs, score) = (props.time_secs, props.score);
        html! {
            <>
                { for [ShareTarget::Facebook, ShareTarget::Twitter].into_iter().map(|target| html! {
                    <button onclick={Callback::from(move |_| open_share(target, secs, score))} style="padding:12px 16px; background:#1f6feb;">
                        { target.label() }
                    </button>
                }) }
            </>
        }
    } else {
        html! {}
    };
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid {}; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px; z-index:40;", color)}>
            <h2 style={format!("margin:0 0 12px 0; color:{};", color)}>{ title }</h2>
            <p style="margin:4px 0;">{ detail }</p>
            if !unavailable {
                <p style="margin:4px 0;">{ format!("Time: {}", format_time(props.time_secs)) }</p>
                <p style="margin:4px 0;">{ format!("Score: {}", props.score) }</p>
                <p style="margin:4px 0;">{ format!("Pictures completed: {}", props.rounds_completed) }</p>
            }
            if let Phase::Unavailable(reason) = &props.phase {
                <p style="margin:4px 0; font-size:12px; opacity:0.6;">{ reason.clone() }</p>
            }
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                { button }
                { shares }
            </div>
        </div>
    }
}
