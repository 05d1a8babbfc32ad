use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub hand_visible: bool,
    pub start: Callback<()>,
}

/// Start menu. The button is pressed with an air tap like everything else.
#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let start_cb = props.start.clone();
    let start_btn = Callback::from(move |_| start_cb.emit(()));
    let hand_hint = if props.hand_visible { "Hand found. Point at Start and tap." } else { "Show one hand to the camera." };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:16px; line-height:1.4; z-index:30;">
            <h2 style="margin:0 0 12px 0; font-size:26px; color:#58a6ff; text-align:center;">{"Hand Puzzle"}</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{"Put the picture back together with your finger."}</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Your index finger moves the pointer."}</li>
                <li>{"A piece follows your finger. Bring it to the glowing square."}</li>
                <li>{"Flick your finger down quickly to tap a button."}</li>
                <li>{"Stay clear of the red dots. Too many hits end the game."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={start_btn} style="padding:14px 40px; font-size:20px;">{"Start"}</button>
            </div>
            <div style="margin-top:12px; font-size:12px; opacity:0.6; text-align:center;">{ hand_hint }</div>
        </div>
    }
}
