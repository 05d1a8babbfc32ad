use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub secs: u64,
    pub running: bool,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let color = if props.running { "#c9d1d9" } else { "#8b949e" };
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; align-items:center; gap:6px; pointer-events:none;">
        <div style={format!("font-size:20px; font-weight:600; color:{};", color)}>{ format!("Time: {}", format_time(props.secs)) }</div>
    </div>}
}
