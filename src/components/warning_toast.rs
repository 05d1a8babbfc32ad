use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct WarningToastProps {
    pub show: bool,
    pub hits: u32,
    pub hit_limit: u32,
}

#[function_component]
pub fn WarningToast(props: &WarningToastProps) -> Html {
    if !props.show {
        return html! {};
    }
    let left = props.hit_limit.saturating_sub(props.hits);
    html! {
        <div style="position:absolute; top:64px; left:50%; transform:translateX(-50%); background:rgba(248,81,73,0.92); color:#fff; padding:10px 18px; border-radius:10px; font-weight:600; pointer-events:none; z-index:20;">
            { format!("Watch out! {} more hit{} and the game is over.", left, if left == 1 { "" } else { "s" }) }
        </div>
    }
}
