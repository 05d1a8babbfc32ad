use crate::catalog::RoundImage;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RoundOverlayProps {
    /// The finished picture and its fact while the interlude is shown.
    pub interlude: Option<(RoundImage, String)>,
}

#[function_component]
pub fn RoundOverlay(props: &RoundOverlayProps) -> Html {
    let Some((round, fact)) = &props.interlude else {
        return html! {};
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.88); border:2px solid #3fb950; padding:24px 32px; border-radius:12px; text-align:center; max-width:560px; width:90%; z-index:30;">
            <h2 style="margin:0 0 12px 0; color:#3fb950;">{ format!("{} complete!", round.label) }</h2>
            <img src={round.src.clone()} alt={round.label.clone()} style="width:220px; height:220px; object-fit:cover; border-radius:8px;" />
            <p style="margin:12px 0 0 0;">{ fact.clone() }</p>
        </div>
    }
}
