use crate::model::Rect;
use crate::state::ObstacleKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HazardLayerProps {
    pub obstacles: Vec<(u32, ObstacleKind, Rect)>,
}

#[function_component]
pub fn HazardLayer(props: &HazardLayerProps) -> Html {
    html! {
        <div style="position:absolute; inset:0; pointer-events:none;">
            { for props.obstacles.iter().map(|(id, kind, r)| {
                // Transient ones only drift past; they never collide.
                let look = match kind {
                    ObstacleKind::Persistent => "background:radial-gradient(circle, #f85149 0%, #8b1d18 70%); opacity:0.95;",
                    ObstacleKind::Transient => "background:radial-gradient(circle, #d29922 0%, #6e4b0c 70%); opacity:0.6;",
                };
                html! {
                    <div key={*id} style={format!(
                        "position:absolute; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px; border-radius:50%; {}",
                        r.x, r.y, r.width, r.height, look
                    )} />
                }
            }) }
        </div>
    }
}
