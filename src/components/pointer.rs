use crate::model::{Point, Size};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PointerProps {
    pub at: Point,
    pub size: Size,
    pub visible: bool,
}

#[function_component]
pub fn Pointer(props: &PointerProps) -> Html {
    let opacity = if props.visible { 1.0 } else { 0.25 };
    html! {
        <div style={format!(
            "position:fixed; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px; border-radius:50%; border:3px solid #f0f6fc; background:rgba(88,166,255,0.35); opacity:{}; pointer-events:none; z-index:50;",
            props.at.x, props.at.y, props.size.width, props.size.height, opacity
        )} />
    }
}
