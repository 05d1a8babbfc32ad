use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score: i64,
    /// Fraction of the current picture in place, `0..=1`.
    pub progress: f64,
    pub placed: usize,
    pub total: usize,
    pub hits: u32,
    pub hit_limit: u32,
    pub round_label: Option<String>,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style = "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let pct = props.progress * 100.0;
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px; pointer-events:none;">
            if let Some(label) = &props.round_label {
                <div style="font-size:12px; opacity:0.7;">{ label.clone() }</div>
            }
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", icon_style)}>{"★"}</span>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", icon_style)}>{"▦"}</span>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Pieces"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format!("{}/{}", props.placed, props.total) }</span>
            </div>
            <div style="height:6px; background:#21262d; border-radius:3px; overflow:hidden;">
                <div style={format!("height:100%; width:{:.0}%; background:#58a6ff; transition:width 0.3s;", pct)} />
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#f85149;", icon_style)}>{"❤"}</span>
                <span style={format!("{} color:#f85149;", label_style)}>{"Hits"}</span>
                <span style={format!("{} color:#f85149;", value_style)}>{ format!("{}/{}", props.hits, props.hit_limit) }</span>
            </div>
        </div>
    }
}
