use super::super::{Model, Msg};
use shared::{AnalysisMode, IntoEnumIterator};
use std::str::FromStr;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

pub fn render_mode_selector(model: &Model, ctx: &Context<Model>) -> Html {
    if model.file.is_none() {
        return html! {};
    }

    let handle_change = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let value = select.value();
        match AnalysisMode::from_str(&value) {
            Ok(mode) => Msg::SetMode(mode),
            Err(_) => Msg::SetError(format!("Unknown analysis mode: {}", value)),
        }
    });

    html! {
        <div class="processing-mode-selector">
            <h3>{"Select the analysis service"}</h3>
            <select id="mode-select" onchange={handle_change} disabled={model.run.is_loading()}>
                { for AnalysisMode::iter().map(|mode| html! {
                    <option value={mode.as_ref().to_string()} selected={model.mode == mode}>
                        { mode.label() }
                    </option>
                })}
            </select>
        </div>
    }
}
