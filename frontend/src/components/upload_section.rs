use super::super::{Model, Msg};
use super::utils::first_accepted_file;
use shared::accept_attribute;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let handle_change = ctx.link().callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let selected = match input.files() {
            Some(files) => first_accepted_file(&files),
            None => Err("No file selected.".to_string()),
        };

        input.set_value("");

        match selected {
            Ok(file) => Msg::FileSelected(file),
            Err(error) => Msg::SetError(error),
        }
    });

    html! {
        <div class="upload-section">
            <label for="file-input" class="upload-label">{"Upload an image"}</label>
            <input
                type="file"
                id="file-input"
                accept={accept_attribute()}
                onchange={handle_change}
                disabled={model.run.is_loading()}
            />
            <p class="file-types">{"Supported formats: JPG, JPEG, PNG"}</p>
        </div>
    }
}
