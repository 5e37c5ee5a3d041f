use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    let Some(file_data) = &model.file else {
        return html! {};
    };

    html! {
        <div id="preview-container">
            <details class="full-size-viewer">
                <summary>{"Click to view the full-size image"}</summary>
                <figure>
                    <img src={file_data.full_url.to_string()} alt={file_data.file.name()} style="width: 100%;" />
                    <figcaption>{"Uploaded image (full size)"}</figcaption>
                </figure>
            </details>
            { render_half_scale_preview(model) }
        </div>
    }
}

fn render_half_scale_preview(model: &Model) -> Html {
    match &model.response {
        Some(response) => {
            let preview = &response.preview;
            html! {
                <figure class="half-scale-preview">
                    <img
                        id="actual-image-preview"
                        src={preview.data_url.clone()}
                        width={preview.preview_width.to_string()}
                        height={preview.preview_height.to_string()}
                        alt="Image preview" />
                    <figcaption>
                        { format!("Uploaded image (preview, {}x{} of {}x{})",
                            preview.preview_width, preview.preview_height,
                            preview.width, preview.height) }
                    </figcaption>
                </figure>
            }
        }
        None if model.run.is_loading() => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p>{"Loading preview..."}</p>
            </div>
        },
        None => html! {},
    }
}
