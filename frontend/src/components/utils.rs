use super::super::Model;
use gloo_file::File as GlooFile;
use shared::accepted_extension;
use web_sys::FileList;
use yew::prelude::*;

pub fn first_accepted_file(file_list: &FileList) -> Result<GlooFile, String> {
    let file = file_list
        .item(0)
        .ok_or_else(|| "No file selected.".to_string())?;

    if accepted_extension(&file.name()).is_none() {
        log::warn!("Rejected upload: {}", file.name());
        return Err(format!(
            "{} is not a supported image. Use JPG, JPEG or PNG.",
            file.name()
        ));
    }

    Ok(GlooFile::from(file))
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = model.run.error() {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}
