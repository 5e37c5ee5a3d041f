mod api;
mod components;
mod run_state;

use components::header::render_header;
use components::mode_selector::render_mode_selector;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::{File as GlooFile, ObjectUrl};
use run_state::{RunResult, RunState};
use shared::{AnalysisMode, AnalyzeResponse};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

// Models
struct FileData {
    file: GlooFile,
    full_url: ObjectUrl,
}

// Yew msg components
enum Msg {
    FileSelected(GlooFile),
    SetMode(AnalysisMode),
    AnalysisFinished(u64, Result<AnalyzeResponse, String>),
    SetError(String),
}

// Every interaction re-derives the view from (uploaded file, selected mode);
// nothing else is carried between runs.
struct Model {
    file: Option<FileData>,
    mode: AnalysisMode,
    response: Option<AnalyzeResponse>,
    run: RunState,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            file: None,
            mode: AnalysisMode::default(),
            response: None,
            run: RunState::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => self.handle_file_selected(ctx, file),
            Msg::SetMode(mode) => self.handle_set_mode(ctx, mode),
            Msg::AnalysisFinished(run_id, result) => self.handle_analysis_finished(run_id, result),
            Msg::SetError(error) => {
                self.run.reject(error);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self) }
                    { render_preview_area(self) }
                    { render_mode_selector(self, ctx) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Image analysis with OCI Vision | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

// Handler methods
impl Model {
    fn handle_file_selected(&mut self, ctx: &Context<Self>, file: GlooFile) -> bool {
        let full_url = ObjectUrl::from(file.clone());
        self.file = Some(FileData { file, full_url });
        self.mode = AnalysisMode::default();
        self.response = None;
        self.run_analysis(ctx);
        true
    }

    fn handle_set_mode(&mut self, ctx: &Context<Self>, mode: AnalysisMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.run_analysis(ctx);
        true
    }

    fn handle_analysis_finished(
        &mut self,
        run_id: u64,
        result: Result<AnalyzeResponse, String>,
    ) -> bool {
        match self.run.finish(run_id, result) {
            RunResult::Stale => false,
            RunResult::Completed(response) => {
                self.response = Some(response);
                true
            }
            RunResult::Failed => {
                self.response = None;
                true
            }
        }
    }

    fn run_analysis(&mut self, ctx: &Context<Self>) {
        let Some(file_data) = &self.file else {
            return;
        };

        let run_id = self.run.begin();
        let file = file_data.file.clone();
        let mode = self.mode;
        let link = ctx.link().clone();

        log::info!("Analyzing {} with {}", file.name(), mode.label());
        spawn_local(async move {
            let result = api::analyze(&file, mode).await;
            link.send_message(Msg::AnalysisFinished(run_id, result));
        });
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
