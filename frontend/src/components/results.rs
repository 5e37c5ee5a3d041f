use super::super::Model;
use shared::{AnalysisOutcome, ReportBody};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    if model.run.is_loading() {
        return html! {
            <div class="results-container">
                <p><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</p>
            </div>
        };
    }

    let Some(response) = &model.response else {
        return html! {};
    };

    match &response.outcome {
        AnalysisOutcome::Report(report) => html! {
            <div class="results-container">
                <h2>{ &report.heading }</h2>
                {
                    match &report.body {
                        ReportBody::Items { lines } => html! {
                            <ul class="result-lines">
                                { for lines.iter().map(|line| html! { <li>{ line }</li> }) }
                            </ul>
                        },
                        ReportBody::Empty { message } => html! {
                            <p class="info-message">
                                <i class="fa-solid fa-circle-info"></i>{ format!(" {}", message) }
                            </p>
                        },
                    }
                }
            </div>
        },
        AnalysisOutcome::Failed { message } => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        },
    }
}
