//! Collapsible four-step timeline shown above an assistant answer.

#[cfg(test)]
#[path = "thinking_process_test.rs"]
mod thinking_process_test;

use chat::timeline::{self, StepStatus, ThinkingStep};
use leptos::prelude::*;

use crate::app::Ticker;

fn status_glyph(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "○",
        StepStatus::Running => "◌",
        StepStatus::Done => "✓",
        StepStatus::Error => "!",
    }
}

fn status_class(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "thinking__step thinking__step--pending",
        StepStatus::Running => "thinking__step thinking__step--running",
        StepStatus::Done => "thinking__step thinking__step--done",
        StepStatus::Error => "thinking__step thinking__step--error",
    }
}

/// Duration label for a step, empty until it has started.
fn step_duration(step: &ThinkingStep, now_ms: i64) -> String {
    timeline::elapsed_ms(step, now_ms).map(timeline::format_duration).unwrap_or_default()
}

#[component]
pub fn ThinkingProcess(steps: Vec<ThinkingStep>, streaming: bool, expanded: RwSignal<bool>) -> impl IntoView {
    let now = expect_context::<Ticker>().0;
    let headline = timeline::headline(&steps, streaming);
    let all_done = !streaming && steps.iter().all(|s| s.status == StepStatus::Done);

    view! {
        <div class="thinking">
            <div class="thinking__header" on:click=move |_| expanded.update(|e| *e = !*e)>
                <span class="thinking__indicator" class:thinking__indicator--spinning=streaming>
                    {if streaming { "◌" } else { "✓" }}
                </span>
                <span class="thinking__headline">{headline}</span>
                <span class="thinking__arrow" class:thinking__arrow--up=move || expanded.get()>"▾"</span>
            </div>
            <Show when=move || expanded.get()>
                <div class="thinking__steps">
                    {steps
                        .clone()
                        .into_iter()
                        .map(|step| {
                            let duration_step = step.clone();
                            view! {
                                <div class=status_class(step.status)>
                                    <span class="thinking__icon">{status_glyph(step.status)}</span>
                                    <div class="thinking__body">
                                        <div class="thinking__label">{step.label.clone()}</div>
                                        {step
                                            .detail
                                            .clone()
                                            .map(|detail| view! { <div class="thinking__detail">{detail}</div> })}
                                    </div>
                                    <span class="thinking__time">
                                        {move || step_duration(&duration_step, now.get())}
                                    </span>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </Show>
            <Show when=move || all_done && !expanded.get()>
                <div class="thinking__hint">"Click to show the steps"</div>
            </Show>
        </div>
    }
}
