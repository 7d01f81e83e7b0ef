pub mod chart;
pub mod dashboard;
pub mod news;
pub mod setup;
pub mod stock;
pub mod ui;
pub mod watch;
pub mod weather;

use crate::core::resource::ResourceState;

/// Renders a panel in any of its three states.
pub fn render_state<T>(title: &str, state: &ResourceState<T>, render: impl Fn(&T) -> String) -> String {
    match state {
        ResourceState::Loading => format!(
            "{}\n{}\n",
            ui::style_text(title, ui::StyleType::Title),
            ui::style_text("Loading...", ui::StyleType::Subtle)
        ),
        ResourceState::Error(message) => format!(
            "{}\n{}\n",
            ui::style_text(title, ui::StyleType::Title),
            ui::style_text(message, ui::StyleType::Error)
        ),
        ResourceState::Ready(view) => render(view),
    }
}
