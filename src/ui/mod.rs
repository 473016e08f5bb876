//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod loading;

use crate::app::App;
use crate::state::LoadState;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match &app.state.load {
        LoadState::Loading => loading::draw(frame, main_area),
        LoadState::Ready(engine) => forms::draw_form(frame, main_area, engine, &app.state.cursor),
        LoadState::Failed(message) => components::render_error_dialog(frame, message),
    }

    layout::draw_status_bar(frame, status_area, app);
}
