#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::supervisor::MockSupervisor;
#[cfg(test)]
use crate::ui::theme::Theme;

#[cfg(test)]
pub fn create_test_app() -> App {
    App::new(
        Arc::new(MockSupervisor::new(Duration::ZERO)),
        Theme::dark_default(),
        true,
    )
}
