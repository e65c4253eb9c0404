//! Application state lent to handlers.

use signpost_dispatch::{NotFoundContext, RouteContext};

use crate::log::Logger;
use crate::options::Options;
use crate::view::View;

/// The collaborators every handler can reach: options, logger and view.
#[derive(Debug)]
pub struct AppState {
    pub(crate) options: Options,
    pub(crate) logger: Logger,
    pub(crate) view: View,
}

impl AppState {
    pub fn new(options: Options, logger: Logger, view: View) -> Self {
        Self {
            options,
            logger,
            view,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut Logger {
        &mut self.logger
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
}

/// Shorthand accessors on handler contexts.
///
/// ```rust
/// use signpost::{App, StateExt};
///
/// let mut app = App::new();
/// app.always(|ctx| {
///     ctx.logger().debug("always");
///     ctx.view_mut().set("seen", true)?;
///     Ok(())
/// });
/// ```
pub trait StateExt {
    fn state(&self) -> &AppState;
    fn state_mut(&mut self) -> &mut AppState;

    fn options(&self) -> &Options {
        &self.state().options
    }

    fn logger(&self) -> &Logger {
        &self.state().logger
    }

    fn view(&self) -> &View {
        &self.state().view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.state_mut().view
    }
}

impl StateExt for RouteContext<'_, AppState> {
    fn state(&self) -> &AppState {
        self.app_state()
    }

    fn state_mut(&mut self) -> &mut AppState {
        self.app_state_mut()
    }
}

impl StateExt for NotFoundContext<'_, AppState> {
    fn state(&self) -> &AppState {
        self.app_state()
    }

    fn state_mut(&mut self) -> &mut AppState {
        self.app_state_mut()
    }
}
