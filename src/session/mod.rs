//! RB-009: Session (two-step startup and the user event loop).
//!
//! Startup loads the page skeleton, then the catalog; either failure is
//! fatal. After that every event runs to completion before the next is
//! read. Rejected actions produce a notice and leave the view as it was.

pub mod event;

use crate::core::catalog::load_catalog_file;
use crate::core::config::BookConfig;
use crate::core::engine::Engine;
use crate::core::error::{Error, Result};
use crate::render::html::{load_skeleton, Skeleton};
use crate::render::Renderer;
use event::{Event, HELP};
use std::io::BufRead;
use tracing::{debug, info, warn};

/// Whether the event loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A started session: skeleton plus engine over the loaded catalog.
///
/// The skeleton is only filled by HTML renderers (`render`, or `session
/// --html`); text sessions still load it so a broken page fails at startup.
pub struct Session {
    skeleton: Skeleton,
    engine: Engine,
}

impl Session {
    /// Load the skeleton, then the catalog, then resolve the default recipe.
    pub fn start(config: &BookConfig) -> Result<Self> {
        info!(step = 1, path = %config.skeleton.display(), "loading skeleton");
        let skeleton = load_skeleton(&config.skeleton)?;

        info!(step = 2, path = %config.catalog.display(), "loading catalog");
        let catalog = load_catalog_file(&config.catalog)?;

        Self::from_parts(skeleton, Engine::new(catalog, config.image_base.clone()))
    }

    /// Assemble a session from already loaded parts. Fails on an empty catalog.
    pub fn from_parts(skeleton: Skeleton, mut engine: Engine) -> Result<Self> {
        let first = engine.effective_recipe()?;
        debug!(id = %first.id, "session ready");
        Ok(Self { skeleton, engine })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Emit navigation and detail for the current state.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let detail = self.engine.detail()?;
        renderer.render_nav(&self.engine.cards())?;
        renderer.render_detail(&detail)
    }

    /// Apply one event. Recoverable failures become notices.
    pub fn handle(&mut self, event: Event, renderer: &mut dyn Renderer) -> Result<Flow> {
        debug!(?event, "handling event");
        match event {
            Event::Select(id) => match self.engine.select_recipe(&id).map(|_| ()) {
                Ok(()) => self.render(renderer)?,
                Err(e) => self.reject(e, renderer)?,
            },
            Event::People(raw) => match self.engine.set_override(&raw) {
                Ok(_) => self.render(renderer)?,
                Err(e) => self.reject(e, renderer)?,
            },
            Event::Show => self.render(renderer)?,
            Event::List => renderer.render_nav(&self.engine.cards())?,
            Event::Reset => {
                self.engine.reset();
                self.render(renderer)?;
            }
            Event::Help => renderer.render_notice(HELP)?,
            Event::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Render once, then process input lines until EOF or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R, renderer: &mut dyn Renderer) -> Result<()> {
        self.render(renderer)?;
        for line in input.lines() {
            let line = line.map_err(|e| Error::io("cannot read input", e))?;
            let event = match Event::parse(&line) {
                None => continue,
                Some(Ok(event)) => event,
                Some(Err(unknown)) => {
                    renderer.render_notice(&unknown.to_string())?;
                    continue;
                }
            };
            if self.handle(event, renderer)? == Flow::Quit {
                break;
            }
        }
        info!("session ended");
        Ok(())
    }

    fn reject(&self, err: Error, renderer: &mut dyn Renderer) -> Result<()> {
        if !err.is_recoverable() {
            return Err(err);
        }
        warn!(error = %err, "action rejected");
        renderer.render_notice(&user_message(&err))
    }
}

/// The prompt shown for a rejected action.
pub fn user_message(err: &Error) -> String {
    match err {
        Error::InvalidQuantity { reason, .. } => {
            format!("Please enter a valid number ({}).", reason)
        }
        Error::NotFound(id) => format!("Unknown recipe '{}'.", id),
        other => other.to_string(),
    }
}
