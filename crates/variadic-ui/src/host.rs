//! A minimal host: one flattener, one renderer, counted render passes.

use std::cell::Cell;

use crate::flatten::{Flattener, HostConfig, HostFlattener};
use crate::renderer::{RecordedRenderScene, Renderer};
use crate::variadic::VariadicCollection;
use crate::view::View;

#[derive(Debug, Default)]
pub struct Host {
    flattener: HostFlattener,
    passes: Cell<u64>,
}

impl Host {
    pub fn new(config: HostConfig) -> Self {
        Self {
            flattener: HostFlattener::with_config(config),
            passes: Cell::new(0),
        }
    }

    /// A host configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(HostConfig::from_env())
    }

    pub fn flattener(&self) -> &HostFlattener {
        &self.flattener
    }

    /// Runs one render pass over `root`.
    pub fn render(&self, root: &View) -> RecordedRenderScene {
        let pass = self.passes.get() + 1;
        self.passes.set(pass);
        log::debug!("render pass {pass}");
        Renderer::new(&self.flattener).render(root)
    }

    /// Flattens `source` the way a variadic adapter would.
    pub fn collect(&self, source: &View) -> VariadicCollection {
        VariadicCollection::new(self.flattener.flatten(source))
    }

    pub fn render_passes(&self) -> u64 {
        self.passes.get()
    }
}
