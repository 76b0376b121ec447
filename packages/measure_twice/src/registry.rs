//! Optional announcement of this package to a host registry.
//!
//! Some host environments keep a registry of the tools loaded into them. Registration is
//! never automatic: call [`register()`] explicitly if the host wants to know.

use tracing::debug;

/// Name and version of a registered component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScriptInfo {
    name: &'static str,
    version: &'static str,
}

impl ScriptInfo {
    /// Describes this package.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Name of the component.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Version of the component.
    #[must_use]
    pub const fn version(&self) -> &'static str {
        self.version
    }
}

/// A host registry that components can announce themselves to.
pub trait Registry {
    /// Records that the described component is present.
    fn enter(&mut self, script: ScriptInfo);
}

impl Registry for Vec<ScriptInfo> {
    fn enter(&mut self, script: ScriptInfo) {
        self.push(script);
    }
}

/// Announces this package to `registry`.
pub fn register(registry: &mut impl Registry) {
    let script = ScriptInfo::current();

    debug!(name = script.name(), version = script.version(), "registering");

    registry.enter(script);
}
