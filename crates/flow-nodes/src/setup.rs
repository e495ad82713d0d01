//! Registry setup for hosts.
//!
//! Hosts call [`builtin_registry`] at startup to get every built-in
//! component and may register their own on top.

use flow_graph::{ComponentRegistry, SocketRegistry};

use crate::ComponentKind;

/// Registry holding every built-in component
///
/// # Example
///
/// ```ignore
/// let mut components = flow_nodes::builtin_registry();
/// components.register(host_component);
/// ```
pub fn builtin_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for kind in ComponentKind::all() {
        registry.register(kind.metadata());
    }
    log::debug!("Registered {} built-in components", registry.len());
    registry
}

/// Socket registry matching the built-in components
pub fn builtin_sockets() -> SocketRegistry {
    SocketRegistry::standard()
}
