//! Click-through navigation from markers

use tracing::debug;

use crate::marker::Marker;

/// Performs the client-side route change for an activated marker
pub trait Navigator {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, route: &str) {
        self(route)
    }
}

/// Activate a marker (click or popup link). This is the renderer's only side effect.
pub fn activate(marker: &Marker, navigator: &dyn Navigator) {
    debug!(site_id = %marker.site_id, route = %marker.route, "marker activated");
    navigator.navigate(&marker.route);
}
