use entity::{Directory, Employee};
use tracing::debug;

/// Maps a route slug onto a directory entry.
#[derive(Clone, Copy, Debug)]
pub struct SlugResolver<'a> {
    directory: &'a Directory,
}

impl<'a> SlugResolver<'a> {
    pub fn new(directory: &'a Directory) -> Self {
        Self { directory }
    }

    /// Absent, empty and unknown slugs all resolve to `None`.
    pub fn resolve(&self, route_slug: Option<&str>) -> Option<&'a Employee> {
        let slug = route_slug.filter(|slug| !slug.is_empty())?;
        let found = self.directory.find(slug);
        if found.is_none() {
            debug!(slug, "no employee for slug");
        }
        found
    }

    /// Like [`resolve`](Self::resolve), using `fallback` when the route carries no slug.
    pub fn resolve_or(
        &self,
        route_slug: Option<&str>,
        fallback: Option<&str>,
    ) -> Option<&'a Employee> {
        match route_slug.filter(|slug| !slug.is_empty()) {
            Some(slug) => self.resolve(Some(slug)),
            None => self.resolve(fallback),
        }
    }
}
