use std::sync::Arc;

use routing::RouteTable;
use server_api::{routes::Page, ApiContext};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) routes: Arc<RouteTable<Page>>,
    pub(crate) base_path: String,
    pub(crate) default_page_size: Option<usize>,
}

impl AppState {
    /// Path relative to the mount point, or `None` when the request falls
    /// outside it.
    pub(crate) fn local_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base_path.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.base_path.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    pub(crate) fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }
}
