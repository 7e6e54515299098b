//! Shared API client handed to every screen through context.

use std::rc::Rc;

use crate::services::api::ApiClient;

/// Context value carrying the single backend client.
#[derive(Clone, Debug)]
pub(crate) struct ApiCtx {
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    pub(crate) fn new(base_url: String) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
