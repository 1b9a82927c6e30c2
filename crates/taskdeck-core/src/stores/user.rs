use crate::api::ApiClient;
use crate::models::UserProfile;

use super::failure_message;

const LOAD_ERROR: &str = "Could not load your profile.";

pub struct UserStore {
    api: ApiClient,
    pub me: Option<UserProfile>,
    pub error: Option<String>,
}

impl UserStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            me: None,
            error: None,
        }
    }

    pub async fn load_me(&mut self) {
        self.error = None;
        match self.api.fetch_me().await {
            Ok(me) => self.me = Some(me),
            Err(e) => self.error = Some(failure_message("load_me", &e, LOAD_ERROR)),
        }
    }

    pub fn reset(&mut self) {
        self.me = None;
        self.error = None;
    }
}
