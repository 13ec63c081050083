use common::jobs::poller::JobPoller;
use common::jobs::session::ImportSession;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ImportModalProps {
    pub api: ApiClient,
    pub is_open: bool,
    pub on_close: Callback<()>,
    /// Emitted once per completed import, before the modal closes itself.
    pub on_success: Callback<()>,
}

pub struct ImportModal {
    pub api: ApiClient,
    pub session: ImportSession,
    /// Browser handle of the file recorded in `session`.
    pub file: Option<web_sys::File>,
    pub poller: JobPoller,
    /// Pending auto-close. Dropping the timeout cancels it.
    pub close_timer: Option<Timeout>,
    pub file_input_ref: NodeRef,
    pub dragging: bool,
}

impl ImportModal {
    pub fn new(props: &ImportModalProps) -> Self {
        Self {
            api: props.api.clone(),
            session: ImportSession::new(),
            file: None,
            poller: JobPoller::default(),
            close_timer: None,
            file_input_ref: NodeRef::default(),
            dragging: false,
        }
    }

    /// Fresh cycle; nothing of a previous job survives.
    pub fn reopen(&mut self) {
        self.poller.stop();
        self.close_timer = None;
        self.file = None;
        self.dragging = false;
        self.session.reopen();
    }
}
