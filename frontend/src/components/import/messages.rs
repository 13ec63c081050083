use common::error::ApiError;
use common::jobs::poller::{PollEvent, PollExit};
use common::jobs::SubmitResponse;

pub enum Msg {
    OpenFilePicker,
    FileChosen(web_sys::File),
    /// Drag hover over the drop zone started (`true`) or ended.
    Dragging(bool),
    ToggleAsync(bool),
    Submit,
    Submitted {
        attempt: u64,
        result: Result<SubmitResponse, ApiError>,
    },
    Poll {
        job_id: String,
        event: PollEvent,
    },
    PollEnded {
        job_id: String,
        exit: PollExit,
    },
    /// Fired by the timer scheduled after a successful import.
    AutoClose,
    Close,
    DismissError,
}
