mod dispatch;
pub use dispatch::{dispatch, DispatchError, DispatchReceipt, JobInputs};

mod tracker;
pub use tracker::{
    poll_status, CancelToken, PollError, RunInfo, RunRef, RunState, RunTracker, StatusReply,
    TrackOutcome, TrackerUpdate, POLL_INTERVAL_MS, SETTLE_DELAY_MS, SUCCESS_CONCLUSION,
    TRACK_DEADLINE_MS,
};
