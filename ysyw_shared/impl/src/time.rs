use chrono::{DateTime, Utc};
use ysyw_di::Build;
use ysyw_shared_contracts::time::TimeService;
use ysyw_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
