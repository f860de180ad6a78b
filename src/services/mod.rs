pub mod context;
pub use context::{ANONYMOUS_ACTOR, NoRequest, RequestContext, RequestInfo};

pub mod flow_log;
pub use flow_log::{FlowLog, LogError};

pub mod render;
pub use render::render_entries;
