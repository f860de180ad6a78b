pub mod prelude;

pub mod flow_log;
