pub use super::flow_log::Entity as FlowLog;
