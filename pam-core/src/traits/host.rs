//! Host process integration traits
//!
//! The host owns configuration, command dispatch, and user-visible output;
//! the planner consumes those services through the traits below.

/// Read-only accessor over the planner's configuration section
pub trait ConfigSource {
    /// Float option, falling back to `default` when absent
    fn get_float(&self, name: &str, default: f32) -> f32;

    /// Integer option, falling back to `default` when absent
    fn get_int(&self, name: &str, default: i32) -> i32;

    /// Boolean option, falling back to `default` when absent
    fn get_bool(&self, name: &str, default: bool) -> bool;

    /// String option, falling back to `default` when absent
    fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str;
}

/// Registration surface of the host's command/event dispatcher
pub trait CommandRegistry {
    /// Register a user-invocable command with its help text
    fn register_command(&mut self, name: &'static str, help: &'static str);

    /// Subscribe to a host lifecycle event
    fn register_event_handler(&mut self, event: &'static str);
}

/// Sink for user-visible response text
pub trait GcodeResponder {
    /// Emit one line of response text to the user
    fn respond(&mut self, msg: &str);
}
