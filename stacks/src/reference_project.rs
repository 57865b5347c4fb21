//! Function with its own log group, pinned to node 22.

use cdkstarter::resources::Runtime;
use cdkstarter::{App, Result, Stack, StackProps};

pub const STACK_ID: &str = "ReferenceProjectStack";
pub const RUNTIME: Runtime = Runtime::Nodejs22x;
pub const FUNCTION_NAME: &str = "ReferenceProjectFunction";

pub fn reference_project_stack<'a>(scope: &'a mut App, id: &str, props: StackProps) -> Result<&'a mut Stack> {
    crate::function_stack_with_logs(scope, id, props, RUNTIME, FUNCTION_NAME)
}
