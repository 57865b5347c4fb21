//! Declare serverless stacks in rust and synthesize them to cloudformation.
//!
//! ```no_run
//! use cdkstarter::{App, CfnOutput, StackProps};
//! use cdkstarter::resources::{NodejsFunction, NodejsFunctionProps};
//!
//! fn main() -> cdkstarter::Result<()> {
//!     let mut app = App::new();
//!     let stack = app.add_stack("HelloStack", StackProps::default())?;
//!     let function = NodejsFunction::new(stack, "MyFunction", NodejsFunctionProps::default())?;
//!     stack.add_output("FunctionArn", CfnOutput::new(function.function_arn()))?;
//!     app.synth()?;
//!     Ok(())
//! }
//! ```

mod app;
pub use app::*;
mod error;
pub use error::*;
mod stack;
pub use stack::*;
mod template;
pub use template::*;

pub mod logging;
pub mod names;
pub mod regions;
pub mod resources;
